//! Authentication: JWT issuing/validation and the tenant extractor

pub mod extractor;
pub mod jwt;

pub use extractor::CurrentTenant;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
