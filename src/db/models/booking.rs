//! Booking Model
//!
//! One table reservation request. Independent of orders and tables:
//! created by an unauthenticated customer, worked by staff
//! (confirm/complete/cancel) and hard-deletable for data cleanup.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Booking status
///
/// `pending → confirmed → completed`, `cancelled` from
/// `pending`/`confirmed`. Completion only happens by explicit staff
/// action, never automatically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn successors(self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Completed | BookingStatus::Cancelled => &[],
        }
    }

    pub fn valid_sources(target: BookingStatus) -> Vec<BookingStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| s.successors().contains(&target))
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub tenant: RecordId,
    pub customer_name: String,
    pub customer_phone: String,
    pub guests: i32,
    /// Calendar date `YYYY-MM-DD`
    pub date: String,
    /// Local time of day `HH:MM`
    pub time: String,
    #[serde(default)]
    pub note: String,
    pub status: BookingStatus,
    pub created_at: i64,
}

/// Public booking creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingCreate {
    #[validate(length(min = 1, max = 128, message = "customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 32, message = "customer phone is required"))]
    pub customer_phone: String,
    /// Guest count must be at least 1
    #[validate(range(min = 1, message = "guest count must be at least 1"))]
    pub guests: i32,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub note: String,
}

/// Status change request
#[derive(Debug, Clone, Deserialize)]
pub struct BookingSetStatus {
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_requires_confirmation() {
        assert!(!BookingStatus::Pending
            .successors()
            .contains(&BookingStatus::Completed));
        assert!(BookingStatus::Confirmed
            .successors()
            .contains(&BookingStatus::Completed));
    }

    #[test]
    fn cancel_from_pending_or_confirmed_only() {
        assert_eq!(
            BookingStatus::valid_sources(BookingStatus::Cancelled),
            vec![BookingStatus::Pending, BookingStatus::Confirmed]
        );
    }

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(BookingStatus::Completed.successors().is_empty());
        assert!(BookingStatus::Cancelled.successors().is_empty());
    }
}
