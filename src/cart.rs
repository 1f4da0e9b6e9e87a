//! Cart builder — candidate lines before materialization
//!
//! A cart accumulates lines keyed by `(menu_item_id, spice_level,
//! note)`: two lines for the same dish with different spice levels or
//! notes are genuinely distinct kitchen tickets, so only exact key
//! matches merge (by incrementing quantity). Submission materializes
//! the whole cart into exactly one pending order or fails leaving the
//! cart untouched.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::db::models::OrderLine;
use crate::utils::AppError;

/// One submitted cart line (name and price are client-side snapshots of
/// the menu at ordering time)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CartLine {
    pub menu_item_id: String,
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    pub unit_price: Decimal,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    /// 0 (not spicy) to 3 (extra hot)
    #[validate(range(min = 0, max = 3, message = "spice level must be 0-3"))]
    #[serde(default)]
    pub spice_level: i32,
    #[serde(default)]
    pub note: String,
}

impl CartLine {
    /// Line-identity key: same dish with a different spice level or
    /// note is a different kitchen ticket
    fn merge_key(&self) -> (&str, i32, &str) {
        (&self.menu_item_id, self.spice_level, &self.note)
    }
}

/// Client-local accumulator of candidate order lines
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line, merging with an existing line of the same identity
    /// key by incrementing quantity
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.merge_key() == line.merge_key())
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }

    /// Freeze the cart into order line snapshots.
    ///
    /// Fails with `EmptyCart` on an empty cart; table resolution is the
    /// caller's precondition (`UnresolvedTable`).
    pub fn into_order_lines(self) -> Result<Vec<OrderLine>, AppError> {
        if self.lines.is_empty() {
            return Err(AppError::EmptyCart);
        }
        Ok(self
            .lines
            .into_iter()
            .map(|l| OrderLine {
                menu_item_id: l.menu_item_id,
                name: l.name,
                quantity: l.quantity,
                unit_price: l.unit_price,
                spice_level: l.spice_level,
                note: l.note,
            })
            .collect())
    }
}
