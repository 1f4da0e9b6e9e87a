//! Order Model
//!
//! One kitchen ticket. Created atomically from a submitted cart, line
//! items immutable from then on, status mutable only along the
//! transition table below. Orders are never deleted; cancelled orders
//! stay on record but drop out of every revenue projection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Order status
///
/// ```text
/// pending → preparing → ready → served → completed
///    └──────────┴→ cancelled
/// ```
///
/// `cancelled` is reachable only before the kitchen has committed
/// resources (`pending`/`preparing`). `completed` and `cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Served,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Statuses this one may advance to (single step, no regression)
    pub fn successors(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Ready, OrderStatus::Cancelled],
            OrderStatus::Ready => &[OrderStatus::Served],
            OrderStatus::Served => &[OrderStatus::Completed],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    /// Statuses from which `target` is a legal next step
    pub fn valid_sources(target: OrderStatus) -> Vec<OrderStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| s.successors().contains(&target))
            .collect()
    }

    pub fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish entry within an order
///
/// Name and unit price are snapshots captured at order time, not live
/// menu references — historical orders must survive menu edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Menu item id the snapshot was taken from (informational only)
    pub menu_item_id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// 0 (not spicy) to 3 (extra hot)
    pub spice_level: i32,
    #[serde(default)]
    pub note: String,
}

impl OrderLine {
    /// quantity × unit price
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order entity with embedded lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub tenant: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Table number snapshot at order time (tables may be renumbered)
    pub table_number: i32,
    #[serde(default)]
    pub note: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: i64,
}

impl Order {
    /// Monetary value of the order, computed lazily from its lines
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::total).sum()
    }
}

/// Status change request
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSetStatus {
    pub status: OrderStatus,
}

/// One revenue window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueBucket {
    pub count: i64,
    pub revenue: Decimal,
}

/// Revenue statistics over the four overlapping windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStats {
    pub today: RevenueBucket,
    pub week: RevenueBucket,
    pub month: RevenueBucket,
    pub all_time: RevenueBucket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_linear() {
        assert_eq!(
            OrderStatus::Pending.successors(),
            &[OrderStatus::Preparing, OrderStatus::Cancelled]
        );
        assert_eq!(
            OrderStatus::Preparing.successors(),
            &[OrderStatus::Ready, OrderStatus::Cancelled]
        );
        assert_eq!(OrderStatus::Ready.successors(), &[OrderStatus::Served]);
        assert_eq!(OrderStatus::Served.successors(), &[OrderStatus::Completed]);
    }

    #[test]
    fn cancel_only_before_kitchen_commit() {
        for s in [OrderStatus::Ready, OrderStatus::Served, OrderStatus::Completed] {
            assert!(
                !s.successors().contains(&OrderStatus::Cancelled),
                "{s} must not cancel"
            );
        }
        assert!(OrderStatus::Pending.successors().contains(&OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.successors().contains(&OrderStatus::Cancelled));
    }

    #[test]
    fn no_transition_regresses() {
        // No successor appears earlier in the pipeline than its source.
        let rank = |s: OrderStatus| match s {
            OrderStatus::Pending => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Served => 3,
            OrderStatus::Completed | OrderStatus::Cancelled => 4,
        };
        for s in OrderStatus::ALL {
            for t in s.successors() {
                assert!(rank(*t) > rank(s), "{s} -> {t} regresses");
            }
        }
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn valid_sources_inverts_successors() {
        assert_eq!(
            OrderStatus::valid_sources(OrderStatus::Cancelled),
            vec![OrderStatus::Pending, OrderStatus::Preparing]
        );
        assert_eq!(
            OrderStatus::valid_sources(OrderStatus::Completed),
            vec![OrderStatus::Served]
        );
        assert!(OrderStatus::valid_sources(OrderStatus::Pending).is_empty());
    }

    #[test]
    fn line_and_order_totals() {
        let line = OrderLine {
            menu_item_id: "item-1".into(),
            name: "Pad Thai".into(),
            quantity: 2,
            unit_price: Decimal::from(120),
            spice_level: 1,
            note: String::new(),
        };
        assert_eq!(line.total(), Decimal::from(240));
    }

    #[test]
    fn status_serde_is_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }
}
