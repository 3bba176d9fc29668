//! Admin list filtering and dashboard counts.

use crate::model::{Order, OrderStatus};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Case-insensitive on student name and contact handle; plain substring on card codes.
pub fn matches_term(order: &Order, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    order.student_name.to_lowercase().contains(&needle)
        || order.contact_handle().to_lowercase().contains(&needle)
        || order.card_codes().iter().any(|code| code.contains(term))
}

pub fn filter_orders(orders: &[Order], filter: StatusFilter, term: &str) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order.status) && matches_term(order, term))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(
            OrderStats {
                total: orders.len(),
                ..Default::default()
            },
            |mut stats, order| {
                match order.status {
                    OrderStatus::Pending => stats.pending += 1,
                    OrderStatus::Confirmed => stats.confirmed += 1,
                    OrderStatus::Rejected => stats.rejected += 1,
                }
                stats
            },
        )
    }
}
