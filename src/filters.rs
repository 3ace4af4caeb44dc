use chrono::NaiveDate;

use crate::models::{InventoryItem, StockStatus};

/// The three toolbar filter buttons above the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Low,
    Expiring,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "All" => Some(StatusFilter::All),
            "Low" => Some(StatusFilter::Low),
            "Expiring" => Some(StatusFilter::Expiring),
            _ => None,
        }
    }
}

/// Narrows a department list by free-text search and status filter.
///
/// Order-preserving and non-mutating; the text match is a case-insensitive
/// substring test against the item name only, so an empty query matches
/// everything. `Low` covers both low and out-of-stock rows.
pub fn filter_items<'a>(
    items: &'a [InventoryItem],
    query: &str,
    filter: StatusFilter,
    today: NaiveDate,
) -> Vec<&'a InventoryItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            if !item.name.to_lowercase().contains(&needle) {
                return false;
            }
            match filter {
                StatusFilter::All => true,
                StatusFilter::Low => matches!(
                    item.status(today),
                    StockStatus::LowStock | StockStatus::OutOfStock
                ),
                StatusFilter::Expiring => item.status(today) == StockStatus::Expiring,
            }
        })
        .collect()
}
