use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Summary figures over the whole store, filters ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Sum of quantities, widened so it cannot overflow.
    pub total_items: u128,
    pub low_stock_count: usize,
    /// Distinct category labels, compared exactly.
    pub category_count: usize,
}

impl Stats {
    /// Recomputed from scratch on every call.
    pub fn compute(items: &[InventoryItem]) -> Self {
        let total_items = items.iter().map(|i| u128::from(i.quantity())).sum();
        let low_stock_count = items.iter().filter(|i| i.is_low_stock()).count();
        let category_count = items.iter().map(InventoryItem::category).collect::<HashSet<_>>().len();

        Self {
            total_items,
            low_stock_count,
            category_count,
        }
    }
}
