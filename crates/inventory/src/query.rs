//! Query engine: composite filters over the record store.
//!
//! Bucket predicates use the exact threshold arithmetic below. They overlap: an item can
//! be both `normal` and `high`, and with `min_quantity == 0` every item is `high`.
//!
//! | level    | predicate                            |
//! |----------|--------------------------------------|
//! | `low`    | `quantity <= min_quantity`           |
//! | `normal` | `quantity > min_quantity`            |
//! | `high`   | `quantity >= min_quantity * 2`       |

use serde::{Deserialize, Serialize};

use stockelec_core::{DomainError, DomainResult};

use crate::item::InventoryItem;

/// Sentinel accepted by the category and stock-level selectors.
pub const ALL: &str = "all";

/// Single-valued stock classification, used for display tones.
///
/// Unlike the filter predicates this never overlaps: low wins, then high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockBucket {
    Low,
    Normal,
    High,
}

impl StockBucket {
    pub fn classify(item: &InventoryItem) -> Self {
        if is_low(item) {
            StockBucket::Low
        } else if is_high(item) {
            StockBucket::High
        } else {
            StockBucket::Normal
        }
    }
}

/// Stock-level selector of a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    #[default]
    All,
    Low,
    Normal,
    High,
}

impl StockLevel {
    pub fn matches(self, item: &InventoryItem) -> bool {
        match self {
            StockLevel::All => true,
            StockLevel::Low => is_low(item),
            StockLevel::Normal => item.quantity() > item.min_quantity(),
            StockLevel::High => is_high(item),
        }
    }
}

impl core::str::FromStr for StockLevel {
    type Err = DomainError;

    /// Empty and `"all"` both mean "no stock filter".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | ALL => Ok(StockLevel::All),
            "low" => Ok(StockLevel::Low),
            "normal" => Ok(StockLevel::Normal),
            "high" => Ok(StockLevel::High),
            other => Err(DomainError::validation(format!("unknown stock level {other:?}"))),
        }
    }
}

fn is_low(item: &InventoryItem) -> bool {
    item.quantity() <= item.min_quantity()
}

fn is_high(item: &InventoryItem) -> bool {
    // Widened so that `min_quantity * 2` cannot overflow.
    u128::from(item.quantity()) >= u128::from(item.min_quantity()) * 2
}

/// Raw filter as the search bar sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub search: String,
    pub category: String,
    pub stock_level: String,
}

/// Parsed filter. All active predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    search: String,
    category: Option<String>,
    stock_level: StockLevel,
}

impl ItemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parse(request: &FilterRequest) -> DomainResult<Self> {
        Ok(Self::all()
            .search(&request.search)
            .category(&request.category)
            .stock_level(request.stock_level.parse()?))
    }

    /// Case-insensitive substring over name, reference and category.
    pub fn search(mut self, text: &str) -> Self {
        self.search = text.to_lowercase();
        self
    }

    /// Exact category; empty or `"all"` disables the predicate.
    pub fn category(mut self, category: &str) -> Self {
        self.category = match category {
            "" | ALL => None,
            c => Some(c.to_string()),
        };
        self
    }

    pub fn stock_level(mut self, level: StockLevel) -> Self {
        self.stock_level = level;
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.category.is_none() && self.stock_level == StockLevel::All
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        self.matches_search(item)
            && self.category.as_deref().is_none_or(|c| item.category() == c)
            && self.stock_level.matches(item)
    }

    fn matches_search(&self, item: &InventoryItem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        [item.name(), item.reference(), item.category()]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search))
    }
}

/// Items matching `filter`, in store order.
pub fn filter<'a>(items: &'a [InventoryItem], filter: &ItemFilter) -> Vec<&'a InventoryItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}
