//! Engine configuration.
//!
//! Loaded from JSON, then overridden by `STOCKELEC_*` environment variables. Bad override
//! values are logged and ignored.

use serde::{Deserialize, Serialize};

use crate::category::{CategorySource, DEFAULT_CATEGORIES, FixedCategories, FreeTextCategories};

pub const ENV_CATEGORY_MODE: &str = "STOCKELEC_CATEGORY_MODE";
pub const ENV_CATEGORIES: &str = "STOCKELEC_CATEGORIES";
pub const ENV_REPORT_TITLE: &str = "STOCKELEC_REPORT_TITLE";

/// Whether categories come from a fixed list or are typed freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    #[default]
    Closed,
    Open,
}

impl core::str::FromStr for CategoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "closed" => Ok(Self::Closed),
            "open" => Ok(Self::Open),
            other => Err(format!("unknown category mode {other:?} (expected closed|open)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub category_mode: CategoryMode,
    pub categories: Vec<String>,
    pub report_title: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            category_mode: CategoryMode::Closed,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            report_title: "StockElec155 Inventory Report".to_string(),
        }
    }
}

impl InventoryConfig {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_CATEGORY_MODE) {
            match raw.parse() {
                Ok(mode) => self.category_mode = mode,
                Err(err) => tracing::warn!(%err, "ignoring {ENV_CATEGORY_MODE}"),
            }
        }

        if let Some(raw) = lookup(ENV_CATEGORIES) {
            let labels: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            if labels.is_empty() {
                tracing::warn!("{ENV_CATEGORIES} is empty; keeping configured categories");
            } else {
                self.categories = labels;
            }
        }

        if let Some(title) = lookup(ENV_REPORT_TITLE) {
            self.report_title = title;
        }

        self
    }

    pub fn category_source(&self) -> Box<dyn CategorySource> {
        match self.category_mode {
            CategoryMode::Closed => Box::new(FixedCategories::new(self.categories.iter().cloned())),
            CategoryMode::Open => Box::new(FreeTextCategories),
        }
    }
}
