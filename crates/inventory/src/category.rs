//! Category sources: a closed list of part families, or free text.

use stockelec_core::{DomainError, DomainResult};

/// Part families stocked by the shop, in display order.
pub const DEFAULT_CATEGORIES: [&str; 18] = [
    "capteur",
    "switch",
    "bobine",
    "solenoide",
    "bouton poussoire",
    "demarreur",
    "alternateur",
    "lampe",
    "parabole",
    "klaxon",
    "avertisseur MA",
    "fusible",
    "cable",
    "cosse +",
    "cosse -",
    "ecm",
    "tableau",
    "divers",
];

/// Decides which category labels a submission may carry.
pub trait CategorySource: Send + Sync + core::fmt::Debug {
    /// Accept or reject a category label.
    fn check(&self, category: &str) -> DomainResult<()>;

    /// The selectable labels, or `None` when any label is accepted.
    fn choices(&self) -> Option<&[String]>;
}

/// Closed set; matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCategories {
    labels: Vec<String>,
}

impl FixedCategories {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FixedCategories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

impl CategorySource for FixedCategories {
    fn check(&self, category: &str) -> DomainResult<()> {
        if self.labels.iter().any(|l| l == category) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown category {category:?}")))
        }
    }

    fn choices(&self) -> Option<&[String]> {
        Some(&self.labels)
    }
}

/// Open set: any non-empty label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreeTextCategories;

impl CategorySource for FreeTextCategories {
    fn check(&self, category: &str) -> DomainResult<()> {
        if category.is_empty() {
            return Err(DomainError::validation("category is required"));
        }
        Ok(())
    }

    fn choices(&self) -> Option<&[String]> {
        None
    }
}
