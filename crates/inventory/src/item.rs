use serde::{Deserialize, Serialize};

use stockelec_core::{DomainError, DomainResult, Entity, ItemId};

use crate::category::CategorySource;

/// A stocked part.
///
/// Fields are private: only the record store mutates an item, and only through the
/// reconciliation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    quantity: u64,
    min_quantity: u64,
    category: String,
    reference: String,
}

impl InventoryItem {
    pub(crate) fn from_payload(id: ItemId, payload: ItemPayload) -> Self {
        Self {
            id,
            name: payload.name,
            quantity: payload.quantity,
            min_quantity: payload.min_quantity,
            category: payload.category,
            reference: payload.reference,
        }
    }

    /// Overwrite every mutable field. The id is kept.
    pub(crate) fn overwrite(&mut self, payload: ItemPayload) {
        self.name = payload.name;
        self.quantity = payload.quantity;
        self.min_quantity = payload.min_quantity;
        self.category = payload.category;
        self.reference = payload.reference;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u64) {
        self.quantity = quantity;
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn min_quantity(&self) -> u64 {
        self.min_quantity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated submission: the typed fields the reconciliation engine works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub quantity: u64,
    #[serde(default)]
    pub min_quantity: u64,
    pub category: String,
    pub reference: String,
}

impl ItemPayload {
    /// Check the invariants that typed construction cannot express.
    pub fn validate(&self, categories: &dyn CategorySource) -> DomainResult<()> {
        if self.name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.reference.is_empty() {
            return Err(DomainError::validation("reference is required"));
        }
        categories.check(&self.category)
    }
}

/// Raw operator input, exactly as typed into the entry form.
///
/// Numbers are still text here; [`SubmissionForm::parse`] turns the form into an
/// [`ItemPayload`] or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub name: String,
    pub quantity: String,
    pub min_quantity: String,
    pub category: String,
    pub reference: String,
}

impl SubmissionForm {
    /// Put a decoded barcode into the reference field.
    ///
    /// The code is opaque: no format checks beyond the usual non-empty rule at parse time.
    pub fn with_scanned_reference(mut self, code: impl Into<String>) -> Self {
        self.reference = code.into();
        self
    }

    pub fn parse(&self, categories: &dyn CategorySource) -> DomainResult<ItemPayload> {
        if self.name.is_empty() || self.quantity.trim().is_empty() || self.reference.is_empty() {
            return Err(DomainError::validation("name, quantity and reference are required"));
        }

        let quantity = parse_count("quantity", &self.quantity)?;
        let min_quantity = if self.min_quantity.trim().is_empty() {
            0
        } else {
            parse_count("min_quantity", &self.min_quantity)?
        };

        let payload = ItemPayload {
            name: self.name.clone(),
            quantity,
            min_quantity,
            category: self.category.clone(),
            reference: self.reference.clone(),
        };
        payload.validate(categories)?;
        Ok(payload)
    }
}

fn parse_count(field: &str, raw: &str) -> DomainResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| DomainError::validation(format!("{field} must be a non-negative integer, got {raw:?}")))
}
