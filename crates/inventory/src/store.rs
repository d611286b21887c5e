//! Record store: the ordered, id-keyed collection of inventory items.

use stockelec_core::{DomainError, DomainResult, ItemId};

use crate::item::{InventoryItem, ItemPayload};

/// Ordered collection of items, insertion order preserved.
///
/// The store assigns identity and applies raw mutations. It does not enforce reference
/// uniqueness on its own: that is the reconciliation engine's job, see
/// [`crate::reconcile`].
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    items: Vec<InventoryItem>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item with a fresh id.
    pub fn create(&mut self, payload: ItemPayload) -> &InventoryItem {
        let index = self.items.len();
        self.items.push(InventoryItem::from_payload(ItemId::new(), payload));
        &self.items[index]
    }

    /// Overwrite the mutable fields of `id` in place.
    pub fn update(&mut self, id: ItemId, payload: ItemPayload) -> DomainResult<&InventoryItem> {
        let item = self.get_mut(id).ok_or_else(DomainError::not_found)?;
        item.overwrite(payload);
        Ok(&*item)
    }

    /// Remove `id`. Deleting an absent id is `NotFound` and leaves the store untouched.
    pub fn delete(&mut self, id: ItemId) -> DomainResult<InventoryItem> {
        let index = self.position(id).ok_or_else(DomainError::not_found)?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id_typed() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|i| i.id_typed() == id)
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.reference() == reference)
    }

    pub fn all(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id_typed() == id)
    }
}
