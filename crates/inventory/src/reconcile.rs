//! Reconciliation engine.
//!
//! A submission is resolved against the store in two steps, mirroring the
//! decide/evolve split used across the domain:
//!
//! - **Decision**: [`resolve`] inspects the store (read-only) and returns a [`Resolution`],
//!   or rejects the submission. All validation happens here.
//! - **Mutation**: [`apply`] carries out a resolution. It cannot fail for a resolution
//!   produced against the same, unchanged store.
//!
//! Resolution rules:
//! - an `editing` id that resolves overwrites that record verbatim and never merges;
//! - otherwise a submission whose reference is already stocked adds to that record's
//!   quantity and leaves its descriptive fields alone;
//! - otherwise a new record is created.

use chrono::{DateTime, Utc};

use stockelec_core::{DomainError, DomainResult, ItemId};

use crate::item::{InventoryItem, ItemPayload};
use crate::movement::StockMovement;
use crate::store::RecordStore;

/// What a submission will do to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Create(ItemPayload),
    Merge {
        id: ItemId,
        new_quantity: u64,
    },
    Edit {
        id: ItemId,
        payload: ItemPayload,
    },
}

impl Resolution {
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Create(_) => "create",
            Resolution::Merge { .. } => "merge",
            Resolution::Edit { .. } => "edit",
        }
    }
}

/// Outcome of an applied resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub item: InventoryItem,
    pub movement: Option<StockMovement>,
}

/// Decide how `payload` reconciles against `store`. Never mutates.
///
/// An edit that moves a record onto a reference held by a *different* record is rejected,
/// so the one-record-per-reference invariant holds on every path.
pub fn resolve(
    store: &RecordStore,
    payload: ItemPayload,
    editing: Option<ItemId>,
) -> DomainResult<Resolution> {
    // An id that no longer resolves is treated as a plain submission.
    if let Some(id) = editing.filter(|id| store.get(*id).is_some()) {
        if let Some(other) = store.find_by_reference(&payload.reference) {
            if other.id_typed() != id {
                return Err(DomainError::validation(format!(
                    "reference {:?} is already used by another item",
                    payload.reference
                )));
            }
        }
        return Ok(Resolution::Edit { id, payload });
    }

    match store.find_by_reference(&payload.reference) {
        Some(existing) => {
            let new_quantity = existing
                .quantity()
                .checked_add(payload.quantity)
                .ok_or_else(|| DomainError::validation("merged quantity overflows"))?;
            Ok(Resolution::Merge {
                id: existing.id_typed(),
                new_quantity,
            })
        }
        None => Ok(Resolution::Create(payload)),
    }
}

/// Carry out a resolution and describe the resulting stock movement.
pub fn apply(
    store: &mut RecordStore,
    resolution: Resolution,
    occurred_at: DateTime<Utc>,
) -> DomainResult<Applied> {
    match resolution {
        Resolution::Create(payload) => {
            let item = store.create(payload).clone();
            let movement =
                StockMovement::between(item.id_typed(), item.name(), 0, item.quantity(), occurred_at);
            Ok(Applied { item, movement })
        }
        Resolution::Merge { id, new_quantity, .. } => {
            let item = store.get_mut(id).ok_or_else(DomainError::not_found)?;
            let before = item.quantity();
            item.set_quantity(new_quantity);
            let item = item.clone();
            let movement = StockMovement::between(id, item.name(), before, new_quantity, occurred_at);
            Ok(Applied { item, movement })
        }
        Resolution::Edit { id, payload } => {
            let before = store.get(id).ok_or_else(DomainError::not_found)?.quantity();
            let item = store.update(id, payload)?.clone();
            let movement = StockMovement::between(id, item.name(), before, item.quantity(), occurred_at);
            Ok(Applied { item, movement })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementKind;

    fn payload(name: &str, reference: &str, quantity: u64) -> ItemPayload {
        ItemPayload {
            name: name.to_string(),
            quantity,
            min_quantity: 0,
            category: "switch".to_string(),
            reference: reference.to_string(),
        }
    }

    fn submit(store: &mut RecordStore, p: ItemPayload, editing: Option<ItemId>) -> DomainResult<Applied> {
        let resolution = resolve(store, p, editing)?;
        apply(store, resolution, Utc::now())
    }

    #[test]
    fn unknown_reference_creates() {
        let store = RecordStore::new();
        let r = resolve(&store, payload("Relay", "R-1", 5), None).unwrap();
        assert_eq!(r.kind(), "create");
    }

    #[test]
    fn known_reference_merges_quantity_only() {
        let mut store = RecordStore::new();
        let first = submit(&mut store, payload("Relay", "R-1", 5), None).unwrap();

        let mut second = payload("Relay X", "R-1", 3);
        second.min_quantity = 10;
        second.category = "capteur".to_string();
        let r = resolve(&store, second, None).unwrap();
        assert_eq!(
            r,
            Resolution::Merge {
                id: first.item.id_typed(),
                new_quantity: 8
            }
        );

        let applied = apply(&mut store, r, Utc::now()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(applied.item.quantity(), 8);
        assert_eq!(applied.item.name(), "Relay");
        assert_eq!(applied.item.category(), "switch");
        assert_eq!(applied.item.min_quantity(), 0);

        let m = applied.movement.unwrap();
        assert_eq!((m.kind, m.quantity), (MovementKind::In, 3));
    }

    #[test]
    fn edit_overwrites_quantity_verbatim() {
        let mut store = RecordStore::new();
        let id = submit(&mut store, payload("Relay", "R-1", 5), None).unwrap().item.id_typed();

        let applied = submit(&mut store, payload("Relay 12V", "R-1", 2), Some(id)).unwrap();
        assert_eq!(applied.item.id_typed(), id);
        assert_eq!(applied.item.quantity(), 2);
        assert_eq!(applied.item.name(), "Relay 12V");

        let m = applied.movement.unwrap();
        assert_eq!((m.kind, m.quantity), (MovementKind::Out, 3));
    }

    #[test]
    fn edit_may_change_reference_to_a_free_one() {
        let mut store = RecordStore::new();
        let id = submit(&mut store, payload("Relay", "R-1", 5), None).unwrap().item.id_typed();
        let applied = submit(&mut store, payload("Relay", "R-9", 5), Some(id)).unwrap();
        assert_eq!(applied.item.reference(), "R-9");
        assert!(applied.movement.is_none());
    }

    #[test]
    fn edit_onto_another_items_reference_is_rejected() {
        let mut store = RecordStore::new();
        submit(&mut store, payload("Relay", "R-1", 5), None).unwrap();
        let fuse = submit(&mut store, payload("Fuse", "F-1", 9), None).unwrap().item.id_typed();

        let err = submit(&mut store, payload("Fuse", "R-1", 1), Some(fuse)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        let unchanged = store.get(fuse).unwrap();
        assert_eq!((unchanged.reference(), unchanged.quantity()), ("F-1", 9));
    }

    #[test]
    fn stale_editing_id_falls_back_to_merge() {
        let mut store = RecordStore::new();
        let relay = submit(&mut store, payload("Relay", "R-1", 5), None).unwrap().item.id_typed();

        let applied = submit(&mut store, payload("Relay X", "R-1", 3), Some(ItemId::new())).unwrap();
        assert_eq!(applied.item.id_typed(), relay);
        assert_eq!(applied.item.quantity(), 8);
        assert_eq!(applied.item.name(), "Relay");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_editing_id_falls_back_to_create() {
        let mut store = RecordStore::new();
        submit(&mut store, payload("Relay", "R-1", 5), None).unwrap();

        let r = resolve(&store, payload("Fuse", "F-1", 2), Some(ItemId::new())).unwrap();
        assert_eq!(r.kind(), "create");
        apply(&mut store, r, Utc::now()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_reference("F-1").map(|i| i.quantity()), Some(2));
        assert_eq!(store.find_by_reference("R-1").map(|i| i.quantity()), Some(5));
    }

    #[test]
    fn merge_overflow_is_rejected_without_mutation() {
        let mut store = RecordStore::new();
        submit(&mut store, payload("Relay", "R-1", u64::MAX), None).unwrap();
        let err = submit(&mut store, payload("Relay", "R-1", 1), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.all()[0].quantity(), u64::MAX);
    }

    #[test]
    fn zero_quantity_create_records_no_movement() {
        let mut store = RecordStore::new();
        let applied = submit(&mut store, payload("Relay", "R-1", 0), None).unwrap();
        assert!(applied.movement.is_none());
        assert_eq!(store.len(), 1);
    }
}
