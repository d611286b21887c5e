//! The inventory engine facade: one owned store plus its category source and movement
//! history.

use chrono::{DateTime, Utc};

use stockelec_core::{DomainError, DomainResult, ItemId};

use crate::category::CategorySource;
use crate::config::InventoryConfig;
use crate::item::{InventoryItem, ItemPayload, SubmissionForm};
use crate::movement::{MovementLog, StockMovement};
use crate::query::{self, ItemFilter};
use crate::reconcile;
use crate::report::Report;
use crate::stats::Stats;
use crate::store::RecordStore;

pub const EMPTY_STORE_MESSAGE: &str = "No items in inventory. Add some items to get started!";
pub const NO_MATCH_MESSAGE: &str = "No items match your search.";

#[derive(Debug)]
pub struct Inventory {
    store: RecordStore,
    categories: Box<dyn CategorySource>,
    movements: MovementLog,
    report_title: String,
}

impl Inventory {
    pub fn new(config: &InventoryConfig) -> Self {
        Self {
            store: RecordStore::new(),
            categories: config.category_source(),
            movements: MovementLog::default(),
            report_title: config.report_title.clone(),
        }
    }

    pub fn categories(&self) -> &dyn CategorySource {
        self.categories.as_ref()
    }

    /// Parse a raw form and reconcile it.
    pub fn submit_form(&mut self, form: &SubmissionForm, editing: Option<ItemId>) -> DomainResult<InventoryItem> {
        let payload = form.parse(self.categories.as_ref()).inspect_err(|err| {
            tracing::warn!(reference = %form.reference, error = %err, "rejected submission form");
        })?;
        self.submit(payload, editing)
    }

    /// Reconcile a payload: edit `editing` if given, else merge by reference, else create.
    pub fn submit(&mut self, payload: ItemPayload, editing: Option<ItemId>) -> DomainResult<InventoryItem> {
        self.submit_at(payload, editing, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        payload: ItemPayload,
        editing: Option<ItemId>,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<InventoryItem> {
        let reference = payload.reference.clone();
        let resolution = payload
            .validate(self.categories.as_ref())
            .and_then(|()| reconcile::resolve(&self.store, payload, editing))
            .inspect_err(|err| {
                tracing::warn!(%reference, editing = ?editing, error = %err, "rejected submission");
            })?;
        let kind = resolution.kind();

        let applied = reconcile::apply(&mut self.store, resolution, occurred_at)?;
        tracing::info!(
            item_id = %applied.item.id_typed(),
            %reference,
            quantity = applied.item.quantity(),
            "{kind} applied"
        );
        self.movements.record(applied.movement);
        Ok(applied.item)
    }

    /// Remove an item. Absent ids are `NotFound`.
    pub fn delete(&mut self, id: ItemId) -> DomainResult<InventoryItem> {
        self.delete_at(id, Utc::now())
    }

    pub fn delete_at(&mut self, id: ItemId, occurred_at: DateTime<Utc>) -> DomainResult<InventoryItem> {
        let removed = self.store.delete(id).inspect_err(|_| {
            tracing::warn!(item_id = %id, "delete of unknown item");
        })?;
        tracing::info!(item_id = %id, reference = %removed.reference(), "item deleted");
        self.movements
            .record(StockMovement::between(id, removed.name(), removed.quantity(), 0, occurred_at));
        Ok(removed)
    }

    pub fn get(&self, id: ItemId) -> DomainResult<&InventoryItem> {
        self.store.get(id).ok_or_else(DomainError::not_found)
    }

    pub fn find_by_reference(&self, reference: &str) -> Option<&InventoryItem> {
        self.store.find_by_reference(reference)
    }

    pub fn filter(&self, filter: &ItemFilter) -> Vec<&InventoryItem> {
        let hits = query::filter(self.store.all(), filter);
        tracing::debug!(
            matched = hits.len(),
            total = self.store.len(),
            unfiltered = filter.is_unfiltered(),
            "filter evaluated"
        );
        hits
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(self.store.all())
    }

    /// Stable, ordered view of every item, for exporters.
    pub fn snapshot(&self) -> &[InventoryItem] {
        self.store.all()
    }

    pub fn movements(&self) -> &[StockMovement] {
        self.movements.all()
    }

    pub fn movements_for(&self, id: ItemId) -> Vec<&StockMovement> {
        self.movements.for_item(id).collect()
    }

    pub fn report(&self, generated_at: DateTime<Utc>) -> Report {
        Report::build(&self.report_title, generated_at.date_naive(), self.snapshot())
    }

    /// Placeholder text for an empty result view, `None` when there is something to show.
    pub fn empty_message(&self, filtered: &[&InventoryItem]) -> Option<&'static str> {
        if !filtered.is_empty() {
            None
        } else if self.store.is_empty() {
            Some(EMPTY_STORE_MESSAGE)
        } else {
            Some(NO_MATCH_MESSAGE)
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(&InventoryConfig::default())
    }
}
