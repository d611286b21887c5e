//! Batch driver for the inventory engine.
//!
//! A batch is a JSON document listing operator operations in order, plus the filter to
//! evaluate once they are applied. Rejected operations are collected, not fatal.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockelec_core::{DomainError, DomainResult};
use stockelec_inventory::{
    FilterRequest, Inventory, InventoryConfig, InventoryItem, ItemFilter, Report, Stats, StockMovement,
    SubmissionForm,
};

/// One operator action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Receive stock: merge by reference or create.
    Submit { form: SubmissionForm },
    /// Correct the item currently stocked under `reference`.
    Edit { reference: String, form: SubmissionForm },
    /// Remove the item currently stocked under `reference`.
    Delete { reference: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Batch {
    pub operations: Vec<Operation>,
    pub filter: FilterRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub applied: usize,
    pub rejected: Vec<Rejection>,
    pub view: Vec<InventoryItem>,
    pub empty_message: Option<String>,
    pub stats: Stats,
    pub movements: Vec<StockMovement>,
    pub report: Report,
}

pub fn parse_batch(raw: &str) -> anyhow::Result<Batch> {
    serde_json::from_str(raw).context("batch is not valid JSON")
}

pub fn load_config(raw: Option<&str>) -> anyhow::Result<InventoryConfig> {
    let config = match raw {
        Some(raw) => InventoryConfig::from_json(raw).context("config is not valid JSON")?,
        None => InventoryConfig::default(),
    };
    Ok(config.with_env_overrides())
}

/// Apply every operation in order, then evaluate the batch filter.
pub fn run_batch(config: &InventoryConfig, batch: &Batch, now: DateTime<Utc>) -> anyhow::Result<BatchOutcome> {
    let filter = ItemFilter::parse(&batch.filter).context("invalid filter")?;
    let mut inventory = Inventory::new(config);
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, op) in batch.operations.iter().enumerate() {
        match apply(&mut inventory, op) {
            Ok(()) => applied += 1,
            Err(err) => {
                tracing::warn!(index, error = %err, "operation rejected");
                rejected.push(Rejection {
                    index,
                    error: err.to_string(),
                });
            }
        }
    }

    let view = inventory.filter(&filter);
    let empty_message = inventory.empty_message(&view).map(str::to_string);
    let view: Vec<InventoryItem> = view.into_iter().cloned().collect();
    tracing::info!(applied, rejected = rejected.len(), "batch complete");

    Ok(BatchOutcome {
        applied,
        rejected,
        view,
        empty_message,
        stats: inventory.stats(),
        movements: inventory.movements().to_vec(),
        report: inventory.report(now),
    })
}

fn apply(inventory: &mut Inventory, op: &Operation) -> DomainResult<()> {
    match op {
        Operation::Submit { form } => inventory.submit_form(form, None).map(|_| ()),
        Operation::Edit { reference, form } => {
            let id = id_of(inventory, reference)?;
            inventory.submit_form(form, Some(id)).map(|_| ())
        }
        Operation::Delete { reference } => {
            let id = id_of(inventory, reference)?;
            inventory.delete(id).map(|_| ())
        }
    }
}

fn id_of(inventory: &Inventory, reference: &str) -> DomainResult<stockelec_core::ItemId> {
    inventory
        .find_by_reference(reference)
        .map(InventoryItem::id_typed)
        .ok_or_else(DomainError::not_found)
}
