//! Inventory reconciliation and query engine.
//!
//! Pure, synchronous domain logic (no IO, no storage): an owned record store, the
//! reconciliation rules that keep one record per reference, composite filters, summary
//! statistics, stock movement history and report data.

pub mod category;
pub mod config;
pub mod inventory;
pub mod item;
pub mod movement;
pub mod query;
pub mod reconcile;
pub mod report;
pub mod stats;
pub mod store;

pub use category::{CategorySource, DEFAULT_CATEGORIES, FixedCategories, FreeTextCategories};
pub use config::{CategoryMode, InventoryConfig};
pub use inventory::Inventory;
pub use item::{InventoryItem, ItemPayload, SubmissionForm};
pub use movement::{MovementKind, StockMovement};
pub use query::{FilterRequest, ItemFilter, StockBucket, StockLevel};
pub use reconcile::Resolution;
pub use report::{Report, ReportRow};
pub use stats::Stats;
pub use store::RecordStore;
