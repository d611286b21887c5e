//! Report data for an external document renderer.
//!
//! Only selection and derived values live here; layout, pagination and colours are the
//! renderer's business. The `tone` of a row tells it which stock colour to use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;
use crate::query::StockBucket;

pub const NAME_WIDTH: usize = 25;
pub const REFERENCE_WIDTH: usize = 15;
pub const CATEGORY_WIDTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub quantity: u64,
    pub reference: String,
    pub category: String,
    pub tone: StockBucket,
}

impl ReportRow {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: clip(item.name(), NAME_WIDTH),
            quantity: item.quantity(),
            reference: clip(item.reference(), REFERENCE_WIDTH),
            category: clip(item.category(), CATEGORY_WIDTH),
            tone: StockBucket::classify(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_on: NaiveDate,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// One row per item, in store order.
    pub fn build(title: &str, generated_on: NaiveDate, items: &[InventoryItem]) -> Self {
        Self {
            title: title.to_string(),
            generated_on,
            rows: items.iter().map(ReportRow::from_item).collect(),
        }
    }
}

/// First `width` characters (not bytes).
fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemPayload;
    use stockelec_core::ItemId;

    fn item(name: &str, reference: &str, category: &str, quantity: u64, min_quantity: u64) -> InventoryItem {
        InventoryItem::from_payload(
            ItemId::new(),
            ItemPayload {
                name: name.to_string(),
                quantity,
                min_quantity,
                category: category.to_string(),
                reference: reference.to_string(),
            },
        )
    }

    #[test]
    fn long_columns_are_clipped_on_char_boundaries() {
        let it = item(
            "Démarreur renforcé modèle poids lourd",
            "REF-0123456789-XYZ",
            "bouton poussoire",
            3,
            1,
        );
        let row = ReportRow::from_item(&it);
        assert_eq!(row.name.chars().count(), NAME_WIDTH);
        assert_eq!(row.name, "Démarreur renforcé modèle");
        assert_eq!(row.reference, "REF-0123456789-");
        assert_eq!(row.category, "bouton poussoir");
        assert_eq!(row.tone, StockBucket::High);
    }

    #[test]
    fn rows_follow_store_order_with_tones() {
        let items = vec![item("A", "A", "ecm", 1, 5), item("B", "B", "ecm", 7, 5)];
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let report = Report::build("Stock", date, &items);
        let tones: Vec<_> = report.rows.iter().map(|r| (r.name.as_str(), r.tone)).collect();
        assert_eq!(tones, [("A", StockBucket::Low), ("B", StockBucket::Normal)]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["generated_on"], "2024-03-01");
        assert_eq!(json["rows"][0]["tone"], "low");
    }
}
