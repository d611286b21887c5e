use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockelec_core::{ItemId, MovementId};

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    In,
    Out,
}

/// One recorded change of an item's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub kind: MovementKind,
    pub quantity: u64,
    pub item_id: ItemId,
    pub item_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl StockMovement {
    /// Movement for a change from `before` to `after`; `None` when nothing moved.
    pub fn between(
        item_id: ItemId,
        item_name: &str,
        before: u64,
        after: u64,
        occurred_at: DateTime<Utc>,
    ) -> Option<Self> {
        let (kind, quantity) = if after > before {
            (MovementKind::In, after - before)
        } else if before > after {
            (MovementKind::Out, before - after)
        } else {
            return None;
        };

        Some(Self {
            id: MovementId::new(),
            kind,
            quantity,
            item_id,
            item_name: item_name.to_string(),
            occurred_at,
        })
    }
}

/// Append-only history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MovementLog {
    entries: Vec<StockMovement>,
}

impl MovementLog {
    pub fn record(&mut self, movement: Option<StockMovement>) {
        if let Some(m) = movement {
            self.entries.push(m);
        }
    }

    pub fn all(&self) -> &[StockMovement] {
        &self.entries
    }

    pub fn for_item(&self, item_id: ItemId) -> impl Iterator<Item = &StockMovement> {
        self.entries.iter().filter(move |m| m.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_the_delta() {
        let id = ItemId::new();
        let now = Utc::now();

        let m = StockMovement::between(id, "Relay", 2, 7, now).unwrap();
        assert_eq!((m.kind, m.quantity), (MovementKind::In, 5));

        let m = StockMovement::between(id, "Relay", 7, 1, now).unwrap();
        assert_eq!((m.kind, m.quantity), (MovementKind::Out, 6));

        assert!(StockMovement::between(id, "Relay", 4, 4, now).is_none());
    }

    #[test]
    fn log_filters_by_item() {
        let a = ItemId::new();
        let b = ItemId::new();
        let now = Utc::now();
        let mut log = MovementLog::default();
        log.record(StockMovement::between(a, "A", 0, 1, now));
        log.record(StockMovement::between(b, "B", 0, 2, now));
        log.record(StockMovement::between(a, "A", 1, 1, now));
        log.record(StockMovement::between(a, "A", 1, 0, now));

        assert_eq!(log.all().len(), 3);
        let kinds: Vec<_> = log.for_item(a).map(|m| m.kind).collect();
        assert_eq!(kinds, [MovementKind::In, MovementKind::Out]);
    }
}
