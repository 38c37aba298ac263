//! Entity identity.
//!
//! Ids share one space across every entity kind. They keep the shape of a
//! millisecond timestamp so documents written by older builds stay
//! compatible, but the generator never hands out the same id twice: when two
//! ids are requested within one clock tick the second one is bumped past the
//! first.

use chrono::Utc;

pub type EntityId = i64;

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: EntityId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above the largest id already present in a document.
    pub fn seeded(max_existing: Option<EntityId>) -> Self {
        Self {
            last: max_existing.unwrap_or(0),
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Make sure future ids land above `id`.
    pub fn observe(&mut self, id: EntityId) {
        if id > self.last {
            self.last = id;
        }
    }

    pub fn last(&self) -> EntityId {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let mut previous = ids.next_id();
        for _ in 0..1_000 {
            let id = ids.next_id();
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn test_burst_within_one_tick_has_no_collisions() {
        let mut ids = IdGenerator::new();
        let generated: HashSet<_> = (0..5_000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 5_000);
    }

    #[test]
    fn test_seeded_generator_starts_above_existing_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let mut ids = IdGenerator::seeded(Some(far_future));
        assert_eq!(ids.next_id(), far_future + 1);
    }

    #[test]
    fn test_ids_track_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let id = IdGenerator::new().next_id();
        assert!(id >= before);
    }

    #[test]
    fn test_observe_only_moves_forward() {
        let mut ids = IdGenerator::seeded(Some(100));
        ids.observe(50);
        assert_eq!(ids.last(), 100);
        ids.observe(200);
        assert_eq!(ids.last(), 200);
    }
}
