//! Per-index ingest activity tracking.
//!
//! Each index gets a baseline the first time it is seen. The reported rate is
//! the cumulative average since that baseline, not a delta between two
//! consecutive refreshes, so long-lived indices converge to their lifetime
//! average instead of following short bursts.

use std::collections::HashMap;
use std::time::Instant;

/// Tracked state for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityActivity {
    /// Document count at first observation.
    pub baseline_count: i64,
    /// Wall-clock time of first observation.
    pub baseline_time: Instant,
    /// Most recently observed document count.
    pub last_count: i64,
    /// Tracker cycle of the most recent observation.
    last_seen_cycle: u64,
}

impl EntityActivity {
    /// Documents added since the baseline, if the count grew.
    pub fn ingested(&self) -> Option<i64> {
        (self.last_count > self.baseline_count).then(|| self.last_count - self.baseline_count)
    }
}

/// What to do with entities that stop appearing in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Keep every entity for the life of the process.
    #[default]
    Never,
    /// Drop entities not observed during the last N completed cycles.
    /// A limit of 0 behaves as 1: an entity seen this cycle is never dropped.
    AbsentFor(u64),
}

/// Derives per-entity throughput from successive point-in-time counts.
#[derive(Debug, Default)]
pub struct ActivityTracker {
    entities: HashMap<String, EntityActivity>,
    policy: EvictionPolicy,
    cycle: u64,
}

impl ActivityTracker {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            entities: HashMap::new(),
            policy,
            cycle: 0,
        }
    }

    /// Records `count` for `id` at `now` and returns the rate in units per second.
    ///
    /// A previously unseen entity starts its baseline and reports 0.
    /// A count below the baseline yields a negative rate.
    pub fn observe(&mut self, id: &str, count: i64, now: Instant) -> f64 {
        let cycle = self.cycle;
        match self.entities.get_mut(id) {
            None => {
                self.entities.insert(
                    id.to_string(),
                    EntityActivity {
                        baseline_count: count,
                        baseline_time: now,
                        last_count: count,
                        last_seen_cycle: cycle,
                    },
                );
                0.0
            }
            Some(entity) => {
                entity.last_count = count;
                entity.last_seen_cycle = cycle;
                let elapsed = now
                    .saturating_duration_since(entity.baseline_time)
                    .as_secs_f64();
                if elapsed > 0.0 {
                    (count - entity.baseline_count) as f64 / elapsed
                } else {
                    0.0
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&EntityActivity> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Closes the current observation cycle and applies the eviction policy.
    ///
    /// Returns the number of evicted entities.
    pub fn end_cycle(&mut self) -> usize {
        self.cycle += 1;
        let EvictionPolicy::AbsentFor(limit) = self.policy else {
            return 0;
        };
        let cycle = self.cycle;
        let before = self.entities.len();
        self.entities
            .retain(|_, e| cycle.saturating_sub(e.last_seen_cycle + 1) < limit.max(1));
        before - self.entities.len()
    }
}
