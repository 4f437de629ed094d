//! Per-owner combat record

use chrono::{Duration, NaiveDateTime};

use crate::world::EntityId;

/// What the tracker knows about one owner's fight.
///
/// `attacker` and `target` are refreshed independently by their signal
/// kinds and may outlive the entities they name; consumers validate
/// liveness. Only `last_activity` expiry retires the record as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatRecord {
    /// Entity last observed damaging the owner
    pub attacker: Option<EntityId>,
    /// Entity last observed damaged by the owner
    pub target: Option<EntityId>,
    /// Most recent qualifying damage signal
    pub last_activity: NaiveDateTime,
}

impl CombatRecord {
    pub fn new(last_activity: NaiveDateTime) -> Self {
        Self {
            attacker: None,
            target: None,
            last_activity,
        }
    }

    /// The owner has fallen out of the combat window.
    pub fn is_expired(&self, now: NaiveDateTime, window: Duration) -> bool {
        now.signed_duration_since(self.last_activity) >= window
    }
}
