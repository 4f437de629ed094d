//! Combat state tracker
//!
//! One record per owner behind an internally synchronized map: damage
//! handlers write from host callback threads while reconciliation jobs
//! read, with no locking on the caller's side. Expired records are purged
//! lazily on read and eagerly by the periodic sweep, so owners who stop
//! generating signals without an explicit quit don't accumulate.
//!
//! Every operation is total over absent keys: unknown owners are no-ops
//! on the write side and empty on the read side.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Duration, NaiveDateTime};
use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::combat::record::CombatRecord;
use crate::events::{CombatSignal, SignalHandler};
use crate::world::EntityId;

pub struct CombatTracker {
    records: RwLock<HashMap<EntityId, CombatRecord>>,
    window: Duration,
}

impl CombatTracker {
    /// `window` is how long an owner stays in combat after the last
    /// qualifying signal.
    pub fn new(window: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<EntityId, CombatRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<EntityId, CombatRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the owner damaging `target`.
    pub fn record_owner_hit(&self, owner: EntityId, target: EntityId, now: NaiveDateTime) {
        let mut records = self.write();
        let record = records.entry(owner).or_insert_with(|| CombatRecord::new(now));
        record.target = Some(target);
        record.last_activity = now;
        trace!(owner, target, "owner hit recorded");
    }

    /// Record `attacker` damaging the owner.
    pub fn record_attack_on_owner(&self, owner: EntityId, attacker: EntityId, now: NaiveDateTime) {
        let mut records = self.write();
        let record = records.entry(owner).or_insert_with(|| CombatRecord::new(now));
        record.attacker = Some(attacker);
        record.last_activity = now;
        trace!(owner, attacker, "attack on owner recorded");
    }

    /// Refresh the owner's combat window without naming either side
    /// (environmental damage keeps an owner in combat).
    pub fn record_activity(&self, owner: EntityId, now: NaiveDateTime) {
        let mut records = self.write();
        records
            .entry(owner)
            .or_insert_with(|| CombatRecord::new(now))
            .last_activity = now;
    }

    /// Copy of the owner's record when still inside the window; lazily
    /// purges an expired one.
    fn live_record(&self, owner: EntityId, now: NaiveDateTime) -> Option<CombatRecord> {
        let record = self.read().get(&owner).copied()?;
        if !record.is_expired(now, self.window) {
            return Some(record);
        }

        // Re-check under the write lock: a fresh signal may have landed
        // between the read and here.
        let mut records = self.write();
        if let Some(current) = records.get(&owner)
            && current.is_expired(now, self.window)
        {
            records.remove(&owner);
            debug!(owner, "combat record expired");
        }
        None
    }

    pub fn is_in_combat(&self, owner: EntityId, now: NaiveDateTime) -> bool {
        self.live_record(owner, now).is_some()
    }

    /// Entity last seen attacking the owner. Liveness is the caller's
    /// concern; the id may name a dead or unloaded entity.
    pub fn current_attacker(&self, owner: EntityId, now: NaiveDateTime) -> Option<EntityId> {
        self.live_record(owner, now)?.attacker
    }

    /// Entity the owner last damaged. Same liveness caveat as
    /// [`Self::current_attacker`].
    pub fn current_target(&self, owner: EntityId, now: NaiveDateTime) -> Option<EntityId> {
        self.live_record(owner, now)?.target
    }

    /// Timestamp of the owner's most recent qualifying signal, expired
    /// or not.
    pub fn last_activity(&self, owner: EntityId) -> Option<NaiveDateTime> {
        self.read().get(&owner).map(|record| record.last_activity)
    }

    /// Drop the owner's record (quit, death, explicit dismiss).
    pub fn clear(&self, owner: EntityId) {
        if self.write().remove(&owner).is_some() {
            debug!(owner, "combat record cleared");
        }
    }

    /// Drop every expired record. Returns how many were removed.
    pub fn sweep(&self, now: NaiveDateTime) -> usize {
        let mut records = self.write();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now, self.window));
        let removed = before - records.len();
        if removed > 0 {
            debug!(removed, "expired combat records swept");
        }
        removed
    }

    /// Number of owners with a record, expired or not.
    pub fn tracked_owners(&self) -> usize {
        self.read().len()
    }
}

impl SignalHandler for CombatTracker {
    fn handle_signal(&self, signal: &CombatSignal) {
        match *signal {
            CombatSignal::OwnerDealtDamage { owner, target, at } => {
                self.record_owner_hit(owner, target, at)
            }
            CombatSignal::OwnerTookDamage { owner, attacker, at } => {
                self.record_attack_on_owner(owner, attacker, at)
            }
            CombatSignal::OwnerActivity { owner, at } => self.record_activity(owner, at),
        }
    }
}
