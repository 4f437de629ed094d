//! Engine assembly
//!
//! The single owned service instance: the protection guard and signal
//! normalization sit in front of the combat tracker, the synchronizer owns
//! the per-pet jobs, and one background task sweeps expired records. Hosts
//! construct one `Engine` at startup, hand it the world-access traits, and
//! feed it events from their own dispatch glue.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDateTime};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::combat::CombatTracker;
use crate::context::{BackgroundTasks, EngineConfig};
use crate::events::{
    CombatSignal, DamageEvent, ProtectionGuard, RawEvent, SignalHandler, Suppression,
    normalize_damage, normalize_projectile_hit,
};
use crate::sync::TargetSynchronizer;
use crate::world::{EntityId, PetControl, PetDirectory, WorldQuery};

/// What became of an ingested raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Event may proceed; any combat signals were recorded
    Allowed,
    /// Host should cancel the underlying event
    Suppressed(Suppression),
}

pub struct Engine {
    tracker: Arc<CombatTracker>,
    synchronizer: TargetSynchronizer,
    guard: ProtectionGuard,
    world: Arc<dyn WorldQuery>,
    pets: Arc<dyn PetDirectory>,
    handlers: Vec<Arc<dyn SignalHandler>>,
    tasks: Mutex<BackgroundTasks>,
    sweep_period: StdDuration,
}

impl Engine {
    pub fn new(
        world: Arc<dyn WorldQuery>,
        control: Arc<dyn PetControl>,
        directory: Arc<dyn PetDirectory>,
        config: EngineConfig,
    ) -> Self {
        let window = Duration::milliseconds((config.sync.combat_window_secs * 1000.0) as i64);
        let tracker = Arc::new(CombatTracker::new(window));
        let synchronizer =
            TargetSynchronizer::new(tracker.clone(), world.clone(), control, config.sync);
        Self {
            guard: ProtectionGuard::new(config.protection),
            handlers: vec![tracker.clone() as Arc<dyn SignalHandler>],
            tracker,
            synchronizer,
            world,
            pets: directory,
            tasks: Mutex::new(BackgroundTasks::default()),
            sweep_period: StdDuration::from_secs_f32(config.sync.sweep_interval_secs.max(0.1)),
        }
    }

    fn lock_tasks(&self) -> MutexGuard<'_, BackgroundTasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Additional signal consumers (status displays and the like) ride
    /// along with the tracker. Register before `start`.
    pub fn add_signal_handler(&mut self, handler: Arc<dyn SignalHandler>) {
        self.handlers.push(handler);
    }

    /// Spawn the periodic expired-record sweep. Must be called within a
    /// Tokio runtime.
    pub fn start(&self) {
        let tracker = self.tracker.clone();
        let period = self.sweep_period;
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracker.sweep(Local::now().naive_local());
            }
        });
        if let Some(previous) = self.lock_tasks().sweep.replace(handle) {
            previous.abort();
        }
        info!("engine started");
    }

    /// Abort the sweep and every binding job. Idempotent.
    pub fn shutdown(&self) {
        self.lock_tasks().abort_all();
        self.synchronizer.clear();
        info!("engine shut down");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event intake
    // ─────────────────────────────────────────────────────────────────────

    /// Front door for raw world events: vet, normalize, record. The verdict
    /// tells the host whether to cancel the underlying event.
    pub fn ingest(&self, event: &RawEvent) -> Disposition {
        match *event {
            RawEvent::Damage(ref damage) => self.ingest_damage(damage),
            RawEvent::ProjectileHit { shooter, victim, at } => {
                if let Some(signal) =
                    normalize_projectile_hit(shooter, victim, at, self.world.as_ref())
                {
                    self.dispatch(&[signal]);
                }
                Disposition::Allowed
            }
            RawEvent::AggroAcquired { entity, target } => {
                match self.guard.vet_aggro(entity, target, self.pets.as_ref()) {
                    Some(suppression) => Disposition::Suppressed(suppression),
                    None => Disposition::Allowed,
                }
            }
            RawEvent::StatusEffect { entity, kind } => {
                match self.guard.vet_status_effect(entity, kind, self.pets.as_ref()) {
                    Some(suppression) => Disposition::Suppressed(suppression),
                    None => Disposition::Allowed,
                }
            }
        }
    }

    fn ingest_damage(&self, event: &DamageEvent) -> Disposition {
        if let Some(suppression) =
            self.guard
                .vet_damage(event, self.pets.as_ref(), self.world.as_ref())
        {
            debug!(?suppression, victim = event.victim, "damage event suppressed");
            return Disposition::Suppressed(suppression);
        }
        let signals = normalize_damage(event, self.world.as_ref());
        self.dispatch(&signals);
        Disposition::Allowed
    }

    fn dispatch(&self, signals: &[CombatSignal]) {
        for handler in &self.handlers {
            handler.handle_signals(signals);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pre-normalized notification surface
    // ─────────────────────────────────────────────────────────────────────

    /// Record that `owner` damaged `target` (already-normalized path).
    pub fn notify_owner_dealt_damage(&self, owner: EntityId, target: EntityId, at: NaiveDateTime) {
        self.dispatch(&[CombatSignal::OwnerDealtDamage { owner, target, at }]);
    }

    /// Record that `attacker` damaged `owner` (already-normalized path).
    pub fn notify_owner_took_damage(&self, owner: EntityId, attacker: EntityId, at: NaiveDateTime) {
        self.dispatch(&[CombatSignal::OwnerTookDamage { owner, attacker, at }]);
    }

    /// Combat status for UI and other features.
    pub fn is_owner_in_combat(&self, owner: EntityId) -> bool {
        self.tracker.is_in_combat(owner, Local::now().naive_local())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pet lifecycle
    // ─────────────────────────────────────────────────────────────────────

    pub fn on_pet_bound(&self, pet: EntityId, owner: EntityId) {
        self.synchronizer.bind(pet, owner);
    }

    pub fn on_pet_unbound(&self, pet: EntityId) {
        self.synchronizer.unbind(pet);
    }

    pub fn on_owner_disconnected(&self, owner: EntityId) {
        self.teardown_owner(owner);
    }

    /// A dead owner's pets stand down with them.
    pub fn on_owner_death(&self, owner: EntityId) {
        self.teardown_owner(owner);
    }

    fn teardown_owner(&self, owner: EntityId) {
        self.tracker.clear(owner);
        self.synchronizer.unbind_owner(owner);
    }

    pub fn tracker(&self) -> &Arc<CombatTracker> {
        &self.tracker
    }

    pub fn synchronizer(&self) -> &TargetSynchronizer {
        &self.synchronizer
    }
}
