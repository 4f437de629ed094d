//! Pet target synchronizer
//!
//! One recurring reconciliation job per bound pet. Each tick compares the
//! resolver's desired target with the last applied one and corrects drift;
//! terminal conditions (pet gone, owner offline) retire the binding for
//! good. Errors inside a tick are contained: logged, skipped, retried on
//! the next period. The synchronizer owns the bindings exclusively — the
//! event side never touches them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration as StdDuration;

use chrono::{Local, NaiveDateTime};
use hashbrown::HashMap;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use familiar_types::SyncSettings;

use crate::combat::CombatTracker;
use crate::sync::binding::PetBinding;
use crate::targeting::TargetResolver;
use crate::world::{EntityId, Location, PetControl, WorldError, WorldQuery};

/// Jobs can't spin: periods below this are clamped up.
const MIN_PERIOD_SECS: f32 = 0.1;

/// Why a binding stopped ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TerminalReason {
    PetGone,
    PetNotCommandable,
    OwnerOffline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Continue,
    Terminate(TerminalReason),
}

pub struct TargetSynchronizer {
    shared: Arc<SyncShared>,
}

impl TargetSynchronizer {
    pub fn new(
        tracker: Arc<CombatTracker>,
        world: Arc<dyn WorldQuery>,
        pets: Arc<dyn PetControl>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            shared: Arc::new(SyncShared {
                bindings: Mutex::new(HashMap::new()),
                tracker,
                world,
                pets,
                resolver: TargetResolver::new(settings.policy),
                settings,
            }),
        }
    }

    /// Bind `pet` to `owner` and start its reconciliation job (first tick
    /// fires immediately). An existing binding for the same pet is torn
    /// down first. Must be called within a Tokio runtime.
    pub fn bind(&self, pet: EntityId, owner: EntityId) {
        let period =
            StdDuration::from_secs_f32(self.shared.settings.sync_interval_secs.max(MIN_PERIOD_SECS));
        let mut bindings = self.shared.lock_bindings();
        if let Some(previous) = bindings.remove(&pet) {
            previous.cancel();
        }
        let mut binding = PetBinding::new(pet, owner);
        // The job only holds a weak handle so dropping the synchronizer
        // stops every loop on its own.
        binding.task = Some(tokio::spawn(run_binding(
            Arc::downgrade(&self.shared),
            pet,
            owner,
            period,
        )));
        bindings.insert(pet, binding);
        info!(pet, owner, "pet bound");
    }

    /// Tear down the binding for `pet`, if any. Safe to call repeatedly or
    /// concurrently with the job's own terminal detection.
    pub fn unbind(&self, pet: EntityId) {
        if let Some(binding) = self.shared.lock_bindings().remove(&pet) {
            let owner = binding.owner_id;
            binding.cancel();
            info!(pet, owner, "pet unbound");
        }
    }

    /// Tear down every binding belonging to `owner`.
    pub fn unbind_owner(&self, owner: EntityId) {
        let mut bindings = self.shared.lock_bindings();
        let pets: Vec<EntityId> = bindings
            .values()
            .filter(|binding| binding.owner_id == owner)
            .map(|binding| binding.pet_id)
            .collect();
        for pet in pets {
            if let Some(binding) = bindings.remove(&pet) {
                binding.cancel();
                info!(pet, owner, "pet unbound");
            }
        }
    }

    /// Tear down all bindings (shutdown path).
    pub fn clear(&self) {
        let mut bindings = self.shared.lock_bindings();
        for (_, binding) in bindings.drain() {
            binding.cancel();
        }
    }

    pub fn is_bound(&self, pet: EntityId) -> bool {
        self.shared.lock_bindings().contains_key(&pet)
    }

    pub fn binding_count(&self) -> usize {
        self.shared.lock_bindings().len()
    }

    /// Last target this system pushed to `pet`, when bound.
    pub fn last_applied(&self, pet: EntityId) -> Option<EntityId> {
        self.shared
            .lock_bindings()
            .get(&pet)
            .and_then(|binding| binding.last_applied)
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Arc<SyncShared> {
        &self.shared
    }

    /// Insert a binding without spawning its job, so tests can drive ticks
    /// by hand.
    #[cfg(test)]
    pub(crate) fn bind_detached(&self, pet: EntityId, owner: EntityId) {
        self.shared
            .lock_bindings()
            .insert(pet, PetBinding::new(pet, owner));
    }
}

pub(crate) struct SyncShared {
    bindings: Mutex<HashMap<EntityId, PetBinding>>,
    tracker: Arc<CombatTracker>,
    world: Arc<dyn WorldQuery>,
    pets: Arc<dyn PetControl>,
    resolver: TargetResolver,
    settings: SyncSettings,
}

impl SyncShared {
    fn lock_bindings(&self) -> MutexGuard<'_, HashMap<EntityId, PetBinding>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One reconciliation pass for `pet`. `Terminate` retires the binding;
    /// world errors are contained here and retried next period.
    pub(crate) fn run_tick(&self, pet: EntityId, owner: EntityId, now: NaiveDateTime) -> TickOutcome {
        if !self.world.is_entity_valid(pet) {
            return TickOutcome::Terminate(TerminalReason::PetGone);
        }
        if !self.pets.is_commandable(pet) {
            return TickOutcome::Terminate(TerminalReason::PetNotCommandable);
        }
        if !self.world.is_owner_online(owner) {
            return TickOutcome::Terminate(TerminalReason::OwnerOffline);
        }

        if let Err(error) = self.reconcile(pet, owner, now) {
            warn!(pet, owner, %error, "reconciliation tick failed; retrying next period");
        }
        TickOutcome::Continue
    }

    fn reconcile(&self, pet: EntityId, owner: EntityId, now: NaiveDateTime) -> Result<(), WorldError> {
        let Some(pet_location) = self.world.entity_location(pet) else {
            // Transiently unloaded; try again next tick.
            return Ok(());
        };

        let desired = self.resolver.resolve(
            &self.tracker,
            self.world.as_ref(),
            owner,
            pet,
            pet_location,
            self.settings.target_radius,
            now,
        );

        // Binding already removed means an unbind won the race; the abort
        // will reach this job at its next await.
        let Some(last_applied) = self.lock_bindings().get(&pet).map(|b| b.last_applied) else {
            return Ok(());
        };

        if desired != last_applied {
            self.pets.set_target(pet, desired)?;
            if let Some(binding) = self.lock_bindings().get_mut(&pet) {
                binding.last_applied = desired;
            }
            debug!(pet, owner, ?desired, "pet target updated");
        }

        // Out of combat, but the pet picked something up on its own: let a
        // dead, unloaded, or far-away target go rather than chase it.
        if desired.is_none()
            && let Some(current) = self.pets.current_target(pet)
            && self.is_stale_external_target(current, pet_location)
        {
            self.pets.set_target(pet, None)?;
            debug!(pet, current, "stale external target cleared");
        }

        Ok(())
    }

    fn is_stale_external_target(&self, target: EntityId, pet_location: Location) -> bool {
        if !self.world.is_entity_valid(target) {
            return true;
        }
        match self.world.entity_location(target) {
            Some(location) => location.distance(&pet_location) > self.settings.disengage_distance,
            None => true,
        }
    }

    fn finish(&self, pet: EntityId, reason: TerminalReason) {
        if let Some(binding) = self.lock_bindings().remove(&pet) {
            let owner = binding.owner_id;
            binding.cancel();
            info!(pet, owner, ?reason, "pet binding terminated");
        }
    }
}

async fn run_binding(shared: Weak<SyncShared>, pet: EntityId, owner: EntityId, period: StdDuration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(shared) = shared.upgrade() else { return };
        match shared.run_tick(pet, owner, Local::now().naive_local()) {
            TickOutcome::Continue => {}
            TickOutcome::Terminate(reason) => {
                shared.finish(pet, reason);
                return;
            }
        }
    }
}
