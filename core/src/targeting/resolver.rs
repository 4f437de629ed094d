//! Target resolution policy
//!
//! Pure mapping from an owner's combat record to at most one hostile
//! entity for a given pet. Which side of the record wins when both are set
//! is data (`TargetPolicy`), not code; the rest of the filter chain is
//! fixed: never the pet itself, never a player, only live entities within
//! reach of the pet.

use chrono::NaiveDateTime;
use familiar_types::TargetPolicy;
use tracing::trace;

use crate::combat::CombatTracker;
use crate::world::{EntityId, Location, WorldQuery};

#[derive(Debug, Clone, Copy)]
pub struct TargetResolver {
    policy: TargetPolicy,
}

impl TargetResolver {
    pub fn new(policy: TargetPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TargetPolicy {
        self.policy
    }

    /// The entity `pet` should be aggressive toward right now, or `None`
    /// when the pet should stand down.
    ///
    /// With the default `AttackerFirst` policy the entity attacking the
    /// owner outranks the one the owner is attacking: defending the owner
    /// is worth more than finishing the owner's kill.
    pub fn resolve(
        &self,
        tracker: &CombatTracker,
        world: &dyn WorldQuery,
        owner: EntityId,
        pet: EntityId,
        pet_location: Location,
        max_range: f64,
        now: NaiveDateTime,
    ) -> Option<EntityId> {
        if !tracker.is_in_combat(owner, now) {
            return None;
        }

        let attacker = tracker.current_attacker(owner, now);
        let target = tracker.current_target(owner, now);
        let ordered = match self.policy {
            TargetPolicy::AttackerFirst => [attacker, target],
            TargetPolicy::TargetFirst => [target, attacker],
        };

        let resolved = ordered
            .into_iter()
            .flatten()
            .find(|&candidate| eligible(world, pet, pet_location, max_range, candidate));
        trace!(owner, pet, ?resolved, "target resolved");
        resolved
    }
}

fn eligible(
    world: &dyn WorldQuery,
    pet: EntityId,
    pet_location: Location,
    max_range: f64,
    candidate: EntityId,
) -> bool {
    if candidate == pet || !world.is_entity_valid(candidate) || world.is_player(candidate) {
        return false;
    }
    world
        .entity_location(candidate)
        .is_some_and(|location| location.distance(&pet_location) <= max_range)
}
