//! Combat signal normalization
//!
//! Reduces vetted raw events to the owner-side facts the tracker records.
//! Projectiles resolve to their shooter; a projectile without a living
//! shooter contributes nothing. Environmental damage to a player becomes a
//! bare activity pulse.

use chrono::NaiveDateTime;
use tracing::trace;

use crate::events::raw::DamageEvent;
use crate::events::signal::CombatSignal;
use crate::world::{EntityId, WorldQuery};

/// Normalize one damage event. Both sides of the same event may emit: a
/// player hitting a player refreshes the target side of one record and the
/// attacker side of the other.
pub fn normalize_damage(event: &DamageEvent, world: &dyn WorldQuery) -> Vec<CombatSignal> {
    let mut signals = Vec::new();
    let at = event.at;

    match event.damager.source() {
        Some(source) => {
            if world.is_player(source) && source != event.victim {
                signals.push(CombatSignal::OwnerDealtDamage {
                    owner: source,
                    target: event.victim,
                    at,
                });
            }
            if world.is_player(event.victim) && world.is_entity_valid(source) {
                signals.push(CombatSignal::OwnerTookDamage {
                    owner: event.victim,
                    attacker: source,
                    at,
                });
            }
        }
        None => {
            if world.is_player(event.victim) {
                signals.push(CombatSignal::OwnerActivity {
                    owner: event.victim,
                    at,
                });
            }
        }
    }

    trace!(victim = event.victim, emitted = signals.len(), "damage event normalized");
    signals
}

/// Normalize a ranged hit confirmation from a player shooter.
pub fn normalize_projectile_hit(
    shooter: Option<EntityId>,
    victim: Option<EntityId>,
    at: NaiveDateTime,
    world: &dyn WorldQuery,
) -> Option<CombatSignal> {
    let (shooter, victim) = shooter.zip(victim)?;
    (world.is_player(shooter) && shooter != victim).then_some(CombatSignal::OwnerDealtDamage {
        owner: shooter,
        target: victim,
        at,
    })
}
