//! Protection guard
//!
//! Stateless vetting of raw events before they reach normalization. Pets
//! and their owners are mutually protected: a suppressed interaction never
//! creates or refreshes a combat record, and the host is expected to cancel
//! the underlying event whenever a verdict names a suppression.

use familiar_types::ProtectionSettings;

use crate::events::raw::{DamageEvent, StatusEffectKind};
use crate::world::{EntityId, PetDirectory, WorldQuery};

/// Why an event was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Owner damaging their own pet
    OwnerHitOwnPet,
    /// Pet damaging its own owner
    PetHitOwner,
    /// Two pets of the same owner fighting
    SiblingPets,
    /// Environmental damage against a protected pet
    Environmental,
    /// Player splash damage against a pet standing near its owner
    OwnerAreaDamage,
    /// Pet acquiring its owner or a sibling pet as an aggro target
    ForbiddenAggro,
    /// Harmful status effect against a protected pet
    HarmfulEffect,
}

pub struct ProtectionGuard {
    settings: ProtectionSettings,
}

impl ProtectionGuard {
    pub fn new(settings: ProtectionSettings) -> Self {
        Self { settings }
    }

    /// Vet a damage event. `None` means the event may proceed to
    /// normalization.
    pub fn vet_damage(
        &self,
        event: &DamageEvent,
        pets: &dyn PetDirectory,
        world: &dyn WorldQuery,
    ) -> Option<Suppression> {
        let source = event.damager.source();

        if let Some(owner) = pets.owner_of(event.victim) {
            if source == Some(owner) {
                return Some(Suppression::OwnerHitOwnPet);
            }
            if let Some(src) = source
                && pets.owner_of(src) == Some(owner)
            {
                return Some(Suppression::SiblingPets);
            }
            if self.settings.block_environmental && event.cause.is_environmental() {
                return Some(Suppression::Environmental);
            }
            // Any player's splash damage counts as the owner's own when the
            // owner stands inside the blast radius.
            if event.cause.is_splash()
                && let Some(src) = source
                && world.is_player(src)
                && near(world, owner, src, self.settings.owner_aoe_radius)
            {
                return Some(Suppression::OwnerAreaDamage);
            }
        }

        // A pet never hurts its own owner, whatever it was told to do.
        if let Some(src) = source
            && pets.owner_of(src) == Some(event.victim)
        {
            return Some(Suppression::PetHitOwner);
        }

        None
    }

    /// Vet an aggro acquisition by `entity` against `target`.
    pub fn vet_aggro(
        &self,
        entity: EntityId,
        target: EntityId,
        pets: &dyn PetDirectory,
    ) -> Option<Suppression> {
        let owner = pets.owner_of(entity)?;
        if target == owner || pets.owner_of(target) == Some(owner) {
            return Some(Suppression::ForbiddenAggro);
        }
        None
    }

    /// Vet a status effect about to land on `entity`.
    pub fn vet_status_effect(
        &self,
        entity: EntityId,
        kind: StatusEffectKind,
        pets: &dyn PetDirectory,
    ) -> Option<Suppression> {
        if self.settings.block_harmful_effects
            && kind.is_harmful()
            && pets.owner_of(entity).is_some()
        {
            return Some(Suppression::HarmfulEffect);
        }
        None
    }
}

fn near(world: &dyn WorldQuery, a: EntityId, b: EntityId, radius: f64) -> bool {
    match (world.entity_location(a), world.entity_location(b)) {
        (Some(la), Some(lb)) => la.distance(&lb) < radius,
        _ => false,
    }
}
