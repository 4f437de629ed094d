//! Tests for ProtectionGuard suppression rules
//!
//! Verifies that owner/pet/sibling interactions, environmental causes,
//! owner splash damage, forbidden aggro, and harmful status effects are
//! suppressed — and that ordinary hostile damage passes through.

use familiar_types::ProtectionSettings;

use crate::testutil::{StubWorld, now};
use crate::world::Location;

use super::guard::{ProtectionGuard, Suppression};
use super::raw::{DamageCause, DamageEvent, Damager, StatusEffectKind};

const OWNER: i64 = 1;
const OTHER_OWNER: i64 = 2;
const PET: i64 = 10;
const SIBLING_PET: i64 = 11;
const OTHER_PET: i64 = 12;
const MONSTER: i64 = 100;

fn make_world() -> StubWorld {
    let world = StubWorld::new();
    world.add_player(OWNER);
    world.add_player(OTHER_OWNER);
    world.add_pet(PET, OWNER);
    world.add_pet(SIBLING_PET, OWNER);
    world.add_pet(OTHER_PET, OTHER_OWNER);
    world.add_monster(MONSTER);
    world
}

fn make_guard() -> ProtectionGuard {
    ProtectionGuard::new(ProtectionSettings::default())
}

fn melee(damager: i64, victim: i64) -> DamageEvent {
    DamageEvent {
        damager: Damager::Entity(damager),
        victim,
        cause: DamageCause::EntityAttack,
        amount: 4.0,
        at: now(),
    }
}

#[test]
fn test_owner_hitting_own_pet_is_suppressed() {
    let world = make_world();
    let guard = make_guard();

    let verdict = guard.vet_damage(&melee(OWNER, PET), &world, &world);
    assert_eq!(verdict, Some(Suppression::OwnerHitOwnPet));
}

#[test]
fn test_pet_hitting_owner_is_suppressed() {
    let world = make_world();
    let guard = make_guard();

    let verdict = guard.vet_damage(&melee(PET, OWNER), &world, &world);
    assert_eq!(verdict, Some(Suppression::PetHitOwner));
}

#[test]
fn test_sibling_pets_are_suppressed() {
    let world = make_world();
    let guard = make_guard();

    let verdict = guard.vet_damage(&melee(PET, SIBLING_PET), &world, &world);
    assert_eq!(verdict, Some(Suppression::SiblingPets));
}

#[test]
fn test_pets_of_different_owners_may_fight() {
    let world = make_world();
    let guard = make_guard();

    assert_eq!(guard.vet_damage(&melee(PET, OTHER_PET), &world, &world), None);
}

#[test]
fn test_monster_hitting_pet_is_allowed() {
    let world = make_world();
    let guard = make_guard();

    assert_eq!(guard.vet_damage(&melee(MONSTER, PET), &world, &world), None);
}

#[test]
fn test_owner_projectile_resolves_to_shooter() {
    let world = make_world();
    let guard = make_guard();

    let event = DamageEvent {
        damager: Damager::Projectile {
            projectile: 500,
            shooter: Some(OWNER),
        },
        victim: PET,
        cause: DamageCause::Projectile,
        amount: 6.0,
        at: now(),
    };
    assert_eq!(
        guard.vet_damage(&event, &world, &world),
        Some(Suppression::OwnerHitOwnPet)
    );
}

#[test]
fn test_environmental_damage_against_pet_is_suppressed() {
    let world = make_world();
    let guard = make_guard();

    for cause in [DamageCause::Fall, DamageCause::Lava, DamageCause::Wither] {
        let event = DamageEvent {
            damager: Damager::None,
            victim: PET,
            cause,
            amount: 2.0,
            at: now(),
        };
        assert_eq!(
            guard.vet_damage(&event, &world, &world),
            Some(Suppression::Environmental),
            "{cause:?} should be suppressed"
        );
    }
}

#[test]
fn test_environmental_damage_against_player_is_allowed() {
    let world = make_world();
    let guard = make_guard();

    let event = DamageEvent {
        damager: Damager::None,
        victim: OWNER,
        cause: DamageCause::Fall,
        amount: 2.0,
        at: now(),
    };
    assert_eq!(guard.vet_damage(&event, &world, &world), None);
}

#[test]
fn test_environmental_block_can_be_disabled() {
    let world = make_world();
    let guard = ProtectionGuard::new(ProtectionSettings {
        block_environmental: false,
        ..ProtectionSettings::default()
    });

    let event = DamageEvent {
        damager: Damager::None,
        victim: PET,
        cause: DamageCause::Fall,
        amount: 2.0,
        at: now(),
    };
    assert_eq!(guard.vet_damage(&event, &world, &world), None);
}

#[test]
fn test_player_splash_near_owner_is_suppressed() {
    let world = make_world();
    let guard = make_guard();

    // Another player's magic splashes the pet while its owner stands close
    world.move_to(OTHER_OWNER, Location::new(0, 5.0, 0.0, 0.0));
    let event = DamageEvent {
        damager: Damager::Entity(OTHER_OWNER),
        victim: PET,
        cause: DamageCause::Magic,
        amount: 3.0,
        at: now(),
    };
    assert_eq!(
        guard.vet_damage(&event, &world, &world),
        Some(Suppression::OwnerAreaDamage)
    );
}

#[test]
fn test_player_splash_far_from_owner_is_allowed() {
    let world = make_world();
    let guard = make_guard();

    world.move_to(OTHER_OWNER, Location::new(0, 40.0, 0.0, 0.0));
    let event = DamageEvent {
        damager: Damager::Entity(OTHER_OWNER),
        victim: PET,
        cause: DamageCause::Magic,
        amount: 3.0,
        at: now(),
    };
    assert_eq!(guard.vet_damage(&event, &world, &world), None);
}

#[test]
fn test_aggro_against_owner_or_sibling_is_denied() {
    let world = make_world();
    let guard = make_guard();

    assert_eq!(
        guard.vet_aggro(PET, OWNER, &world),
        Some(Suppression::ForbiddenAggro)
    );
    assert_eq!(
        guard.vet_aggro(PET, SIBLING_PET, &world),
        Some(Suppression::ForbiddenAggro)
    );
    assert_eq!(guard.vet_aggro(PET, MONSTER, &world), None);
    assert_eq!(guard.vet_aggro(PET, OTHER_PET, &world), None);
    // Non-pets may target whoever they like
    assert_eq!(guard.vet_aggro(MONSTER, OWNER, &world), None);
}

#[test]
fn test_harmful_status_effect_on_pet_is_denied() {
    let world = make_world();
    let guard = make_guard();

    assert_eq!(
        guard.vet_status_effect(PET, StatusEffectKind::Poison, &world),
        Some(Suppression::HarmfulEffect)
    );
    assert_eq!(
        guard.vet_status_effect(PET, StatusEffectKind::Regeneration, &world),
        None
    );
    assert_eq!(
        guard.vet_status_effect(MONSTER, StatusEffectKind::Poison, &world),
        None
    );
}
