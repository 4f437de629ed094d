//! Raw damage-capable events
//!
//! The host delivers these unfiltered from its own dispatch mechanism; the
//! protection guard vets them and the normalizer reduces the survivors to
//! combat signals.

use chrono::NaiveDateTime;

use crate::world::EntityId;

/// Cause attached to a raw damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    EntityAttack,
    Projectile,
    Magic,
    Area,
    Explosion,
    Custom,
    Fall,
    Drowning,
    Fire,
    FireTick,
    Lava,
    Lightning,
    Poison,
    Starvation,
    Wither,
    Thorns,
    DragonBreath,
    FlyIntoWall,
    HotFloor,
    Cramming,
    Dryout,
    Suffocation,
    Void,
    Contact,
}

impl DamageCause {
    /// Environmental causes a protected pet never suffers.
    pub fn is_environmental(self) -> bool {
        matches!(
            self,
            DamageCause::Fall
                | DamageCause::Drowning
                | DamageCause::Fire
                | DamageCause::FireTick
                | DamageCause::Lava
                | DamageCause::Lightning
                | DamageCause::Poison
                | DamageCause::Starvation
                | DamageCause::Wither
                | DamageCause::Thorns
                | DamageCause::DragonBreath
                | DamageCause::FlyIntoWall
                | DamageCause::HotFloor
                | DamageCause::Cramming
                | DamageCause::Dryout
        )
    }

    /// Splash categories covered by the owner-area rule.
    pub fn is_splash(self) -> bool {
        matches!(self, DamageCause::Magic | DamageCause::Area | DamageCause::Custom)
    }
}

/// The damaging side of an event, before shooter resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damager {
    /// Direct entity-on-entity damage
    Entity(EntityId),
    /// A projectile; shooter is absent when fired by a block or unknown source
    Projectile {
        projectile: EntityId,
        shooter: Option<EntityId>,
    },
    /// Environmental damage with no damaging entity
    None,
}

impl Damager {
    /// The entity credited with the damage: the direct damager, or the
    /// projectile's shooter.
    pub fn source(self) -> Option<EntityId> {
        match self {
            Damager::Entity(id) => Some(id),
            Damager::Projectile { shooter, .. } => shooter,
            Damager::None => None,
        }
    }
}

/// An entity taking damage from an entity, a projectile, or the environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub damager: Damager,
    pub victim: EntityId,
    pub cause: DamageCause,
    pub amount: f64,
    pub at: NaiveDateTime,
}

/// Status effect kinds a host may apply to entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffectKind {
    Poison,
    Wither,
    InstantDamage,
    Slowness,
    Weakness,
    Nausea,
    Blindness,
    Hunger,
    MiningFatigue,
    Unluck,
    Regeneration,
    Speed,
    Strength,
    Resistance,
    Absorption,
}

impl StatusEffectKind {
    pub fn is_harmful(self) -> bool {
        matches!(
            self,
            StatusEffectKind::Poison
                | StatusEffectKind::Wither
                | StatusEffectKind::InstantDamage
                | StatusEffectKind::Slowness
                | StatusEffectKind::Weakness
                | StatusEffectKind::Nausea
                | StatusEffectKind::Blindness
                | StatusEffectKind::Hunger
                | StatusEffectKind::MiningFatigue
                | StatusEffectKind::Unluck
        )
    }
}

/// A raw world event the engine can ingest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// An entity took damage
    Damage(DamageEvent),
    /// A projectile connected with an entity (ranged hit confirmation)
    ProjectileHit {
        shooter: Option<EntityId>,
        victim: Option<EntityId>,
        at: NaiveDateTime,
    },
    /// An entity picked a new aggression target on its own
    AggroAcquired { entity: EntityId, target: EntityId },
    /// A status effect is about to land on an entity
    StatusEffect {
        entity: EntityId,
        kind: StatusEffectKind,
    },
}
