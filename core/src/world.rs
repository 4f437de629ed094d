//! World access traits
//!
//! The engine never touches the host world directly. Entity queries, pet
//! aggression control, and the pet registry are consumed through these
//! narrow traits; the host adapts its own entity model behind them. All
//! implementations are expected to be fast, in-memory, synchronous calls.

use thiserror::Error;

/// Stable identity of a world entity (players, pets, monsters).
pub type EntityId = i64;

/// A point in a world. Distances across different worlds are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub world: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: i32, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z }
    }

    pub fn distance_squared(&self, other: &Location) -> f64 {
        if self.world != other.world {
            return f64::INFINITY;
        }
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Location) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Errors surfaced by the host when reading or writing entity state.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {id} not found")]
    EntityNotFound { id: EntityId },

    #[error("entity {id} cannot carry an aggression target")]
    NotCommandable { id: EntityId },

    #[error("world backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Read-only entity and session queries.
pub trait WorldQuery: Send + Sync {
    /// Entity currently exists, is loaded, and is alive.
    fn is_entity_valid(&self, id: EntityId) -> bool;

    /// Entity is a player character.
    fn is_player(&self, id: EntityId) -> bool;

    /// Current position, if the entity is loaded.
    fn entity_location(&self, id: EntityId) -> Option<Location>;

    /// The owner has a live session.
    fn is_owner_online(&self, owner: EntityId) -> bool;
}

/// Aggression control over pet entities.
pub trait PetControl: Send + Sync {
    /// Entity type can carry an aggression target at all.
    fn is_commandable(&self, pet: EntityId) -> bool;

    /// The pet's current aggression target, however it was acquired.
    fn current_target(&self, pet: EntityId) -> Option<EntityId>;

    /// Set or clear the pet's aggression target.
    fn set_target(&self, pet: EntityId, target: Option<EntityId>) -> Result<(), WorldError>;
}

/// The protection guard's view of the pet registry.
pub trait PetDirectory: Send + Sync {
    /// The owning player, when the entity is a registered pet.
    fn owner_of(&self, entity: EntityId) -> Option<EntityId>;
}
