//! Shared test doubles for the world-access traits

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use hashbrown::HashMap;

use crate::world::{EntityId, Location, PetControl, PetDirectory, WorldError, WorldQuery};

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StubEntity {
    pub valid: bool,
    pub player: bool,
    pub online: bool,
    pub commandable: bool,
    pub location: Location,
    pub owner: Option<EntityId>,
    pub target: Option<EntityId>,
}

impl Default for StubEntity {
    fn default() -> Self {
        Self {
            valid: true,
            player: false,
            online: true,
            commandable: true,
            location: Location::new(0, 0.0, 0.0, 0.0),
            owner: None,
            target: None,
        }
    }
}

/// In-memory world double. Counts `set_target` calls so tests can assert
/// idempotent application, and can be told to fail writes.
#[derive(Default)]
pub(crate) struct StubWorld {
    entities: Mutex<HashMap<EntityId, StubEntity>>,
    pub set_target_calls: AtomicUsize,
    pub fail_set_target: AtomicBool,
}

impl StubWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntityId, StubEntity>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, id: EntityId, entity: StubEntity) {
        self.lock().insert(id, entity);
    }

    pub fn add_player(&self, id: EntityId) {
        self.insert(
            id,
            StubEntity {
                player: true,
                ..StubEntity::default()
            },
        );
    }

    pub fn add_monster(&self, id: EntityId) {
        self.insert(id, StubEntity::default());
    }

    pub fn add_pet(&self, id: EntityId, owner: EntityId) {
        self.insert(
            id,
            StubEntity {
                owner: Some(owner),
                ..StubEntity::default()
            },
        );
    }

    pub fn kill(&self, id: EntityId) {
        if let Some(entity) = self.lock().get_mut(&id) {
            entity.valid = false;
        }
    }

    pub fn despawn(&self, id: EntityId) {
        self.lock().remove(&id);
    }

    pub fn move_to(&self, id: EntityId, location: Location) {
        if let Some(entity) = self.lock().get_mut(&id) {
            entity.location = location;
        }
    }

    pub fn set_offline(&self, id: EntityId) {
        if let Some(entity) = self.lock().get_mut(&id) {
            entity.online = false;
        }
    }

    pub fn set_raw_target(&self, id: EntityId, target: Option<EntityId>) {
        if let Some(entity) = self.lock().get_mut(&id) {
            entity.target = target;
        }
    }

    pub fn target_of(&self, id: EntityId) -> Option<EntityId> {
        self.lock().get(&id).and_then(|entity| entity.target)
    }

    pub fn set_target_count(&self) -> usize {
        self.set_target_calls.load(Ordering::SeqCst)
    }
}

impl WorldQuery for StubWorld {
    fn is_entity_valid(&self, id: EntityId) -> bool {
        self.lock().get(&id).is_some_and(|entity| entity.valid)
    }

    fn is_player(&self, id: EntityId) -> bool {
        self.lock().get(&id).is_some_and(|entity| entity.player)
    }

    fn entity_location(&self, id: EntityId) -> Option<Location> {
        let entities = self.lock();
        let entity = entities.get(&id)?;
        entity.valid.then_some(entity.location)
    }

    fn is_owner_online(&self, owner: EntityId) -> bool {
        self.lock().get(&owner).is_some_and(|entity| entity.online)
    }
}

impl PetControl for StubWorld {
    fn is_commandable(&self, pet: EntityId) -> bool {
        self.lock().get(&pet).is_some_and(|entity| entity.commandable)
    }

    fn current_target(&self, pet: EntityId) -> Option<EntityId> {
        self.target_of(pet)
    }

    fn set_target(&self, pet: EntityId, target: Option<EntityId>) -> Result<(), WorldError> {
        self.set_target_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_set_target.load(Ordering::SeqCst) {
            return Err(WorldError::Backend("injected failure".into()));
        }
        let mut entities = self.lock();
        let entity = entities
            .get_mut(&pet)
            .ok_or(WorldError::EntityNotFound { id: pet })?;
        entity.target = target;
        Ok(())
    }
}

impl PetDirectory for StubWorld {
    fn owner_of(&self, entity: EntityId) -> Option<EntityId> {
        self.lock().get(&entity).and_then(|entity| entity.owner)
    }
}
