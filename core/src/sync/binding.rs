//! Pet bindings

use tokio::task::JoinHandle;
use tracing::debug;

use crate::world::EntityId;

/// Lifecycle of a binding. One-way: a terminated binding is never revived;
/// a fresh bind creates a new binding with its own job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Active,
    Terminated,
}

/// Live association between a pet and its owner, backing one recurring
/// reconciliation job.
#[derive(Debug)]
pub struct PetBinding {
    pub pet_id: EntityId,
    pub owner_id: EntityId,
    /// Last target actually pushed to the pet; gates redundant re-application
    pub last_applied: Option<EntityId>,
    pub state: BindingState,
    pub(crate) task: Option<JoinHandle<()>>,
}

impl PetBinding {
    pub(crate) fn new(pet_id: EntityId, owner_id: EntityId) -> Self {
        Self {
            pet_id,
            owner_id,
            last_applied: None,
            state: BindingState::Active,
            task: None,
        }
    }

    /// Cancel the job exactly once. Aborting an already-finished task is a
    /// no-op, so the terminal-detection path and an explicit unbind may
    /// race freely.
    pub(crate) fn cancel(mut self) {
        self.state = BindingState::Terminated;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!(pet = self.pet_id, owner = self.owner_id, "binding cancelled");
    }
}
