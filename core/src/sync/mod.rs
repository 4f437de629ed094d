//! Pet target synchronization
//!
//! This module provides:
//! - **Bindings**: the live pet/owner associations and their lifecycle
//! - **Synchronizer**: the binding registry and its per-pet recurring
//!   reconciliation jobs

mod binding;
mod synchronizer;


pub use binding::{BindingState, PetBinding};
pub use synchronizer::TargetSynchronizer;
