pub mod combat;
pub mod context;
pub mod engine;
pub mod events;
pub mod sync;
pub mod targeting;
pub mod world;

#[cfg(test)]
mod testutil;

// Re-exports for convenience
pub use combat::{CombatRecord, CombatTracker};
pub use context::{
    BackgroundTasks, ConfigError, EngineConfig, EngineConfigExt, ProtectionSettings, SyncSettings,
    TargetPolicy,
};
pub use engine::{Disposition, Engine};
pub use events::{
    CombatSignal, DamageCause, DamageEvent, Damager, ProtectionGuard, RawEvent, SignalHandler,
    StatusEffectKind, Suppression,
};
pub use sync::{BindingState, PetBinding, TargetSynchronizer};
pub use targeting::TargetResolver;
pub use world::{EntityId, Location, PetControl, PetDirectory, WorldError, WorldQuery};
