mod background_tasks;
mod config;
mod error;

pub use background_tasks::BackgroundTasks;
pub use config::{EngineConfig, EngineConfigExt, ProtectionSettings, SyncSettings, TargetPolicy};
pub use error::ConfigError;
