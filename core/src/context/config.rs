//! Engine configuration
//!
//! This module re-exports the shared types from familiar-types and provides
//! persistence for EngineConfig.

// Re-export all shared types
pub use familiar_types::{EngineConfig, ProtectionSettings, SyncSettings, TargetPolicy};

use super::error::ConfigError;

/// Extension trait for EngineConfig persistence
pub trait EngineConfigExt {
    fn load() -> Self;
    fn save(self) -> Result<(), ConfigError>;
}

impl EngineConfigExt for EngineConfig {
    /// Load from the platform config directory, falling back to defaults
    /// when no file exists or it fails to parse.
    fn load() -> Self {
        confy::load("familiar", "config").unwrap_or_default()
    }

    fn save(self) -> Result<(), ConfigError> {
        confy::store("familiar", "config", self).map_err(ConfigError::Save)
    }
}
