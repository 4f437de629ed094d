//! Shared configuration types for familiar
//!
//! This crate contains serializable settings shared between the engine
//! (familiar-core) and any host shell embedding it. All fields carry serde
//! defaults so partially written config files still load.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Target Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Which side of the owner's combat record a pet prefers when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Prefer the entity attacking the owner (defend first, default)
    #[default]
    AttackerFirst,
    /// Prefer the entity the owner is attacking (press the owner's attack)
    TargetFirst,
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_combat_window_secs() -> f32 {
    10.0
}
fn default_sync_interval_secs() -> f32 {
    2.0
}
fn default_sweep_interval_secs() -> f32 {
    5.0
}
fn default_target_radius() -> f64 {
    20.0
}
fn default_disengage_distance() -> f64 {
    30.0
}
fn default_owner_aoe_radius() -> f64 {
    15.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Tuning for the combat tracker and the per-pet reconciliation jobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Seconds an owner stays "in combat" after the last qualifying damage
    #[serde(default = "default_combat_window_secs")]
    pub combat_window_secs: f32,
    /// Period of each pet's reconciliation job
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: f32,
    /// Period of the expired-record sweep
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: f32,
    /// Maximum distance from the pet at which a resolved target is accepted
    #[serde(default = "default_target_radius")]
    pub target_radius: f64,
    /// Distance beyond which an externally acquired target is abandoned
    /// once the owner leaves combat
    #[serde(default = "default_disengage_distance")]
    pub disengage_distance: f64,
    /// Attacker/target precedence rule
    #[serde(default)]
    pub policy: TargetPolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            combat_window_secs: default_combat_window_secs(),
            sync_interval_secs: default_sync_interval_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            target_radius: default_target_radius(),
            disengage_distance: default_disengage_distance(),
            policy: TargetPolicy::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Protection Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Tuning for the protection guard sitting in front of signal normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectionSettings {
    /// Suppress the fixed environmental damage causes against pets
    #[serde(default = "default_true")]
    pub block_environmental: bool,
    /// Suppress harmful status effects applied to pets
    #[serde(default = "default_true")]
    pub block_harmful_effects: bool,
    /// Player-sourced magic/area damage to a pet is treated as the owner's
    /// own splash and suppressed when the owner is within this radius
    #[serde(default = "default_owner_aoe_radius")]
    pub owner_aoe_radius: f64,
}

impl Default for ProtectionSettings {
    fn default() -> Self {
        Self {
            block_environmental: true,
            block_harmful_effects: true,
            owner_aoe_radius: default_owner_aoe_radius(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration for the engine. Persistence lives in familiar-core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub protection: ProtectionSettings,
}
