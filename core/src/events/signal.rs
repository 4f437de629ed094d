//! Normalized combat signals
//!
//! The facts the normalizer distills out of raw events. Signals carry owner
//! identity plus the timestamp of the underlying damage; everything else
//! about the raw event is already judged irrelevant by the time one of
//! these exists.

use chrono::NaiveDateTime;

use crate::world::EntityId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatSignal {
    /// The owner damaged an entity
    OwnerDealtDamage {
        owner: EntityId,
        target: EntityId,
        at: NaiveDateTime,
    },
    /// An entity damaged the owner
    OwnerTookDamage {
        owner: EntityId,
        attacker: EntityId,
        at: NaiveDateTime,
    },
    /// The owner took non-entity damage; keeps the combat window open
    /// without naming an attacker
    OwnerActivity { owner: EntityId, at: NaiveDateTime },
}

/// Systems that react to combat signals (the tracker, host status displays).
pub trait SignalHandler: Send + Sync {
    fn handle_signal(&self, signal: &CombatSignal);

    /// Handle multiple signals (default implementation calls handle_signal
    /// for each)
    fn handle_signals(&self, signals: &[CombatSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
