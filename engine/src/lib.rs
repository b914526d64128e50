//! Deterministic turn-based combat resolution.
//!
//! ```text
//! kazam-dex (reference tables)
//!        │
//!        ▼
//! kazam-engine ← THIS CRATE
//!   Battle ──► BattleView ──► power / effectiveness / stats / crit / damage
//!     │                              │
//!     │                              ▼
//!     │                      AI scoring (simulated)
//!     ▼
//!   status + tag state machine, boss shields ──► BattleEvent queue
//! ```
//!
//! Every calculation takes a [`Mode`]. Live calls draw from the seeded
//! [`BattleRng`] and record events; simulated calls never draw and never
//! record, so the AI can predict outcomes without disturbing the battle.
//!
//! # Main Types
//!
//! - [`Battle`] - owns combatants, the field, the RNG and pending events
//! - [`BattleView`] - read-only window used by every calculation
//! - [`Combatant`], [`CombatantSpec`] - one creature and how to build it
//! - [`DamageRequest`], [`DamageResult`], [`HitOutcome`]
//! - [`BattleEvent`], [`Notice`] - what happened, for the caller to present
//! - [`Command`] - a move chosen by the AI

pub mod ai;
pub mod battle;
pub mod boss;
pub mod crit;
pub mod damage;
pub mod effectiveness;
pub mod error;
pub mod events;
pub mod mode;
pub mod pipeline;
pub mod power;
pub mod rng;
pub mod stat_calc;
pub mod state_machine;
pub mod types;

mod abilities;
mod items;

pub use ai::Command;
pub use battle::{ApplyOptions, Battle, BattleConfig, BattleSnapshot, BattleView, StrikeResult};
pub use damage::{DamageRequest, DamageResult, HitOutcome, compute_damage};
pub use effectiveness::{Effectiveness, attack_type_effectiveness, move_effectiveness};
pub use error::BattleError;
pub use events::{BattleEvent, EventQueue, Notice, SurviveSource};
pub use mode::Mode;
pub use rng::BattleRng;
pub use stat_calc::{StatQuery, effective_stat};
pub use types::{
    AiPolicy, BattleSpec, BattlerIndex, Combatant, CombatantSpec, Controller, Field, Side, Status,
    Tag, Terrain, Weather,
};
