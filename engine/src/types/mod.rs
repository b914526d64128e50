//! Battle state types

pub mod combatant;
pub mod conditions;
pub mod field;
pub mod side;
pub mod stats;
pub mod status;
pub mod tags;

pub use combatant::{
    AiPolicy, BossShieldState, Combatant, CombatantSpec, Controller, MoveSlot, QueuedMove,
    SummonData, TurnData, WaveData, calculate_stat,
};
pub use conditions::{SideCondition, Terrain, Weather};
pub use field::{BattleSpec, Field};
pub use side::{BattlerIndex, PartyModifiers, Side, SideState};
pub use stats::{StatStages, stage_multiplier};
pub use status::Status;
pub use tags::{Tag, TagPayload};
