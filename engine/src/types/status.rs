//! Persistent status held by a combatant

use kazam_dex::StatusEffect;

/// Sleep lasts 2 to 4 turns, inclusive
pub const SLEEP_TURNS_MIN: u32 = 2;
pub const SLEEP_TURNS_MAX: u32 = 4;

/// At most one of these is held at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Poison,
    /// Damage grows each turn the status is held
    Toxic { turn: u8 },
    Burn,
    Paralysis,
    Sleep { turns_left: u8 },
    Freeze,
    Faint,
}

impl Status {
    /// A fresh status of the given kind. Sleep starts with `sleep_turns`.
    pub fn new(effect: StatusEffect, sleep_turns: u8) -> Self {
        match effect {
            StatusEffect::Poison => Status::Poison,
            StatusEffect::Toxic => Status::Toxic { turn: 0 },
            StatusEffect::Burn => Status::Burn,
            StatusEffect::Paralysis => Status::Paralysis,
            StatusEffect::Sleep => Status::Sleep {
                turns_left: sleep_turns,
            },
            StatusEffect::Freeze => Status::Freeze,
            StatusEffect::Faint => Status::Faint,
        }
    }

    pub fn effect(&self) -> StatusEffect {
        match self {
            Status::Poison => StatusEffect::Poison,
            Status::Toxic { .. } => StatusEffect::Toxic,
            Status::Burn => StatusEffect::Burn,
            Status::Paralysis => StatusEffect::Paralysis,
            Status::Sleep { .. } => StatusEffect::Sleep,
            Status::Freeze => StatusEffect::Freeze,
            Status::Faint => StatusEffect::Faint,
        }
    }

    pub fn is(&self, effect: StatusEffect) -> bool {
        self.effect() == effect
    }

    /// Advance a sleep counter by one turn. Returns true once the sleeper wakes.
    pub fn tick_sleep(&mut self) -> bool {
        match self {
            Status::Sleep { turns_left } => {
                *turns_left = turns_left.saturating_sub(1);
                *turns_left == 0
            }
            _ => false,
        }
    }

    /// Advance the toxic counter; returns the damage fraction numerator over 16
    pub fn tick_toxic(&mut self) -> Option<u8> {
        match self {
            Status::Toxic { turn } => {
                *turn = turn.saturating_add(1).min(15);
                Some(*turn)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.effect())
    }
}
