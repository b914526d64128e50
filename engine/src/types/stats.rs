//! Stat stages

use kazam_dex::BattleStat;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Upper bound on a stage multiplier, including consumable boosts
pub const MAX_STAGE_MULTIPLIER: f64 = 4.0;

/// In-battle stat stages, each kept in -6..=+6
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: BattleStat) -> i8 {
        match stat {
            BattleStat::Atk => self.atk,
            BattleStat::Def => self.def,
            BattleStat::Spa => self.spa,
            BattleStat::Spd => self.spd,
            BattleStat::Spe => self.spe,
            BattleStat::Accuracy => self.accuracy,
            BattleStat::Evasion => self.evasion,
        }
    }

    /// Set a stage, clamped to -6..=+6
    pub fn set(&mut self, stat: BattleStat, value: i8) {
        let clamped = value.clamp(MIN_STAGE, MAX_STAGE);
        match stat {
            BattleStat::Atk => self.atk = clamped,
            BattleStat::Def => self.def = clamped,
            BattleStat::Spa => self.spa = clamped,
            BattleStat::Spd => self.spd = clamped,
            BattleStat::Spe => self.spe = clamped,
            BattleStat::Accuracy => self.accuracy = clamped,
            BattleStat::Evasion => self.evasion = clamped,
        }
    }

    /// Shift a stage by `amount`; returns the change actually applied
    pub fn boost(&mut self, stat: BattleStat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(MIN_STAGE, MAX_STAGE);
        self.set(stat, new_value);
        new_value - current
    }

    /// Whether a stage can still move in the direction of `amount`
    pub fn can_change(&self, stat: BattleStat, amount: i8) -> bool {
        let current = self.get(stat);
        (amount > 0 && current < MAX_STAGE) || (amount < 0 && current > MIN_STAGE)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        BattleStat::ALL.iter().all(|s| self.get(*s) == 0)
    }
}

/// Multiplier for a stage: `max(2, 2+s) / max(2, 2-s)`, capped at 4.
pub fn stage_multiplier(stage: i8) -> f64 {
    let s = stage.clamp(MIN_STAGE, MAX_STAGE) as f64;
    let ratio = (2.0 + s).max(2.0) / (2.0 - s).max(2.0);
    ratio.min(MAX_STAGE_MULTIPLIER)
}
