//! Permanent and in-battle stat identifiers

use serde::{Deserialize, Serialize};

/// The six permanent stats, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

impl Stat {
    pub const ALL: [Stat; 6] = [Stat::Hp, Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    /// Index into a six-entry stat array
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hp" => Some(Stat::Hp),
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            _ => None,
        }
    }
}

/// Stats that carry an in-battle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl BattleStat {
    pub const ALL: [BattleStat; 7] = [
        BattleStat::Atk,
        BattleStat::Def,
        BattleStat::Spa,
        BattleStat::Spd,
        BattleStat::Spe,
        BattleStat::Accuracy,
        BattleStat::Evasion,
    ];

    /// The five stage stats that map onto a permanent stat
    pub const EFFECTIVE: [BattleStat; 5] = [
        BattleStat::Atk,
        BattleStat::Def,
        BattleStat::Spa,
        BattleStat::Spd,
        BattleStat::Spe,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(BattleStat::Atk),
            "def" => Some(BattleStat::Def),
            "spa" => Some(BattleStat::Spa),
            "spd" => Some(BattleStat::Spd),
            "spe" => Some(BattleStat::Spe),
            "accuracy" => Some(BattleStat::Accuracy),
            "evasion" => Some(BattleStat::Evasion),
            _ => None,
        }
    }

    /// The permanent stat this stage scales, if any
    pub fn permanent(&self) -> Option<Stat> {
        match self {
            BattleStat::Atk => Some(Stat::Atk),
            BattleStat::Def => Some(Stat::Def),
            BattleStat::Spa => Some(Stat::Spa),
            BattleStat::Spd => Some(Stat::Spd),
            BattleStat::Spe => Some(Stat::Spe),
            BattleStat::Accuracy | BattleStat::Evasion => None,
        }
    }

    pub fn is_offensive(&self) -> bool {
        matches!(self, BattleStat::Atk | BattleStat::Spa)
    }

    pub fn is_defensive(&self) -> bool {
        matches!(self, BattleStat::Def | BattleStat::Spd)
    }
}

impl Stat {
    /// The stage stat that scales this permanent stat. HP has none.
    pub fn battle_stat(&self) -> Option<BattleStat> {
        match self {
            Stat::Hp => None,
            Stat::Atk => Some(BattleStat::Atk),
            Stat::Def => Some(BattleStat::Def),
            Stat::Spa => Some(BattleStat::Spa),
            Stat::Spd => Some(BattleStat::Spd),
            Stat::Spe => Some(BattleStat::Spe),
        }
    }
}
