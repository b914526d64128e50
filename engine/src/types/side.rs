//! Field sides and battler addressing

use std::collections::{BTreeSet, HashMap};

use kazam_dex::BattleStat;

use super::conditions::SideCondition;

/// Which side of the field a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Index of a combatant within its battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlerIndex(pub usize);

impl std::fmt::Display for BattlerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "battler {}", self.0)
    }
}

/// Party-wide modifiers that scale combat for one side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyModifiers {
    /// Stacks of the enemy damage booster (x1.05 each)
    pub damage_booster: u8,
    /// Stacks of the enemy damage reducer (x0.975 each)
    pub damage_reducer: u8,
    /// Stats with an active temporary stage booster (+0.3 each)
    pub temp_stat_boosts: BTreeSet<BattleStat>,
    /// Temporary crit booster (+1 crit stage)
    pub dire_hit: bool,
}

/// State attached to one side of the field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Active conditions and their remaining turns
    pub conditions: HashMap<SideCondition, u8>,
    pub modifiers: PartyModifiers,
}

impl SideState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, condition: SideCondition) -> bool {
        self.conditions.contains_key(&condition)
    }

    pub fn add(&mut self, condition: SideCondition, turns: u8) {
        self.conditions.insert(condition, turns);
    }

    pub fn remove(&mut self, condition: SideCondition) -> bool {
        self.conditions.remove(&condition).is_some()
    }

    /// Count down every condition; expired ones are removed and returned
    pub fn tick(&mut self) -> Vec<SideCondition> {
        let mut expired = Vec::new();
        for (condition, turns) in self.conditions.iter_mut() {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                expired.push(*condition);
            }
        }
        for condition in &expired {
            self.conditions.remove(condition);
        }
        expired
    }
}
