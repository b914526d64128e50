//! Global field state

use super::conditions::{SideCondition, Terrain, Weather};
use super::side::{Side, SideState};

/// Battle-wide rule set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleSpec {
    #[default]
    Default,
    /// The last battle of a run; its boss shield cannot be skipped through
    FinalBoss,
}

/// Field state shared by every combatant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,

    /// Gravity grounds everything
    pub gravity: bool,

    /// Ion Deluge turns Normal moves Electric
    pub ion_deluge: bool,

    /// Every breakable ability is suppressed
    pub ignore_abilities: bool,

    /// Two combatants per side
    pub double: bool,

    pub spec: BattleSpec,

    /// Player side, then enemy side
    pub sides: [SideState; 2],

    pub turn: u32,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    pub fn side_has(&self, side: Side, condition: SideCondition) -> bool {
        self.side(side).has(condition)
    }

    /// Reset weather, terrain and side conditions between waves
    pub fn clear_conditions(&mut self) {
        self.weather = None;
        self.terrain = None;
        self.gravity = false;
        self.ion_deluge = false;
        for side in self.sides.iter_mut() {
            side.conditions.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_lookup() {
        let mut field = Field::new();
        field.side_mut(Side::Enemy).add(SideCondition::Safeguard, 5);
        assert!(field.side_has(Side::Enemy, SideCondition::Safeguard));
        assert!(!field.side_has(Side::Player, SideCondition::Safeguard));
    }

    #[test]
    fn test_clear_conditions_keeps_modifiers() {
        let mut field = Field::new();
        field.weather = Some(Weather::Rain);
        field.side_mut(Side::Player).add(SideCondition::Reflect, 5);
        field.side_mut(Side::Enemy).modifiers.damage_booster = 2;
        field.clear_conditions();
        assert_eq!(field.weather, None);
        assert!(field.side(Side::Player).conditions.is_empty());
        assert_eq!(field.side(Side::Enemy).modifiers.damage_booster, 2);
    }
}
