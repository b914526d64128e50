//! Move table entries

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::stat::BattleStat;
use crate::status::StatusEffect;
use crate::tags::TagKind;
use crate::types::Type;

/// Move identifier (national move number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub u16);

impl MoveId {
    pub const NONE: MoveId = MoveId(0);
    pub const STRUGGLE: MoveId = MoveId(165);
}

impl std::fmt::Display for MoveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Who a move can be aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    User,
    Ally,
    UserOrAlly,
    NearOther,
    NearEnemy,
    RandomNearEnemy,
    AllNearEnemies,
    AllNearOthers,
    UserSide,
    EnemySide,
    BothSides,
}

impl MoveTarget {
    /// Targets that hit every eligible battler at once
    pub fn is_spread(&self) -> bool {
        matches!(self, MoveTarget::AllNearEnemies | MoveTarget::AllNearOthers)
    }

    /// Targets that are a field side rather than battlers
    pub fn is_field(&self) -> bool {
        matches!(
            self,
            MoveTarget::UserSide | MoveTarget::EnemySide | MoveTarget::BothSides
        )
    }
}

bitflags! {
    /// Static move properties
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MoveFlags: u16 {
        const MAKES_CONTACT     = 1 << 0;
        const SOUND_BASED       = 1 << 1;
        const PUNCHING          = 1 << 2;
        const WIND              = 1 << 3;
        const IGNORE_PROTECT    = 1 << 4;
        const IGNORE_SUBSTITUTE = 1 << 5;
        const IGNORE_ABILITIES  = 1 << 6;
        const TRIAGE            = 1 << 7;
    }
}

/// Where a variable-type move takes its type from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSource {
    Weather,
    Terrain,
}

/// A precondition a move must satisfy to be usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCondition {
    /// Only on the user's first turn on the field
    FirstTurnOnly,
    /// Only while the user is asleep
    UserAsleep,
    /// Only against targets whose level does not exceed the user's
    UserLevelAtLeastTarget,
}

/// A behaviour attached to a move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveAttr {
    /// Deals exactly `damage`
    FixedDamage { damage: u32 },
    /// Deals damage equal to the user's level
    LevelDamage,
    /// Deals half the target's current HP
    TargetHalfHpDamage,
    /// Knocks the target out outright
    OneHitKo,
    HighCritRatio { stages: u8 },
    /// Always lands a critical hit
    CritOnly {
        #[serde(default)]
        unblockable: bool,
    },
    /// Type follows the field (Weather Ball, Terrain Pulse)
    VariableType { source: TypeSource },
    /// Replaces the chart value for one defending type (Freeze-Dry)
    TypeChartOverride { against: Type, multiplier: f64 },
    /// Ground move that also hits airborne targets
    HitsAirborne,
    /// Reaches targets holding `tag`, doubling damage when `double_damage` is set
    HitsTag {
        tag: TagKind,
        #[serde(default)]
        double_damage: bool,
    },
    /// Physical damage is not halved by burn (Facade)
    BypassBurnReduction,
    /// Ignores the target's stat stages
    IgnoreStatStages,
    /// Never reduces the target below 1 HP
    SurviveDamage,
    MultiHit { min: u8, max: u8 },
    Status {
        effect: StatusEffect,
        #[serde(default = "always")]
        chance: u8,
        #[serde(default)]
        self_target: bool,
    },
    StatStageChange {
        stats: Vec<BattleStat>,
        stages: i8,
        #[serde(default)]
        self_target: bool,
        #[serde(default = "always")]
        chance: u8,
    },
    AddTag {
        tag: TagKind,
        #[serde(default)]
        turns: Option<u32>,
        #[serde(default = "always")]
        chance: u8,
        #[serde(default)]
        self_target: bool,
    },
    /// Restores `ratio` of the user's max HP
    Heal { ratio: f64 },
    /// User takes `ratio` of the damage dealt
    Recoil { ratio: f64 },
    Condition { condition: MoveCondition },
    /// Two-turn move; `tag` is the state held during the charge turn
    Charge {
        #[serde(default)]
        tag: Option<TagKind>,
    },
}

fn always() -> u8 {
    100
}

/// One row of the move table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    pub id: MoveId,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    #[serde(default)]
    pub power: u16,
    /// `None` never misses
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub target: MoveTarget,
    #[serde(default)]
    pub flags: MoveFlags,
    #[serde(default)]
    pub attrs: Vec<MoveAttr>,
    /// Effects not yet supported. The AI avoids these.
    #[serde(default)]
    pub unimplemented: bool,
}

impl MoveData {
    /// Placeholder for an id with no table entry
    pub fn placeholder(id: MoveId) -> Self {
        Self {
            id,
            name: format!("Unknown move {}", id.0),
            move_type: Type::Normal,
            category: MoveCategory::Status,
            power: 0,
            accuracy: None,
            pp: 0,
            priority: 0,
            target: MoveTarget::NearOther,
            flags: MoveFlags::empty(),
            attrs: Vec::new(),
            unimplemented: true,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.category != MoveCategory::Status
    }

    pub fn has_flag(&self, flag: MoveFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn attrs(&self) -> impl Iterator<Item = &MoveAttr> {
        self.attrs.iter()
    }

    pub fn is_one_hit_ko(&self) -> bool {
        self.attrs.iter().any(|a| matches!(a, MoveAttr::OneHitKo))
    }

    pub fn is_multi_hit(&self) -> bool {
        self.attrs.iter().any(|a| matches!(a, MoveAttr::MultiHit { .. }))
    }

    pub fn variable_type(&self) -> Option<TypeSource> {
        self.attrs.iter().find_map(|a| match a {
            MoveAttr::VariableType { source } => Some(*source),
            _ => None,
        })
    }

    /// Crit stages contributed by the move itself
    pub fn crit_stages(&self) -> u8 {
        self.attrs
            .iter()
            .map(|a| match a {
                MoveAttr::HighCritRatio { stages } => *stages,
                _ => 0,
            })
            .sum()
    }

    /// `Some(unblockable)` when the move always crits
    pub fn crit_only(&self) -> Option<bool> {
        self.attrs.iter().find_map(|a| match a {
            MoveAttr::CritOnly { unblockable } => Some(*unblockable),
            _ => None,
        })
    }

    pub fn hits_tag(&self, tag: TagKind) -> bool {
        self.attrs
            .iter()
            .any(|a| matches!(a, MoveAttr::HitsTag { tag: t, .. } if *t == tag))
    }

    pub fn conditions(&self) -> impl Iterator<Item = MoveCondition> + '_ {
        self.attrs.iter().filter_map(|a| match a {
            MoveAttr::Condition { condition } => Some(*condition),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_json_shape() {
        let json = r#"{"kind":"status","effect":"burn","chance":10}"#;
        let attr: MoveAttr = serde_json::from_str(json).unwrap();
        assert_eq!(
            attr,
            MoveAttr::Status {
                effect: StatusEffect::Burn,
                chance: 10,
                self_target: false
            }
        );
    }

    #[test]
    fn test_move_defaults() {
        let json = r#"{"id":33,"name":"Tackle","type":"Normal","category":"physical","power":40,"target":"near_other"}"#;
        let data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(data.id, MoveId(33));
        assert!(data.flags.is_empty());
        assert!(data.attrs.is_empty());
        assert!(!data.unimplemented);
    }

    #[test]
    fn test_crit_helpers() {
        let mut data = MoveData::placeholder(MoveId(1));
        data.attrs.push(MoveAttr::HighCritRatio { stages: 1 });
        data.attrs.push(MoveAttr::CritOnly { unblockable: true });
        assert_eq!(data.crit_stages(), 1);
        assert_eq!(data.crit_only(), Some(true));
    }

    #[test]
    fn test_placeholder_is_neutral() {
        let data = MoveData::placeholder(MoveId(9999));
        assert_eq!(data.power, 0);
        assert!(!data.is_attack());
        assert!(data.unimplemented);
    }
}
