//! Battler tag kinds and their static properties

use serde::{Deserialize, Serialize};

/// When a tag's timer is consulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapseType {
    /// Before the holder uses a move
    PreMove,
    /// After the holder's move resolves
    AfterMove,
    /// At the end of every turn
    TurnEnd,
    /// Triggered explicitly by an effect (e.g. the holder taking a hit)
    Custom,
    /// The holder fainted. Always clears the tag.
    Faint,
}

/// Temporary battle state attached to one combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    // Mental / movement
    Confused,
    Flinched,
    Trapped,
    Bound,
    Infatuated,
    Taunt,
    Encore,
    Disabled,
    Drowsy,
    Frenzy,

    // Protection
    Substitute,
    Protected,
    Enduring,
    Sturdy,
    EndureToken,

    // Two-turn moves
    Charging,
    Flying,
    Underground,
    Underwater,
    Hidden,

    // Stat and damage modifiers
    SlowStart,
    Minimized,
    ReceiveDoubleDamage,
    Foresight,
    MiracleEye,
    AlwaysCrit,
    CritBoost,
    DragonCheer,
    Stockpiling,

    // Typing and grounding
    Roost,
    MagnetRisen,
    Telekinesis,
    Ingrain,
    SmackedDown,
    Electrified,

    // Linked state between two battlers
    Commanded,
}

impl TagKind {
    /// Lapse classes that advance this tag's timer
    pub fn lapse_types(&self) -> &'static [LapseType] {
        use LapseType::*;
        match self {
            TagKind::Confused | TagKind::Infatuated => &[PreMove],
            TagKind::Flinched => &[PreMove, TurnEnd],
            TagKind::Taunt | TagKind::Encore | TagKind::Frenzy => &[AfterMove],
            TagKind::Charging
            | TagKind::Flying
            | TagKind::Underground
            | TagKind::Underwater
            | TagKind::Hidden => &[AfterMove],
            TagKind::Enduring | TagKind::Sturdy | TagKind::EndureToken => &[TurnEnd, Custom],
            TagKind::Bound
            | TagKind::Disabled
            | TagKind::Drowsy
            | TagKind::Protected
            | TagKind::SlowStart
            | TagKind::ReceiveDoubleDamage
            | TagKind::AlwaysCrit
            | TagKind::Roost
            | TagKind::MagnetRisen
            | TagKind::Telekinesis
            | TagKind::Ingrain
            | TagKind::Electrified => &[TurnEnd],
            TagKind::Trapped
            | TagKind::Substitute
            | TagKind::Minimized
            | TagKind::Foresight
            | TagKind::MiracleEye
            | TagKind::CritBoost
            | TagKind::DragonCheer
            | TagKind::Stockpiling
            | TagKind::SmackedDown
            | TagKind::Commanded => &[Custom],
        }
    }

    /// Default duration in turns when none is given. `None` is indefinite.
    pub fn default_turns(&self) -> Option<u32> {
        match self {
            TagKind::Flinched
            | TagKind::Protected
            | TagKind::Enduring
            | TagKind::Sturdy
            | TagKind::EndureToken
            | TagKind::Roost
            | TagKind::Electrified
            | TagKind::Charging
            | TagKind::Flying
            | TagKind::Underground
            | TagKind::Underwater
            | TagKind::Hidden
            | TagKind::ReceiveDoubleDamage => Some(1),
            TagKind::Drowsy | TagKind::AlwaysCrit => Some(2),
            TagKind::Confused | TagKind::Encore => Some(3),
            TagKind::Taunt | TagKind::Disabled | TagKind::Telekinesis => Some(3),
            TagKind::Bound => Some(4),
            TagKind::SlowStart | TagKind::MagnetRisen => Some(5),
            TagKind::Frenzy => Some(2),
            TagKind::Trapped
            | TagKind::Infatuated
            | TagKind::Substitute
            | TagKind::Minimized
            | TagKind::Foresight
            | TagKind::MiracleEye
            | TagKind::CritBoost
            | TagKind::DragonCheer
            | TagKind::Stockpiling
            | TagKind::Ingrain
            | TagKind::SmackedDown
            | TagKind::Commanded => None,
        }
    }

    /// Semi-invulnerable states of two-turn moves
    pub fn is_semi_invulnerable(&self) -> bool {
        matches!(
            self,
            TagKind::Flying | TagKind::Underground | TagKind::Underwater | TagKind::Hidden
        )
    }

    /// Tags removed when the holder falls asleep
    pub fn is_cleared_by_sleep(&self) -> bool {
        self.is_semi_invulnerable() || matches!(self, TagKind::Charging)
    }

    pub fn is_trap(&self) -> bool {
        matches!(self, TagKind::Trapped | TagKind::Bound)
    }

    /// Tags that lift the holder off the ground
    pub fn is_floating(&self) -> bool {
        matches!(self, TagKind::MagnetRisen | TagKind::Telekinesis)
    }

    /// Tags that pin the holder to the ground
    pub fn is_grounding(&self) -> bool {
        matches!(self, TagKind::Ingrain | TagKind::SmackedDown)
    }

    /// Tags that survive a CUSTOM lapse instead of being consumed by it
    pub fn holds_on_custom_lapse(&self) -> bool {
        matches!(self, TagKind::Enduring | TagKind::Sturdy)
    }

    /// Tags that mark a held move (payload carries the move id)
    pub fn tracks_move(&self) -> bool {
        matches!(self, TagKind::Encore | TagKind::Disabled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagKind::Confused => "Confusion",
            TagKind::Flinched => "Flinch",
            TagKind::Trapped => "Trapped",
            TagKind::Bound => "Bind",
            TagKind::Infatuated => "Infatuation",
            TagKind::Taunt => "Taunt",
            TagKind::Encore => "Encore",
            TagKind::Disabled => "Disable",
            TagKind::Drowsy => "Drowsy",
            TagKind::Frenzy => "Frenzy",
            TagKind::Substitute => "Substitute",
            TagKind::Protected => "Protect",
            TagKind::Enduring => "Endure",
            TagKind::Sturdy => "Sturdy",
            TagKind::EndureToken => "Endure Token",
            TagKind::Charging => "Charging",
            TagKind::Flying => "Flying",
            TagKind::Underground => "Underground",
            TagKind::Underwater => "Underwater",
            TagKind::Hidden => "Hidden",
            TagKind::SlowStart => "Slow Start",
            TagKind::Minimized => "Minimize",
            TagKind::ReceiveDoubleDamage => "Vulnerable",
            TagKind::Foresight => "Foresight",
            TagKind::MiracleEye => "Miracle Eye",
            TagKind::AlwaysCrit => "Laser Focus",
            TagKind::CritBoost => "Focus Energy",
            TagKind::DragonCheer => "Dragon Cheer",
            TagKind::Stockpiling => "Stockpile",
            TagKind::Roost => "Roost",
            TagKind::MagnetRisen => "Magnet Rise",
            TagKind::Telekinesis => "Telekinesis",
            TagKind::Ingrain => "Ingrain",
            TagKind::SmackedDown => "Smack Down",
            TagKind::Electrified => "Electrify",
            TagKind::Commanded => "Commanded",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
