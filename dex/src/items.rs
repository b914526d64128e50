//! Held item kinds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    ChoiceBand,
    ChoiceSpecs,
    ChoiceScarf,
    AssaultVest,
    Eviolite,
    ScopeLens,
    MultiLens,
    FocusBand,
}

impl ItemKind {
    pub fn max_stacks(&self) -> u8 {
        match self {
            ItemKind::MultiLens => 2,
            ItemKind::FocusBand => 5,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::ChoiceBand => "Choice Band",
            ItemKind::ChoiceSpecs => "Choice Specs",
            ItemKind::ChoiceScarf => "Choice Scarf",
            ItemKind::AssaultVest => "Assault Vest",
            ItemKind::Eviolite => "Eviolite",
            ItemKind::ScopeLens => "Scope Lens",
            ItemKind::MultiLens => "Multi-Lens",
            ItemKind::FocusBand => "Focus Band",
        }
    }
}

/// An item in a combatant's possession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub kind: ItemKind,
    #[serde(default = "one")]
    pub stacks: u8,
}

fn one() -> u8 {
    1
}

impl HeldItem {
    /// A held item with its stack count clamped to the kind's maximum
    pub fn new(kind: ItemKind, stacks: u8) -> Self {
        Self {
            kind,
            stacks: stacks.clamp(1, kind.max_stacks()),
        }
    }
}
