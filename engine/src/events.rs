//! Post-resolution events
//!
//! The engine enqueues these while resolving; the caller drains them to
//! animate, log, or persist. Nothing in the engine waits on them.

use std::collections::VecDeque;

use kazam_dex::{Ability, BattleStat, StatusEffect, TagKind};

use crate::types::BattlerIndex;

/// What kept a battler standing at 1 HP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SurviveSource {
    Endure,
    Sturdy,
    EndureToken,
    FocusBand,
}

/// Player-facing messages that carry no state change
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notice {
    /// Strong winds weakened a hit on a Flying type
    WindsWeakenedAttack,
    StatusAlreadyPresent(StatusEffect),
    StatusBlocked(StatusEffect),
    ProtectedBySafeguard,
    TagBlocked(TagKind),
    Flinched,
    FellAsleep,
    SubstituteCreated,
    StockpileLayers(u8),
    Ohko,
    HungOn,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    Faint {
        battler: BattlerIndex,
    },
    StatStageChange {
        battler: BattlerIndex,
        stats: Vec<BattleStat>,
        stages: i8,
    },
    StatusChange {
        battler: BattlerIndex,
        status: Option<StatusEffect>,
    },
    TagAdded {
        battler: BattlerIndex,
        tag: TagKind,
    },
    TagRemoved {
        battler: BattlerIndex,
        tag: TagKind,
    },
    TagOverlap {
        battler: BattlerIndex,
        tag: TagKind,
    },
    AbilityRevealed {
        battler: BattlerIndex,
        ability: Ability,
    },
    Survived {
        battler: BattlerIndex,
        source: SurviveSource,
    },
    BossSegmentCleared {
        battler: BattlerIndex,
        segment_index: u8,
    },
    Notice {
        battler: Option<BattlerIndex>,
        notice: Notice,
    },
}

/// FIFO of pending events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<BattleEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<BattleEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> Vec<BattleEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
