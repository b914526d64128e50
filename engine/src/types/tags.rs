//! Active tag instances

use kazam_dex::{MoveId, TagKind};

/// Per-tag data beyond its kind and timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagPayload {
    #[default]
    None,
    /// Stacked layers (Stockpile, Dragon Cheer strength)
    Layers(u8),
    /// Remaining hit points of a substitute
    Hp(u32),
    /// The move an Encore or Disable is tied to
    Move(MoveId),
}

/// One active tag on one combatant
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    pub kind: TagKind,
    /// `None` lasts until removed explicitly or by a CUSTOM lapse
    pub turns_left: Option<u32>,
    /// Id of the combatant that applied it
    pub source: Option<u32>,
    pub payload: TagPayload,
}

impl Tag {
    pub fn new(kind: TagKind) -> Self {
        Self {
            kind,
            turns_left: kind.default_turns(),
            source: None,
            payload: TagPayload::None,
        }
    }

    pub fn with_turns(mut self, turns: Option<u32>) -> Self {
        if turns.is_some() {
            self.turns_left = turns;
        }
        self
    }

    pub fn with_source(mut self, source: Option<u32>) -> Self {
        self.source = source;
        self
    }

    pub fn with_payload(mut self, payload: TagPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn layers(&self) -> u8 {
        match self.payload {
            TagPayload::Layers(n) => n,
            _ => 0,
        }
    }

    pub fn tracked_move(&self) -> Option<MoveId> {
        match self.payload {
            TagPayload::Move(id) => Some(id),
            _ => None,
        }
    }
}
