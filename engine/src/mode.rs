//! Live versus simulated resolution

use crate::events::{BattleEvent, EventQueue};
use crate::rng::BattleRng;

/// How a calculation runs.
///
/// `Live` draws from the battle RNG and records events. `Simulated` is used
/// for AI scoring and previews: it never draws and never records, and each
/// random site substitutes a fixed neutral value instead.
#[derive(Debug)]
pub enum Mode<'a> {
    Live {
        rng: &'a mut BattleRng,
        events: &'a mut EventQueue,
    },
    Simulated,
}

impl<'a> Mode<'a> {
    pub fn live(rng: &'a mut BattleRng, events: &'a mut EventQueue) -> Self {
        Mode::Live { rng, events }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Mode::Simulated)
    }

    /// Inclusive integer roll, or `neutral` when simulated
    pub fn roll_range(&mut self, min: u32, max: u32, neutral: u32) -> u32 {
        match self {
            Mode::Live { rng, .. } => rng.int_range(min, max),
            Mode::Simulated => neutral,
        }
    }

    /// Roll in `0..n`, or `neutral` when simulated
    pub fn roll_below(&mut self, n: u32, neutral: u32) -> u32 {
        match self {
            Mode::Live { rng, .. } => rng.int_below(n),
            Mode::Simulated => neutral,
        }
    }

    pub fn emit(&mut self, event: BattleEvent) {
        if let Mode::Live { events, .. } = self {
            events.push(event);
        }
    }
}
