use kazam_dex::DexError;
use thiserror::Error;

use crate::types::BattlerIndex;

/// Construction-time failures. Combat resolution itself never fails.
#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Invalid combatant: {0}")]
    Dex(#[from] DexError),

    #[error("No combatant at {0}")]
    InvalidBattler(BattlerIndex),

    #[error("Field slot {position} on the {side:?} side is already taken")]
    SlotOccupied {
        side: crate::types::Side,
        position: u8,
    },
}
