use thiserror::Error;

use crate::species::SpeciesId;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("Unknown species: {0}")]
    UnknownSpecies(SpeciesId),

    #[error("Species {0} cannot be obtained")]
    Unobtainable(SpeciesId),

    #[error("No entry named {0:?}")]
    UnknownName(String),

    #[error("Invalid dex data: {0}")]
    Json(#[from] serde_json::Error),
}
