//! Species table entries

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::types::Type;

/// Species identifier (national dex number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub u16);

impl std::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub id: SpeciesId,
    pub name: String,
    pub types: Vec<Type>,
    /// HP, Atk, Def, SpA, SpD, Spe
    pub base_stats: [u16; 6],
    /// Regular abilities followed by the hidden ability
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default = "yes")]
    pub obtainable: bool,
}

fn yes() -> bool {
    true
}

impl SpeciesData {
    pub fn base_stat_total(&self) -> u32 {
        self.base_stats.iter().map(|&s| s as u32).sum()
    }
}
