//! The reference data registry

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DexError;
use crate::moves::{MoveData, MoveId};
use crate::species::{SpeciesData, SpeciesId};

/// Serialized form of a dex: flat lists of table rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexTables {
    pub moves: Vec<MoveData>,
    pub species: Vec<SpeciesData>,
}

/// Lookup tables for moves and species
#[derive(Debug, Clone, Default)]
pub struct Dex {
    moves: HashMap<MoveId, MoveData>,
    species: HashMap<SpeciesId, SpeciesData>,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dex from table rows. Later rows replace earlier ones with the same id.
    pub fn from_tables(tables: DexTables) -> Self {
        let mut dex = Self::new();
        for data in tables.moves {
            dex.insert_move(data);
        }
        for data in tables.species {
            dex.insert_species(data);
        }
        dex
    }

    /// Parse a dex from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, DexError> {
        let tables: DexTables = serde_json::from_str(json)?;
        Ok(Self::from_tables(tables))
    }

    pub fn to_tables(&self) -> DexTables {
        let mut moves: Vec<MoveData> = self.moves.values().cloned().collect();
        moves.sort_by_key(|m| m.id);
        let mut species: Vec<SpeciesData> = self.species.values().cloned().collect();
        species.sort_by_key(|s| s.id);
        DexTables { moves, species }
    }

    /// Overlay another dex on top of this one
    pub fn merge(&mut self, other: Dex) {
        self.moves.extend(other.moves);
        self.species.extend(other.species);
    }

    pub fn insert_move(&mut self, data: MoveData) {
        self.moves.insert(data.id, data);
    }

    pub fn insert_species(&mut self, data: SpeciesData) {
        self.species.insert(data.id, data);
    }

    pub fn get_move(&self, id: MoveId) -> Option<&MoveData> {
        self.moves.get(&id)
    }

    /// Move lookup that never fails.
    ///
    /// A missing id yields a powerless placeholder flagged as unimplemented.
    pub fn move_data(&self, id: MoveId) -> Cow<'_, MoveData> {
        match self.moves.get(&id) {
            Some(data) => Cow::Borrowed(data),
            None => {
                tracing::warn!(move_id = id.0, "move has no table entry, using placeholder");
                Cow::Owned(MoveData::placeholder(id))
            }
        }
    }

    pub fn species(&self, id: SpeciesId) -> Result<&SpeciesData, DexError> {
        self.species.get(&id).ok_or(DexError::UnknownSpecies(id))
    }

    /// Species lookup that also rejects species that cannot appear in battle
    pub fn obtainable_species(&self, id: SpeciesId) -> Result<&SpeciesData, DexError> {
        let data = self.species(id)?;
        if !data.obtainable {
            return Err(DexError::Unobtainable(id));
        }
        Ok(data)
    }

    /// Find a move by display name (case-insensitive)
    pub fn move_named(&self, name: &str) -> Result<MoveId, DexError> {
        self.moves
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .map(|m| m.id)
            .ok_or_else(|| DexError::UnknownName(name.to_string()))
    }

    /// Find a species by display name (case-insensitive)
    pub fn species_named(&self, name: &str) -> Result<SpeciesId, DexError> {
        self.species
            .values()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.id)
            .ok_or_else(|| DexError::UnknownName(name.to_string()))
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveCategory;
    use crate::types::Type;

    #[test]
    fn test_missing_move_is_placeholder() {
        let dex = Dex::new();
        let data = dex.move_data(MoveId(4242));
        assert_eq!(data.id, MoveId(4242));
        assert_eq!(data.power, 0);
        assert_eq!(data.category, MoveCategory::Status);
        assert!(data.unimplemented);
    }

    #[test]
    fn test_unknown_and_unobtainable_species() {
        let dex = Dex::builtin();
        assert!(matches!(
            dex.species(SpeciesId(9999)),
            Err(DexError::UnknownSpecies(SpeciesId(9999)))
        ));
        assert!(matches!(
            dex.obtainable_species(SpeciesId(0)),
            Err(DexError::Unobtainable(SpeciesId(0)))
        ));
        assert!(dex.obtainable_species(SpeciesId(25)).is_ok());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "moves": [
                {"id": 33, "name": "Tackle", "type": "Normal", "category": "physical",
                 "power": 40, "accuracy": 100, "pp": 35, "target": "near_other",
                 "flags": "MAKES_CONTACT"}
            ],
            "species": [
                {"id": 25, "name": "Pikachu", "types": ["Electric"],
                 "baseStats": [35, 55, 40, 50, 50, 90]}
            ]
        }"#;
        let dex = Dex::from_json(json).unwrap();
        let tackle = dex.move_data(MoveId(33));
        assert_eq!(tackle.power, 40);
        assert!(tackle.has_flag(crate::moves::MoveFlags::MAKES_CONTACT));
        let pikachu = dex.species(SpeciesId(25)).unwrap();
        assert_eq!(pikachu.types, vec![Type::Electric]);
        assert!(pikachu.obtainable);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Dex::from_json("{\"moves\": 3}"), Err(DexError::Json(_))));
    }

    #[test]
    fn test_merge_overrides() {
        let mut dex = Dex::builtin();
        let mut tables = DexTables::default();
        let mut tackle = dex.move_data(MoveId(33)).into_owned();
        tackle.power = 50;
        tables.moves.push(tackle);
        dex.merge(Dex::from_tables(tables));
        assert_eq!(dex.move_data(MoveId(33)).power, 50);
    }

    #[test]
    fn test_tables_round_trip_through_json() {
        let dex = Dex::builtin();
        let json = serde_json::to_string(&dex.to_tables()).unwrap();
        let reloaded = Dex::from_json(&json).unwrap();
        assert_eq!(reloaded.move_count(), dex.move_count());
        assert_eq!(reloaded.species_count(), dex.species_count());
    }

    #[test]
    fn test_lookup_by_name() {
        let dex = Dex::builtin();
        assert_eq!(dex.move_named("earthquake").unwrap(), MoveId(89));
        assert!(dex.species_named("Agumon").is_err());
    }
}
