//! Reference data for the kazam combat engine.
//!
//! The engine reads these tables but never writes them:
//!
//! ```text
//! kazam-dex (types, moves, abilities, items, species) ← THIS CRATE
//!        │
//!        ▼
//! kazam-engine (combat resolution)
//! ```
//!
//! # Main Types
//!
//! - [`Type`] and [`TYPE_CHART`] - elemental types and the base effectiveness chart
//! - [`Stat`], [`BattleStat`] - permanent and stage stats
//! - [`StatusEffect`] - persistent status kinds
//! - [`TagKind`], [`LapseType`] - temporary battle state kinds
//! - [`MoveData`], [`MoveAttr`], [`MoveFlags`] - move table rows
//! - [`Ability`], [`ItemKind`], [`HeldItem`]
//! - [`SpeciesData`]
//! - [`Dex`] - the registry, loadable from JSON

pub mod abilities;
pub mod builtin;
pub mod dex;
pub mod error;
pub mod items;
pub mod moves;
pub mod species;
pub mod stat;
pub mod status;
pub mod tags;
pub mod types;

pub use abilities::Ability;
pub use dex::{Dex, DexTables};
pub use error::DexError;
pub use items::{HeldItem, ItemKind};
pub use moves::{
    MoveAttr, MoveCategory, MoveCondition, MoveData, MoveFlags, MoveId, MoveTarget, TypeSource,
};
pub use species::{SpeciesData, SpeciesId};
pub use stat::{BattleStat, Stat};
pub use status::StatusEffect;
pub use tags::{LapseType, TagKind};
pub use types::{TYPE_CHART, Type};
