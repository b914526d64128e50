//! Ability identifiers
//!
//! Behaviour lives in the engine; this is the closed set it matches on.

use serde::{Deserialize, Serialize};

use crate::status::StatusEffect;
use crate::types::Type;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    #[default]
    NoAbility,

    // Offense
    Adaptability,
    Sniper,
    SuperLuck,
    Merciless,
    Scrappy,
    MoldBreaker,
    Infiltrator,
    Corrosion,
    TintedLens,
    ParentalBond,
    Technician,
    Pixilate,
    Aerilate,
    Refrigerate,
    Galvanize,
    Normalize,
    Overgrow,
    Blaze,
    Torrent,
    Swarm,

    // Stat multipliers
    HugePower,
    PurePower,
    Hustle,
    Guts,
    SlowStart,
    SwiftSwim,
    Chlorophyll,
    SandRush,
    SlushRush,
    FlowerGift,
    TabletsOfRuin,
    SwordOfRuin,
    VesselOfRuin,
    BeadsOfRuin,
    Unaware,

    // Defense
    BattleArmor,
    ShellArmor,
    Levitate,
    VoltAbsorb,
    WaterAbsorb,
    FlashFire,
    WonderGuard,
    Soundproof,
    Sturdy,
    Multiscale,
    ShadowShield,
    Filter,
    SolidRock,
    PrismArmor,
    Fluffy,
    FriendGuard,

    // Status and tag immunity
    Immunity,
    Limber,
    Insomnia,
    VitalSpirit,
    WaterVeil,
    WaterBubble,
    MagmaArmor,
    OwnTempo,
    Oblivious,
    InnerFocus,
    LeafGuard,
    FlowerVeil,
    SweetVeil,
    PastelVeil,
    AromaVeil,

    // Field
    CloudNine,
    AirLock,
}

impl Ability {
    /// Abilities an attacker's Mold Breaker (or a field-wide ability
    /// suppression) switches off while a move resolves
    pub fn is_breakable(&self) -> bool {
        matches!(
            self,
            Ability::BattleArmor
                | Ability::ShellArmor
                | Ability::Levitate
                | Ability::VoltAbsorb
                | Ability::WaterAbsorb
                | Ability::FlashFire
                | Ability::WonderGuard
                | Ability::Soundproof
                | Ability::Sturdy
                | Ability::Multiscale
                | Ability::Filter
                | Ability::SolidRock
                | Ability::Fluffy
                | Ability::FriendGuard
                | Ability::Unaware
                | Ability::FlowerGift
                | Ability::Immunity
                | Ability::Limber
                | Ability::Insomnia
                | Ability::VitalSpirit
                | Ability::WaterVeil
                | Ability::WaterBubble
                | Ability::MagmaArmor
                | Ability::OwnTempo
                | Ability::Oblivious
                | Ability::InnerFocus
                | Ability::LeafGuard
                | Ability::FlowerVeil
                | Ability::SweetVeil
                | Ability::PastelVeil
                | Ability::AromaVeil
        )
    }

    /// The type an `-ate` ability converts Normal moves into
    pub fn ate_type(&self) -> Option<Type> {
        match self {
            Ability::Pixilate => Some(Type::Fairy),
            Ability::Aerilate => Some(Type::Flying),
            Ability::Refrigerate => Some(Type::Ice),
            Ability::Galvanize => Some(Type::Electric),
            _ => None,
        }
    }

    /// The type a pinch ability powers up below a third of max HP
    pub fn pinch_type(&self) -> Option<Type> {
        match self {
            Ability::Overgrow => Some(Type::Grass),
            Ability::Blaze => Some(Type::Fire),
            Ability::Torrent => Some(Type::Water),
            Ability::Swarm => Some(Type::Bug),
            _ => None,
        }
    }

    /// Persistent statuses this ability blocks on its own holder
    pub fn blocks_status(&self, effect: StatusEffect) -> bool {
        match self {
            Ability::Immunity | Ability::PastelVeil => effect.is_poison(),
            Ability::Limber => effect == StatusEffect::Paralysis,
            Ability::Insomnia | Ability::VitalSpirit | Ability::SweetVeil => {
                effect == StatusEffect::Sleep
            }
            Ability::WaterVeil | Ability::WaterBubble => effect == StatusEffect::Burn,
            Ability::MagmaArmor => effect == StatusEffect::Freeze,
            Ability::FlowerVeil => effect != StatusEffect::Faint,
            _ => false,
        }
    }

    /// Abilities that also shield allies on the same side from a status
    pub fn shields_allies_from(&self, effect: StatusEffect) -> bool {
        match self {
            Ability::SweetVeil => effect == StatusEffect::Sleep,
            Ability::PastelVeil => effect.is_poison(),
            Ability::FlowerVeil => effect != StatusEffect::Faint,
            _ => false,
        }
    }

    /// Abilities that suppress weather while on the field
    pub fn suppresses_weather(&self) -> bool {
        matches!(self, Ability::CloudNine | Ability::AirLock)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::NoAbility => "None",
            Ability::Adaptability => "Adaptability",
            Ability::Sniper => "Sniper",
            Ability::SuperLuck => "Super Luck",
            Ability::Merciless => "Merciless",
            Ability::Scrappy => "Scrappy",
            Ability::MoldBreaker => "Mold Breaker",
            Ability::Infiltrator => "Infiltrator",
            Ability::Corrosion => "Corrosion",
            Ability::TintedLens => "Tinted Lens",
            Ability::ParentalBond => "Parental Bond",
            Ability::Technician => "Technician",
            Ability::Pixilate => "Pixilate",
            Ability::Aerilate => "Aerilate",
            Ability::Refrigerate => "Refrigerate",
            Ability::Galvanize => "Galvanize",
            Ability::Normalize => "Normalize",
            Ability::Overgrow => "Overgrow",
            Ability::Blaze => "Blaze",
            Ability::Torrent => "Torrent",
            Ability::Swarm => "Swarm",
            Ability::HugePower => "Huge Power",
            Ability::PurePower => "Pure Power",
            Ability::Hustle => "Hustle",
            Ability::Guts => "Guts",
            Ability::SlowStart => "Slow Start",
            Ability::SwiftSwim => "Swift Swim",
            Ability::Chlorophyll => "Chlorophyll",
            Ability::SandRush => "Sand Rush",
            Ability::SlushRush => "Slush Rush",
            Ability::FlowerGift => "Flower Gift",
            Ability::TabletsOfRuin => "Tablets of Ruin",
            Ability::SwordOfRuin => "Sword of Ruin",
            Ability::VesselOfRuin => "Vessel of Ruin",
            Ability::BeadsOfRuin => "Beads of Ruin",
            Ability::Unaware => "Unaware",
            Ability::BattleArmor => "Battle Armor",
            Ability::ShellArmor => "Shell Armor",
            Ability::Levitate => "Levitate",
            Ability::VoltAbsorb => "Volt Absorb",
            Ability::WaterAbsorb => "Water Absorb",
            Ability::FlashFire => "Flash Fire",
            Ability::WonderGuard => "Wonder Guard",
            Ability::Soundproof => "Soundproof",
            Ability::Sturdy => "Sturdy",
            Ability::Multiscale => "Multiscale",
            Ability::ShadowShield => "Shadow Shield",
            Ability::Filter => "Filter",
            Ability::SolidRock => "Solid Rock",
            Ability::PrismArmor => "Prism Armor",
            Ability::Fluffy => "Fluffy",
            Ability::FriendGuard => "Friend Guard",
            Ability::Immunity => "Immunity",
            Ability::Limber => "Limber",
            Ability::Insomnia => "Insomnia",
            Ability::VitalSpirit => "Vital Spirit",
            Ability::WaterVeil => "Water Veil",
            Ability::WaterBubble => "Water Bubble",
            Ability::MagmaArmor => "Magma Armor",
            Ability::OwnTempo => "Own Tempo",
            Ability::Oblivious => "Oblivious",
            Ability::InnerFocus => "Inner Focus",
            Ability::LeafGuard => "Leaf Guard",
            Ability::FlowerVeil => "Flower Veil",
            Ability::SweetVeil => "Sweet Veil",
            Ability::PastelVeil => "Pastel Veil",
            Ability::AromaVeil => "Aroma Veil",
            Ability::CloudNine => "Cloud Nine",
            Ability::AirLock => "Air Lock",
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
