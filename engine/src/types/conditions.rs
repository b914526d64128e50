//! Weather, terrain and side conditions

use kazam_dex::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSun,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    /// Weather set by a primal ability
    pub fn is_primal(&self) -> bool {
        matches!(
            self,
            Weather::HarshSun | Weather::HeavyRain | Weather::StrongWinds
        )
    }

    pub fn is_sunny(&self) -> bool {
        matches!(self, Weather::Sun | Weather::HarshSun)
    }

    pub fn is_rainy(&self) -> bool {
        matches!(self, Weather::Rain | Weather::HeavyRain)
    }

    /// Multiplier this weather applies to attacks of `move_type`
    pub fn attack_multiplier(&self, move_type: Type) -> f64 {
        match (self, move_type) {
            (Weather::Sun, Type::Fire) | (Weather::HarshSun, Type::Fire) => 1.5,
            (Weather::Sun, Type::Water) => 0.5,
            (Weather::HarshSun, Type::Water) => 0.0,
            (Weather::Rain, Type::Water) | (Weather::HeavyRain, Type::Water) => 1.5,
            (Weather::Rain, Type::Fire) => 0.5,
            (Weather::HeavyRain, Type::Fire) => 0.0,
            _ => 1.0,
        }
    }

    /// Type taken by weather-dependent moves
    pub fn move_type(&self) -> Option<Type> {
        match self {
            Weather::Sun | Weather::HarshSun => Some(Type::Fire),
            Weather::Rain | Weather::HeavyRain => Some(Type::Water),
            Weather::Sand => Some(Type::Rock),
            Weather::Hail | Weather::Snow => Some(Type::Ice),
            Weather::StrongWinds => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
            Weather::HarshSun => "Harsh Sun",
            Weather::HeavyRain => "Heavy Rain",
            Weather::StrongWinds => "Strong Winds",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// Attack multiplier for grounded attackers using `move_type`
    pub fn attack_multiplier(&self, move_type: Type) -> f64 {
        match (self, move_type) {
            (Terrain::Electric, Type::Electric)
            | (Terrain::Grassy, Type::Grass)
            | (Terrain::Psychic, Type::Psychic) => 1.3,
            _ => 1.0,
        }
    }

    /// Type taken by terrain-dependent moves
    pub fn move_type(&self) -> Type {
        match self {
            Terrain::Electric => Type::Electric,
            Terrain::Grassy => Type::Grass,
            Terrain::Misty => Type::Fairy,
            Terrain::Psychic => Type::Psychic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conditions on one side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideCondition {
    Reflect,
    LightScreen,
    AuroraVeil,
    Tailwind,
    Safeguard,
    Mist,
    LuckyChant,
    /// Grass/Water pledge swamp: quarters Speed
    Swamp,
}

impl SideCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::Reflect => "Reflect",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::AuroraVeil => "Aurora Veil",
            SideCondition::Tailwind => "Tailwind",
            SideCondition::Safeguard => "Safeguard",
            SideCondition::Mist => "Mist",
            SideCondition::LuckyChant => "Lucky Chant",
            SideCondition::Swamp => "Swamp",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
