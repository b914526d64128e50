//! Persistent status effect kinds

use serde::{Deserialize, Serialize};

/// Kinds of persistent (non-volatile) status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    Poison,
    Toxic,
    Burn,
    Paralysis,
    Sleep,
    Freeze,
    Faint,
}

impl StatusEffect {
    /// Parse a short code ("psn", "tox", "brn", "par", "slp", "frz", "fnt")
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "psn" => Some(StatusEffect::Poison),
            "tox" => Some(StatusEffect::Toxic),
            "brn" => Some(StatusEffect::Burn),
            "par" => Some(StatusEffect::Paralysis),
            "slp" => Some(StatusEffect::Sleep),
            "frz" => Some(StatusEffect::Freeze),
            "fnt" => Some(StatusEffect::Faint),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StatusEffect::Poison => "psn",
            StatusEffect::Toxic => "tox",
            StatusEffect::Burn => "brn",
            StatusEffect::Paralysis => "par",
            StatusEffect::Sleep => "slp",
            StatusEffect::Freeze => "frz",
            StatusEffect::Faint => "fnt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusEffect::Poison => "Poison",
            StatusEffect::Toxic => "Toxic",
            StatusEffect::Burn => "Burn",
            StatusEffect::Paralysis => "Paralysis",
            StatusEffect::Sleep => "Sleep",
            StatusEffect::Freeze => "Freeze",
            StatusEffect::Faint => "Faint",
        }
    }

    /// Poison and Toxic share immunities
    pub fn is_poison(&self) -> bool {
        matches!(self, StatusEffect::Poison | StatusEffect::Toxic)
    }
}

impl std::fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        for effect in [
            StatusEffect::Poison,
            StatusEffect::Toxic,
            StatusEffect::Burn,
            StatusEffect::Paralysis,
            StatusEffect::Sleep,
            StatusEffect::Freeze,
            StatusEffect::Faint,
        ] {
            assert_eq!(StatusEffect::from_code(effect.code()), Some(effect));
        }
        assert_eq!(StatusEffect::from_code("xyz"), None);
    }

    #[test]
    fn test_poison_family() {
        assert!(StatusEffect::Toxic.is_poison());
        assert!(!StatusEffect::Burn.is_poison());
    }
}
