#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard a recipe is to prepare.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
/// The stored value is the upper-case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "EASY"))]
    Easy,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MODERATE"))]
    Moderate,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "HARD"))]
    Hard,
}

impl Difficulty {
    /// All difficulty levels, easiest first.
    pub const ALL: &'static [Difficulty] = &[Self::Easy, Self::Moderate, Self::Hard];

    /// Returns the stored representation (upper-case).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Moderate => "MODERATE",
            Self::Hard => "HARD",
        }
    }

    /// Human-readable label for pages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Error when parsing an invalid difficulty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError {
    invalid: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid difficulty '{}'. Valid values: {}",
            self.invalid,
            Difficulty::ALL
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Accepts the stored name in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Self::Easy),
            "MODERATE" => Ok(Self::Moderate),
            "HARD" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError {
                invalid: s.to_string(),
            }),
        }
    }
}
