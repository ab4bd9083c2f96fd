//! Game edition and expansion tags.
//!
//! The same `empires2_x1_p1.dat` file changed layout with almost every
//! release. A [`GameVersion`] names the release family ([`GameEdition`]) and
//! the installed expansions ([`GameExpansion`]) so the schema builders can
//! pick the matching field layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VersionError};

/// Top-level release family of the game data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEdition {
    /// Age of Empires: The Rise of Rome.
    Ror,
    /// Age of Empires II: The Age of Kings.
    Aok,
    /// Age of Empires II: The Conquerors.
    Aoc,
    /// Star Wars: Galactic Battlegrounds.
    Swgb,
    /// Age of Empires II: HD Edition.
    HdEdition,
    /// Age of Empires: Definitive Edition.
    Aoe1De,
    /// Age of Empires II: Definitive Edition.
    Aoe2De,
}

impl GameEdition {
    /// All known editions, in release order.
    pub const ALL: [GameEdition; 7] = [
        Self::Ror,
        Self::Aok,
        Self::Aoc,
        Self::Swgb,
        Self::HdEdition,
        Self::Aoe1De,
        Self::Aoe2De,
    ];

    /// Short identifier used on the command line and in cache keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ror => "ror",
            Self::Aok => "aok",
            Self::Aoc => "aoc",
            Self::Swgb => "swgb",
            Self::HdEdition => "hd",
            Self::Aoe1De => "aoe1de",
            Self::Aoe2De => "aoe2de",
        }
    }

    /// Human readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ror => "Age of Empires: The Rise of Rome",
            Self::Aok => "Age of Empires II: The Age of Kings",
            Self::Aoc => "Age of Empires II: The Conquerors",
            Self::Swgb => "Star Wars: Galactic Battlegrounds",
            Self::HdEdition => "Age of Empires II: HD Edition",
            Self::Aoe1De => "Age of Empires: Definitive Edition",
            Self::Aoe2De => "Age of Empires II: Definitive Edition",
        }
    }

    /// Whether this edition belongs to the first game's data layout.
    #[must_use]
    pub const fn is_aoe1_family(self) -> bool {
        matches!(self, Self::Ror | Self::Aoe1De)
    }

    /// Whether this edition stores length-prefixed strings.
    #[must_use]
    pub const fn is_definitive(self) -> bool {
        matches!(self, Self::Aoe1De | Self::Aoe2De)
    }
}

impl fmt::Display for GameEdition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameEdition {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|edition| edition.as_str() == normalized)
            .or(match normalized.as_str() {
                "hdedition" | "hd_edition" => Some(Self::HdEdition),
                _ => None,
            })
            .ok_or_else(|| VersionError::UnknownEdition {
                name: s.to_string(),
            })
    }
}

/// Expansion installed on top of an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameExpansion {
    /// The African Kingdoms expansion for the HD Edition.
    AfriKing,
    /// The Clone Campaigns expansion for Galactic Battlegrounds.
    SwgbCc,
}

impl GameExpansion {
    /// All known expansions.
    pub const ALL: [GameExpansion; 2] = [Self::AfriKing, Self::SwgbCc];

    /// Short identifier used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AfriKing => "afri_king",
            Self::SwgbCc => "cc",
        }
    }

    /// The edition this expansion extends.
    #[must_use]
    pub const fn edition(self) -> GameEdition {
        match self {
            Self::AfriKing => GameEdition::HdEdition,
            Self::SwgbCc => GameEdition::Swgb,
        }
    }
}

impl fmt::Display for GameExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameExpansion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "afri_king" | "ak" => Ok(Self::AfriKing),
            "cc" | "swgb_cc" => Ok(Self::SwgbCc),
            _ => Err(VersionError::UnknownExpansion {
                name: s.to_string(),
            }),
        }
    }
}

/// Detected edition plus installed expansions.
///
/// Expansions are kept sorted and unique, so two tags naming the same
/// expansions compare equal regardless of the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameVersion {
    pub edition: GameEdition,
    pub expansions: Vec<GameExpansion>,
}

impl GameVersion {
    /// A version tag without expansions.
    #[must_use]
    pub fn new(edition: GameEdition) -> Self {
        Self {
            edition,
            expansions: Vec::new(),
        }
    }

    /// Add an expansion, rejecting expansions of other editions.
    pub fn with_expansion(mut self, expansion: GameExpansion) -> Result<Self> {
        if expansion.edition() != self.edition {
            return Err(VersionError::ExpansionMismatch {
                edition: self.edition,
                expansion,
            });
        }
        if let Err(pos) = self.expansions.binary_search(&expansion) {
            self.expansions.insert(pos, expansion);
        }
        Ok(self)
    }

    /// Whether the given expansion is installed.
    #[must_use]
    pub fn has_expansion(&self, expansion: GameExpansion) -> bool {
        self.expansions.contains(&expansion)
    }
}

impl From<GameEdition> for GameVersion {
    fn from(edition: GameEdition) -> Self {
        Self::new(edition)
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edition)?;
        for expansion in &self.expansions {
            write!(f, "+{expansion}")?;
        }
        Ok(())
    }
}

impl FromStr for GameVersion {
    type Err = VersionError;

    /// Parse `edition[+expansion...]`, e.g. `aoc`, `hd+afri_king`, `swgb+cc`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('+');
        let edition: GameEdition = parts.next().unwrap_or_default().parse()?;
        parts.try_fold(Self::new(edition), |version, part| {
            version.with_expansion(part.parse()?)
        })
    }
}
