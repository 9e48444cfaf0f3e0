//! Strongly typed robot identifiers and team colors.
//!
//! IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ascending `BotId` order is the
//! canonical iteration order everywhere a deterministic sequence is needed.

use std::fmt;

use crate::TcError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `false` for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Shirt number of a robot.  Unique within one team.
    pub struct BotId(u8);
}

/// Team color as assigned by the referee.
///
/// Our own color is fixed once, when the team context is constructed; it
/// selects which team-specific tunable overrides apply.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamColor {
    Yellow,
    Blue,
}

impl TeamColor {
    /// The other team's color.
    #[inline]
    pub fn opponent(self) -> TeamColor {
        match self {
            TeamColor::Yellow => TeamColor::Blue,
            TeamColor::Blue => TeamColor::Yellow,
        }
    }

    /// Lower-case name, as used in tunable override files.
    pub fn as_str(self) -> &'static str {
        match self {
            TeamColor::Yellow => "yellow",
            TeamColor::Blue => "blue",
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TeamColor {
    type Err = TcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yellow" => Ok(TeamColor::Yellow),
            "blue" => Ok(TeamColor::Blue),
            other => Err(TcError::Parse(format!(
                "invalid team color {other:?}: expected \"yellow\" or \"blue\""
            ))),
        }
    }
}
