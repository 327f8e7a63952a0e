//! Which ends of a cabinet run get filler strips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CabError, CabResult};

/// The ends of a run that receive a filler panel.
///
/// This also decides which end panels must be finished: an end with a
/// filler can be left unfinished, an end without one cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ends {
    /// No fillers; both end panels finished
    #[default]
    Neither,
    /// Filler on the left end only
    Left,
    /// Filler on the right end only
    Right,
    /// Fillers on both ends
    Both,
}

impl Ends {
    /// All variants, in selection order
    pub const ALL: [Ends; 4] = [Ends::Neither, Ends::Left, Ends::Right, Ends::Both];

    /// Canonical name, as accepted by [`Ends::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            Ends::Neither => "NEITHER",
            Ends::Left => "LEFT",
            Ends::Right => "RIGHT",
            Ends::Both => "BOTH",
        }
    }

    /// Number of filler panels this choice needs (0, 1 or 2)
    pub fn num_fillers(&self) -> usize {
        match self {
            Ends::Neither => 0,
            Ends::Left | Ends::Right => 1,
            Ends::Both => 2,
        }
    }

    /// Parse a canonical name; anything else is an error.
    pub fn parse(s: &str) -> CabResult<Self> {
        Ends::ALL
            .iter()
            .copied()
            .find(|ends| ends.name() == s)
            .ok_or_else(|| CabError::invalid_ends(s))
    }
}

impl fmt::Display for Ends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ends {
    type Err = CabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ends::parse(s)
    }
}
