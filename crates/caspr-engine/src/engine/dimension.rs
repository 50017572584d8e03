//! Coordinate dimensions extracted from descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass direction of a coordinate half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// Map an orientation letter to its direction. `O` (Ost) is east.
    pub fn from_letter(letter: char) -> Option<Orientation> {
        match letter {
            'N' => Some(Orientation::North),
            'S' => Some(Orientation::South),
            'E' | 'O' => Some(Orientation::East),
            'W' => Some(Orientation::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Orientation::North => 'N',
            Orientation::South => 'S',
            Orientation::East => 'E',
            Orientation::West => 'W',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Piece of a dimension ready for spreadsheet concatenation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fragment {
    /// Text copied verbatim, quoted when assembled.
    Literal(String),
    /// Arithmetic with variables already replaced by cell references.
    Formula(String),
}

/// A latitude or longitude half whose minutes depend on variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Orientation letter as written in the description.
    pub letter: char,
    pub fragments: Vec<Fragment>,
}

impl Dimension {
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::from_letter(self.letter)
    }
}
