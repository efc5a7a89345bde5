//! Dimensionality labels and their presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of directions along which a network keeps growing.
///
/// Sheet vs. chain orientation is not retained, only the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimensionality {
    Zero,
    One,
    Two,
    Three,
}

impl Dimensionality {
    /// Map a growing-axis count to a label; `None` above 3.
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    #[inline]
    pub fn axes(self) -> u8 {
        self as u8
    }

    /// Text written to result files. Must stay verbatim for output
    /// compatibility.
    pub fn description(self) -> &'static str {
        match self {
            Self::Zero => "0D non-MOF-like",
            Self::One => "1D chain",
            Self::Two => "2D sheet",
            Self::Three => "3D framework",
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.axes())
    }
}

impl TryFrom<u8> for Dimensionality {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_count(value as usize).ok_or(value)
    }
}
