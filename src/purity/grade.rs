//! Purity grades

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HerdError;

/// Breed purity grade, ordered by crossing depth
///
/// `PO` is the founder grade, `F1`..`F5` are successive cross-generations
/// and `PC` is the saturated grade reached once an F5 line is crossed back
/// onto pure stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PurityGrade {
    /// Pure origin
    PO,
    F1,
    F2,
    F3,
    F4,
    F5,
    /// Pure by cross
    PC,
}

impl PurityGrade {
    pub const ALL: [PurityGrade; 7] = [
        PurityGrade::PO,
        PurityGrade::F1,
        PurityGrade::F2,
        PurityGrade::F3,
        PurityGrade::F4,
        PurityGrade::F5,
        PurityGrade::PC,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurityGrade::PO => "PO",
            PurityGrade::F1 => "F1",
            PurityGrade::F2 => "F2",
            PurityGrade::F3 => "F3",
            PurityGrade::F4 => "F4",
            PurityGrade::F5 => "F5",
            PurityGrade::PC => "PC",
        }
    }

    /// Next cross-generation. `PC` saturates; `PO` advances to `F1`.
    pub const fn successor(self) -> PurityGrade {
        match self {
            PurityGrade::PO => PurityGrade::F1,
            PurityGrade::F1 => PurityGrade::F2,
            PurityGrade::F2 => PurityGrade::F3,
            PurityGrade::F3 => PurityGrade::F4,
            PurityGrade::F4 => PurityGrade::F5,
            PurityGrade::F5 | PurityGrade::PC => PurityGrade::PC,
        }
    }
}

impl fmt::Display for PurityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PurityGrade {
    type Err = HerdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        PurityGrade::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == upper)
            .ok_or_else(|| HerdError::InvalidGrade(s.to_string()))
    }
}
