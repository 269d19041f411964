//! Purity rule tables
//!
//! Rules are evaluated in order and the first match wins. Every pattern is
//! unordered with respect to mother and father, so the tables are symmetric.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PurityGrade;
use crate::error::HerdError;

use PurityGrade::{F1, F2, F3, F4, F5, PC, PO};

/// What a rule expects of one parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Parent has no birth record
    Absent,
    Grade(PurityGrade),
}

impl Slot {
    fn matches(&self, parent: Option<PurityGrade>) -> bool {
        match (self, parent) {
            (Slot::Absent, None) => true,
            (Slot::Grade(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedMatch {
    Any,
    Same,
    Different,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Unordered pair: matches `(a, b)` or `(b, a)`
    Pair(Slot, Slot),
    /// Either parent has the grade
    Either(PurityGrade),
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurityRule {
    pub id: &'static str,
    pub description: &'static str,
    pub pattern: Pattern,
    pub breeds: BreedMatch,
    pub result: PurityGrade,
}

impl PurityRule {
    const fn pair(
        id: &'static str,
        description: &'static str,
        a: Slot,
        b: Slot,
        result: PurityGrade,
    ) -> Self {
        Self {
            id,
            description,
            pattern: Pattern::Pair(a, b),
            breeds: BreedMatch::Any,
            result,
        }
    }

    pub fn matches(
        &self,
        mother: Option<PurityGrade>,
        father: Option<PurityGrade>,
        same_breed: bool,
    ) -> bool {
        let breeds_ok = match self.breeds {
            BreedMatch::Any => true,
            BreedMatch::Same => same_breed,
            BreedMatch::Different => !same_breed,
        };
        if !breeds_ok {
            return false;
        }

        match self.pattern {
            Pattern::Pair(a, b) => {
                (a.matches(mother) && b.matches(father)) || (b.matches(mother) && a.matches(father))
            }
            Pattern::Either(grade) => mother == Some(grade) || father == Some(grade),
            Pattern::Any => true,
        }
    }
}

const fn g(grade: PurityGrade) -> Slot {
    Slot::Grade(grade)
}

const ABSENT: Slot = Slot::Absent;

/// Rules shared by every table, in precedence order
pub const CANONICAL_RULES: &[PurityRule] = &[
    PurityRule::pair("R1", "no parent birth records", ABSENT, ABSENT, PO),
    PurityRule {
        id: "R2",
        description: "PO x PO of the same breed",
        pattern: Pattern::Pair(g(PO), g(PO)),
        breeds: BreedMatch::Same,
        result: PO,
    },
    PurityRule::pair("R3", "PO x F1", g(PO), g(F1), F1.successor()),
    PurityRule::pair("R4", "F1 x F1", g(F1), g(F1), F2),
    PurityRule::pair("R5", "PO x F2", g(PO), g(F2), F2.successor()),
    PurityRule::pair("R6", "PO x F3", g(PO), g(F3), F3.successor()),
    PurityRule::pair("R7", "PO x F4", g(PO), g(F4), F4.successor()),
    PurityRule::pair("R8a", "PO x F5", g(PO), g(F5), F5.successor()),
    PurityRule {
        id: "R8b",
        description: "either parent PC",
        pattern: Pattern::Either(PC),
        breeds: BreedMatch::Any,
        result: PC,
    },
    PurityRule {
        id: "R9",
        description: "PO x PO of different breeds",
        pattern: Pattern::Pair(g(PO), g(PO)),
        breeds: BreedMatch::Different,
        result: F1,
    },
    // A single known parent advances one generation
    PurityRule::pair("R10", "PO x unknown", g(PO), ABSENT, PO.successor()),
    PurityRule::pair("R11", "F1 x unknown", g(F1), ABSENT, F1.successor()),
    PurityRule::pair("R12", "F2 x unknown", g(F2), ABSENT, F2.successor()),
    PurityRule::pair("R13", "F3 x unknown", g(F3), ABSENT, F3.successor()),
    PurityRule::pair("R14", "F4 x unknown", g(F4), ABSENT, F4.successor()),
    PurityRule::pair("R15", "F5 x unknown", g(F5), ABSENT, F5.successor()),
];

/// Same-grade cross continuation, only in [`PurityTable::Progressive`]
pub const PROGRESSIVE_RULES: &[PurityRule] = &[
    PurityRule::pair("P1", "F2 x F2", g(F2), g(F2), F2.successor()),
    PurityRule::pair("P2", "F3 x F3", g(F3), g(F3), F3.successor()),
    PurityRule::pair("P3", "F4 x F4", g(F4), g(F4), F4.successor()),
    PurityRule::pair("P4", "F5 x F5", g(F5), g(F5), F5.successor()),
];

pub static FALLBACK_RULE: PurityRule = PurityRule {
    id: "R16",
    description: "no rule matched",
    pattern: Pattern::Any,
    breeds: BreedMatch::Any,
    result: F1,
};

/// Which rule table the classifier evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurityTable {
    /// The registry's published table; unlisted F pairings fall back to F1
    #[default]
    Canonical,
    /// Canonical plus same-grade continuation (F2 x F2 -> F3, ...)
    Progressive,
}

impl PurityTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurityTable::Canonical => "canonical",
            PurityTable::Progressive => "progressive",
        }
    }

    /// Rules in evaluation order, fallback last
    pub fn rules(&self) -> Vec<&'static PurityRule> {
        let extra: &'static [PurityRule] = match self {
            PurityTable::Canonical => &[],
            PurityTable::Progressive => PROGRESSIVE_RULES,
        };
        CANONICAL_RULES
            .iter()
            .chain(extra.iter())
            .chain(std::iter::once(&FALLBACK_RULE))
            .collect()
    }
}

impl fmt::Display for PurityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PurityTable {
    type Err = HerdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canonical" => Ok(PurityTable::Canonical),
            "progressive" => Ok(PurityTable::Progressive),
            other => Err(HerdError::Config(format!(
                "unknown purity table '{}': expected canonical or progressive",
                other
            ))),
        }
    }
}
