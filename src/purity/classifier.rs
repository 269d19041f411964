//! Evaluate purity rules against a pair of parents

use serde::Serialize;

use super::rules::{PurityRule, PurityTable, FALLBACK_RULE};
use super::PurityGrade;
use crate::models::{BirthRecord, Breed};

/// Classification outcome together with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurityDecision {
    pub grade: PurityGrade,
    pub rule_id: &'static str,
    pub rule: &'static str,
}

impl PurityDecision {
    fn from_rule(rule: &'static PurityRule) -> Self {
        Self {
            grade: rule.result,
            rule_id: rule.id,
            rule: rule.description,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PurityClassifier {
    table: PurityTable,
}

impl PurityClassifier {
    pub fn new(table: PurityTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> PurityTable {
        self.table
    }

    /// Classify from parent grades. `None` means the parent has no birth record.
    ///
    /// Two unknown breeds compare equal.
    pub fn classify(
        &self,
        mother: Option<PurityGrade>,
        father: Option<PurityGrade>,
        mother_breed: Option<Breed>,
        father_breed: Option<Breed>,
    ) -> PurityDecision {
        let same_breed = mother_breed == father_breed;

        let rule = self
            .table
            .rules()
            .into_iter()
            .find(|rule| rule.matches(mother, father, same_breed))
            .unwrap_or(&FALLBACK_RULE);

        tracing::debug!(
            table = %self.table,
            mother = ?mother,
            father = ?father,
            same_breed,
            rule = rule.id,
            grade = %rule.result,
            "purity classified"
        );

        PurityDecision::from_rule(rule)
    }

    pub fn classify_births(
        &self,
        mother_birth: Option<&BirthRecord>,
        father_birth: Option<&BirthRecord>,
        mother_breed: Option<Breed>,
        father_breed: Option<Breed>,
    ) -> PurityDecision {
        self.classify(
            mother_birth.map(|b| b.purity),
            father_birth.map(|b| b.purity),
            mother_breed,
            father_breed,
        )
    }
}

/// Purity for a new birth record using the canonical table
pub fn calculate_purity(
    mother_birth: Option<&BirthRecord>,
    father_birth: Option<&BirthRecord>,
    mother_breed: Option<Breed>,
    father_breed: Option<Breed>,
) -> PurityGrade {
    PurityClassifier::default()
        .classify_births(mother_birth, father_birth, mother_breed, father_breed)
        .grade
}
