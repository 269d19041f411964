//! Birth records
//!
//! A birth record links an animal to its parents and carries the purity
//! grade stamped at registration. The grade is a snapshot: editing the
//! record later (observation, attachments) never recomputes it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Breed;
use crate::purity::PurityGrade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthRecord {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub mother_id: Option<Uuid>,
    pub father_id: Option<Uuid>,
    pub breed: Breed,
    pub purity: PurityGrade,
    pub birth_date: NaiveDate,
    pub birth_weight_kg: Option<Decimal>,
    pub observation: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BirthRecord {
    pub fn new(animal_id: Uuid, breed: Breed, purity: PurityGrade, birth_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            animal_id,
            mother_id: None,
            father_id: None,
            breed,
            purity,
            birth_date,
            birth_weight_kg: None,
            observation: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_parents(mut self, mother_id: Option<Uuid>, father_id: Option<Uuid>) -> Self {
        self.mother_id = mother_id;
        self.father_id = father_id;
        self
    }

    pub fn has_known_parent(&self) -> bool {
        self.mother_id.is_some() || self.father_id.is_some()
    }
}
