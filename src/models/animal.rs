//! Animal records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Breed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimalStatus {
    #[default]
    Active,
    Sold,
    Dead,
}

/// An animal in the herd registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: Uuid,
    /// Herd tag, e.g. `BNN-0001`
    pub code: String,
    /// Breed association registration number (RGN/RGD)
    pub registration_number: Option<String>,
    pub name: Option<String>,
    pub sex: Sex,
    pub breed: Breed,
    pub birth_date: NaiveDate,
    pub property_id: Option<Uuid>,
    #[serde(default)]
    pub status: AnimalStatus,
    pub created_at: DateTime<Utc>,
}

impl Animal {
    pub fn new(code: impl Into<String>, sex: Sex, breed: Breed, birth_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            registration_number: None,
            name: None,
            sex,
            breed,
            birth_date,
            property_id: None,
            status: AnimalStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_registration_number(mut self, registration_number: impl Into<String>) -> Self {
        self.registration_number = Some(registration_number.into());
        self
    }

    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }
}
