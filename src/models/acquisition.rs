//! Acquisition (purchase) records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionRecord {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub seller: String,
    pub acquired_on: NaiveDate,
    pub price: Decimal,
    pub observation: Option<String>,
}
