// models/src/medical/prescription.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub issued_on: NaiveDate,
    pub refills: u8,
}
