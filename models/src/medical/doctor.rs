// models/src/medical/doctor.rs

use serde::{Deserialize, Serialize};

/// A doctor as listed in the patient-facing directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub experience_years: u8,
    pub rating: f32,
    pub location: String,
    pub fee: u32,
    // Set by the admin console once the license has been checked.
    pub verified: bool,
    pub available_days: Vec<String>,
}
