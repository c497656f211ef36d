// models/src/medical/visit_record.rs

use serde::{Deserialize, Serialize};

/// A row of the admin appointments table.
///
/// Unlike [`crate::medical::Appointment`] it carries the patient name and the
/// diagnosis made at the visit, which the dashboard statistics group on.
/// `status` stays free text because the admin data uses its own vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub checkup: String,
    #[serde(default)]
    pub diagnosis: String,
    pub status: String,
    pub date: String,
}
