// lib/src/directory.rs

use log::debug;
use models::medical::{Doctor, Patient, Prescription};

use crate::mock_data;

/// Read-only doctor listing for the search page and admin verification.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        DoctorDirectory::new(mock_data::doctors())
    }
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        DoctorDirectory { doctors }
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn find(&self, id: u32) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn by_specialty(&self, specialty: &str) -> Vec<&Doctor> {
        let specialty = specialty.trim();
        self.doctors
            .iter()
            .filter(|d| d.specialty.eq_ignore_ascii_case(specialty))
            .collect()
    }

    /// Case-insensitive match on name, specialty or location.
    pub fn search(&self, text: &str) -> Vec<&Doctor> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.doctors.iter().collect();
        }
        let found: Vec<&Doctor> = self
            .doctors
            .iter()
            .filter(|d| {
                [&d.name, &d.specialty, &d.location]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();
        debug!("Doctor search '{}' matched {} entries", text, found.len());
        found
    }

    pub fn pending_verification(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| !d.verified).collect()
    }

    pub fn specialties(&self) -> Vec<&str> {
        let mut specialties: Vec<&str> = self.doctors.iter().map(|d| d.specialty.as_str()).collect();
        specialties.sort_unstable();
        specialties.dedup();
        specialties
    }
}

/// Looks up the patient record registered under `email`.
pub fn patient_by_email(email: &str) -> Option<Patient> {
    mock_data::patients()
        .into_iter()
        .find(|p| p.email.eq_ignore_ascii_case(email.trim()))
}

pub fn prescriptions_for(patient_name: &str) -> Vec<Prescription> {
    mock_data::prescriptions()
        .into_iter()
        .filter(|p| p.patient_name.eq_ignore_ascii_case(patient_name.trim()))
        .collect()
}
