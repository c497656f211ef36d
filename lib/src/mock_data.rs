// lib/src/mock_data.rs
//! Hardcoded, fictional records the portals render.
//!
//! Doctors, patients, prescriptions and visit records are read-only display data.
//! The seed appointments are what a patient sees before anything has been
//! booked, and what the store falls back to when its stored list is unreadable.

use chrono::NaiveDate;
use models::medical::{
    Appointment, AppointmentStatus, Doctor, Patient, PaymentMethod, Prescription, VisitRecord,
    VisitType, DEFAULT_NOTES,
};
use models::AppointmentId;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn days(list: &[&str]) -> Vec<String> {
    list.iter().map(|d| d.to_string()).collect()
}

pub fn seed_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: AppointmentId(1),
            doctor: "Dr. Sarah Johnson".to_string(),
            specialty: "Cardiology".to_string(),
            date: "2025-03-15".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Upcoming,
            notes: "Annual heart checkup".to_string(),
            visit_type: Some(VisitType::Physical),
            payment_method: Some(PaymentMethod::Insurance),
            insurance_provider: Some("BlueCross".to_string()),
        },
        Appointment {
            id: AppointmentId(2),
            doctor: "Dr. Michael Chen".to_string(),
            specialty: "Dermatology".to_string(),
            date: "2025-03-20".to_string(),
            time: "02:30 PM".to_string(),
            status: AppointmentStatus::Upcoming,
            notes: DEFAULT_NOTES.to_string(),
            visit_type: Some(VisitType::Online),
            payment_method: None,
            insurance_provider: None,
        },
        Appointment {
            id: AppointmentId(3),
            doctor: "Dr. Emily Rodriguez".to_string(),
            specialty: "Pediatrics".to_string(),
            date: "2025-02-10".to_string(),
            time: "09:30 AM".to_string(),
            status: AppointmentStatus::Completed,
            notes: "Follow-up in 6 months".to_string(),
            visit_type: Some(VisitType::Physical),
            payment_method: Some(PaymentMethod::Card),
            insurance_provider: None,
        },
    ]
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            name: "Dr. Ali".to_string(),
            specialty: "General Practice".to_string(),
            experience_years: 12,
            rating: 4.8,
            location: "Downtown Clinic".to_string(),
            fee: 80,
            verified: true,
            available_days: days(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
        },
        Doctor {
            id: 2,
            name: "Dr. Sarah Johnson".to_string(),
            specialty: "Cardiology".to_string(),
            experience_years: 15,
            rating: 4.9,
            location: "Heart Center".to_string(),
            fee: 150,
            verified: true,
            available_days: days(&["Monday", "Wednesday", "Friday"]),
        },
        Doctor {
            id: 3,
            name: "Dr. Michael Chen".to_string(),
            specialty: "Dermatology".to_string(),
            experience_years: 8,
            rating: 4.6,
            location: "Skin Care Institute".to_string(),
            fee: 120,
            verified: true,
            available_days: days(&["Tuesday", "Thursday"]),
        },
        Doctor {
            id: 4,
            name: "Dr. Emily Rodriguez".to_string(),
            specialty: "Pediatrics".to_string(),
            experience_years: 10,
            rating: 4.7,
            location: "Children's Hospital".to_string(),
            fee: 100,
            verified: true,
            available_days: days(&["Monday", "Tuesday", "Thursday", "Friday"]),
        },
        Doctor {
            id: 5,
            name: "Dr. Omar Farouk".to_string(),
            specialty: "Neurology".to_string(),
            experience_years: 4,
            rating: 4.3,
            location: "Downtown Clinic".to_string(),
            fee: 140,
            verified: false,
            available_days: days(&["Wednesday", "Friday"]),
        },
        Doctor {
            id: 6,
            name: "Dr. Lucia Martinez".to_string(),
            specialty: "Cardiology".to_string(),
            experience_years: 6,
            rating: 4.5,
            location: "Eastside Medical".to_string(),
            fee: 130,
            verified: false,
            available_days: days(&["Monday", "Thursday"]),
        },
    ]
}

pub fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: 1,
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone: Some("+1 555 0101".to_string()),
            date_of_birth: date(1985, 4, 12),
            gender: "Male".to_string(),
            blood_type: Some("O+".to_string()),
        },
        Patient {
            id: 2,
            name: "Maria Garcia".to_string(),
            email: "maria.garcia@example.com".to_string(),
            phone: None,
            date_of_birth: date(1992, 9, 3),
            gender: "Female".to_string(),
            blood_type: Some("A-".to_string()),
        },
        Patient {
            id: 3,
            name: "Ahmed Khan".to_string(),
            email: "ahmed.khan@example.com".to_string(),
            phone: Some("+1 555 0133".to_string()),
            date_of_birth: date(1978, 1, 27),
            gender: "Male".to_string(),
            blood_type: None,
        },
    ]
}

pub fn prescriptions() -> Vec<Prescription> {
    vec![
        Prescription {
            id: 1,
            patient_name: "John Smith".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            medication: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Once daily".to_string(),
            issued_on: date(2025, 2, 1),
            refills: 3,
        },
        Prescription {
            id: 2,
            patient_name: "Maria Garcia".to_string(),
            doctor_name: "Dr. Michael Chen".to_string(),
            medication: "Tretinoin cream".to_string(),
            dosage: "0.05%".to_string(),
            frequency: "Nightly".to_string(),
            issued_on: date(2025, 1, 18),
            refills: 1,
        },
        Prescription {
            id: 3,
            patient_name: "John Smith".to_string(),
            doctor_name: "Dr. Ali".to_string(),
            medication: "Amoxicillin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "Three times daily".to_string(),
            issued_on: date(2025, 2, 20),
            refills: 0,
        },
    ]
}

fn visit(id: u32, patient: &str, doctor: &str, checkup: &str, diagnosis: &str, status: &str, date: &str) -> VisitRecord {
    VisitRecord {
        id,
        patient_name: patient.to_string(),
        doctor_name: doctor.to_string(),
        checkup: checkup.to_string(),
        diagnosis: diagnosis.to_string(),
        status: status.to_string(),
        date: date.to_string(),
    }
}

/// Rows of the admin appointments table.
pub fn visit_records() -> Vec<VisitRecord> {
    vec![
        visit(1, "John Smith", "Dr. Sarah Johnson", "Cardiac evaluation", "Hypertension", "Completed", "2025-01-14"),
        visit(2, "Maria Garcia", "Dr. Michael Chen", "Skin examination", "Eczema", "Completed", "2025-01-16"),
        visit(3, "Ahmed Khan", "Dr. Sarah Johnson", "Chest pain", "Hypertension", "Completed", "2025-01-20"),
        visit(4, "John Smith", "Dr. Sarah Johnson", "Follow-up", "Hypertension", "Completed", "2025-02-11"),
        visit(5, "Lina Haddad", "Dr. Emily Rodriguez", "Child wellness", "", "Pending", "2025-03-02"),
        visit(6, "Maria Garcia", "Dr. Ali", "Fever", "Influenza", "Completed", "2025-02-03"),
        visit(7, "Ahmed Khan", "Dr. Ali", "Cough", "Influenza", "Completed", "2025-02-05"),
        visit(8, "Sofia Rossi", "Dr. Ali", "Sore throat", "Influenza", "Cancelled", "2025-02-06"),
        visit(9, "Lina Haddad", "Dr. Omar Farouk", "Headache", "Migraine", "Upcoming", "2025-03-12"),
        visit(10, "John Smith", "Dr. Michael Chen", "Rash", "Eczema", "Upcoming", "2025-03-18"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let ids: HashSet<_> = seed_appointments().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), seed_appointments().len());
    }

    #[test]
    fn test_prescriptions_reference_known_doctors() {
        let names: HashSet<String> = doctors().into_iter().map(|d| d.name).collect();
        for prescription in prescriptions() {
            assert!(names.contains(&prescription.doctor_name), "{}", prescription.doctor_name);
        }
    }
}
