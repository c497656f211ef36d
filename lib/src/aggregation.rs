// lib/src/aggregation.rs
//! Grouping and filtering behind the doctor and admin dashboards.

use std::collections::{BTreeMap, BTreeSet};

use models::medical::{Appointment, VisitRecord};

/// Read access to the fields the dashboards group and search on.
pub trait VisitLike {
    fn patient_name(&self) -> Option<&str>;
    fn doctor_name(&self) -> &str;
    fn checkup(&self) -> &str;
    fn diagnosis(&self) -> Option<&str>;
    fn status(&self) -> &str;
}

impl VisitLike for VisitRecord {
    fn patient_name(&self) -> Option<&str> {
        Some(&self.patient_name)
    }

    fn doctor_name(&self) -> &str {
        &self.doctor_name
    }

    fn checkup(&self) -> &str {
        &self.checkup
    }

    fn diagnosis(&self) -> Option<&str> {
        Some(&self.diagnosis)
    }

    fn status(&self) -> &str {
        &self.status
    }
}

// Patient bookings carry no patient name or diagnosis; the notes stand in for the checkup.
impl VisitLike for Appointment {
    fn patient_name(&self) -> Option<&str> {
        None
    }

    fn doctor_name(&self) -> &str {
        &self.doctor
    }

    fn checkup(&self) -> &str {
        &self.notes
    }

    fn diagnosis(&self) -> Option<&str> {
        None
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorGroup<'a, T> {
    pub doctor_name: String,
    pub count: usize,
    pub records: Vec<&'a T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisGroup<'a, T> {
    pub diagnosis: String,
    pub count: usize,
    pub patient_count: usize,
    pub patients: BTreeSet<String>,
    pub records: Vec<&'a T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseStat {
    pub diagnosis: String,
    pub cases: usize,
    pub unique_patients: usize,
    /// Fraction of all diagnosed records, in `0.0..=1.0`.
    pub share: f64,
}

/// Status and free-text filters of the admin table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn new(status: Option<String>, search: Option<String>) -> Self {
        RecordFilter { status, search }
    }

    fn status_filter(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase)
    }

    fn search_filter(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches<T: VisitLike>(&self, record: &T) -> bool {
        if let Some(status) = self.status_filter() {
            if record.status().to_lowercase() != status {
                return false;
            }
        }
        if let Some(needle) = self.search_filter() {
            let fields = [
                record.patient_name().unwrap_or_default(),
                record.doctor_name(),
                record.checkup(),
                record.diagnosis().unwrap_or_default(),
            ];
            return fields.iter().any(|field| field.to_lowercase().contains(&needle));
        }
        true
    }
}

fn diagnosis_of<T: VisitLike>(record: &T) -> Option<&str> {
    record.diagnosis().map(str::trim).filter(|d| !d.is_empty())
}

/// Groups records by doctor, ordered by doctor name.
pub fn group_by_doctor<T: VisitLike>(records: &[T]) -> Vec<DoctorGroup<'_, T>> {
    let mut groups: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for record in records {
        groups.entry(record.doctor_name()).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(doctor_name, records)| DoctorGroup {
            doctor_name: doctor_name.to_string(),
            count: records.len(),
            records,
        })
        .collect()
}

/// Groups records by diagnosis, skipping records without one.
pub fn group_by_diagnosis<T: VisitLike>(records: &[T]) -> Vec<DiagnosisGroup<'_, T>> {
    let mut groups: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for record in records {
        if let Some(diagnosis) = diagnosis_of(record) {
            groups.entry(diagnosis).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|(diagnosis, records)| {
            let patients: BTreeSet<String> = records
                .iter()
                .filter_map(|r| r.patient_name())
                .map(str::to_string)
                .collect();
            DiagnosisGroup {
                diagnosis: diagnosis.to_string(),
                count: records.len(),
                patient_count: patients.len(),
                patients,
                records,
            }
        })
        .collect()
}

pub fn filter_records<'a, T: VisitLike>(records: &'a [T], filter: &RecordFilter) -> Vec<&'a T> {
    records.iter().filter(|r| filter.matches(*r)).collect()
}

pub fn status_counts<T: VisitLike>(records: &[T]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Per-diagnosis case counts, most frequent first.
pub fn disease_statistics<T: VisitLike>(records: &[T]) -> Vec<DiseaseStat> {
    let groups = group_by_diagnosis(records);
    let total: usize = groups.iter().map(|g| g.count).sum();
    let mut stats: Vec<DiseaseStat> = groups
        .into_iter()
        .map(|g| DiseaseStat {
            share: if total == 0 { 0.0 } else { g.count as f64 / total as f64 },
            diagnosis: g.diagnosis,
            cases: g.count,
            unique_patients: g.patient_count,
        })
        .collect();
    stats.sort_by(|a, b| b.cases.cmp(&a.cases).then_with(|| a.diagnosis.cmp(&b.diagnosis)));
    stats
}
