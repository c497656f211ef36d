// lib/src/booking/availability.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;
use models::errors::MedibookResult;
use models::medical::AppointmentStatus;

use crate::appointment_store::AppointmentStore;

/// Source of bookable time slots for a doctor on a given day.
pub trait AvailabilityProvider: Send + Sync {
    fn available_slots(&self, doctor: &str, date: NaiveDate) -> MedibookResult<Vec<String>>;
}

/// Offers the same slots for every doctor and day.
#[derive(Debug, Clone)]
pub struct FixedSlots {
    slots: Vec<String>,
}

impl FixedSlots {
    pub fn new(slots: Vec<String>) -> Self {
        FixedSlots { slots }
    }
}

impl AvailabilityProvider for FixedSlots {
    fn available_slots(&self, _doctor: &str, _date: NaiveDate) -> MedibookResult<Vec<String>> {
        Ok(self.slots.clone())
    }
}

/// Offers the working-day slots minus those the doctor already has booked.
///
/// Cancelled appointments free their slot again.
#[derive(Debug, Clone)]
pub struct ScheduleAvailability {
    slots: Vec<String>,
    store: Arc<AppointmentStore>,
}

impl ScheduleAvailability {
    pub fn new(slots: Vec<String>, store: Arc<AppointmentStore>) -> Self {
        ScheduleAvailability { slots, store }
    }
}

impl AvailabilityProvider for ScheduleAvailability {
    fn available_slots(&self, doctor: &str, date: NaiveDate) -> MedibookResult<Vec<String>> {
        let booked: HashSet<String> = self
            .store
            .list()?
            .into_iter()
            .filter(|a| a.doctor == doctor && a.status != AppointmentStatus::Cancelled)
            .filter(|a| a.parsed_date() == Some(date))
            .map(|a| a.time)
            .collect();
        debug!("{} has {} booked slot(s) on {}", doctor, booked.len(), date);
        Ok(self
            .slots
            .iter()
            .filter(|slot| !booked.contains(*slot))
            .cloned()
            .collect())
    }
}
