// lib/src/appointment_store.rs

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, info, warn};
use models::errors::{MedibookError, MedibookResult, StorageError};
use models::medical::{Appointment, AppointmentStatus};
use models::AppointmentId;
use rand::Rng;

use crate::mock_data::seed_appointments;
use crate::storage_engine::keys::APPOINTMENTS;
use crate::storage_engine::storage_utils::{read_json, write_json};
use crate::storage_engine::StorageEngine;

/// Upper bound (inclusive) for randomly drawn appointment ids.
pub const MAX_RANDOM_ID: u64 = 999_999;
const MAX_ID_ATTEMPTS: usize = 32;

/// The patient's appointment list, persisted as one JSON array under `appointments`.
///
/// Every mutation reads the whole array, changes it and writes it back. The
/// internal mutex keeps writers in this process from interleaving; separate
/// processes sharing a backend still race and the last write wins.
#[derive(Debug)]
pub struct AppointmentStore {
    engine: Arc<dyn StorageEngine>,
    write_lock: Mutex<()>,
}

impl AppointmentStore {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        AppointmentStore { engine, write_lock: Mutex::new(()) }
    }

    pub fn engine(&self) -> &Arc<dyn StorageEngine> {
        &self.engine
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Backend("appointment store lock poisoned".to_string()))
    }

    /// Returns the stored list, or the seed list when nothing readable is stored.
    pub fn list(&self) -> MedibookResult<Vec<Appointment>> {
        match read_json::<Vec<Appointment>>(self.engine.as_ref(), APPOINTMENTS)? {
            Some(appointments) => Ok(appointments),
            None => {
                debug!("No readable appointment list stored, using seed data");
                Ok(seed_appointments())
            }
        }
    }

    /// Like [`AppointmentStore::list`], but a stored list that cannot be read is
    /// an error rather than seed data, so a write never replaces it.
    fn load_for_update(&self) -> MedibookResult<Vec<Appointment>> {
        let Some(raw) = self.engine.get_item(APPOINTMENTS)? else {
            return Ok(seed_appointments());
        };
        serde_json::from_str(&raw).map_err(|e| {
            error!("Refusing to overwrite unreadable appointment list: {}", e);
            MedibookError::from(e)
        })
    }

    fn write_all(&self, appointments: &[Appointment]) -> MedibookResult<()> {
        write_json(self.engine.as_ref(), APPOINTMENTS, appointments)
    }

    pub fn get(&self, id: AppointmentId) -> MedibookResult<Option<Appointment>> {
        Ok(self.list()?.into_iter().find(|a| a.id == id))
    }

    /// Appends `appointment`, refusing an id that is already present.
    pub fn append(&self, appointment: Appointment) -> MedibookResult<()> {
        let _guard = self.lock()?;
        let mut appointments = self.load_for_update()?;
        if appointments.iter().any(|a| a.id == appointment.id) {
            warn!("Refusing to append appointment {}: id already stored", appointment.id);
            return Err(MedibookError::DuplicateId(appointment.id));
        }
        info!("Appending appointment {} with {} on {} at {}", appointment.id, appointment.doctor, appointment.date, appointment.time);
        appointments.push(appointment);
        self.write_all(&appointments)
    }

    /// Deletes the entry with `id`. Unknown ids are ignored.
    pub fn remove(&self, id: AppointmentId) -> MedibookResult<()> {
        let _guard = self.lock()?;
        let mut appointments = self.load_for_update()?;
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        if appointments.len() == before {
            debug!("Remove of unknown appointment {} ignored", id);
            return Ok(());
        }
        info!("Removed appointment {}", id);
        self.write_all(&appointments)
    }

    /// Marks the entry with `id` as cancelled, keeping it in the list.
    ///
    /// Returns `false` when no such appointment exists.
    pub fn cancel(&self, id: AppointmentId) -> MedibookResult<bool> {
        let _guard = self.lock()?;
        let mut appointments = self.load_for_update()?;
        let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) else {
            debug!("Cancel of unknown appointment {} ignored", id);
            return Ok(false);
        };
        appointment.status = appointment.status.transition_to(AppointmentStatus::Cancelled)?;
        info!("Cancelled appointment {}", id);
        self.write_all(&appointments)?;
        Ok(true)
    }

    pub fn update_status(&self, id: AppointmentId, status: AppointmentStatus) -> MedibookResult<Appointment> {
        let _guard = self.lock()?;
        let mut appointments = self.load_for_update()?;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(MedibookError::NotFound(id))?;
        appointment.status = appointment.status.transition_to(status)?;
        let updated = appointment.clone();
        self.write_all(&appointments)?;
        info!("Appointment {} is now {}", id, status);
        Ok(updated)
    }

    /// Draws a random id that no stored appointment uses yet.
    pub fn allocate_id(&self) -> MedibookResult<AppointmentId> {
        self.allocate_id_with(&mut rand::thread_rng())
    }

    pub fn allocate_id_with<R: Rng + ?Sized>(&self, rng: &mut R) -> MedibookResult<AppointmentId> {
        let appointments = self.list()?;
        let taken = |candidate: u64| appointments.iter().any(|a| a.id.value() == candidate);
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = rng.gen_range(1..=MAX_RANDOM_ID);
            if !taken(candidate) {
                return Ok(AppointmentId(candidate));
            }
            debug!("Random appointment id {} already taken, drawing again", candidate);
        }
        let next = appointments.iter().map(|a| a.id.value()).max().unwrap_or(0) + 1;
        warn!("Falling back to sequential appointment id {}", next);
        Ok(AppointmentId(next))
    }

    /// Appointments still ahead of the patient (upcoming, pending, rescheduled).
    pub fn upcoming(&self) -> MedibookResult<Vec<Appointment>> {
        Ok(self.list()?.into_iter().filter(Appointment::is_active).collect())
    }

    /// Completed and cancelled appointments.
    pub fn history(&self) -> MedibookResult<Vec<Appointment>> {
        Ok(self.list()?.into_iter().filter(|a| !a.is_active()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::InMemoryStorage;
    use models::errors::ValidationError;
    use models::medical::{PaymentMethod, VisitType, DEFAULT_NOTES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> AppointmentStore {
        AppointmentStore::new(Arc::new(InMemoryStorage::new()))
    }

    fn appointment(id: u64) -> Appointment {
        Appointment {
            id: AppointmentId(id),
            doctor: "Dr. Ali".to_string(),
            specialty: "General Practice".to_string(),
            date: "2025-03-10".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Upcoming,
            notes: DEFAULT_NOTES.to_string(),
            visit_type: Some(VisitType::Physical),
            payment_method: Some(PaymentMethod::Card),
            insurance_provider: Some("Acme Health".to_string()),
        }
    }

    #[test]
    fn test_list_falls_back_to_seed_when_absent() {
        assert_eq!(store().list().unwrap(), seed_appointments());
    }

    #[test]
    fn test_list_falls_back_to_seed_when_malformed() {
        let store = store();
        store.engine().set_item(APPOINTMENTS, "[{\"id\": \"oops\"").unwrap();
        assert_eq!(store.list().unwrap(), seed_appointments());
    }

    #[test]
    fn test_unreadable_list_is_never_overwritten() {
        let store = store();
        let garbled = "[{\"id\": 500, \"doctor\": \"Dr. Ali\"";
        store.engine().set_item(APPOINTMENTS, garbled).unwrap();

        let err = store.cancel(AppointmentId(1)).unwrap_err();
        assert!(matches!(err, MedibookError::SerializationError(_)));
        assert!(store.append(appointment(600)).is_err());
        assert!(store.remove(AppointmentId(1)).is_err());
        assert_eq!(store.engine().get_item(APPOINTMENTS).unwrap().as_deref(), Some(garbled));
    }

    #[test]
    fn test_lowercase_status_survives_mutation() {
        let store = store();
        let stored = r#"[{"id":500,"doctor":"Dr. Ali","specialty":"General Practice","date":"2025-03-10","time":"10:00 AM","status":"upcoming"}]"#;
        store.engine().set_item(APPOINTMENTS, stored).unwrap();

        assert!(!store.cancel(AppointmentId(1)).unwrap());
        store.append(appointment(501)).unwrap();
        let ids: Vec<u64> = store.list().unwrap().iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![500, 501]);
    }

    #[test]
    fn test_empty_stored_list_is_not_replaced_by_seed() {
        let store = store();
        store.engine().set_item(APPOINTMENTS, "[]").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_list_contains_record_once() {
        let store = store();
        let booked = appointment(4242);
        store.append(booked.clone()).unwrap();

        let listed = store.list().unwrap();
        let matches: Vec<_> = listed.iter().filter(|a| a.id == booked.id).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0], &booked);
        assert_eq!(listed.len(), seed_appointments().len() + 1);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let store = store();
        store.append(appointment(7)).unwrap();
        let before = store.list().unwrap();

        let err = store.append(appointment(7)).unwrap_err();
        assert!(matches!(err, MedibookError::DuplicateId(AppointmentId(7))));
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_remove_deletes_record() {
        let store = store();
        store.append(appointment(99)).unwrap();
        store.remove(AppointmentId(99)).unwrap();
        assert!(store.list().unwrap().iter().all(|a| a.id != AppointmentId(99)));
    }

    #[test]
    fn test_remove_unknown_id_leaves_list_unchanged() {
        let store = store();
        store.append(appointment(5)).unwrap();
        let before = store.list().unwrap();
        store.remove(AppointmentId(123_456)).unwrap();
        store.remove(AppointmentId(123_456)).unwrap();
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn test_cancel_is_a_status_transition() {
        let store = store();
        store.append(appointment(11)).unwrap();

        assert!(store.cancel(AppointmentId(11)).unwrap());
        let cancelled = store.get(AppointmentId(11)).unwrap().unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert!(store.history().unwrap().iter().any(|a| a.id == AppointmentId(11)));
        assert!(store.upcoming().unwrap().iter().all(|a| a.id != AppointmentId(11)));

        assert!(!store.cancel(AppointmentId(12)).unwrap());
    }

    #[test]
    fn test_cancel_completed_is_rejected() {
        let store = store();
        // Seed appointment 3 is completed.
        let err = store.cancel(AppointmentId(3)).unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::InvalidStatusTransition { .. })));
    }

    #[test]
    fn test_update_status_unknown_id() {
        let err = store().update_status(AppointmentId(77), AppointmentStatus::Completed).unwrap_err();
        assert!(matches!(err, MedibookError::NotFound(AppointmentId(77))));
    }

    #[test]
    fn test_allocate_id_avoids_stored_ids() {
        let store = store();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let id = store.allocate_id_with(&mut rng).unwrap();
            assert!(store.get(id).unwrap().is_none());
            store.append(appointment(id.value())).unwrap();
        }
    }

    #[test]
    fn test_storage_failure_surfaces_as_storage_error() {
        let store = AppointmentStore::new(Arc::new(InMemoryStorage::with_quota(32)));
        let err = store.append(appointment(1000)).unwrap_err();
        assert!(matches!(err, MedibookError::Storage(StorageError::QuotaExceeded { .. })));
    }
}
