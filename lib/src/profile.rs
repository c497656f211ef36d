// lib/src/profile.rs

use std::sync::Arc;

use log::{info, warn};
use models::errors::MedibookResult;
use models::medical::{AccountStatus, DoctorProfile, Language, UserProfile};

use crate::session::{Route, SessionManager};
use crate::storage_engine::keys::{
    ACCOUNT_DEACTIVATED, ACCOUNT_DELETED, APPOINTMENTS, DEACTIVATION_REASON, DELETION_REASON, DOCTOR_PROFILE,
    LANGUAGE, TRUE, USER_PROFILE,
};
use crate::storage_engine::storage_utils::{read_flag, read_json, read_string, write_json};
use crate::storage_engine::StorageEngine;

/// Profiles, display language and account lifecycle of the signed-in user.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    engine: Arc<dyn StorageEngine>,
}

impl ProfileStore {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        ProfileStore { engine }
    }

    pub fn user_profile(&self) -> MedibookResult<Option<UserProfile>> {
        Ok(read_json(self.engine.as_ref(), USER_PROFILE)?)
    }

    pub fn save_user_profile(&self, profile: &UserProfile) -> MedibookResult<()> {
        write_json(self.engine.as_ref(), USER_PROFILE, profile)
    }

    pub fn doctor_profile(&self) -> MedibookResult<Option<DoctorProfile>> {
        Ok(read_json(self.engine.as_ref(), DOCTOR_PROFILE)?)
    }

    pub fn save_doctor_profile(&self, profile: &DoctorProfile) -> MedibookResult<()> {
        write_json(self.engine.as_ref(), DOCTOR_PROFILE, profile)
    }

    pub fn language(&self) -> MedibookResult<Language> {
        let Some(code) = read_string(self.engine.as_ref(), LANGUAGE)? else {
            return Ok(Language::default());
        };
        Ok(code.parse().unwrap_or_else(|e| {
            warn!("Ignoring stored language: {}", e);
            Language::default()
        }))
    }

    pub fn set_language(&self, language: Language) -> MedibookResult<()> {
        self.engine.set_item(LANGUAGE, language.code())?;
        Ok(())
    }

    /// Flags the account as deactivated and signs the user out.
    pub fn deactivate_account(&self, reason: Option<&str>) -> MedibookResult<Route> {
        self.engine.set_item(ACCOUNT_DEACTIVATED, TRUE)?;
        match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => self.engine.set_item(DEACTIVATION_REASON, reason)?,
            None => self.engine.remove_item(DEACTIVATION_REASON)?,
        }
        info!("Account deactivated");
        SessionManager::new(self.engine.clone()).logout()
    }

    /// Flags the account as deleted, drops its profiles and bookings, and signs out.
    pub fn delete_account(&self, reason: Option<&str>) -> MedibookResult<Route> {
        self.engine.set_item(ACCOUNT_DELETED, TRUE)?;
        match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => self.engine.set_item(DELETION_REASON, reason)?,
            None => self.engine.remove_item(DELETION_REASON)?,
        }
        for key in [USER_PROFILE, DOCTOR_PROFILE, APPOINTMENTS] {
            self.engine.remove_item(key)?;
        }
        info!("Account deleted");
        SessionManager::new(self.engine.clone()).logout()
    }

    pub fn account_status(&self) -> MedibookResult<AccountStatus> {
        let engine = self.engine.as_ref();
        if read_flag(engine, ACCOUNT_DELETED)? {
            return Ok(AccountStatus::Deleted { reason: read_string(engine, DELETION_REASON)? });
        }
        if read_flag(engine, ACCOUNT_DEACTIVATED)? {
            return Ok(AccountStatus::Deactivated { reason: read_string(engine, DEACTIVATION_REASON)? });
        }
        Ok(AccountStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment_store::AppointmentStore;
    use crate::storage_engine::InMemoryStorage;
    use models::medical::Role;

    fn setup() -> (Arc<dyn StorageEngine>, ProfileStore) {
        let engine: Arc<dyn StorageEngine> = Arc::new(InMemoryStorage::new());
        (engine.clone(), ProfileStore::new(engine))
    }

    fn patient_profile() -> UserProfile {
        UserProfile {
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            allergies: vec!["Penicillin".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_profiles_round_trip_and_tolerate_garbage() {
        let (engine, profiles) = setup();
        assert_eq!(profiles.user_profile().unwrap(), None);

        profiles.save_user_profile(&patient_profile()).unwrap();
        assert_eq!(profiles.user_profile().unwrap(), Some(patient_profile()));

        engine.set_item(DOCTOR_PROFILE, "{not json").unwrap();
        assert_eq!(profiles.doctor_profile().unwrap(), None);
    }

    #[test]
    fn test_language_defaults_to_english() {
        let (engine, profiles) = setup();
        assert_eq!(profiles.language().unwrap(), Language::En);

        profiles.set_language(Language::Ar).unwrap();
        assert_eq!(profiles.language().unwrap(), Language::Ar);
        assert!(profiles.language().unwrap().is_rtl());

        engine.set_item(LANGUAGE, "klingon").unwrap();
        assert_eq!(profiles.language().unwrap(), Language::En);
    }

    #[test]
    fn test_deactivate_signs_out() {
        let (engine, profiles) = setup();
        SessionManager::new(engine.clone()).login("john@example.com", "John", Role::Patient).unwrap();

        assert_eq!(profiles.deactivate_account(Some("taking a break")).unwrap(), Route::Login);
        assert_eq!(
            profiles.account_status().unwrap(),
            AccountStatus::Deactivated { reason: Some("taking a break".to_string()) }
        );
        assert!(!SessionManager::new(engine).current().unwrap().authenticated);
    }

    #[test]
    fn test_delete_removes_profile_and_appointments() {
        let (engine, profiles) = setup();
        SessionManager::new(engine.clone()).login("john@example.com", "John", Role::Patient).unwrap();
        profiles.save_user_profile(&patient_profile()).unwrap();
        let store = AppointmentStore::new(engine.clone());
        store.cancel(models::AppointmentId(1)).unwrap();
        assert!(engine.get_item(APPOINTMENTS).unwrap().is_some());

        profiles.delete_account(None).unwrap();
        assert_eq!(profiles.account_status().unwrap(), AccountStatus::Deleted { reason: None });
        assert_eq!(profiles.user_profile().unwrap(), None);
        assert_eq!(engine.get_item(APPOINTMENTS).unwrap(), None);
    }

    #[test]
    fn test_active_by_default() {
        let (_, profiles) = setup();
        assert_eq!(profiles.account_status().unwrap(), AccountStatus::Active);
    }
}
