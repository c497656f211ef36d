// lib/src/booking/workflow.rs

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use log::{debug, info};
use models::errors::{MedibookError, MedibookResult, ValidationError};
use models::medical::{
    Appointment, AppointmentStatus, Doctor, PaymentMethod, VisitType, BOOKING_DATE_FORMAT, DEFAULT_NOTES,
};

use crate::appointment_store::AppointmentStore;
use crate::booking::availability::AvailabilityProvider;
use crate::booking::validation::{parse_booking_date, validate_booking_date, validate_time_slot};
use crate::config::DEFAULT_BOOKING_WINDOW_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    SelectingSlot,
    ConfirmingPayment,
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingField {
    Date,
    Time,
    PaymentMethod,
}

/// The doctor fields copied onto the appointment at booking time.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDoctor {
    pub name: String,
    pub specialty: String,
}

impl From<&Doctor> for BookingDoctor {
    fn from(doctor: &Doctor) -> Self {
        BookingDoctor { name: doctor.name.clone(), specialty: doctor.specialty.clone() }
    }
}

/// Two-step booking form: pick a slot, then confirm payment and submit.
pub struct BookingWorkflow<A: AvailabilityProvider> {
    doctor: BookingDoctor,
    availability: A,
    step: BookingStep,
    visit_type: VisitType,
    date: Option<NaiveDate>,
    time: Option<String>,
    slots: Vec<String>,
    payment_method: Option<PaymentMethod>,
    insurance_provider: Option<String>,
    notes: Option<String>,
    field_errors: BTreeMap<BookingField, ValidationError>,
    today: NaiveDate,
    window_days: i64,
    submitted: bool,
}

impl<A: AvailabilityProvider> BookingWorkflow<A> {
    pub fn new(doctor: BookingDoctor, visit_type: VisitType, availability: A) -> Self {
        BookingWorkflow {
            doctor,
            availability,
            step: BookingStep::SelectingSlot,
            visit_type,
            date: None,
            time: None,
            slots: Vec::new(),
            payment_method: None,
            insurance_provider: None,
            notes: None,
            field_errors: BTreeMap::new(),
            today: Local::now().date_naive(),
            window_days: DEFAULT_BOOKING_WINDOW_DAYS,
            submitted: false,
        }
    }

    /// Overrides the date the booking window is measured from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_window_days(mut self, window_days: i64) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn doctor(&self) -> &BookingDoctor {
        &self.doctor
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Slots offered for the currently selected date.
    pub fn available_slots(&self) -> &[String] {
        &self.slots
    }

    pub fn field_errors(&self) -> &BTreeMap<BookingField, ValidationError> {
        &self.field_errors
    }

    pub fn visit_type(&self) -> VisitType {
        self.visit_type
    }

    pub fn set_visit_type(&mut self, visit_type: VisitType) {
        self.visit_type = visit_type;
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = method;
        if method.is_some() {
            self.field_errors.remove(&BookingField::PaymentMethod);
        }
    }

    pub fn set_insurance_provider(&mut self, provider: Option<String>) {
        self.insurance_provider = provider.filter(|p| !p.trim().is_empty());
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Selects a date and reloads the slots offered for it.
    ///
    /// An invalid date is recorded as a field error and leaves no slots to pick.
    /// A previously chosen time that is not offered on the new date is cleared.
    pub fn select_date(&mut self, date: NaiveDate) -> MedibookResult<()> {
        self.date = Some(date);
        if let Err(e) = validate_booking_date(date, self.today, self.window_days) {
            debug!("Rejected booking date {}: {}", date, e);
            self.slots.clear();
            self.time = None;
            self.field_errors.insert(BookingField::Date, e.clone());
            return Err(e.into());
        }
        self.field_errors.remove(&BookingField::Date);
        self.slots = self.availability.available_slots(&self.doctor.name, date)?;
        if let Some(time) = &self.time {
            if !self.slots.contains(time) {
                debug!("Clearing time {} no longer offered on {}", time, date);
                self.time = None;
            }
        }
        Ok(())
    }

    pub fn select_date_str(&mut self, raw: &str) -> MedibookResult<()> {
        match parse_booking_date(raw) {
            Ok(date) => self.select_date(date),
            Err(e) => {
                self.date = None;
                self.slots.clear();
                self.field_errors.insert(BookingField::Date, e.clone());
                Err(e.into())
            }
        }
    }

    pub fn select_time(&mut self, time: &str) -> MedibookResult<()> {
        if let Err(e) = validate_time_slot(time, &self.slots) {
            self.field_errors.insert(BookingField::Time, e.clone());
            return Err(e.into());
        }
        self.field_errors.remove(&BookingField::Time);
        self.time = Some(time.trim().to_string());
        Ok(())
    }

    fn check_slot(&mut self) -> MedibookResult<()> {
        self.field_errors.remove(&BookingField::Date);
        self.field_errors.remove(&BookingField::Time);

        match self.date {
            None => {
                self.field_errors.insert(BookingField::Date, ValidationError::MissingField("date".to_string()));
            }
            Some(date) => {
                if let Err(e) = validate_booking_date(date, self.today, self.window_days) {
                    self.field_errors.insert(BookingField::Date, e);
                }
            }
        }

        match (&self.time, self.date) {
            (None, _) => {
                self.field_errors.insert(BookingField::Time, ValidationError::MissingField("time".to_string()));
            }
            (Some(time), Some(date)) if !self.field_errors.contains_key(&BookingField::Date) => {
                // The slot may have been taken since it was picked.
                let offered = self.availability.available_slots(&self.doctor.name, date)?;
                if let Err(e) = validate_time_slot(time, &offered) {
                    self.field_errors.insert(BookingField::Time, e);
                }
                self.slots = offered;
            }
            _ => {}
        }

        match self.field_errors.values().next() {
            Some(first) => Err(first.clone().into()),
            None => Ok(()),
        }
    }

    /// Moves to payment confirmation once both date and time validate.
    ///
    /// On failure the field errors are refreshed and the step does not change.
    pub fn continue_to_payment(&mut self) -> MedibookResult<BookingStep> {
        if self.step != BookingStep::SelectingSlot || self.submitted {
            return Err(MedibookError::InvalidTransition(format!("cannot continue from {:?}", self.step)));
        }
        self.check_slot()?;
        self.step = BookingStep::ConfirmingPayment;
        Ok(self.step)
    }

    pub fn back(&mut self) -> BookingStep {
        if self.step == BookingStep::ConfirmingPayment && !self.submitted {
            self.step = BookingStep::SelectingSlot;
        }
        self.step
    }

    /// Writes the appointment to `store` and hands it to `on_complete`.
    ///
    /// Only valid from [`BookingStep::ConfirmingPayment`]; physical visits also
    /// need a payment method. Online visits never store payment details.
    pub fn submit<F>(&mut self, store: &AppointmentStore, on_complete: F) -> MedibookResult<Appointment>
    where
        F: FnOnce(&Appointment),
    {
        if self.submitted {
            return Err(MedibookError::InvalidTransition("booking already submitted".to_string()));
        }
        if self.step != BookingStep::ConfirmingPayment {
            return Err(MedibookError::InvalidTransition(format!("cannot submit from {:?}", self.step)));
        }
        if self.visit_type == VisitType::Physical && self.payment_method.is_none() {
            self.field_errors.insert(BookingField::PaymentMethod, ValidationError::PaymentMethodRequired);
            return Err(ValidationError::PaymentMethodRequired.into());
        }
        let (Some(date), Some(time)) = (self.date, self.time.clone()) else {
            return Err(MedibookError::InvalidTransition("slot selection is incomplete".to_string()));
        };
        // Another booking may have taken the slot while payment was being confirmed.
        let offered = self.availability.available_slots(&self.doctor.name, date)?;
        if let Err(e) = validate_time_slot(&time, &offered) {
            debug!("Slot {} on {} was taken before submit", time, date);
            self.slots = offered;
            self.field_errors.insert(BookingField::Time, e.clone());
            return Err(e.into());
        }

        let (payment_method, insurance_provider) = match self.visit_type {
            VisitType::Physical => (self.payment_method, self.insurance_provider.clone()),
            VisitType::Online => (None, None),
        };
        let appointment = Appointment {
            id: store.allocate_id()?,
            doctor: self.doctor.name.clone(),
            specialty: self.doctor.specialty.clone(),
            date: date.format(BOOKING_DATE_FORMAT).to_string(),
            time,
            status: AppointmentStatus::Upcoming,
            notes: self.notes.clone().unwrap_or_else(|| DEFAULT_NOTES.to_string()),
            visit_type: Some(self.visit_type),
            payment_method,
            insurance_provider,
        };
        store.append(appointment.clone())?;
        self.submitted = true;
        info!("Booked appointment {} with {}", appointment.id, appointment.doctor);
        on_complete(&appointment);
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::availability::{FixedSlots, ScheduleAvailability};
    use crate::config::config_defaults::default_time_slots;
    use crate::storage_engine::InMemoryStorage;
    use std::cell::Cell;
    use std::sync::Arc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dr_ali() -> BookingDoctor {
        BookingDoctor { name: "Dr. Ali".to_string(), specialty: "General Practice".to_string() }
    }

    fn workflow(visit_type: VisitType) -> BookingWorkflow<FixedSlots> {
        BookingWorkflow::new(dr_ali(), visit_type, FixedSlots::new(default_time_slots())).with_today(ymd(2025, 3, 9))
    }

    fn store() -> AppointmentStore {
        AppointmentStore::new(Arc::new(InMemoryStorage::new()))
    }

    #[test]
    fn test_continue_blocked_without_selection() {
        let mut booking = workflow(VisitType::Physical);
        assert!(booking.continue_to_payment().is_err());
        assert_eq!(booking.step(), BookingStep::SelectingSlot);
        assert_eq!(
            booking.field_errors().get(&BookingField::Date),
            Some(&ValidationError::MissingField("date".to_string()))
        );
        assert_eq!(
            booking.field_errors().get(&BookingField::Time),
            Some(&ValidationError::MissingField("time".to_string()))
        );
    }

    #[test]
    fn test_continue_blocked_on_weekend() {
        let mut booking = workflow(VisitType::Physical);
        assert!(booking.select_date(ymd(2025, 3, 15)).is_err());
        assert!(booking.available_slots().is_empty());
        assert!(booking.select_time("10:00 AM").is_err());

        let err = booking.continue_to_payment().unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::WeekendDate(_))));
        assert_eq!(booking.step(), BookingStep::SelectingSlot);
    }

    #[test]
    fn test_continue_blocked_without_time() {
        let mut booking = workflow(VisitType::Online);
        booking.select_date(ymd(2025, 3, 10)).unwrap();
        let err = booking.continue_to_payment().unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::MissingField(_))));
        assert_eq!(booking.step(), BookingStep::SelectingSlot);
    }

    #[test]
    fn test_unknown_time_is_rejected() {
        let mut booking = workflow(VisitType::Online);
        booking.select_date(ymd(2025, 3, 10)).unwrap();
        assert!(booking.select_time("07:00 PM").is_err());
        assert_eq!(booking.time(), None);
        assert_eq!(
            booking.field_errors().get(&BookingField::Time),
            Some(&ValidationError::TimeSlotUnavailable("07:00 PM".to_string()))
        );
    }

    #[test]
    fn test_continue_and_back() {
        let mut booking = workflow(VisitType::Physical);
        booking.select_date(ymd(2025, 3, 10)).unwrap();
        booking.select_time("10:00 AM").unwrap();
        assert_eq!(booking.continue_to_payment().unwrap(), BookingStep::ConfirmingPayment);
        assert!(booking.field_errors().is_empty());

        assert_eq!(booking.back(), BookingStep::SelectingSlot);
        assert_eq!(booking.date(), Some(ymd(2025, 3, 10)));
        assert_eq!(booking.time(), Some("10:00 AM"));
    }

    #[test]
    fn test_submit_requires_payment_for_physical_visit() {
        let store = store();
        let mut booking = workflow(VisitType::Physical);
        booking.select_date(ymd(2025, 3, 10)).unwrap();
        booking.select_time("10:00 AM").unwrap();
        booking.continue_to_payment().unwrap();

        let err = booking.submit(&store, |_| panic!("must not complete")).unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::PaymentMethodRequired)));
        assert_eq!(booking.step(), BookingStep::ConfirmingPayment);
        assert_eq!(store.list().unwrap().len(), crate::mock_data::seed_appointments().len());
    }

    #[test]
    fn test_submit_from_slot_selection_is_rejected() {
        let store = store();
        let mut booking = workflow(VisitType::Online);
        let err = booking.submit(&store, |_| {}).unwrap_err();
        assert!(matches!(err, MedibookError::InvalidTransition(_)));
    }

    #[test]
    fn test_booking_dr_ali_scenario() {
        let store = store();
        let completed = Cell::new(0);
        let mut booking = workflow(VisitType::Physical);
        booking.select_date_str("2025-03-10").unwrap();
        booking.select_time("10:00 AM").unwrap();
        booking.continue_to_payment().unwrap();
        booking.set_payment_method(Some(PaymentMethod::Card));

        let booked = booking.submit(&store, |_| completed.set(completed.get() + 1)).unwrap();
        assert_eq!(completed.get(), 1);
        assert_eq!(booked.status, AppointmentStatus::Upcoming);
        assert_eq!(booked.doctor, "Dr. Ali");
        assert_eq!(booked.date, "2025-03-10");
        assert_eq!(booked.time, "10:00 AM");
        assert_eq!(booked.visit_type, Some(VisitType::Physical));
        assert_eq!(booked.payment_method, Some(PaymentMethod::Card));
        assert_eq!(booked.notes, DEFAULT_NOTES);

        let stored = store.get(booked.id).unwrap().unwrap();
        assert_eq!(stored, booked);

        let again = booking.submit(&store, |_| {}).unwrap_err();
        assert!(matches!(again, MedibookError::InvalidTransition(_)));
    }

    #[test]
    fn test_online_visit_drops_payment_details() {
        let store = store();
        let mut booking = workflow(VisitType::Online);
        booking.select_date(ymd(2025, 3, 11)).unwrap();
        booking.select_time("02:00 PM").unwrap();
        booking.continue_to_payment().unwrap();
        booking.set_payment_method(Some(PaymentMethod::Cash));
        booking.set_insurance_provider(Some("Acme".to_string()));

        let booked = booking.submit(&store, |_| {}).unwrap();
        assert_eq!(booked.payment_method, None);
        assert_eq!(booked.insurance_provider, None);
    }

    #[test]
    fn test_schedule_availability_hides_booked_slots() {
        let store = Arc::new(store());
        let availability = ScheduleAvailability::new(default_time_slots(), store.clone());

        let mut first = BookingWorkflow::new(dr_ali(), VisitType::Online, availability.clone()).with_today(ymd(2025, 3, 9));
        first.select_date(ymd(2025, 3, 10)).unwrap();
        assert!(first.available_slots().contains(&"10:00 AM".to_string()));
        first.select_time("10:00 AM").unwrap();
        first.continue_to_payment().unwrap();
        let booked = first.submit(&store, |_| {}).unwrap();

        let mut second = BookingWorkflow::new(dr_ali(), VisitType::Online, availability.clone()).with_today(ymd(2025, 3, 9));
        second.select_date(ymd(2025, 3, 10)).unwrap();
        assert!(!second.available_slots().contains(&"10:00 AM".to_string()));
        assert_eq!(second.available_slots().len(), default_time_slots().len() - 1);

        store.cancel(booked.id).unwrap();
        second.select_date(ymd(2025, 3, 10)).unwrap();
        assert!(second.available_slots().contains(&"10:00 AM".to_string()));
    }

    #[test]
    fn test_slot_taken_after_selection_blocks_continue() {
        let store = Arc::new(store());
        let availability = ScheduleAvailability::new(default_time_slots(), store.clone());

        let mut slow = BookingWorkflow::new(dr_ali(), VisitType::Online, availability.clone()).with_today(ymd(2025, 3, 9));
        slow.select_date(ymd(2025, 3, 12)).unwrap();
        slow.select_time("09:30 AM").unwrap();

        let mut fast = BookingWorkflow::new(dr_ali(), VisitType::Online, availability).with_today(ymd(2025, 3, 9));
        fast.select_date(ymd(2025, 3, 12)).unwrap();
        fast.select_time("09:30 AM").unwrap();
        fast.continue_to_payment().unwrap();
        fast.submit(&store, |_| {}).unwrap();

        let err = slow.continue_to_payment().unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::TimeSlotUnavailable(_))));
        assert_eq!(slow.step(), BookingStep::SelectingSlot);
    }

    #[test]
    fn test_second_submit_for_same_slot_is_rejected() {
        let store = Arc::new(store());
        let availability = ScheduleAvailability::new(default_time_slots(), store.clone());
        let confirmed = |availability: ScheduleAvailability| {
            let mut booking = BookingWorkflow::new(dr_ali(), VisitType::Online, availability).with_today(ymd(2025, 3, 9));
            booking.select_date(ymd(2025, 3, 10)).unwrap();
            booking.select_time("10:00 AM").unwrap();
            booking.continue_to_payment().unwrap();
            booking
        };
        let mut first = confirmed(availability.clone());
        let mut second = confirmed(availability);

        first.submit(&store, |_| {}).unwrap();
        let err = second.submit(&store, |_| panic!("must not complete")).unwrap_err();
        assert!(matches!(err, MedibookError::Validation(ValidationError::TimeSlotUnavailable(_))));
        assert!(second.field_errors().contains_key(&BookingField::Time));

        let in_slot = store
            .list()
            .unwrap()
            .into_iter()
            .filter(|a| a.doctor == "Dr. Ali" && a.date == "2025-03-10" && a.time == "10:00 AM")
            .count();
        assert_eq!(in_slot, 1);
    }

    #[test]
    fn test_changing_date_clears_unoffered_time() {
        let mut booking = workflow(VisitType::Online);
        booking.select_date(ymd(2025, 3, 10)).unwrap();
        booking.select_time("10:00 AM").unwrap();
        assert!(booking.select_date(ymd(2025, 3, 16)).is_err());
        assert_eq!(booking.time(), None);
    }
}
