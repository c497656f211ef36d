// server/src/cli/handlers.rs

// Handlers for the MediBook CLI subcommands. Each one works on the storage
// engine selected by the loaded configuration.
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use crossterm::style::Stylize;
use log::{debug, info};
use medibook_lib::booking::{parse_booking_date, validate_booking_date, AvailabilityProvider};
use medibook_lib::{
    disease_statistics, filter_records, group_by_doctor, mock_data, patient_by_email, prescriptions_for,
    status_counts, AppConfig, AppointmentStore, BookingDoctor, BookingWorkflow, ChatStore, DoctorDirectory,
    GateDecision, ProfileStore, RecordFilter, ReplyScheduler, RoleGate, ScheduleAvailability, Session,
    SessionManager, StorageEngine,
};
use models::medical::{Appointment, ChatSender, Doctor, Language, PaymentMethod, Role, VisitType};
use models::AppointmentId;

/// Everything a handler needs, built once per invocation.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: AppConfig,
    pub engine: Arc<dyn StorageEngine>,
    pub store: Arc<AppointmentStore>,
}

impl CliContext {
    pub fn new(config: AppConfig, engine: Arc<dyn StorageEngine>) -> Self {
        let store = Arc::new(AppointmentStore::new(engine.clone()));
        CliContext { config, engine, store }
    }

    fn sessions(&self) -> SessionManager {
        SessionManager::new(self.engine.clone())
    }

    fn availability(&self) -> ScheduleAvailability {
        ScheduleAvailability::new(self.config.booking.time_slots.clone(), self.store.clone())
    }

    /// Returns the session when it may use `role`'s pages.
    fn require(&self, role: Role) -> Result<Session> {
        match RoleGate::new(self.engine.clone()).check(role)? {
            GateDecision::Allow(session) => Ok(session),
            GateDecision::Redirect(route) => {
                bail!("{} access required, sign in first (redirected to {})", role, route)
            }
        }
    }
}

fn find_doctor(doctor_id: u32) -> Result<Doctor> {
    DoctorDirectory::default()
        .find(doctor_id)
        .cloned()
        .ok_or_else(|| anyhow!("No doctor with id {}", doctor_id))
}

fn parse_id(raw: &str) -> Result<AppointmentId> {
    raw.parse::<AppointmentId>()
        .with_context(|| format!("Invalid appointment id '{}'", raw))
}

pub fn handle_login(ctx: &CliContext, email: &str, name: &str, role: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let route = ctx.sessions().login(email, name, role)?;
    println!("Signed in as {} ({}). Continue at {}", email.trim(), role, route);
    Ok(())
}

pub fn handle_signup(ctx: &CliContext, name: &str, email: &str, role: &str) -> Result<()> {
    let role: Role = role.parse()?;
    let route = ctx.sessions().signup(name, email, role)?;
    println!("Welcome, {}! Continue at {}", name.trim(), route);
    Ok(())
}

pub fn handle_logout(ctx: &CliContext) -> Result<()> {
    let route = ctx.sessions().logout()?;
    println!("Signed out. Sign in again at {}", route);
    Ok(())
}

pub fn handle_whoami(ctx: &CliContext) -> Result<()> {
    let session = ctx.sessions().current()?;
    if !session.authenticated {
        println!("Not signed in.");
        return Ok(());
    }
    let language = ProfileStore::new(ctx.engine.clone()).language()?;
    println!("{:<10} {}", "Name", session.name.as_deref().unwrap_or("-"));
    println!("{:<10} {}", "Email", session.email.as_deref().unwrap_or("-"));
    println!("{:<10} {}", "Role", session.role);
    println!("{:<10} {}", "Language", language.code());
    if let Some(patient) = session.email.as_deref().and_then(patient_by_email) {
        println!("{:<10} {}", "Born", patient.date_of_birth);
        println!("{:<10} {}", "Blood", patient.blood_type.as_deref().unwrap_or("-"));
    }
    Ok(())
}

fn print_doctors<'a>(doctors: impl IntoIterator<Item = &'a Doctor>) {
    println!("{:<4} {:<22} {:<18} {:<22} {:<6} {:<8}", "ID", "Name", "Specialty", "Location", "Fee", "Rating");
    println!("{:-<4} {:-<22} {:-<18} {:-<22} {:-<6} {:-<8}", "", "", "", "", "", "");
    for d in doctors {
        let mark = if d.verified { "" } else { " (unverified)" };
        println!(
            "{:<4} {:<22} {:<18} {:<22} {:<6} {:<8.1}{}",
            d.id, d.name, d.specialty, d.location, d.fee, d.rating, mark
        );
    }
}

pub fn handle_doctors(specialty: Option<&str>, search: Option<&str>, pending: bool) -> Result<()> {
    let directory = DoctorDirectory::default();
    let mut doctors: Vec<&Doctor> = match search {
        Some(text) => directory.search(text),
        None => directory.all().iter().collect(),
    };
    if let Some(specialty) = specialty {
        doctors.retain(|d| d.specialty.eq_ignore_ascii_case(specialty.trim()));
    }
    if pending {
        doctors.retain(|d| !d.verified);
    }
    if doctors.is_empty() {
        println!("No doctors match.");
        return Ok(());
    }
    print_doctors(doctors);
    Ok(())
}

pub fn handle_slots(ctx: &CliContext, doctor_id: u32, date: &str) -> Result<()> {
    let doctor = find_doctor(doctor_id)?;
    let date = parse_booking_date(date)?;
    validate_booking_date(date, Local::now().date_naive(), ctx.config.booking.window_days)?;
    let slots = ctx.availability().available_slots(&doctor.name, date)?;
    if slots.is_empty() {
        println!("{} has no free slots on {}.", doctor.name, date);
        return Ok(());
    }
    println!("Free slots for {} on {}:", doctor.name, date);
    for slot in slots {
        println!("  {}", slot);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_book(
    ctx: &CliContext,
    doctor_id: u32,
    date: &str,
    time: &str,
    visit_type: &str,
    payment: Option<&str>,
    insurance: Option<&str>,
    notes: Option<&str>,
) -> Result<Appointment> {
    ctx.require(Role::Patient)?;
    let doctor = find_doctor(doctor_id)?;
    let visit_type: VisitType = visit_type.parse()?;
    let payment = payment.map(str::parse::<PaymentMethod>).transpose()?;

    let mut booking = BookingWorkflow::new(BookingDoctor::from(&doctor), visit_type, ctx.availability())
        .with_window_days(ctx.config.booking.window_days);
    booking.select_date_str(date)?;
    booking.select_time(time)?;
    booking.continue_to_payment()?;
    booking.set_payment_method(payment);
    booking.set_insurance_provider(insurance.map(str::to_string));
    booking.set_notes(notes.map(str::to_string));

    let appointment = booking.submit(&ctx.store, |booked| {
        info!("Booking {} completed, returning to /appointments", booked.id);
    })?;
    println!(
        "{} appointment {} with {} on {} at {}",
        "Booked".green(),
        appointment.id,
        appointment.doctor,
        appointment.date,
        appointment.time
    );
    Ok(appointment)
}

fn print_appointments(appointments: &[Appointment]) {
    println!("{:<8} {:<22} {:<18} {:<12} {:<10} {:<12}", "ID", "Doctor", "Specialty", "Date", "Time", "Status");
    println!("{:-<8} {:-<22} {:-<18} {:-<12} {:-<10} {:-<12}", "", "", "", "", "", "");
    for a in appointments {
        println!(
            "{:<8} {:<22} {:<18} {:<12} {:<10} {:<12}",
            a.id, a.doctor, a.specialty, a.date, a.time, a.status
        );
    }
}

pub fn handle_list(ctx: &CliContext, history: bool, json: bool) -> Result<()> {
    ctx.require(Role::Patient)?;
    let appointments = if history { ctx.store.history()? } else { ctx.store.upcoming()? };
    if json {
        println!("{}", serde_json::to_string_pretty(&appointments)?);
        return Ok(());
    }
    if appointments.is_empty() {
        println!("No appointments.");
        return Ok(());
    }
    print_appointments(&appointments);
    Ok(())
}

pub fn handle_cancel(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.require(Role::Patient)?;
    let id = parse_id(id)?;
    if ctx.store.cancel(id)? {
        println!("{} appointment {}", "Cancelled".yellow(), id);
    } else {
        println!("No appointment with id {}", id);
    }
    Ok(())
}

pub fn handle_remove(ctx: &CliContext, id: &str) -> Result<()> {
    ctx.require(Role::Patient)?;
    let id = parse_id(id)?;
    ctx.store.remove(id)?;
    println!("Removed appointment {} if it existed", id);
    Ok(())
}

pub fn handle_stats(ctx: &CliContext, status: Option<String>, search: Option<String>) -> Result<()> {
    ctx.require(Role::Admin)?;
    let records = mock_data::visit_records();
    let filter = RecordFilter::new(status, search);
    let filtered: Vec<_> = filter_records(&records, &filter).into_iter().cloned().collect();
    debug!("Stats over {} of {} visit records", filtered.len(), records.len());

    println!("\n--- Visits by status ---");
    for (status, count) in status_counts(&filtered) {
        println!("{:<15} {:<6}", status, count);
    }
    println!("\n--- Visits by doctor ---");
    for group in group_by_doctor(&filtered) {
        println!("{:<22} {:<6}", group.doctor_name, group.count);
    }
    println!("\n--- Diagnoses ---");
    println!("{:<18} {:<6} {:<9} {:<6}", "Diagnosis", "Cases", "Patients", "Share");
    for stat in disease_statistics(&filtered) {
        println!(
            "{:<18} {:<6} {:<9} {:>5.1}%",
            stat.diagnosis,
            stat.cases,
            stat.unique_patients,
            stat.share * 100.0
        );
    }
    Ok(())
}

pub fn handle_language(ctx: &CliContext, code: Option<&str>) -> Result<()> {
    let profiles = ProfileStore::new(ctx.engine.clone());
    if let Some(code) = code {
        let language: Language = code.parse()?;
        profiles.set_language(language)?;
    }
    let language = profiles.language()?;
    let direction = if language.is_rtl() { "rtl" } else { "ltr" };
    println!("Language: {} ({})", language.code(), direction);
    Ok(())
}

pub async fn handle_chat(ctx: &CliContext, contact: &str, message: &str) -> Result<()> {
    let session = ctx.require(Role::Patient)?;
    let (sender, partner) = match session.role {
        Role::Doctor => (ChatSender::Doctor, ChatSender::Patient),
        _ => (ChatSender::Patient, ChatSender::Doctor),
    };
    let chats = ChatStore::new(ctx.engine.clone());
    chats.send(contact, sender, message)?;

    let scheduler = ReplyScheduler::from_config(chats.clone(), &ctx.config.chat);
    scheduler.schedule_reply(contact, partner).wait().await;

    for m in chats.messages(contact)? {
        println!("[{}] {:<8} {}", m.sent_at.format("%H:%M:%S"), format!("{:?}", m.sender), m.body);
    }
    Ok(())
}

pub fn handle_prescriptions(ctx: &CliContext) -> Result<()> {
    let session = ctx.require(Role::Patient)?;
    let name = session.name.ok_or_else(|| anyhow!("Signed-in user has no name on record"))?;
    let prescriptions = prescriptions_for(&name);
    if prescriptions.is_empty() {
        println!("No prescriptions for {}.", name);
        return Ok(());
    }
    println!("{:<18} {:<10} {:<20} {:<22} {:<8}", "Medication", "Dosage", "Frequency", "Doctor", "Refills");
    for p in prescriptions {
        println!("{:<18} {:<10} {:<20} {:<22} {:<8}", p.medication, p.dosage, p.frequency, p.doctor_name, p.refills);
    }
    Ok(())
}

pub fn handle_deactivate(ctx: &CliContext, reason: Option<&str>) -> Result<()> {
    ctx.require(Role::Patient)?;
    let route = ProfileStore::new(ctx.engine.clone()).deactivate_account(reason)?;
    println!("Account deactivated. Signed out to {}", route);
    Ok(())
}

pub fn handle_delete_account(ctx: &CliContext, reason: Option<&str>) -> Result<()> {
    ctx.require(Role::Patient)?;
    let route = ProfileStore::new(ctx.engine.clone()).delete_account(reason)?;
    println!("{} Signed out to {}", "Account deleted.".red(), route);
    Ok(())
}
