// models/src/medical/mod.rs

pub mod appointment;
pub mod chat;
pub mod doctor;
pub mod language;
pub mod patient;
pub mod prescription;
pub mod profile;
pub mod role;
pub mod visit_record;

pub use appointment::{
    Appointment, AppointmentStatus, PaymentMethod, VisitType, BOOKING_DATE_FORMAT, DEFAULT_NOTES,
};
pub use chat::{ChatMessage, ChatSender};
pub use doctor::Doctor;
pub use language::Language;
pub use patient::Patient;
pub use prescription::Prescription;
pub use profile::{AccountStatus, DoctorProfile, UserProfile};
pub use role::Role;
pub use visit_record::VisitRecord;
