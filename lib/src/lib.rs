// lib/src/lib.rs

pub mod aggregation;
pub mod appointment_store;
pub mod booking;
pub mod chat;
pub mod config;
pub mod directory;
pub mod mock_data;
pub mod profile;
pub mod session;
pub mod storage_engine;

pub use models::{Appointment, AppointmentId, AppointmentStatus, MedibookError, MedibookResult, Role};

pub use crate::aggregation::{
    disease_statistics, filter_records, group_by_diagnosis, group_by_doctor, status_counts, DiagnosisGroup,
    DiseaseStat, DoctorGroup, RecordFilter, VisitLike,
};
pub use crate::appointment_store::AppointmentStore;
pub use crate::booking::{AvailabilityProvider, BookingDoctor, BookingStep, BookingWorkflow, ScheduleAvailability};
pub use crate::chat::{ChatStore, PendingReply, ReplyScheduler};
pub use crate::config::{load_app_config, AppConfig};
pub use crate::directory::{patient_by_email, prescriptions_for, DoctorDirectory};
pub use crate::profile::ProfileStore;
pub use crate::session::{GateDecision, Route, RoleGate, Session, SessionManager};
pub use crate::storage_engine::{create_storage, StorageEngine};
