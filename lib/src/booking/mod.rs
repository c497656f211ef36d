// lib/src/booking/mod.rs

pub mod availability;
pub mod validation;
pub mod workflow;

pub use availability::{AvailabilityProvider, FixedSlots, ScheduleAvailability};
pub use validation::{parse_booking_date, validate_booking_date, validate_time_slot};
pub use workflow::{BookingDoctor, BookingField, BookingStep, BookingWorkflow};
