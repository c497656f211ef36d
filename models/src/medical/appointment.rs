// models/src/medical/appointment.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ValidationError;
use crate::identifiers::AppointmentId;

pub const DEFAULT_NOTES: &str = "No additional notes";
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads a value through its `FromStr` impl so stored JSON accepts the same
/// spellings as user input.
fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Lifecycle state of an appointment.
///
/// Older stored lists and the doctor pages use "Confirmed" for `Upcoming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
    Rescheduled,
    Pending,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Rescheduled => "Rescheduled",
            AppointmentStatus::Pending => "Pending",
        }
    }

    /// Completed and cancelled appointments accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (*self, next) {
            (Completed | Cancelled, _) => false,
            (Pending, Upcoming) => true,
            (Upcoming | Pending | Rescheduled, Cancelled | Completed | Rescheduled) => true,
            _ => false,
        }
    }

    pub fn transition_to(&self, next: AppointmentStatus) -> Result<AppointmentStatus, ValidationError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ValidationError::InvalidStatusTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" | "confirmed" => Ok(AppointmentStatus::Upcoming),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            "rescheduled" => Ok(AppointmentStatus::Rescheduled),
            "pending" => Ok(AppointmentStatus::Pending),
            _ => Err(ValidationError::UnknownValue {
                field: "status".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitType {
    Physical,
    Online,
}

impl FromStr for VisitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Ok(VisitType::Physical),
            "online" => Ok(VisitType::Online),
            _ => Err(ValidationError::UnknownValue {
                field: "visit type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for VisitType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Insurance,
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            "insurance" => Ok(PaymentMethod::Insurance),
            _ => Err(ValidationError::UnknownValue {
                field: "payment method".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

fn default_notes() -> String {
    DEFAULT_NOTES.to_string()
}

/// A patient booking as persisted under the `appointments` key.
///
/// `doctor` and `specialty` are copied from the doctor record at booking time.
/// `date` is kept as the raw string because mock data and bookings disagree on
/// format; see [`Appointment::parsed_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub doctor: String,
    pub specialty: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default = "default_notes")]
    pub notes: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub visit_type: Option<VisitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
}

impl Appointment {
    /// Returns the date when it is in booking (`yyyy-MM-dd`) format.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, BOOKING_DATE_FORMAT).ok()
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
