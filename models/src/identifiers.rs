// models/src/identifiers.rs

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Identifier of a stored appointment.
///
/// Ids are plain integers drawn at random when an appointment is booked, so
/// uniqueness is checked by the store on append rather than guaranteed here.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AppointmentId(pub u64);

impl AppointmentId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl From<u64> for AppointmentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentId;
    use core::str::FromStr;

    #[test]
    fn should_parse_id_from_str() {
        let id = AppointmentId::from_str(" 42 ");
        assert_eq!(id.unwrap(), AppointmentId(42));
    }

    #[test]
    fn should_not_parse_negative_id() {
        assert!(AppointmentId::from_str("-1").is_err());
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let json = serde_json::to_string(&AppointmentId(7)).unwrap();
        assert_eq!(json, "7");
    }
}
