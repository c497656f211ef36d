// lib/src/booking/validation.rs

use chrono::{Datelike, NaiveDate, Weekday};
use models::errors::{ValidationError, ValidationResult};
use models::medical::BOOKING_DATE_FORMAT;

/// Parses a date typed into the booking form (`yyyy-MM-dd`).
pub fn parse_booking_date(raw: &str) -> ValidationResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("date".to_string()));
    }
    NaiveDate::parse_from_str(trimmed, BOOKING_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat(trimmed.to_string()))
}

/// Checks that `date` is a weekday between `today` and `today + window_days`, inclusive.
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate, window_days: i64) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::DateInPast(date));
    }
    if (date - today).num_days() > window_days {
        return Err(ValidationError::DateBeyondWindow { date, max_days: window_days });
    }
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Err(ValidationError::WeekendDate(date));
    }
    Ok(())
}

pub fn validate_time_slot(time: &str, offered: &[String]) -> ValidationResult<()> {
    let trimmed = time.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("time".to_string()));
    }
    if offered.iter().any(|slot| slot == trimmed) {
        Ok(())
    } else {
        Err(ValidationError::TimeSlotUnavailable(trimmed.to_string()))
    }
}
