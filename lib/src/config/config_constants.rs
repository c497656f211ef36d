// lib/src/config/config_constants.rs

pub const DEFAULT_DATA_DIRECTORY: &str = "./medibook_data";
pub const DEFAULT_CONFIG_FILE_NAME: &str = "medibook.yaml";
pub const ENV_PREFIX: &str = "MEDIBOOK";

/// Furthest a booking may be placed ahead of today, in days.
pub const DEFAULT_BOOKING_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_CHAT_AUTO_REPLY: &str = "Thank you for your message. The doctor will get back to you shortly.";

pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];
