//! Feature modules

pub mod reminders;
pub mod time_extract;
