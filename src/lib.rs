// Core layer - shared types and configuration
pub mod core;

// Features layer - all feature modules
pub mod features;

// Gateway layer - boundary to the chat service
pub mod gateway;

// Application layer - prefix command parsing and dispatch
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::reminders::{
    ReminderEntity, ReminderError, ReminderId, ReminderScheduler, ReminderService, ReminderStore,
};
pub use features::time_extract::{RelativeTimeExtractor, TimeExtractor, TimeMatch};

// Re-export gateway items
pub use gateway::{ChatGateway, GatewayError};
