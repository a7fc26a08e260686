//! # Reminders Feature
//!
//! Per-user reminder lifecycle: creation from free text, one concurrent
//! wait per pending reminder, cancellation by index or literal text, and
//! save/restore across restarts.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod entity;
pub mod error;
pub mod persistence;
pub mod resolver;
pub mod scheduler;
pub mod service;
pub mod splitter;
pub mod store;

pub use entity::{ReminderEntity, ReminderId};
pub use error::ReminderError;
pub use scheduler::ReminderScheduler;
pub use service::ReminderService;
pub use store::ReminderStore;
