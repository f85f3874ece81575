//! Service layer for pokexp
//!
//! Connects award triggers to the pure progression rules, the key-value store
//! and the notification sink.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod notifier;
mod progress_service;

pub use error::ServiceError;
pub use notifier::{BroadcastNotifier, Notifier, TracingNotifier, UserNotification};
pub use progress_service::ProgressService;
