//! Core types and rules for pokexp
//!
//! Level table, badge rules, award events, the per-user progress record and
//! the pure award step. Shared by the storage, service and cli crates.

mod award;
mod badge;
mod config;
pub mod constants;
mod env_config;
mod error;
mod event;
mod level;
mod progress;

pub use award::*;
pub use badge::*;
pub use config::*;
pub use constants::progress_key;
pub use env_config::*;
pub use error::*;
pub use event::*;
pub use level::*;
pub use progress::*;
