//! Shared foundation for the QuickCart assistant: configuration,
//! the top-level error type, and record types exchanged between crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::QuickCartConfig;
pub use error::{QuickCartError, Result};
pub use types::*;
