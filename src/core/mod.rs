//! Core utilities and common types for pluginkit.

pub mod error;
pub mod types;

pub use error::{Error, HookKind, Result};
pub use types::*;
