//! Plugin Module
//!
//! Provides the command/lifecycle-hook architecture:
//! - Command and plugin interfaces
//! - Command registry
//! - Plugin host with lifecycle management

pub mod command;
pub mod host;
pub mod interface;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{CommandSpec, FnCommand};
pub use host::{DispatchOutcome, HostPhase, PluginHost};
pub use interface::{Command, Plugin, PluginError, PluginResult};
pub use registry::{CommandRegistry, DuplicatePolicy, RegisteredCommand};
