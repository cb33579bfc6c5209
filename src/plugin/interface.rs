//! Plugin interface definition.
//!
//! Defines the traits commands and plugins must implement.

use crate::plugin::command::CommandSpec;
use crate::plugin::registry::CommandRegistry;

/// Result type for plugin-supplied operations.
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Error returned by command actions and lifecycle hooks.
#[derive(Clone, Debug)]
pub struct PluginError {
    /// Error message
    pub message: String,
    /// Is recoverable
    pub recoverable: bool,
}

impl PluginError {
    /// Create a new error.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            recoverable: true,
        }
    }

    /// Create a fatal error.
    pub fn fatal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            recoverable: false,
        }
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PluginError: {}", self.message)
    }
}

impl std::error::Error for PluginError {}

/// A named unit of behavior with a menu-refresh action.
pub trait Command: Send {
    /// Identity and menu placement of this command.
    fn spec(&self) -> &CommandSpec;

    /// Perform the command's action.
    fn execute(&mut self) -> PluginResult<()>;

    /// Refresh the command's menu presentation.
    fn update_menu(&mut self) -> PluginResult<()>;

    /// Command name, used for dispatch.
    fn name(&self) -> &str {
        &self.spec().name
    }
}

/// Lifecycle hooks a concrete plugin supplies to its host.
pub trait Plugin: Send {
    /// Populate the command registry. Called once by `PluginHost::init`.
    fn on_init(&mut self, registry: &mut CommandRegistry) -> PluginResult<()>;

    /// Called periodically by whatever drives the host.
    fn on_idle(&mut self) -> PluginResult<()>;

    /// Called once at shutdown.
    fn on_death(&mut self) -> PluginResult<()>;

    /// Name used in log fields.
    fn name(&self) -> &str {
        "plugin"
    }
}
