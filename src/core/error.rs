//! Error types for pluginkit.

use crate::plugin::interface::PluginError;
use thiserror::Error;

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Lifecycle hook identifiers, used to tag hook failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// `on_init`
    Init,
    /// `on_idle`
    Idle,
    /// `on_death`
    Death,
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookKind::Init => write!(f, "on_init"),
            HookKind::Idle => write!(f, "on_idle"),
            HookKind::Death => write!(f, "on_death"),
        }
    }
}

/// Errors that can occur in host operations.
#[derive(Error, Debug)]
pub enum Error {
    // Construction errors
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    // Registry errors
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),

    // Propagated plugin failures
    #[error("Command {name} failed: {source}")]
    Command {
        name: String,
        #[source]
        source: PluginError,
    },

    #[error("Hook {hook} failed: {source}")]
    Hook {
        hook: HookKind,
        #[source]
        source: PluginError,
    },

    // Lifecycle errors
    #[error("Host already initialized")]
    AlreadyInitialized,

    #[error("Host has been shut down")]
    HostTerminated,

    // Ambient errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Idle driver error: {0}")]
    Driver(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
