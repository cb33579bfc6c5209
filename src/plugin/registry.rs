//! Command registry.
//!
//! Ordered command storage with first-match lookup by name.

use crate::core::{now, Error, Result, Timestamp};
use crate::plugin::command::CommandSpec;
use crate::plugin::interface::Command;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the registry treats a second command with an existing name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append anyway; the first-registered command keeps winning dispatch
    #[default]
    Shadow,
    /// Refuse the registration
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shadow" => Ok(DuplicatePolicy::Shadow),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(Error::Config(format!("unknown duplicate policy: {other}"))),
        }
    }
}

/// Registered command entry.
pub struct RegisteredCommand {
    /// Command instance
    pub command: Box<dyn Command>,
    /// Registration time
    pub registered_at: Timestamp,
    /// Index in registration order
    pub position: usize,
}

/// Ordered command registry.
pub struct CommandRegistry {
    entries: Vec<RegisteredCommand>,
    policy: DuplicatePolicy,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Append a command.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<()> {
        let name = command.name().to_string();

        if self.contains(&name) {
            match self.policy {
                DuplicatePolicy::Reject => return Err(Error::DuplicateCommand(name)),
                DuplicatePolicy::Shadow => {
                    debug!(command = %name, "registered command is shadowed by an earlier entry");
                }
            }
        }

        let position = self.entries.len();
        self.entries.push(RegisteredCommand {
            command,
            registered_at: now(),
            position,
        });
        debug!(command = %name, position, "command registered");

        Ok(())
    }

    /// Append a concrete command without boxing at the call site.
    pub fn add<C: Command + 'static>(&mut self, command: C) -> Result<()> {
        self.register(Box::new(command))
    }

    /// First entry with the given name.
    pub fn find(&self, name: &str) -> Option<&RegisteredCommand> {
        self.entries.iter().find(|e| e.command.name() == name)
    }

    /// First entry with the given name, mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut RegisteredCommand> {
        self.entries.iter_mut().find(|e| e.command.name() == name)
    }

    /// Whether any entry has the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.entries.iter()
    }

    /// Entries in registration order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RegisteredCommand> {
        self.entries.iter_mut()
    }

    /// Specs of all entries in registration order.
    pub fn specs(&self) -> Vec<CommandSpec> {
        self.entries.iter().map(|e| e.command.spec().clone()).collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}
