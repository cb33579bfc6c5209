//! Plugin host.
//!
//! Owns one plugin and its command registry, dispatches commands by name,
//! and forwards lifecycle events to the plugin's hooks. The host follows a
//! fixed call sequence:
//!
//! ```text
//! new -> init -> { dispatch_command | refresh_menus | notify_idle }* -> notify_death
//! ```
//!
//! There is no global instance; whoever drives the host owns it and passes it
//! to every call site.

use crate::config::HostConfig;
use crate::core::{Error, HookKind, HostId, Result};
use crate::plugin::command::CommandSpec;
use crate::plugin::interface::{Command, Plugin};
use crate::plugin::registry::CommandRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Lifecycle phase of a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostPhase {
    /// Constructed, `init` not yet called
    Created,
    /// Initialized and accepting events
    Running,
    /// `notify_death` has been delivered; terminal
    Dead,
}

/// Result of dispatching a command by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A command matched and its `execute` ran
    Executed,
    /// No command has that name; nothing was invoked
    Unmatched,
}

/// Host for a single plugin and its commands.
pub struct PluginHost<P: Plugin> {
    id: HostId,
    plugin: P,
    registry: CommandRegistry,
    phase: HostPhase,
    config: HostConfig,
}

impl<P: Plugin> PluginHost<P> {
    /// Create a host with default configuration.
    pub fn new(plugin: P) -> Self {
        Self::with_config(plugin, HostConfig::default())
    }

    /// Create a host with the given configuration.
    pub fn with_config(plugin: P, config: HostConfig) -> Self {
        let id = HostId::new();
        debug!(host = %id, plugin = plugin.name(), "plugin host created");
        Self {
            id,
            registry: CommandRegistry::new(config.duplicate_policy),
            plugin,
            phase: HostPhase::Created,
            config,
        }
    }

    /// Run the plugin's `on_init` hook. Allowed once.
    ///
    /// The host counts as initialized even when the hook fails, so a failed
    /// init cannot be retried on the same host.
    pub fn init(&mut self) -> Result<()> {
        match self.phase {
            HostPhase::Created => {}
            HostPhase::Running => return Err(Error::AlreadyInitialized),
            HostPhase::Dead => return Err(Error::HostTerminated),
        }
        self.phase = HostPhase::Running;

        self.plugin
            .on_init(&mut self.registry)
            .map_err(|source| Error::Hook {
                hook: HookKind::Init,
                source,
            })?;

        info!(
            host = %self.id,
            plugin = self.plugin.name(),
            commands = self.registry.len(),
            "plugin initialized"
        );
        Ok(())
    }

    /// Append a command to the registry.
    pub fn register(&mut self, command: Box<dyn Command>) -> Result<()> {
        self.ensure_alive()?;
        self.registry.register(command)
    }

    /// Execute the first command named `name`.
    ///
    /// An unknown name is not an error: nothing runs and `Unmatched` is returned.
    pub fn dispatch_command(&mut self, name: &str) -> Result<DispatchOutcome> {
        self.ensure_alive()?;

        let Some(entry) = self.registry.find_mut(name) else {
            debug!(host = %self.id, command = name, "no command matched dispatch");
            return Ok(DispatchOutcome::Unmatched);
        };

        entry.command.execute().map_err(|source| Error::Command {
            name: name.to_string(),
            source,
        })?;
        debug!(host = %self.id, command = name, "command executed");

        Ok(DispatchOutcome::Executed)
    }

    /// Call `update_menu` on every command in registration order.
    ///
    /// Stops at the first failure; later commands are not refreshed.
    pub fn refresh_menus(&mut self) -> Result<()> {
        self.ensure_alive()?;

        for entry in self.registry.iter_mut() {
            entry.command.update_menu().map_err(|source| {
                warn!(command = entry.command.name(), error = %source, "menu refresh aborted");
                Error::Command {
                    name: entry.command.name().to_string(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Forward an idle event to the plugin.
    pub fn notify_idle(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.plugin.on_idle().map_err(|source| Error::Hook {
            hook: HookKind::Idle,
            source,
        })
    }

    /// Forward the death event to the plugin. The host is dead afterwards,
    /// whether or not the hook succeeded.
    pub fn notify_death(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.phase = HostPhase::Dead;

        let result = self.plugin.on_death().map_err(|source| Error::Hook {
            hook: HookKind::Death,
            source,
        });
        info!(host = %self.id, plugin = self.plugin.name(), "plugin shut down");
        result
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.phase == HostPhase::Dead {
            return Err(Error::HostTerminated);
        }
        Ok(())
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Number of registered commands.
    pub fn command_count(&self) -> usize {
        self.registry.len()
    }

    /// Specs of all registered commands in registration order.
    pub fn command_specs(&self) -> Vec<CommandSpec> {
        self.registry.specs()
    }

    /// Whether a command with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut P {
        &mut self.plugin
    }
}
