//! # pluginkit - plugin host with named commands and lifecycle hooks
//!
//! A plugin supplies lifecycle hooks (init, idle, death) and registers named
//! commands; the host dispatches commands by name and forwards lifecycle
//! events:
//! - **plugin**: `Command` and `Plugin` traits, `CommandRegistry`, `PluginHost`
//! - **config**: INI/JSON host configuration
//! - **logging**: `tracing` subscriber setup
//! - **driver**: periodic idle events on a tokio task
//!
//! ## Quick Start
//!
//! ```rust
//! use pluginkit::plugin::{
//!     CommandRegistry, CommandSpec, FnCommand, Plugin, PluginHost, PluginResult,
//! };
//!
//! struct Editor;
//!
//! impl Plugin for Editor {
//!     fn on_init(&mut self, registry: &mut CommandRegistry) -> PluginResult<()> {
//!         let spec = CommandSpec::new("Save", "FileMenu").expect("valid spec");
//!         registry
//!             .add(FnCommand::new(spec, || Ok(())))
//!             .expect("registered");
//!         Ok(())
//!     }
//!
//!     fn on_idle(&mut self) -> PluginResult<()> {
//!         Ok(())
//!     }
//!
//!     fn on_death(&mut self) -> PluginResult<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut host = PluginHost::new(Editor);
//! host.init().unwrap();
//! host.dispatch_command("Save").unwrap();
//! host.notify_death().unwrap();
//! ```

pub mod config;
pub mod core;
pub mod driver;
pub mod logging;
pub mod plugin;

pub use config::{HostConfig, IniConfig};
pub use crate::core::error::{Error, Result};
pub use driver::{IdleDriver, SharedHost};
pub use plugin::{Command, CommandSpec, DispatchOutcome, Plugin, PluginHost};
