//! Command identity and a closure-backed command.

use crate::core::{Error, Result};
use crate::plugin::interface::{Command, PluginResult};
use serde::{Deserialize, Serialize};

/// Command identity and menu placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name, unique within a host by convention
    pub name: String,
    /// Menu the command lives in
    pub menu_id: String,
    /// Menu item this command should follow; a hint for menu systems only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_item: Option<String>,
}

impl CommandSpec {
    /// Create a new spec. Both fields are required and must be non-blank.
    pub fn new(name: &str, menu_id: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if menu_id.trim().is_empty() {
            return Err(Error::MissingField("menu_id"));
        }
        Ok(Self {
            name: name.to_string(),
            menu_id: menu_id.to_string(),
            after_item: None,
        })
    }

    /// Set the menu item this command follows.
    pub fn with_after_item(mut self, item: &str) -> Self {
        self.after_item = Some(item.to_string());
        self
    }

    /// Parse a spec from JSON, applying the same field checks as `new`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: CommandSpec = serde_json::from_str(json)?;
        let spec = Self::new(&raw.name, &raw.menu_id)?;
        Ok(match raw.after_item {
            Some(item) => spec.with_after_item(&item),
            None => spec,
        })
    }
}

type Action = Box<dyn FnMut() -> PluginResult<()> + Send>;

/// A command whose behavior is supplied as closures.
pub struct FnCommand {
    spec: CommandSpec,
    execute: Action,
    update_menu: Action,
}

impl FnCommand {
    /// Create a command with the given execute action and a no-op menu update.
    pub fn new<F>(spec: CommandSpec, execute: F) -> Self
    where
        F: FnMut() -> PluginResult<()> + Send + 'static,
    {
        Self {
            spec,
            execute: Box::new(execute),
            update_menu: Box::new(|| Ok(())),
        }
    }

    /// Set the menu update action.
    pub fn on_update_menu<F>(mut self, update_menu: F) -> Self
    where
        F: FnMut() -> PluginResult<()> + Send + 'static,
    {
        self.update_menu = Box::new(update_menu);
        self
    }
}

impl Command for FnCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&mut self) -> PluginResult<()> {
        (self.execute)()
    }

    fn update_menu(&mut self) -> PluginResult<()> {
        (self.update_menu)()
    }
}

impl std::fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand").field("spec", &self.spec).finish()
    }
}
