//! Recording commands and plugins shared by the unit tests.

use crate::plugin::command::CommandSpec;
use crate::plugin::interface::{Command, Plugin, PluginError, PluginResult};
use crate::plugin::registry::CommandRegistry;
use std::sync::{Arc, Mutex};

/// Shared, ordered record of calls.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Command that records `execute:<tag>` and `update_menu:<tag>` calls.
pub struct RecordingCommand {
    spec: CommandSpec,
    tag: String,
    log: CallLog,
    fail_execute: bool,
    fail_update: bool,
}

impl RecordingCommand {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self::tagged(name, name, log)
    }

    pub fn tagged(name: &str, tag: &str, log: &CallLog) -> Self {
        Self {
            spec: CommandSpec::new(name, "TestMenu").unwrap(),
            tag: tag.to_string(),
            log: log.clone(),
            fail_execute: false,
            fail_update: false,
        }
    }

    pub fn failing_execute(mut self) -> Self {
        self.fail_execute = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }
}

impl Command for RecordingCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&mut self) -> PluginResult<()> {
        self.log.push(format!("execute:{}", self.tag));
        if self.fail_execute {
            return Err(PluginError::new("execute failed"));
        }
        Ok(())
    }

    fn update_menu(&mut self) -> PluginResult<()> {
        self.log.push(format!("update_menu:{}", self.tag));
        if self.fail_update {
            return Err(PluginError::new("update failed"));
        }
        Ok(())
    }
}

/// Plugin that registers the given command names on init and records hooks.
pub struct RecordingPlugin {
    names: Vec<String>,
    log: CallLog,
    pub fail_init: bool,
    pub fail_idle: bool,
    pub panic_idle: bool,
    pub fail_death: bool,
}

impl RecordingPlugin {
    pub fn new(names: &[&str], log: &CallLog) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            log: log.clone(),
            fail_init: false,
            fail_idle: false,
            panic_idle: false,
            fail_death: false,
        }
    }
}

impl Plugin for RecordingPlugin {
    fn on_init(&mut self, registry: &mut CommandRegistry) -> PluginResult<()> {
        self.log.push("on_init".to_string());
        if self.fail_init {
            return Err(PluginError::fatal("init failed"));
        }
        for name in &self.names {
            registry
                .add(RecordingCommand::new(name, &self.log))
                .map_err(|e| PluginError::fatal(&e.to_string()))?;
        }
        Ok(())
    }

    fn on_idle(&mut self) -> PluginResult<()> {
        self.log.push("on_idle".to_string());
        if self.panic_idle {
            panic!("idle hook panicked");
        }
        if self.fail_idle {
            return Err(PluginError::new("idle failed"));
        }
        Ok(())
    }

    fn on_death(&mut self) -> PluginResult<()> {
        self.log.push("on_death".to_string());
        if self.fail_death {
            return Err(PluginError::fatal("death failed"));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
