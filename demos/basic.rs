//! Minimal host walkthrough: init, dispatch, menu refresh, idle, shutdown.
//!
//! Run with `cargo run --example basic`.

use pluginkit::config::HostConfig;
use pluginkit::driver::{self, IdleDriver};
use pluginkit::logging::init_tracing;
use pluginkit::plugin::{
    Command, CommandRegistry, CommandSpec, Plugin, PluginError, PluginHost, PluginResult,
};
use std::time::Duration;
use tracing::info;

struct GreetCommand {
    spec: CommandSpec,
}

impl Command for GreetCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&mut self) -> PluginResult<()> {
        info!(command = self.name(), "executing");
        Ok(())
    }

    fn update_menu(&mut self) -> PluginResult<()> {
        info!(command = self.name(), menu = %self.spec.menu_id, "updating menu");
        Ok(())
    }
}

struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn on_init(&mut self, registry: &mut CommandRegistry) -> PluginResult<()> {
        info!("initializing demo plugin");
        let spec = CommandSpec::new("Greet", "ToolsMenu")
            .map_err(|e| PluginError::fatal(&e.to_string()))?;
        registry
            .add(GreetCommand { spec })
            .map_err(|e| PluginError::fatal(&e.to_string()))
    }

    fn on_idle(&mut self) -> PluginResult<()> {
        info!("plugin is idle");
        Ok(())
    }

    fn on_death(&mut self) -> PluginResult<()> {
        info!("plugin is shutting down");
        Ok(())
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[tokio::main]
async fn main() -> pluginkit::Result<()> {
    let config = HostConfig {
        idle_interval_ms: 200,
        ..HostConfig::default()
    };
    init_tracing(&config.logging)?;

    let mut host = PluginHost::with_config(DemoPlugin, config);
    host.init()?;
    host.dispatch_command("Greet")?;
    host.dispatch_command("Missing")?;
    host.refresh_menus()?;

    let idle_config = host.config().clone();
    let host = driver::shared(host);
    let idle = IdleDriver::from_config(host.clone(), &idle_config)?;
    tokio::time::sleep(Duration::from_millis(650)).await;
    let ticks = idle.stop().await?;
    info!(ticks, "idle driver finished");

    let mut host = host.lock().await;
    host.notify_death()
}
