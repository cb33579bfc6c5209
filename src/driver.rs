//! Periodic idle driver.
//!
//! Runs a tokio task that forwards an idle event to a shared host once per
//! period until stopped. The driver never delivers the death event; the
//! owner does that after `stop`.

use crate::config::HostConfig;
use crate::core::{Error, Result};
use crate::plugin::host::PluginHost;
use crate::plugin::interface::Plugin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

/// A host shared between the driver and other callers.
pub type SharedHost<P> = Arc<Mutex<PluginHost<P>>>;

/// Wrap a host for shared use.
pub fn shared<P: Plugin>(host: PluginHost<P>) -> SharedHost<P> {
    Arc::new(Mutex::new(host))
}

/// Handle to a running idle loop.
pub struct IdleDriver {
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    handle: JoinHandle<Result<u64>>,
}

impl IdleDriver {
    /// Spawn the idle loop on the current tokio runtime.
    ///
    /// The first idle event is delivered one `period` after start. A zero
    /// period is rejected.
    pub fn start<P>(host: SharedHost<P>, period: Duration) -> Result<Self>
    where
        P: Plugin + 'static,
    {
        if period.is_zero() {
            return Err(Error::Driver("idle period must be non-zero".to_string()));
        }

        let running = Arc::new(AtomicBool::new(true));
        let shutdown = Arc::new(Notify::new());

        let handle = tokio::spawn(idle_loop(
            host,
            period,
            running.clone(),
            shutdown.clone(),
        ));

        Ok(Self {
            running,
            shutdown,
            handle,
        })
    }

    /// Spawn the idle loop with the period from `Host.idle_interval_ms`.
    pub fn from_config<P>(host: SharedHost<P>, config: &HostConfig) -> Result<Self>
    where
        P: Plugin + 'static,
    {
        Self::start(host, config.idle_interval())
    }

    /// Whether the loop is still delivering idle events.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the loop and wait for it. Returns the number of idle events
    /// delivered, or the hook error that ended the loop early.
    pub async fn stop(self) -> Result<u64> {
        self.shutdown.notify_one();
        self.handle
            .await
            .map_err(|e| Error::Driver(format!("idle task failed: {e}")))?
    }
}

/// Clears the running flag when the loop exits, including by panic.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

async fn idle_loop<P: Plugin>(
    host: SharedHost<P>,
    period: Duration,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) -> Result<u64> {
    let _running = RunningGuard(running);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval yields immediately on first tick
    ticker.tick().await;

    let mut ticks = 0u64;
    let result = loop {
        tokio::select! {
            _ = shutdown.notified() => break Ok(ticks),
            _ = ticker.tick() => {
                if let Err(e) = host.lock().await.notify_idle() {
                    error!(error = %e, ticks, "idle hook failed, stopping idle driver");
                    break Err(e);
                }
                ticks += 1;
            }
        }
    };

    debug!(ticks, "idle driver stopped");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HookKind;
    use crate::plugin::host::HostPhase;
    use crate::plugin::testing::{CallLog, RecordingPlugin};

    fn running_host(log: &CallLog) -> SharedHost<RecordingPlugin> {
        let mut host = PluginHost::new(RecordingPlugin::new(&["Save"], log));
        host.init().unwrap();
        shared(host)
    }

    #[tokio::test]
    async fn test_driver_delivers_idle_events() {
        let log = CallLog::default();
        let host = running_host(&log);

        let driver = IdleDriver::start(host.clone(), Duration::from_millis(5)).unwrap();
        assert!(driver.is_running());
        tokio::time::sleep(Duration::from_millis(60)).await;
        let ticks = driver.stop().await.unwrap();

        assert!(ticks >= 1);
        let idles = log.calls().iter().filter(|c| *c == "on_idle").count() as u64;
        assert_eq!(idles, ticks);
        assert_eq!(host.lock().await.phase(), HostPhase::Running);
    }

    #[tokio::test]
    async fn test_stop_before_first_tick() {
        let log = CallLog::default();
        let host = running_host(&log);

        let driver = IdleDriver::start(host, Duration::from_secs(60)).unwrap();
        let ticks = tokio_test::assert_ok!(driver.stop().await);

        assert_eq!(ticks, 0);
        assert_eq!(log.calls(), vec!["on_init"]);
    }

    #[tokio::test]
    async fn test_hook_failure_stops_driver() {
        let log = CallLog::default();
        let host = running_host(&log);
        host.lock().await.plugin_mut().fail_idle = true;

        let driver = IdleDriver::start(host, Duration::from_millis(5)).unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!driver.is_running());

        let err = driver.stop().await.unwrap_err();
        assert!(matches!(err, Error::Hook { hook: HookKind::Idle, .. }));
        assert_eq!(log.calls(), vec!["on_init", "on_idle"]);
    }

    #[tokio::test]
    async fn test_dispatch_while_driving() {
        let log = CallLog::default();
        let host = running_host(&log);

        let driver = IdleDriver::start(host.clone(), Duration::from_millis(5)).unwrap();
        host.lock().await.dispatch_command("Save").unwrap();
        driver.stop().await.unwrap();
        host.lock().await.notify_death().unwrap();

        let calls = log.calls();
        assert!(calls.contains(&"execute:Save".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("on_death"));
    }

    #[tokio::test]
    async fn test_zero_period_rejected() {
        let log = CallLog::default();
        let host = running_host(&log);

        let result = IdleDriver::start(host, Duration::ZERO);

        assert!(matches!(result, Err(Error::Driver(_))));
        assert_eq!(log.calls(), vec!["on_init"]);
    }

    #[tokio::test]
    async fn test_panicking_hook_clears_running() {
        let log = CallLog::default();
        let host = running_host(&log);
        host.lock().await.plugin_mut().panic_idle = true;

        let driver = IdleDriver::start(host.clone(), Duration::from_millis(5)).unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!driver.is_running());

        let err = driver.stop().await.unwrap_err();
        assert!(matches!(err, Error::Driver(_)));
        // lock is released on unwind
        assert_eq!(host.lock().await.phase(), HostPhase::Running);
    }

    #[tokio::test]
    async fn test_from_config_uses_idle_interval() {
        let log = CallLog::default();
        let host = running_host(&log);
        let config = HostConfig {
            idle_interval_ms: 5,
            ..HostConfig::default()
        };

        let driver = IdleDriver::from_config(host, &config).unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let ticks = driver.stop().await.unwrap();

        assert!(ticks >= 1);
    }

    #[tokio::test]
    async fn test_from_config_rejects_zero_interval() {
        let log = CallLog::default();
        let config = HostConfig {
            idle_interval_ms: 0,
            ..HostConfig::default()
        };

        let result = IdleDriver::from_config(running_host(&log), &config);
        assert!(matches!(result, Err(Error::Driver(_))));
    }
}
