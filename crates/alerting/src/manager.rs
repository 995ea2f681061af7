//! Rate-limited alert dispatch

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{AlertKind, NotificationSink, Severity};

/// Alert dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Minimum wall-clock seconds between firings on one severity channel
    pub cooldown_seconds: f64,
    /// Master enable for audible notifications
    pub enable_audio: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 3.0,
            enable_audio: true,
        }
    }
}

/// Dispatches notifications with an independent cooldown per severity
/// channel. A trigger inside the cooldown window is dropped, not queued.
///
/// Owned and driven by the frame loop only; the spawned playback tasks
/// carry their own copy of the severity and never touch this state.
pub struct AlertDispatcher {
    sink: Arc<dyn NotificationSink>,
    cooldown: Duration,
    enabled: bool,
    last_fired: [Option<Instant>; Severity::COUNT],
}

impl AlertDispatcher {
    /// Create a dispatcher feeding the given sink.
    pub fn new(config: &AlertConfig, sink: Arc<dyn NotificationSink>) -> Self {
        info!(
            cooldown_s = config.cooldown_seconds,
            enabled = config.enable_audio,
            "alert dispatcher ready"
        );
        Self {
            sink,
            cooldown: Duration::from_secs_f64(config.cooldown_seconds),
            enabled: config.enable_audio,
            last_fired: [None; Severity::COUNT],
        }
    }

    /// Attempt to fire a notification for the alert's severity channel.
    ///
    /// Returns whether playback was actually dispatched. The playback task
    /// is fire-and-forget: never joined, never cancelled, unordered
    /// relative to subsequent frames.
    pub fn dispatch(&mut self, kind: AlertKind) -> bool {
        if !self.enabled {
            return false;
        }

        let severity = kind.severity();
        let channel = severity.index();
        let now = Instant::now();

        if let Some(last) = self.last_fired[channel] {
            if now.duration_since(last) <= self.cooldown {
                debug!(?kind, "alert dropped, channel in cooldown");
                return false;
            }
        }

        self.last_fired[channel] = Some(now);
        info!(?kind, severity = severity.name(), "alert fired");

        let sink = Arc::clone(&self.sink);
        tokio::task::spawn_blocking(move || sink.notify(severity));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        count: AtomicUsize,
    }

    impl CountingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                count: AtomicUsize::new(0),
            })
        }
    }

    impl NotificationSink for CountingSink {
        fn notify(&self, _severity: Severity) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn dispatcher(sink: Arc<CountingSink>) -> AlertDispatcher {
        AlertDispatcher::new(&AlertConfig::default(), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_trigger_inside_cooldown_is_dropped() {
        let sink = CountingSink::new();
        let mut dispatcher = dispatcher(Arc::clone(&sink));

        assert!(dispatcher.dispatch(AlertKind::Drowsy));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!dispatcher.dispatch(AlertKind::Drowsy));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_after_cooldown_fires_again() {
        let sink = CountingSink::new();
        let mut dispatcher = dispatcher(Arc::clone(&sink));

        assert!(dispatcher.dispatch(AlertKind::Drowsy));
        tokio::time::advance(Duration::from_secs_f64(3.5)).await;
        assert!(dispatcher.dispatch(AlertKind::Drowsy));
    }

    #[tokio::test(start_paused = true)]
    async fn test_channels_cool_down_independently() {
        let sink = CountingSink::new();
        let mut dispatcher = dispatcher(Arc::clone(&sink));

        assert!(dispatcher.dispatch(AlertKind::Drowsy));
        // Danger channel is hot, but the warning channel still fires
        assert!(dispatcher.dispatch(AlertKind::Distracted));
        // Phone shares the danger channel with drowsy
        assert!(!dispatcher.dispatch(AlertKind::PhonePresent));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_audio_never_fires() {
        let sink = CountingSink::new();
        let config = AlertConfig {
            enable_audio: false,
            ..Default::default()
        };
        let mut dispatcher =
            AlertDispatcher::new(&config, Arc::clone(&sink) as Arc<dyn NotificationSink>);

        assert!(!dispatcher.dispatch(AlertKind::Drowsy));
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(!dispatcher.dispatch(AlertKind::Drowsy));
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_reaches_sink() {
        let sink = CountingSink::new();
        let mut dispatcher = dispatcher(Arc::clone(&sink));
        dispatcher.dispatch(AlertKind::Drowsy);

        // Let the spawned blocking task run
        tokio::task::yield_now().await;
        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        while sink.count.load(Ordering::SeqCst) == 0 && std::time::Instant::now() < deadline {
            std::thread::yield_now();
        }
        assert_eq!(sink.count.load(Ordering::SeqCst), 1);
    }
}
