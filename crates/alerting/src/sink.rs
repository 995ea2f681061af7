//! Notification sinks

use std::io::Write;
use std::process::Command;

use tracing::warn;

use crate::Severity;

/// Best-effort audible notification. Implementations may block; the
/// dispatcher always calls them from a detached background task.
pub trait NotificationSink: Send + Sync + 'static {
    fn notify(&self, severity: Severity);
}

/// Plays a per-severity sound through an external player command,
/// falling back to a terminal bell when the player is unavailable.
pub struct AudioSink {
    player: String,
    danger_sound: String,
    warning_sound: String,
}

impl AudioSink {
    pub fn new(player: impl Into<String>, danger_sound: impl Into<String>, warning_sound: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            danger_sound: danger_sound.into(),
            warning_sound: warning_sound.into(),
        }
    }

    /// Platform default player and sounds.
    pub fn platform_default() -> Self {
        #[cfg(target_os = "macos")]
        {
            Self::new(
                "afplay",
                "/System/Library/Sounds/Sosumi.aiff",
                "/System/Library/Sounds/Tink.aiff",
            )
        }
        #[cfg(not(target_os = "macos"))]
        {
            Self::new(
                "paplay",
                "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
                "/usr/share/sounds/freedesktop/stereo/bell.oga",
            )
        }
    }
}

impl NotificationSink for AudioSink {
    fn notify(&self, severity: Severity) {
        let sound = match severity {
            Severity::Danger => &self.danger_sound,
            Severity::Warning => &self.warning_sound,
        };

        let played = Command::new(&self.player)
            .arg(sound)
            .status()
            .map(|s| s.success())
            .unwrap_or(false);

        if !played {
            warn!(player = %self.player, "audio playback failed, falling back to bell");
            TerminalBell.notify(severity);
        }
    }
}

/// Minimal fallback: write the ASCII bell character.
pub struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn notify(&self, _severity: Severity) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}
