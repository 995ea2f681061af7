//! Per-frame signal fusion

use object_watch::{Detection, ObjectLabel};
use serde::{Deserialize, Serialize};

/// Behavioral alert kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// A phone is visible in the cabin
    PhonePresent,
    /// Driver's eyes have been closed too long
    Drowsy,
    /// Driver's head has been off-pose too long
    Distracted,
}

/// Alert severity channels. Each channel rate-limits independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Danger,
}

impl Severity {
    pub(crate) const COUNT: usize = 2;

    pub(crate) fn index(self) -> usize {
        match self {
            Severity::Warning => 0,
            Severity::Danger => 1,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl AlertKind {
    /// Severity channel this alert fires on
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::PhonePresent | AlertKind::Drowsy => Severity::Danger,
            AlertKind::Distracted => Severity::Warning,
        }
    }

    /// On-screen banner text, for the alerts that get one
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            AlertKind::PhonePresent => Some("!!! PHONE DETECTED !!!"),
            AlertKind::Drowsy => Some("!!! WAKE UP !!!"),
            AlertKind::Distracted => None,
        }
    }
}

/// Combine the three per-frame signals into the active alert set.
///
/// Pure mapping, no side effects: phone presence from the persisted
/// detections, drowsy and distracted from the analyzer latches.
pub fn evaluate(is_drowsy: bool, is_distracted: bool, detections: &[Detection]) -> Vec<AlertKind> {
    let mut alerts = Vec::new();

    if detections.iter().any(|d| d.label == ObjectLabel::Phone) {
        alerts.push(AlertKind::PhonePresent);
    }
    if is_drowsy {
        alerts.push(AlertKind::Drowsy);
    }
    if is_distracted {
        alerts.push(AlertKind::Distracted);
    }

    alerts
}
