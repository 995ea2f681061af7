//! Monitor configuration
//!
//! All settings are read once at startup and passed by reference into the
//! analyzer constructors. Nothing here is global or hot-reloaded.

use std::collections::HashMap;

use alerting::AlertConfig;
use drowsiness::DrowsinessConfig;
use head_pose::DistractionConfig;
use object_watch::ClassMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Camera capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Capture device index
    pub index: u32,
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Target frame rate
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 1280,
            height: 720,
            fps: 30,
        }
    }
}

/// Object detection settings.
///
/// `confidence_threshold` and `classes` are applied by the pipeline to
/// every raw batch the detector returns. `colors` is boundary data for
/// renderer backends; nothing in the core reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Raw detections below this confidence are discarded
    pub confidence_threshold: f32,
    /// Run inference only every this many frames; 0 is clamped to 1
    pub interval_frames: u32,
    /// Numeric class id to label table
    pub classes: ClassMap,
    /// Display color per class label name (RGB)
    pub colors: HashMap<String, [u8; 3]>,
}

impl DetectionConfig {
    /// Display color for a label name, or white for unknown classes.
    pub fn class_color(&self, label: &str) -> [u8; 3] {
        self.colors.get(label).copied().unwrap_or([255, 255, 255])
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        let mut colors = HashMap::new();
        colors.insert("phone".to_string(), [255, 0, 0]);
        colors.insert("food".to_string(), [0, 255, 0]);
        colors.insert("drink".to_string(), [0, 0, 255]);
        Self {
            confidence_threshold: 0.30,
            interval_frames: 10,
            classes: ClassMap::default(),
            colors,
        }
    }
}

/// Top-level monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub camera: CameraConfig,
    pub detection: DetectionConfig,
    pub drowsiness: DrowsinessConfig,
    pub distraction: DistractionConfig,
    pub alerts: AlertConfig,
}

impl MonitorConfig {
    /// Load configuration from `monitor.toml` (optional) layered with
    /// `MONITOR__*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("monitor").required(false))
            .add_source(config::Environment::with_prefix("MONITOR").separator("__"))
            .build()?;

        let mut cfg: MonitorConfig = settings.try_deserialize()?;
        if cfg.detection.interval_frames == 0 {
            warn!("detection.interval_frames of 0 clamped to 1");
            cfg.detection.interval_frames = 1;
        }
        info!(
            interval = cfg.detection.interval_frames,
            ear_threshold = f64::from(cfg.drowsiness.ear_threshold),
            "configuration loaded"
        );
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_calibration() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.detection.interval_frames, 10);
        assert_eq!(cfg.detection.confidence_threshold, 0.30);
        assert_eq!(cfg.drowsiness.ear_threshold, 0.25);
        assert_eq!(cfg.drowsiness.consec_frames, 15);
        assert_eq!(cfg.distraction.consec_frames, 10);
        assert_eq!(cfg.alerts.cooldown_seconds, 3.0);
    }

    #[test]
    fn test_class_colors() {
        let cfg = DetectionConfig::default();
        assert_eq!(cfg.class_color("phone"), [255, 0, 0]);
        assert_eq!(cfg.class_color("laptop"), [255, 255, 255]);
    }

    #[test]
    fn test_default_class_table_matches_training_order() {
        use object_watch::ObjectLabel;
        let cfg = DetectionConfig::default();
        assert_eq!(cfg.classes.label(0), Some(ObjectLabel::Phone));
        assert_eq!(cfg.classes.label(1), Some(ObjectLabel::Food));
        assert_eq!(cfg.classes.label(2), Some(ObjectLabel::Drink));
        assert_eq!(cfg.classes.label(9), None);
    }
}
