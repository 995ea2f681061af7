//! Detection types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Object class the detector is trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectLabel {
    Phone,
    Food,
    Drink,
}

impl ObjectLabel {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ObjectLabel::Phone => "phone",
            ObjectLabel::Food => "food",
            ObjectLabel::Drink => "drink",
        }
    }
}

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One raw model output before the pipeline's confidence filter and class
/// mapping are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Numeric class id in the model's training order
    pub class_id: u32,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Bounding box
    pub bbox: BoundingBox,
}

/// One labeled object detection, immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detected class
    pub label: ObjectLabel,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Bounding box
    pub bbox: BoundingBox,
    /// Raw numeric class id from the model
    pub class_id: u32,
}

/// Startup-configured table mapping numeric class ids to labels.
///
/// Keys are the decimal class ids as strings so the table can be overridden
/// from config files and environment variables. The default mirrors the
/// training order of the bundled model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassMap {
    classes: HashMap<String, ObjectLabel>,
}

impl Default for ClassMap {
    fn default() -> Self {
        let mut classes = HashMap::new();
        classes.insert("0".to_string(), ObjectLabel::Phone);
        classes.insert("1".to_string(), ObjectLabel::Food);
        classes.insert("2".to_string(), ObjectLabel::Drink);
        Self { classes }
    }
}

impl ClassMap {
    /// Label for a numeric class id, `None` for ids outside the table.
    pub fn label(&self, class_id: u32) -> Option<ObjectLabel> {
        self.classes.get(&class_id.to_string()).copied()
    }

    /// Promote a raw model output to a labeled detection. Ids outside the
    /// table produce `None` and the detection is dropped.
    pub fn resolve(&self, raw: &RawDetection) -> Option<Detection> {
        Some(Detection {
            label: self.label(raw.class_id)?,
            confidence: raw.confidence,
            bbox: raw.bbox,
            class_id: raw.class_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(class_id: u32, confidence: f32) -> RawDetection {
        RawDetection {
            class_id,
            confidence,
            bbox: BoundingBox {
                x1: 10.0,
                y1: 20.0,
                x2: 110.0,
                y2: 220.0,
            },
        }
    }

    #[test]
    fn test_default_class_table() {
        let map = ClassMap::default();
        assert_eq!(map.label(0), Some(ObjectLabel::Phone));
        assert_eq!(map.label(1), Some(ObjectLabel::Food));
        assert_eq!(map.label(2), Some(ObjectLabel::Drink));
        assert_eq!(map.label(7), None);
    }

    #[test]
    fn test_resolve_keeps_raw_fields() {
        let map = ClassMap::default();
        let detection = map.resolve(&raw(2, 0.8)).unwrap();
        assert_eq!(detection.label, ObjectLabel::Drink);
        assert_eq!(detection.class_id, 2);
        assert_eq!(detection.confidence, 0.8);
        assert_eq!(detection.bbox.x2, 110.0);
    }

    #[test]
    fn test_resolve_drops_unknown_ids() {
        let map = ClassMap::default();
        assert!(map.resolve(&raw(99, 0.9)).is_none());
    }

    #[test]
    fn test_label_names() {
        assert_eq!(ObjectLabel::Phone.name(), "phone");
        assert_eq!(ObjectLabel::Drink.name(), "drink");
    }
}
