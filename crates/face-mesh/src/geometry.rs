//! 2D geometry primitives shared by the analyzers

use serde::{Deserialize, Serialize};

/// A 2D point, either normalized ([0, 1]) or in pixel space depending on
/// where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Scale a normalized point into pixel coordinates
    pub fn to_pixels(&self, width: u32, height: u32) -> Point2 {
        Point2 {
            x: self.x * width as f32,
            y: self.y * height as f32,
        }
    }
}

/// Ratio of two distances, with a zero denominator yielding 0.0 rather
/// than infinity. Degenerate geometry reads as "no opening".
pub fn safe_ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_safe_ratio_zero_denominator() {
        assert_eq!(safe_ratio(1.0, 0.0), 0.0);
        assert_eq!(safe_ratio(6.0, 2.0), 3.0);
    }

    #[test]
    fn test_to_pixels() {
        let p = Point2::new(0.5, 0.25).to_pixels(640, 480);
        assert_eq!(p.x, 320.0);
        assert_eq!(p.y, 120.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in -1e3f32..1e3, ay in -1e3f32..1e3,
                                 bx in -1e3f32..1e3, by in -1e3f32..1e3) {
            let a = Point2::new(ax, ay);
            let b = Point2::new(bx, by);
            prop_assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-3);
        }

        #[test]
        fn distance_is_nonnegative(ax in -1e3f32..1e3, ay in -1e3f32..1e3,
                                   bx in -1e3f32..1e3, by in -1e3f32..1e3) {
            prop_assert!(Point2::new(ax, ay).distance(&Point2::new(bx, by)) >= 0.0);
        }
    }
}
