//! Per-frame landmark collection

use thiserror::Error;

use crate::geometry::Point2;
use crate::indices::MESH_SIZE;

/// Landmark construction error types
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("Incomplete face mesh: got {0} points, need at least {MESH_SIZE}")]
    Incomplete(usize),
}

/// An ordered, fixed-size collection of normalized facial keypoints for one
/// detected face. Valid for a single frame; analyzers only read it.
#[derive(Debug, Clone)]
pub struct FaceLandmarks {
    points: Vec<Point2>,
}

impl FaceLandmarks {
    /// Wrap a full mesh of normalized points.
    pub fn new(points: Vec<Point2>) -> Result<Self, LandmarkError> {
        if points.len() < MESH_SIZE {
            return Err(LandmarkError::Incomplete(points.len()));
        }
        Ok(Self { points })
    }

    /// Normalized point at a fixed anatomical index.
    pub fn point(&self, idx: usize) -> Point2 {
        self.points[idx]
    }

    /// Point at a fixed anatomical index, scaled to pixel space.
    pub fn point_px(&self, idx: usize, width: u32, height: u32) -> Point2 {
        self.points[idx].to_pixels(width, height)
    }

    /// Pixel-space points for a group of indices, in the given order.
    pub fn points_px(&self, idxs: &[usize], width: u32, height: u32) -> Vec<Point2> {
        idxs.iter()
            .map(|&i| self.point_px(i, width, height))
            .collect()
    }

    /// Number of points in the mesh
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the mesh is empty (never true for a validated mesh)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
