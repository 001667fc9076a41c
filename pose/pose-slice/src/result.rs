//! Slice and center-of-gravity result types.

use pose_types::{Aabb2, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate cross-section of one Z band.
///
/// A band that caught no geometry still occupies its index slot with zero
/// area and centroid, so slice indices stay proportional to height for
/// the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slice {
    /// Sum of the unsigned component polygon areas in this band.
    pub area: f64,
    /// Area-weighted 2D centroid of the component polygons.
    pub centroid: Vector2<f64>,
    /// XY bounds of the component hull points.
    pub bounds: Aabb2,
    /// Z midpoint of the band.
    pub mid_z: f64,
}

impl Slice {
    pub(crate) fn empty(mid_z: f64) -> Self {
        Self {
            area: 0.0,
            centroid: Vector2::zeros(),
            bounds: Aabb2::default(),
            mid_z,
        }
    }

    /// Whether this band caught any measurable cross-section.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.area > 0.0
    }
}

/// Center of gravity plus the per-band cross-sections it was derived from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CogResult {
    /// Area-weighted center of gravity.
    pub overall: Vector3<f64>,
    /// Cross-sections, ordered bottom to top.
    pub slices: Vec<Slice>,
    /// Sum of all slice areas; the integration weight.
    pub total_area: f64,
}

impl CogResult {
    /// Slices with a non-zero cross-section.
    pub fn occupied_slices(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(|s| s.is_occupied())
    }
}
