//! Axis-aligned bounding boxes in two and three dimensions.

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// 2D axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use pose_types::{Aabb2, Point2};
///
/// let aabb = Aabb2::from_points([
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 2.0),
/// ].iter().copied());
/// assert!((aabb.area() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2<f64>,
    /// Maximum corner.
    pub max: Point2<f64>,
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self {
            min: Point2::origin(),
            max: Point2::origin(),
        }
    }
}

impl Aabb2 {
    /// Build the bounding box of a point set.
    ///
    /// Returns the default (degenerate, zero-area) box for an empty input.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point2<f64>>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Extents along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector2<f64> {
        self.max - self.min
    }

    /// Enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let e = self.extents();
        e.x * e.y
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        Point2::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Check whether a point lies inside the box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// 3D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }
}

impl Aabb3 {
    /// Build the bounding box of a point set.
    ///
    /// Returns the default (degenerate, zero-volume) box for an empty input.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };
        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Self { min, max }
    }

    /// Extents along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Z extent of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// The XY footprint of the box.
    #[must_use]
    pub fn footprint(&self) -> Aabb2 {
        Aabb2 {
            min: Point2::new(self.min.x, self.min.y),
            max: Point2::new(self.max.x, self.max.y),
        }
    }

    /// Z coordinate at a normalized height factor (0.0 = bottom, 1.0 = top).
    #[must_use]
    pub fn z_at(&self, factor: f64) -> f64 {
        self.min.z + (self.max.z - self.min.z) * factor
    }

    /// X coordinate at a normalized width factor.
    #[must_use]
    pub fn x_at(&self, factor: f64) -> f64 {
        self.min.x + (self.max.x - self.min.x) * factor
    }

    /// Y coordinate at a normalized depth factor.
    #[must_use]
    pub fn y_at(&self, factor: f64) -> f64 {
        self.min.y + (self.max.y - self.min.y) * factor
    }
}
