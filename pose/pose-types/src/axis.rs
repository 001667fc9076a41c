//! Cardinal front-axis directions in the ground plane.

use nalgebra::Vector2;

/// One of the four cardinal directions in the XY plane.
///
/// After the continuous hull alignment, the remaining orientation freedom is
/// a quarter-turn choice; this type names the direction chosen as "front"
/// and knows how many quarter turns bring it onto the canonical +Y axis.
///
/// # Example
///
/// ```
/// use pose_types::{CardinalAxis, Vector2};
///
/// let axis = CardinalAxis::most_similar(Vector2::new(0.1, -3.0), None);
/// assert_eq!(axis, CardinalAxis::NegY);
/// assert_eq!(axis.quarter_turns_to_pos_y(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalAxis {
    /// +X direction.
    PosX,
    /// -X direction.
    NegX,
    /// +Y direction.
    PosY,
    /// -Y direction.
    NegY,
}

impl CardinalAxis {
    /// All axes in tie-break priority order.
    pub const ALL: [Self; 4] = [Self::PosX, Self::NegX, Self::PosY, Self::NegY];

    /// Signed component of `v` along this axis.
    #[must_use]
    pub fn signed_component(self, v: Vector2<f64>) -> f64 {
        match self {
            Self::PosX => v.x,
            Self::NegX => -v.x,
            Self::PosY => v.y,
            Self::NegY => -v.y,
        }
    }

    /// Unit vector for this direction.
    #[must_use]
    pub fn unit(self) -> Vector2<f64> {
        match self {
            Self::PosX => Vector2::new(1.0, 0.0),
            Self::NegX => Vector2::new(-1.0, 0.0),
            Self::PosY => Vector2::new(0.0, 1.0),
            Self::NegY => Vector2::new(0.0, -1.0),
        }
    }

    /// The cardinal direction most similar to an offset vector.
    ///
    /// Picks the axis with the largest signed component; ties resolve in the
    /// fixed priority +X, -X, +Y, -Y. When `restrict` is given, only those
    /// axes are considered (`None` means all four). An empty restriction
    /// falls back to the full set.
    #[must_use]
    pub fn most_similar(offset: Vector2<f64>, restrict: Option<&[Self]>) -> Self {
        let candidates: &[Self] = match restrict {
            Some(r) if !r.is_empty() => r,
            _ => &Self::ALL,
        };
        let mut best = candidates[0];
        let mut best_score = best.signed_component(offset);
        for &axis in &candidates[1..] {
            let score = axis.signed_component(offset);
            if score > best_score {
                best = axis;
                best_score = score;
            }
        }
        best
    }

    /// Number of counter-clockwise quarter turns that rotate this direction
    /// onto +Y.
    #[must_use]
    pub const fn quarter_turns_to_pos_y(self) -> u8 {
        match self {
            Self::PosY => 0,
            Self::PosX => 1,
            Self::NegY => 2,
            Self::NegX => 3,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
        }
    }
}
