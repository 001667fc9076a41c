//! Rule-based placement and front-axis classification.
//!
//! After the continuous hull alignment, an object still has a quarter-turn
//! ambiguity and an unknown mounting style. This crate resolves both with a
//! fixed-order rule list over the object's cross-section profile:
//!
//! 1. [`Placement::Flat`] - long thin panels lying on their face
//! 2. [`Placement::Ground`] - free-standing objects resting on their base
//! 3. [`Placement::Wall`] - slabs mounted against a vertical side
//! 4. [`Placement::Ceiling`] - everything else (hanging fixtures)
//!
//! The first matching rule wins and also chooses the front direction,
//! expressed as the number of counter-clockwise quarter turns that bring
//! the front onto +Y.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use pose_slice::CogResult;
use pose_types::{Aabb3, Point3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod flat;
mod ground;
mod wall;

/// Everything the rules need: the cross-section profile, the bounds of the
/// hull-aligned object, and its hull-aligned vertex positions.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    /// Cross-sections and overall center of gravity in the aligned frame.
    pub cog: &'a CogResult,
    /// Axis-aligned bounds of the aligned silhouette vertices.
    pub bounds: Aabb3,
    /// Aligned vertex positions.
    pub vertices: &'a [Point3<f64>],
}

/// The Ground sub-rule that fixed the front direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroundRule {
    /// A narrow stand under a wide body pointed out the front.
    Stand,
    /// The top slice leans clearly off the footprint center.
    Top,
    /// Small object; front opposite the center-of-gravity offset.
    Small,
    /// Near-square footprint; front along the center-of-gravity offset.
    Squarish,
    /// Elongated footprint; long axis laid onto X, front snapped to +-Y.
    LongAxis,
}

/// How the object is mounted, decided by the first matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    /// Thin panel lying flat.
    Flat,
    /// Free-standing on its base, with the sub-rule that chose the front.
    Ground(GroundRule),
    /// Mounted against a vertical side.
    Wall,
    /// Hanging; the default when nothing else matches.
    Ceiling,
}

/// Placement plus the quarter-turn correction bringing the front onto +Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Classification {
    /// Mounting style.
    pub placement: Placement,
    /// Counter-clockwise quarter turns to apply after hull alignment.
    pub quarter_turns: u8,
}

/// Run the rules in order and return the first match.
///
/// Never fails: an object matching no rule is a ceiling fixture with no
/// quarter-turn correction.
#[must_use]
pub fn classify(input: &ClassifyInput) -> Classification {
    let classification = flat::rule(input)
        .or_else(|| ground::rule(input))
        .or_else(|| wall::rule(input))
        .unwrap_or(Classification {
            placement: Placement::Ceiling,
            quarter_turns: 0,
        });
    debug!(
        placement = ?classification.placement,
        quarter_turns = classification.quarter_turns,
        "classified placement"
    );
    classification
}
