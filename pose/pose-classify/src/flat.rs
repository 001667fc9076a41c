//! Flat-panel rule.

use pose_types::{CardinalAxis, Vector2};

use crate::{Classification, ClassifyInput, Placement};

/// Minimum mean long/short extent ratio of the mid-height slices.
const MIN_EXTENT_RATIO: f64 = 2.5;
/// The short extent must stay under this for a panel lying on its face.
const MAX_SHORT_EXTENT: f64 = 0.08;
/// The long extent must reach this; tiny shards are not panels.
const MIN_LONG_EXTENT: f64 = 0.3;
/// Mid-height band considered for the extent profile.
const MID_BAND: (f64, f64) = (0.25, 0.75);
/// Vertices above this height fraction vote for the front direction.
const FRONT_BAND_START: f64 = 0.375;

/// A panel shows a consistently elongated, thin cross-section through its
/// mid height. The front is whichever side of the footprint center holds
/// the vertex mass of the upper part.
pub(crate) fn rule(input: &ClassifyInput) -> Option<Classification> {
    let z_lo = input.bounds.z_at(MID_BAND.0);
    let z_hi = input.bounds.z_at(MID_BAND.1);

    let mut long_sum = 0.0;
    let mut short_sum = 0.0;
    let mut count = 0usize;
    for slice in input.cog.occupied_slices() {
        if slice.mid_z < z_lo || slice.mid_z > z_hi {
            continue;
        }
        let e = slice.bounds.extents();
        long_sum += e.x.max(e.y);
        short_sum += e.x.min(e.y);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let inv = 1.0 / count as f64;
    let long = long_sum * inv;
    let short = short_sum * inv;
    if short <= 0.0
        || long / short <= MIN_EXTENT_RATIO
        || short >= MAX_SHORT_EXTENT
        || long <= MIN_LONG_EXTENT
    {
        return None;
    }

    Some(Classification {
        placement: Placement::Flat,
        quarter_turns: front_axis(input).quarter_turns_to_pos_y(),
    })
}

fn front_axis(input: &ClassifyInput) -> CardinalAxis {
    let z_start = input.bounds.z_at(FRONT_BAND_START);
    let center = input.bounds.footprint().center();

    let mut offset = Vector2::zeros();
    let mut count = 0usize;
    for v in input.vertices {
        if v.z < z_start {
            continue;
        }
        offset += Vector2::new(v.x - center.x, v.y - center.y);
        count += 1;
    }
    if count > 0 {
        #[allow(clippy::cast_precision_loss)]
        {
            offset /= count as f64;
        }
    }
    CardinalAxis::most_similar(offset, None)
}
