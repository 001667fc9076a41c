//! Reusable per-slice grouping buffers.

use pose_types::Point2;

/// Scratch buffers for grouping slice points by component.
///
/// Cross-section extraction visits every band of every object with the
/// same access pattern: scatter points into per-component buckets, measure
/// each bucket, move on. Rather than rebuilding a map per band, this
/// context keeps a per-component generation stamp; a stale stamp means
/// the component has not been seen in the current band and its bucket slot
/// is re-assigned lazily. Nothing is re-zeroed between bands.
///
/// The context is object-local. It holds no results, only capacity, so
/// reusing one instance across many objects is safe and is the intended
/// pattern for batch callers.
#[derive(Debug, Default)]
pub struct SliceScratch {
    generation: u32,
    stamp: Vec<u32>,
    slot: Vec<u32>,
    buckets: Vec<Vec<Point2<f64>>>,
    active: usize,
}

impl SliceScratch {
    /// Create an empty scratch context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare for an object with `component_count` components.
    ///
    /// Existing capacity is kept; stamps are only reset when the
    /// generation counter wraps.
    pub(crate) fn ensure_components(&mut self, component_count: usize) {
        if self.stamp.len() < component_count {
            self.stamp.resize(component_count, 0);
            self.slot.resize(component_count, 0);
        }
        if self.generation == u32::MAX {
            self.stamp.fill(0);
            self.generation = 0;
        }
    }

    /// Start a new band; previously pushed points become invisible.
    pub(crate) fn begin_slice(&mut self) {
        self.generation += 1;
        self.active = 0;
    }

    /// Add a point to the bucket of `component`.
    pub(crate) fn push(&mut self, component: u32, point: Point2<f64>) {
        let c = component as usize;
        if self.stamp[c] != self.generation {
            self.stamp[c] = self.generation;
            #[allow(clippy::cast_possible_truncation)]
            {
                self.slot[c] = self.active as u32;
            }
            if self.buckets.len() <= self.active {
                self.buckets.push(Vec::new());
            } else {
                self.buckets[self.active].clear();
            }
            self.active += 1;
        }
        self.buckets[self.slot[c] as usize].push(point);
    }

    /// Buckets of the current band, one per component seen.
    pub(crate) fn groups_mut(&mut self) -> &mut [Vec<Point2<f64>>] {
        &mut self.buckets[..self.active]
    }
}
