use alloc::vec::Vec;

use crate::host::ElementHost;
use crate::types::finite_or_zero;
use crate::Axis;

/// Marker for a slot whose size has not been measured.
pub(crate) const UNMEASURED: f32 = -1.0;

/// How a slot takes part in the running position sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SlotSize {
    /// Occupies `size` and is followed by spacing.
    Sized(f32),
    /// Inactive element: no size, no spacing.
    Collapsed,
}

/// Per-index size and position caches.
///
/// `sizes` holds what was measured (or [`UNMEASURED`]); `resolved` holds the size each slot used
/// in the last position pass. All three vectors always have the same length.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutCache {
    sizes: Vec<f32>,
    resolved: Vec<f32>,
    positions: Vec<f32>,
    raw_extent: f32,
    extent: f32,
}

impl LayoutCache {
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn is_consistent(&self, len: usize) -> bool {
        self.sizes.len() == len && self.resolved.len() == len && self.positions.len() == len
    }

    /// Pads or truncates every cache to `len`. Returns whether anything was out of shape.
    pub(crate) fn fit(&mut self, len: usize) -> bool {
        if self.is_consistent(len) {
            return false;
        }
        let tail = self.positions.last().copied().unwrap_or(0.0);
        self.sizes.resize(len, UNMEASURED);
        self.resolved.resize(len, 0.0);
        self.positions.resize(len, tail);
        true
    }

    pub(crate) fn reset(&mut self, len: usize) {
        self.sizes.clear();
        self.resolved.clear();
        self.positions.clear();
        self.fit(len);
    }

    pub(crate) fn invalidate_sizes(&mut self) {
        self.sizes.fill(UNMEASURED);
    }

    /// Opens `count` unmeasured slots at `at`. New positions repeat the position at `at` until
    /// the next layout pass.
    pub(crate) fn insert_unmeasured(&mut self, at: usize, count: usize) {
        let at = at.min(self.len());
        let position = self
            .positions
            .get(at)
            .or(self.positions.last())
            .copied()
            .unwrap_or(0.0);
        self.sizes
            .splice(at..at, core::iter::repeat_n(UNMEASURED, count));
        self.resolved.splice(at..at, core::iter::repeat_n(0.0, count));
        self.positions
            .splice(at..at, core::iter::repeat_n(position, count));
    }

    pub(crate) fn remove(&mut self, at: usize) {
        if at < self.len() {
            self.sizes.remove(at);
            self.resolved.remove(at);
            self.positions.remove(at);
        }
    }

    /// Measured size at `index`, if any.
    pub(crate) fn size(&self, index: usize) -> Option<f32> {
        self.sizes.get(index).copied().filter(|s| *s >= 0.0)
    }

    /// Stores a measured size; negative or NaN values mark the slot unmeasured. Returns whether the
    /// stored value changed.
    pub(crate) fn set_size(&mut self, index: usize, size: f32) -> bool {
        let Some(slot) = self.sizes.get_mut(index) else {
            return false;
        };
        // NaN and negative sizes both mean unmeasured.
        let size = if size >= 0.0 { size } else { UNMEASURED };
        if *slot == size {
            return false;
        }
        *slot = size;
        true
    }

    pub(crate) fn resolved_size(&self, index: usize) -> Option<f32> {
        self.resolved.get(index).copied()
    }

    pub(crate) fn position(&self, index: usize) -> Option<f32> {
        self.positions.get(index).copied()
    }

    pub(crate) fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub(crate) fn resolved_sizes(&self) -> &[f32] {
        &self.resolved
    }

    /// Content size after minimum sizing.
    pub(crate) fn extent(&self) -> f32 {
        self.extent
    }

    /// Sum of paddings, sizes and spacing before minimum sizing.
    pub(crate) fn raw_extent(&self) -> f32 {
        self.raw_extent
    }

    pub(crate) fn set_extent(&mut self, extent: f32) {
        self.extent = extent;
    }

    pub(crate) fn shift_positions(&mut self, delta: f32) {
        if delta != 0.0 {
            for p in &mut self.positions {
                *p += delta;
            }
        }
    }

    /// Recomputes every position as a running sum.
    ///
    /// `slot(i, cached)` resolves the size of slot `i` and may fill `cached` with a measurement.
    pub(crate) fn accumulate(
        &mut self,
        before: f32,
        after: f32,
        spacing: f32,
        mut slot: impl FnMut(usize, &mut f32) -> SlotSize,
    ) {
        let len = self.len();
        let mut cursor = before;
        let mut placed_any = false;
        for i in 0..len {
            self.positions[i] = cursor;
            match slot(i, &mut self.sizes[i]) {
                SlotSize::Sized(size) => {
                    let size = finite_or_zero(size).max(0.0);
                    self.resolved[i] = size;
                    cursor += size + spacing;
                    placed_any = true;
                }
                SlotSize::Collapsed => self.resolved[i] = 0.0,
            }
        }
        // Spacing only sits between elements.
        if placed_any {
            cursor -= spacing;
        }
        self.raw_extent = (cursor + after).max(0.0);
        self.extent = self.raw_extent;
    }
}

/// Resolves the size of one slot, filling `cached` when a measurement is taken.
///
/// An empty slot without an estimate takes `hole_fallback` when the host is known to fill empty
/// slots, and no space otherwise. Neither is cached.
pub(crate) fn resolve_slot<E, H: ElementHost<E> + ?Sized>(
    host: &mut H,
    element: Option<&E>,
    index: usize,
    cached: &mut f32,
    axis: Axis,
    fallback: f32,
    hole_fallback: Option<f32>,
) -> SlotSize {
    match element {
        Some(element) if !host.is_active(element) => SlotSize::Collapsed,
        Some(element) => {
            if *cached >= 0.0 {
                return SlotSize::Sized(*cached);
            }
            let preferred = host.preferred_size(element, axis);
            let size = if preferred.is_finite() && preferred >= 0.0 {
                preferred
            } else {
                vwarn!(index, preferred, "host reported an unusable preferred size");
                host.materialized_size(element, axis)
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .unwrap_or(fallback)
            };
            *cached = size;
            SlotSize::Sized(size)
        }
        None => {
            if *cached >= 0.0 {
                return SlotSize::Sized(*cached);
            }
            match host
                .estimate_size(index, axis)
                .filter(|s| s.is_finite() && *s >= 0.0)
            {
                Some(estimate) => {
                    *cached = estimate;
                    SlotSize::Sized(estimate)
                }
                None => SlotSize::Sized(hole_fallback.unwrap_or(0.0)),
            }
        }
    }
}
