use crate::cache::LayoutCache;
use crate::types::{finite_or_zero, SIZE_EPSILON};
use crate::MinContentAlign;

/// Applies the minimum content size to a freshly accumulated cache.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ContentSizer {
    pub minimum: Option<f32>,
    pub align: MinContentAlign,
}

impl ContentSizer {
    /// Grows the content to the minimum and shifts positions so the slack lands where `align`
    /// asks. Returns the applied size.
    pub(crate) fn apply(&self, cache: &mut LayoutCache) -> f32 {
        let raw = cache.raw_extent();
        let minimum = self.minimum.map_or(0.0, finite_or_zero).max(0.0);
        let slack = minimum - raw;
        if slack <= SIZE_EPSILON {
            cache.set_extent(raw);
            return raw;
        }
        let applied = minimum;
        let shift = match self.align {
            MinContentAlign::SameAsScrollDirection => 0.0,
            MinContentAlign::InverseScrollDirection => slack,
            MinContentAlign::Middle => slack / 2.0,
        };
        cache.shift_positions(shift);
        cache.set_extent(applied);
        vtrace!(raw, applied, shift, "ContentSizer::apply");
        applied
    }
}
