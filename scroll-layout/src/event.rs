use alloc::vec::Vec;

use crate::VisibleWindow;

/// Notifications queued by [`crate::LayoutEngine`] and drained by the host after each tick.
///
/// Element-level events carry the element handle and the index it occupied when the event was
/// queued.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutEvent<E> {
    /// The attached window is about to change. `previous` is the window being left.
    BeforeVisibleChange { previous: Option<VisibleWindow> },
    /// The attached window changed.
    VisibleChanged { window: Option<VisibleWindow> },
    ElementBecameVisible { element: E, index: usize },
    ElementBecameInvisible { element: E, index: usize },
    ElementsAdded { indices: Vec<usize> },
    ElementsRemoved { indices: Vec<usize> },
    /// The whole element list was swapped out.
    ElementsReplaced,
    /// The element at `index` was overwritten in place.
    ElementChanged { index: usize },
    /// The cached size at `index` changed.
    ElementSizeChanged { index: usize },
    /// Positions and content size were recomputed.
    ContentReloaded,
    /// The scroll offset moved past the throttle threshold.
    ScrollChanged { offset: f32 },
}

impl<E> LayoutEvent<E> {
    /// Whether this event reports the attached window changing.
    pub fn is_window_change(&self) -> bool {
        matches!(
            self,
            Self::BeforeVisibleChange { .. } | Self::VisibleChanged { .. }
        )
    }
}
