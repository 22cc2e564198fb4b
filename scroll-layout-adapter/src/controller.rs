use scroll_layout::{
    ElementHost, ElementKey, LayoutEngine, LayoutEvent, LayoutPolicy, ScrollViewport,
};

use crate::{Align, ScrollTo, scroll_to_offset};

/// A framework-neutral controller that wraps a `scroll_layout::LayoutEngine`.
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - `on_scroll` when the scroll container reports a new offset
/// - `frame` once per frame, handing over the host and the viewport
///
/// Scroll-to helpers compute offsets from the engine's cached positions, so they are exact for
/// measured elements and approximate for elements never laid out.
#[derive(Clone, Debug)]
pub struct Controller<E> {
    engine: LayoutEngine<E>,
}

impl<E: ElementKey> Controller<E> {
    pub fn new(policy: LayoutPolicy) -> Self {
        Self {
            engine: LayoutEngine::new(policy),
        }
    }

    pub fn from_engine(engine: LayoutEngine<E>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &LayoutEngine<E> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine<E> {
        &mut self.engine
    }

    pub fn into_engine(self) -> LayoutEngine<E> {
        self.engine
    }

    /// Call this when the scroll container reports a scroll offset change.
    ///
    /// Returns whether the next frame will move elements.
    pub fn on_scroll(&mut self, scroll_offset: f32) -> bool {
        self.engine.on_scroll_changed(scroll_offset)
    }

    /// Runs one engine tick and hands every queued event to `on_event`.
    ///
    /// Returns whether the tick did any work.
    pub fn frame<V, H>(
        &mut self,
        viewport: &mut V,
        host: &mut H,
        mut on_event: impl FnMut(LayoutEvent<E>),
    ) -> bool
    where
        V: ScrollViewport + ?Sized,
        H: ElementHost<E> + ?Sized,
    {
        let ran = self.engine.tick(viewport, host);
        for event in self.engine.drain_events() {
            on_event(event);
        }
        ran
    }

    pub fn max_scroll_offset(&self, viewport_main: f32) -> f32 {
        (self.engine.content_extent() - viewport_main).max(0.0)
    }

    /// Computes the offset that brings `index` into view. Indices past the end are clamped to the
    /// last element.
    ///
    /// Returns `None` for an empty list.
    pub fn scroll_to_index_offset(
        &self,
        index: usize,
        align: Align,
        current: f32,
        viewport_main: f32,
    ) -> Option<f32> {
        let index = index.min(self.engine.len().checked_sub(1)?);
        let start = self.engine.cached_element_position(index)?;
        let size = self.engine.cached_element_size(index).unwrap_or(0.0);
        Some(scroll_to_offset(
            start,
            size,
            align,
            current,
            viewport_main,
            self.engine.content_extent(),
        ))
    }

    /// Scrolls `viewport` so `index` is in view and notifies the engine.
    ///
    /// Returns the applied offset.
    pub fn scroll_to_index<V: ScrollTo + ?Sized>(
        &mut self,
        index: usize,
        align: Align,
        viewport: &mut V,
    ) -> Option<f32> {
        let offset = self.scroll_to_index_offset(
            index,
            align,
            viewport.scroll_offset(),
            viewport.viewport_extent().main,
        )?;
        Some(self.scroll_to_offset(offset, viewport))
    }

    /// Scrolls `viewport` to `offset` and notifies the engine.
    ///
    /// Returns the applied offset, as reported back by the viewport.
    pub fn scroll_to_offset<V: ScrollTo + ?Sized>(&mut self, offset: f32, viewport: &mut V) -> f32 {
        viewport.set_scroll_offset(offset);
        let applied = viewport.scroll_offset();
        self.engine.on_scroll_changed(applied);
        applied
    }

    /// Scroll progress in `0.0..=1.0` for `offset`. A list that fits reports `0.0`.
    pub fn normalized_position(&self, offset: f32, viewport_main: f32) -> f32 {
        let max = self.max_scroll_offset(viewport_main);
        if max <= 0.0 {
            return 0.0;
        }
        (offset / max).clamp(0.0, 1.0)
    }

    /// Offset matching a scroll progress in `0.0..=1.0`.
    pub fn offset_from_normalized(&self, normalized: f32, viewport_main: f32) -> f32 {
        let normalized = if normalized.is_finite() {
            normalized.clamp(0.0, 1.0)
        } else {
            0.0
        };
        normalized * self.max_scroll_offset(viewport_main)
    }
}
