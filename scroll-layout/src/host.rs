use crate::{Axis, Extent, Placement};

/// The scroll container the engine lays content out in.
pub trait ScrollViewport {
    /// Distance scrolled from the leading edge of the content, along the scroll axis.
    fn scroll_offset(&self) -> f32;

    fn viewport_extent(&self) -> Extent;

    /// Called after every layout pass with the applied content size.
    fn set_content_extent(&mut self, extent: Extent);

    /// The scroll offset ended up outside the content. The container should rebuild its own
    /// layout (and clamp its offset) before the engine runs the window pass again.
    fn request_rebuild(&mut self);
}

/// The host-side element tree: measures elements and moves them between the live container and
/// the pool.
///
/// `E` is a cheap handle. The engine never owns the underlying UI object.
pub trait ElementHost<E> {
    /// The size the element would like along `axis`.
    fn preferred_size(&mut self, element: &E, axis: Axis) -> f32;

    /// The size the element currently occupies, if it has been laid out.
    fn materialized_size(&self, element: &E, axis: Axis) -> Option<f32>;

    /// Inactive elements take no space and raise no visibility events.
    fn is_active(&self, _element: &E) -> bool {
        true
    }

    /// Place the element in the live container.
    fn attach(&mut self, element: &E, placement: &Placement);

    /// Move the element to the pool container. `disable` mirrors
    /// `LayoutPolicy::disable_non_visible_elements`.
    fn park(&mut self, element: &E, disable: bool);

    /// Produce an element for an empty slot entering the window. Returning `None` leaves the slot
    /// empty.
    fn acquire(&mut self, _index: usize) -> Option<E> {
        None
    }

    /// Take back an element produced by [`ElementHost::acquire`] once it has been parked.
    fn release(&mut self, _index: usize, _element: E) {}

    /// Size to assume for an empty slot before anything has been measured there.
    fn estimate_size(&mut self, _index: usize, _axis: Axis) -> Option<f32> {
        None
    }
}
