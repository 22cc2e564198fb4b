use scroll_layout::{Extent, ScrollViewport};

/// A scroll container that can be told where to scroll.
pub trait ScrollTo: ScrollViewport {
    fn set_scroll_offset(&mut self, offset: f32);
}

/// An in-memory scroll container.
///
/// Useful for tests, headless layout and as a reference for real viewports: it stores the content
/// size it is given and clamps its offset when asked to rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimViewport {
    pub offset: f32,
    pub extent: Extent,
    pub content: Extent,
    pub rebuilds: u32,
}

impl SimViewport {
    pub fn new(main: f32, cross: f32) -> Self {
        Self {
            extent: Extent::new(main, cross),
            ..Self::default()
        }
    }

    pub fn max_scroll_offset(&self) -> f32 {
        (self.content.main - self.extent.main).max(0.0)
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_scroll_offset())
        } else {
            0.0
        }
    }

    /// Scrolls by `delta` and returns the clamped offset.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.offset = self.clamp_offset(self.offset + delta);
        self.offset
    }

    pub fn resize(&mut self, main: f32, cross: f32) {
        self.extent = Extent::new(main, cross);
    }
}

impl ScrollViewport for SimViewport {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn viewport_extent(&self) -> Extent {
        self.extent
    }

    fn set_content_extent(&mut self, extent: Extent) {
        self.content = extent;
    }

    fn request_rebuild(&mut self) {
        self.rebuilds += 1;
        self.offset = self.clamp_offset(self.offset);
    }
}

impl ScrollTo for SimViewport {
    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = self.clamp_offset(offset);
    }
}
