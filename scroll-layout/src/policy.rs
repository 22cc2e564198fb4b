use crate::ScrollAxis;

/// Padding around the stacked elements.
///
/// `before`/`after` are measured along the scroll axis, in stacking order. `cross_start` is the
/// inset applied to every element on the perpendicular axis (left for vertical layouts, bottom
/// for horizontal ones) and `cross_end` the opposite side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub before: u32,
    pub after: u32,
    pub cross_start: u32,
    pub cross_end: u32,
}

impl Padding {
    pub const fn main(before: u32, after: u32) -> Self {
        Self {
            before,
            after,
            cross_start: 0,
            cross_end: 0,
        }
    }

    pub const fn all(value: u32) -> Self {
        Self {
            before: value,
            after: value,
            cross_start: value,
            cross_end: value,
        }
    }
}

/// Extra indices attached beyond the strictly visible range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraVisible {
    pub before: usize,
    pub after: usize,
}

/// Where the slack goes when the content is grown to a minimum size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinContentAlign {
    /// Elements stay at the leading edge, slack trails them.
    #[default]
    SameAsScrollDirection,
    /// Elements are pushed to the trailing edge, slack leads them.
    InverseScrollDirection,
    /// Slack is split evenly on both sides.
    Middle,
}

/// Layout configuration for [`crate::LayoutEngine`].
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPolicy {
    /// Gap between consecutive active elements. Negative values overlap elements.
    pub spacing: i32,
    pub padding: Padding,
    pub scroll_axis: ScrollAxis,

    /// Lower bound on the attached window length.
    pub minimum_visible_elements: Option<usize>,
    /// Maximum number of newly entered indices attached per tick. `0` disables the limit.
    ///
    /// Full reloads ignore the limit.
    pub elements_to_attach_per_step: usize,
    /// Indices attached around the visible ones.
    ///
    /// An element counts as visible only when its trailing edge fits in the viewport, so one that
    /// is cut off at the far edge is not attached. Use `after >= 1` to keep that band filled.
    pub extra_visible: ExtraVisible,

    /// Content never shrinks below this size along the scroll axis.
    pub minimum_content_size: Option<f32>,
    /// Use the viewport's main extent as the minimum content size.
    pub auto_minimum_from_viewport: bool,
    pub minimum_content_size_align: MinContentAlign,

    /// Keep the attached window from shrinking below its previous length, so small viewport
    /// changes do not churn elements in and out of the live container.
    pub optimize_deep_hierarchy: bool,
    /// Ask the host to disable elements while they sit in the pool.
    pub disable_non_visible_elements: bool,
    /// Scroll movements smaller than this are ignored.
    pub scroll_min_delta: f32,
    /// Sibling index given to the first attached element when child order is requested.
    pub starting_sibling: usize,
    /// Size used for slots the host cannot measure.
    pub default_element_size: f32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutPolicy {
    pub const fn new() -> Self {
        Self {
            spacing: 0,
            padding: Padding::main(0, 0),
            scroll_axis: ScrollAxis::TopToBottom,
            minimum_visible_elements: None,
            elements_to_attach_per_step: 0,
            extra_visible: ExtraVisible {
                before: 0,
                after: 0,
            },
            minimum_content_size: None,
            auto_minimum_from_viewport: false,
            minimum_content_size_align: MinContentAlign::SameAsScrollDirection,
            optimize_deep_hierarchy: true,
            disable_non_visible_elements: true,
            scroll_min_delta: 5.0,
            starting_sibling: 0,
            default_element_size: 100.0,
        }
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_scroll_axis(mut self, scroll_axis: ScrollAxis) -> Self {
        self.scroll_axis = scroll_axis;
        self
    }

    pub fn with_minimum_visible_elements(mut self, minimum: Option<usize>) -> Self {
        self.minimum_visible_elements = minimum;
        self
    }

    pub fn with_elements_to_attach_per_step(mut self, budget: usize) -> Self {
        self.elements_to_attach_per_step = budget;
        self
    }

    pub fn with_extra_visible(mut self, before: usize, after: usize) -> Self {
        self.extra_visible = ExtraVisible { before, after };
        self
    }

    pub fn with_minimum_content_size(mut self, minimum: Option<f32>) -> Self {
        self.minimum_content_size = minimum;
        self
    }

    pub fn with_auto_minimum_from_viewport(mut self, enabled: bool) -> Self {
        self.auto_minimum_from_viewport = enabled;
        self
    }

    pub fn with_minimum_content_size_align(mut self, align: MinContentAlign) -> Self {
        self.minimum_content_size_align = align;
        self
    }

    pub fn with_optimize_deep_hierarchy(mut self, enabled: bool) -> Self {
        self.optimize_deep_hierarchy = enabled;
        self
    }

    pub fn with_disable_non_visible_elements(mut self, enabled: bool) -> Self {
        self.disable_non_visible_elements = enabled;
        self
    }

    pub fn with_scroll_min_delta(mut self, delta: f32) -> Self {
        self.scroll_min_delta = delta;
        self
    }

    pub fn with_starting_sibling(mut self, starting_sibling: usize) -> Self {
        self.starting_sibling = starting_sibling;
        self
    }

    pub fn with_default_element_size(mut self, size: f32) -> Self {
        self.default_element_size = size;
        self
    }

    pub(crate) fn attach_budget(&self) -> Option<usize> {
        (self.elements_to_attach_per_step > 0).then_some(self.elements_to_attach_per_step)
    }

    /// Whether attached elements must be kept in index order inside the live container.
    ///
    /// Overlapping elements (negative spacing) always are.
    pub(crate) fn orders_siblings(&self) -> bool {
        !self.optimize_deep_hierarchy || self.spacing < 0
    }

    /// Whether switching from `self` to `other` moves elements or changes the content size.
    pub(crate) fn affects_layout(&self, other: &Self) -> bool {
        self.spacing != other.spacing
            || self.padding != other.padding
            || self.scroll_axis != other.scroll_axis
            || self.extra_visible != other.extra_visible
            || self.minimum_content_size != other.minimum_content_size
            || self.auto_minimum_from_viewport != other.auto_minimum_from_viewport
            || self.minimum_content_size_align != other.minimum_content_size_align
            || self.default_element_size != other.default_element_size
    }

    /// Whether switching from `self` to `other` changes which elements are attached or how.
    pub(crate) fn affects_window(&self, other: &Self) -> bool {
        self.minimum_visible_elements != other.minimum_visible_elements
            || self.elements_to_attach_per_step != other.elements_to_attach_per_step
            || self.optimize_deep_hierarchy != other.optimize_deep_hierarchy
            || self.starting_sibling != other.starting_sibling
    }
}

impl core::fmt::Debug for LayoutPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutPolicy")
            .field("spacing", &self.spacing)
            .field("padding", &self.padding)
            .field("scroll_axis", &self.scroll_axis)
            .field("minimum_visible_elements", &self.minimum_visible_elements)
            .field(
                "elements_to_attach_per_step",
                &self.elements_to_attach_per_step,
            )
            .field("extra_visible", &self.extra_visible)
            .field("minimum_content_size", &self.minimum_content_size)
            .field("auto_minimum_from_viewport", &self.auto_minimum_from_viewport)
            .field(
                "minimum_content_size_align",
                &self.minimum_content_size_align,
            )
            .field("optimize_deep_hierarchy", &self.optimize_deep_hierarchy)
            .field(
                "disable_non_visible_elements",
                &self.disable_non_visible_elements,
            )
            .field("scroll_min_delta", &self.scroll_min_delta)
            .finish_non_exhaustive()
    }
}
