use core::ops::RangeInclusive;

/// Tolerance used when comparing sizes and edges.
pub(crate) const SIZE_EPSILON: f32 = 0.01;

// `f32::abs` is not in `core` on every supported toolchain.
#[inline]
pub(crate) fn abs_f32(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

/// Replaces NaN and infinities with `0.0`.
#[inline]
pub(crate) fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Direction in which elements are stacked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl ScrollAxis {
    pub fn axis(self) -> Axis {
        match self {
            Self::TopToBottom | Self::BottomToTop => Axis::Vertical,
            Self::LeftToRight | Self::RightToLeft => Axis::Horizontal,
        }
    }

    /// Whether elements grow from the far edge of the content (bottom or right).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomToTop | Self::RightToLeft)
    }
}

/// A size split into the scroll axis (`main`) and the perpendicular axis (`cross`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub main: f32,
    pub cross: f32,
}

impl Extent {
    pub const fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }

    pub(crate) fn sanitized(self) -> Self {
        Self {
            main: finite_or_zero(self.main).max(0.0),
            cross: finite_or_zero(self.cross).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Edge of the content container an element is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    /// Normalized pivot (`0.0..=1.0` on each axis) matching this anchor.
    pub fn pivot(self) -> Point {
        match self {
            Self::Top => Point::new(0.0, 1.0),
            Self::Bottom | Self::Left => Point::new(0.0, 0.0),
            Self::Right => Point::new(1.0, 0.0),
        }
    }
}

/// Everything a host needs to place one element inside the live container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub index: usize,
    /// Position relative to `anchor`. Vertical layouts grow along `y`, horizontal along `x`.
    pub position: Point,
    pub extent: Extent,
    pub anchor: Anchor,
    /// Requested child order inside the live container, when ordering matters.
    /// Hosts clamp it to their child count.
    pub sibling_index: Option<usize>,
}

/// Inclusive range of indices currently attached to the live container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleWindow {
    pub first: usize,
    pub last: usize,
}

impl VisibleWindow {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "window first must not exceed last");
        Self {
            first: first.min(last),
            last,
        }
    }

    pub fn single(index: usize) -> Self {
        Self {
            first: index,
            last: index,
        }
    }

    /// Number of indices in the window. A window always holds at least one index.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Lifecycle of the cached layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Caches and the attached window match the element list.
    #[default]
    Clean,
    /// A layout recompute or window reload is owed on the next tick.
    Dirty,
    /// A tick is in progress. Seeing this at the start of a tick means the previous one unwound.
    Recomputing,
}

/// How much of the attached window a reload revisits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ReloadMode {
    /// Attach only indices that entered the window.
    Fast,
    /// Re-place every index in the window.
    Full,
}
