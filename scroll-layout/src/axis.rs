//! Mapping from a scroll axis to concrete element coordinates.

use crate::{Anchor, Axis, Point, ScrollAxis};

/// Converts a leading-edge offset along the scroll axis into a position relative to the anchor.
pub trait AxisLayout {
    fn axis(&self) -> Axis;

    fn anchor(&self) -> Anchor;

    /// `leading_edge` is the element's cached position; `cross_inset` is the cross-axis padding.
    fn element_position(&self, leading_edge: f32, cross_inset: f32) -> Point;
}

/// Stacks elements along `y`. Reversed layouts grow upwards from the bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalLayout {
    pub reversed: bool,
}

impl AxisLayout for VerticalLayout {
    fn axis(&self) -> Axis {
        Axis::Vertical
    }

    fn anchor(&self) -> Anchor {
        if self.reversed {
            Anchor::Bottom
        } else {
            Anchor::Top
        }
    }

    fn element_position(&self, leading_edge: f32, cross_inset: f32) -> Point {
        if self.reversed {
            Point::new(cross_inset, leading_edge)
        } else {
            Point::new(cross_inset, -leading_edge)
        }
    }
}

/// Stacks elements along `x`. Reversed layouts grow leftwards from the right edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HorizontalLayout {
    pub reversed: bool,
}

impl AxisLayout for HorizontalLayout {
    fn axis(&self) -> Axis {
        Axis::Horizontal
    }

    fn anchor(&self) -> Anchor {
        if self.reversed {
            Anchor::Right
        } else {
            Anchor::Left
        }
    }

    fn element_position(&self, leading_edge: f32, cross_inset: f32) -> Point {
        if self.reversed {
            Point::new(-leading_edge, cross_inset)
        } else {
            Point::new(leading_edge, cross_inset)
        }
    }
}

impl ScrollAxis {
    pub fn layout(self) -> &'static dyn AxisLayout {
        match self {
            Self::TopToBottom => &VerticalLayout { reversed: false },
            Self::BottomToTop => &VerticalLayout { reversed: true },
            Self::LeftToRight => &HorizontalLayout { reversed: false },
            Self::RightToLeft => &HorizontalLayout { reversed: true },
        }
    }
}
