//! A headless, recycling layout engine for long scrollable lists of variable-size elements.
//!
//! Only a sliding window of elements is attached to the live container at a time; the rest sit
//! in a pool. Sizes are measured lazily and cached, positions are kept as a running sum, and the
//! window is re-derived cheaply every frame from the scroll offset.
//!
//! The engine is UI-agnostic. A host provides:
//! - an [`ElementHost`] that measures elements and moves them between the live container and
//!   the pool,
//! - a [`ScrollViewport`] that reports scroll offset and viewport size and takes the content
//!   size.
//!
//! For a frame controller, scroll-to-index math and an in-memory host, see the
//! `scroll-layout-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod axis;
mod cache;
mod content;
mod engine;
mod event;
mod host;
mod key;
mod policy;
mod recycle;
mod types;
mod window;


pub use axis::{AxisLayout, HorizontalLayout, VerticalLayout};
pub use engine::LayoutEngine;
pub use event::LayoutEvent;
pub use host::{ElementHost, ScrollViewport};
pub use key::ElementKey;
pub use policy::{ExtraVisible, LayoutPolicy, MinContentAlign, Padding};
pub use types::{Anchor, Axis, Extent, Phase, Placement, Point, ScrollAxis, VisibleWindow};
