//! Host-side helpers for the `scroll-layout` crate.
//!
//! The `scroll-layout` engine is UI-agnostic: it talks to the host only through the
//! `ElementHost` and `ScrollViewport` traits. This crate provides small, framework-neutral pieces
//! most hosts end up writing:
//!
//! - [`Controller`]: per-frame driving, scroll-to-index and normalized scroll conversions
//! - [`Scene`]: an in-memory retained element tree (live container, pool, template factory)
//! - [`SimViewport`]: an in-memory scroll container
//!
//! This crate is intentionally framework-agnostic (no bindings to any UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod align;
mod controller;
mod key;
mod scene;
mod viewport;

#[cfg(test)]
mod tests;

pub use align::{Align, scroll_to_offset};
pub use controller::Controller;
pub use scene::{Node, Scene, Template};
pub use viewport::{ScrollTo, SimViewport};
