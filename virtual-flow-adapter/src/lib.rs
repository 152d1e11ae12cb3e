//! Adapter utilities for the `virtual-flow` crate.
//!
//! `virtual-flow` is UI-agnostic and only computes layout. This crate provides the
//! framework-neutral glue an adapter needs on top of it:
//!
//! - A frame-driven [`Controller`] that coalesces invalidations, runs passes and applies their
//!   events to a [`RenderSurface`]
//! - Keyed reconciliation of render targets and measurement feedback
//! - Tween-based smooth scrolling
//!
//! No toolkit bindings live here; implement [`RenderSurface`] for your widgets.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod key;
mod surface;
mod tween;


pub use controller::{Controller, FrameReport};
pub use key::ItemKey;
pub use surface::RenderSurface;
pub use tween::{Easing, Tween};
