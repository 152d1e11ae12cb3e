//! A headless, anchor-preserving layout engine for virtualized lists.
//!
//! For host-side plumbing (keyed reconciliation, frame loops, smooth scrolling), see the
//! `virtual-flow-adapter` crate.
//!
//! Only a window of items around the viewport is laid out. Sizes start as estimates and are
//! replaced by real measurements as items render. Each pass holds one *anchor* item fixed, so
//! measurements never make the content under the viewport jump. Any movement that has to happen
//! anyway is reported as a scroll error for the host to apply.
//!
//! The engine is UI-agnostic. A rendering surface is expected to provide:
//! - the viewport size (main and cross axis)
//! - the scroll position
//! - item measurements once they render
//!
//! ```
//! use virtual_flow::{LayoutEngine, LayoutOptions, Measurement};
//!
//! let mut engine = LayoutEngine::new(LayoutOptions::new(50.0)).unwrap();
//! engine.set_total_items(1_000);
//! engine.set_viewport_size(500.0).unwrap();
//!
//! let (report, _events) = engine.reflow_collect();
//! let range = report.range.unwrap();
//! assert_eq!((range.first_visible, range.last_visible), (0, 9));
//!
//! for i in range.first..=range.last {
//!     engine.record_measurement(i, Measurement::new(50.0)).unwrap();
//! }
//! assert!(engine.reflow_collect().0.stable);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod events;
mod layout;
mod metrics;
mod options;
mod scheduler;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{LayoutError, Result};
pub use events::{LayoutEvent, PhysicalItems, RangeChange, ReflowReport};
pub use layout::{LayoutEngine, ViewportChange};
pub use metrics::{MetricsEntry, MetricsStore};
pub use options::LayoutOptions;
pub use scheduler::{FrameRequester, Invalidation, ReflowScheduler, SchedulerState};
pub use state::LayoutState;
pub use types::{
    Align, Anchor, Axis, ItemRange, Margins, Measurement, PhysicalItem, ScrollTarget, Size,
    Viewport, collapse_margins,
};
