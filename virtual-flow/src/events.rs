use alloc::collections::BTreeMap;
use alloc::sync::Arc;

use crate::{Axis, ItemRange, PhysicalItem};

/// Immutable per-pass positions keyed by item index.
pub type PhysicalItems = Arc<BTreeMap<usize, PhysicalItem>>;

/// Payload of [`LayoutEvent::RangeChanged`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeChange {
    /// `None` is the empty state.
    pub range: Option<ItemRange>,
    pub stable: bool,
    /// Set on the first pass after a cross-axis resize: every bound target must be measured
    /// again, even if it stays in the range.
    pub remeasure: bool,
    /// Scroll axis the positions refer to.
    pub axis: Axis,
}

/// A message from the engine to whatever renders its output.
///
/// A pass only emits the events whose payload differs from the previous pass.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutEvent {
    RangeChanged(RangeChange),
    ScrollSizeChanged {
        size: f64,
    },
    /// The consumer must add `delta` to the real scroll offset and report the result back
    /// through `set_scroll_position`.
    ScrollErrorChanged {
        delta: f64,
    },
    ItemPositionsChanged(PhysicalItems),
}

/// What a single pass produced, independent of which events were emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflowReport {
    pub range: Option<ItemRange>,
    pub stable: bool,
    /// Correction applied to the scroll position by this pass (0 when none).
    pub scroll_error: f64,
    pub scroll_size: f64,
}
