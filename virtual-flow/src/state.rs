use crate::{Anchor, ItemRange, Viewport};

/// A lightweight snapshot of the layout after the most recent pass.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, which is handy for
/// debugging overlays and for restoring scroll state across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutState {
    /// `None` is the empty state: no items, or a zero-sized viewport.
    pub range: Option<ItemRange>,
    pub scroll_position: f64,
    pub scroll_size: f64,
    pub viewport: Viewport,
    /// The item held fixed by the pass. `None` after a reset and in the empty state.
    pub anchor: Option<Anchor>,
    /// Whether every item in the window was laid out with a measured size.
    pub stable: bool,
}

impl LayoutState {
    pub fn first(&self) -> Option<usize> {
        self.range.map(|r| r.first)
    }

    pub fn last(&self) -> Option<usize> {
        self.range.map(|r| r.last)
    }

    /// Largest valid scroll position for the current extent.
    pub fn max_scroll_position(&self) -> f64 {
        (self.scroll_size - self.viewport.main).max(0.0)
    }
}
