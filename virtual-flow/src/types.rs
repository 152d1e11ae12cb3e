/// Where an item should land inside the viewport after a scroll-to request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// `End` if the item lies past the middle of the current window, `Start` otherwise.
    /// Resolved once, when the request is made.
    Nearest,
}

/// The scroll axis. The other axis only carries a secondary (cross) size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// An item size along the scroll axis, tagged with where it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Size {
    /// The running estimate (or the configured default) stood in for a real measurement.
    Estimated(f64),
    /// A measurement reported by the rendering surface.
    Measured(f64),
}

impl Size {
    pub fn value(self) -> f64 {
        match self {
            Self::Estimated(v) | Self::Measured(v) => v,
        }
    }

    pub fn is_measured(self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// Margins around an item along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub before: f64,
    pub after: f64,
}

impl Margins {
    pub const ZERO: Self = Self {
        before: 0.0,
        after: 0.0,
    };

    pub fn new(before: f64, after: f64) -> Self {
        Self { before, after }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.before.is_finite() && self.after.is_finite()
    }
}

/// Collapses two adjoining margins: the largest positive margin plus the most negative one.
pub fn collapse_margins(a: f64, b: f64) -> f64 {
    let positive = a.max(0.0).max(b.max(0.0));
    let negative = a.min(0.0).min(b.min(0.0));
    positive + negative
}

/// A size report for a single rendered item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Size along the scroll axis (excludes margins).
    pub size: f64,
    /// Size along the cross axis, if the surface reports it.
    pub secondary: Option<f64>,
    pub margins: Margins,
}

impl Measurement {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            secondary: None,
            margins: Margins::ZERO,
        }
    }

    pub fn with_secondary(mut self, secondary: f64) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }
}

/// Where item `index` sits along the scroll axis for the current pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalItem {
    pub index: usize,
    /// Start offset along the scroll axis (excludes margins).
    pub position: f64,
    /// Size along the scroll axis (excludes margins).
    pub size: f64,
}

impl PhysicalItem {
    pub fn end(&self) -> f64 {
        self.position + self.size
    }
}

/// The active window of a pass. Both ends are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRange {
    /// First rendered index (includes overhang).
    pub first: usize,
    /// Last rendered index (includes overhang).
    pub last: usize,
    /// First index intersecting the viewport.
    pub first_visible: usize,
    /// Last index intersecting the viewport.
    pub last_visible: usize,
}

impl ItemRange {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.first_visible && index <= self.last_visible
    }
}

/// Viewport geometry: `main` runs along the scroll axis, `cross` across it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub main: f64,
    pub cross: f64,
}

impl Viewport {
    pub fn new(main: f64, cross: f64) -> Self {
        Self { main, cross }
    }
}

/// A pending scroll-to-index request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    pub index: usize,
    pub align: Align,
}

/// The item whose position is held fixed across a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub index: usize,
    pub position: f64,
}
