use crate::{Axis, LayoutError, Result};

/// Configuration for [`crate::LayoutEngine`].
///
/// All fields are plain values, so options are cheap to clone and (with `feature = "serde"`)
/// easy to persist alongside other UI settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Size used for unmeasured items until the first measurement arrives.
    ///
    /// Afterwards the running average of measured sizes takes over.
    pub estimate_size: f64,

    /// Distance rendered beyond each viewport edge to hide measurement and scroll latency.
    pub overhang: f64,

    /// Constant spacing between adjacent items (on top of collapsed margins).
    pub gap: f64,

    /// Scroll axis. The engine lays out one dimension either way; the axis travels with every
    /// [`crate::RangeChange`] so the surface knows which coordinate `position` sets.
    pub axis: Axis,

    /// Whether a pass may lay out more than one speculative (estimated) item per direction.
    ///
    /// Some integrations require every emitted position to be backed by a real measurement;
    /// they turn this off and let the window grow as measurements arrive.
    pub estimate: bool,

    /// Lower bound for the reported scroll extent.
    pub min_scroll_size: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            estimate_size: 50.0,
            overhang: 1000.0,
            gap: 0.0,
            axis: Axis::Vertical,
            estimate: true,
            min_scroll_size: 1.0,
        }
    }
}

impl LayoutOptions {
    /// Creates options with a given default item-size estimate.
    pub fn new(estimate_size: f64) -> Self {
        Self {
            estimate_size,
            ..Self::default()
        }
    }

    pub fn with_estimate_size(mut self, estimate_size: f64) -> Self {
        self.estimate_size = estimate_size;
        self
    }

    pub fn with_overhang(mut self, overhang: f64) -> Self {
        self.overhang = overhang;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_estimate(mut self, estimate: bool) -> Self {
        self.estimate = estimate;
        self
    }

    pub fn with_min_scroll_size(mut self, min_scroll_size: f64) -> Self {
        self.min_scroll_size = min_scroll_size;
        self
    }

    /// Checks that every numeric knob is finite and in range.
    pub fn validate(&self) -> Result<()> {
        non_negative("estimate_size", self.estimate_size)?;
        non_negative("overhang", self.overhang)?;
        non_negative("gap", self.gap)?;
        non_negative("min_scroll_size", self.min_scroll_size)?;
        if self.min_scroll_size == 0.0 {
            return Err(LayoutError::InvalidOption {
                name: "min_scroll_size",
                value: self.min_scroll_size,
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidOption { name, value })
    }
}
