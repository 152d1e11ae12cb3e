use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{LayoutError, Margins, Measurement, Result, Size, collapse_margins};

/// Everything known about one item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsEntry {
    pub index: usize,
    /// `Measured` once the surface reported a size; otherwise the estimate the last pass used.
    pub primary: Size,
    pub secondary: Option<f64>,
    pub margins: Margins,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RunningTotal {
    total: f64,
    count: usize,
}

impl RunningTotal {
    fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }

    fn insert(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    fn replace(&mut self, old: f64, new: f64) {
        self.total += new - old;
    }
}

/// Per-item sizes plus the running estimate used for items nobody has measured yet.
///
/// The store holds sizes only. Positions are derived by the layout engine for the active window,
/// so a measurement far down a million-item list costs one map entry, not a million offsets.
#[derive(Clone, Debug)]
pub struct MetricsStore {
    default_estimate: f64,
    entries: BTreeMap<usize, MetricsEntry>,
    sizes: RunningTotal,
    // Collapsed margin in front of index `k` (between `k - 1` and `k`).
    spaces: BTreeMap<usize, f64>,
    space_totals: RunningTotal,
}

impl MetricsStore {
    pub fn new(default_estimate: f64) -> Self {
        Self {
            default_estimate,
            entries: BTreeMap::new(),
            sizes: RunningTotal::default(),
            spaces: BTreeMap::new(),
            space_totals: RunningTotal::default(),
        }
    }

    pub fn default_estimate(&self) -> f64 {
        self.default_estimate
    }

    pub(crate) fn set_default_estimate(&mut self, estimate: f64) {
        self.default_estimate = estimate;
    }

    /// The size assumed for unmeasured items: the average of all measurements, or the
    /// configured default while nothing has been measured.
    pub fn estimate(&self) -> f64 {
        self.sizes.average().unwrap_or(self.default_estimate)
    }

    /// Average collapsed margin between measured neighbours (0 when unknown).
    pub fn average_margin(&self) -> f64 {
        self.space_totals.average().unwrap_or(0.0)
    }

    /// Number of items with an authoritative measurement.
    pub fn measured_len(&self) -> usize {
        self.sizes.count
    }

    /// Sum of all authoritative measurements.
    pub fn total_measured_size(&self) -> f64 {
        self.sizes.total
    }

    /// Number of entries, including items that were only ever estimated.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&MetricsEntry> {
        self.entries.get(&index)
    }

    pub fn size_of(&self, index: usize) -> Size {
        match self.entries.get(&index).map(|e| e.primary) {
            Some(Size::Measured(v)) => Size::Measured(v),
            _ => Size::Estimated(self.estimate()),
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.size_of(index).is_measured()
    }

    pub fn secondary_of(&self, index: usize) -> Option<f64> {
        self.entries.get(&index).and_then(|e| e.secondary)
    }

    /// Collapsed margin in front of `index`.
    ///
    /// Known once `index` or `index - 1` has been measured; otherwise the average margin.
    pub fn margin_before(&self, index: usize) -> Size {
        match self.spaces.get(&index) {
            Some(&v) => Size::Measured(v),
            None => Size::Estimated(self.average_margin()),
        }
    }

    /// Records the estimate a layout pass used for a not-yet-measured item.
    pub(crate) fn note_estimate(&mut self, index: usize, value: f64) {
        let entry = self.entries.entry(index).or_insert(MetricsEntry {
            index,
            primary: Size::Estimated(value),
            secondary: None,
            margins: Margins::ZERO,
        });
        if let Size::Estimated(_) = entry.primary {
            entry.primary = Size::Estimated(value);
        }
    }

    /// Stores an authoritative measurement and returns the size it supersedes.
    pub fn record_measurement(&mut self, index: usize, measurement: Measurement) -> Result<Size> {
        validate(index, &measurement)?;

        let previous = match self.entries.get(&index) {
            Some(entry) => entry.primary,
            None => Size::Estimated(self.estimate()),
        };
        match previous {
            Size::Measured(old) => self.sizes.replace(old, measurement.size),
            Size::Estimated(_) => self.sizes.insert(measurement.size),
        }

        self.entries.insert(
            index,
            MetricsEntry {
                index,
                primary: Size::Measured(measurement.size),
                secondary: measurement.secondary,
                margins: measurement.margins,
            },
        );
        self.update_space(index);
        self.update_space(index.saturating_add(1));

        vtrace!(
            index,
            size = measurement.size,
            measured = self.sizes.count,
            estimate = self.estimate(),
            "record_measurement"
        );
        Ok(previous)
    }

    /// Clears every entry and resets the running estimate.
    pub fn invalidate_all(&mut self) {
        vdebug!(entries = self.entries.len(), "invalidate_all");
        self.entries.clear();
        self.sizes = RunningTotal::default();
        self.spaces.clear();
        self.space_totals = RunningTotal::default();
    }

    /// Exports the measured entries (useful for persistence).
    pub fn export(&self) -> Vec<(usize, Measurement)> {
        self.entries
            .values()
            .filter_map(|e| match e.primary {
                Size::Measured(size) => Some((
                    e.index,
                    Measurement {
                        size,
                        secondary: e.secondary,
                        margins: e.margins,
                    },
                )),
                Size::Estimated(_) => None,
            })
            .collect()
    }

    /// Replaces the store's contents with previously exported measurements.
    ///
    /// Every entry is validated first; on error the store is left untouched.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (usize, Measurement)>) -> Result<()> {
        let entries: Vec<_> = entries.into_iter().collect();
        for (index, m) in &entries {
            validate(*index, m)?;
        }
        self.invalidate_all();
        for (index, m) in entries {
            self.record_measurement(index, m)?;
        }
        vdebug!(entries = self.sizes.count, "import");
        Ok(())
    }

    fn update_space(&mut self, index: usize) {
        let leading = self.measured_margins(index).map_or(0.0, |m| m.before);
        let value = if index == 0 {
            leading
        } else {
            let trailing = self.measured_margins(index - 1).map_or(0.0, |m| m.after);
            collapse_margins(trailing, leading)
        };
        match self.spaces.insert(index, value) {
            Some(old) => self.space_totals.replace(old, value),
            None => self.space_totals.insert(value),
        }
    }

    fn measured_margins(&self, index: usize) -> Option<Margins> {
        self.entries
            .get(&index)
            .filter(|e| e.primary.is_measured())
            .map(|e| e.margins)
    }
}

fn validate(index: usize, m: &Measurement) -> Result<()> {
    let size_ok = m.size.is_finite() && m.size >= 0.0;
    let secondary_ok = m.secondary.is_none_or(|s| s.is_finite() && s >= 0.0);
    if size_ok && secondary_ok && m.margins.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::InvalidMeasurement {
            index,
            size: m.size,
        })
    }
}
