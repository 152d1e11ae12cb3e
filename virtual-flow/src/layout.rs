use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    Align, Anchor, ItemRange, LayoutError, LayoutEvent, LayoutOptions, LayoutState, Measurement,
    MetricsStore, PhysicalItem, PhysicalItems, RangeChange, ReflowReport, Result, ScrollTarget,
    Size, Viewport,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AnchorSource {
    /// Carried over from an unstable pass.
    Retained,
    /// A scroll-to-index request.
    Pinned,
    /// Binary search over the last stable window.
    Settled,
    /// Nothing to go on but the running estimate.
    Estimated,
}

/// Which parts of the viewport changed in [`LayoutEngine::set_viewport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportChange {
    pub main: bool,
    pub cross: bool,
}

impl ViewportChange {
    pub fn any(&self) -> bool {
        self.main || self.cross
    }
}

/// An anchor-preserving windowed layout engine.
///
/// The engine holds no UI objects. Inputs go in through setters, a call to [`Self::reflow`]
/// runs one pass, and the results come out as [`LayoutEvent`]s plus read accessors.
///
/// Each pass lays items out around an *anchor* whose position is held fixed, so discovering
/// real sizes (or scrolling) never makes the content under the viewport jump. When positions do
/// have to move, the pass reports a scroll error that the host applies to its real scroll
/// offset.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    options: LayoutOptions,
    metrics: MetricsStore,
    total_items: usize,
    viewport: Viewport,
    scroll_position: f64,
    pin: Option<ScrollTarget>,

    range: Option<ItemRange>,
    scroll_size: f64,
    stable: bool,
    anchor: Option<Anchor>,
    retained: Option<Anchor>,
    physical: PhysicalItems,
    settled: Vec<PhysicalItem>, // last stable window, ascending by index
    size_deltas: BTreeMap<usize, f64>,
    remeasure: bool,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        vdebug!(
            estimate_size = options.estimate_size,
            overhang = options.overhang,
            estimate = options.estimate,
            "LayoutEngine::new"
        );
        Ok(Self {
            metrics: MetricsStore::new(options.estimate_size),
            total_items: 0,
            viewport: Viewport::default(),
            scroll_position: 0.0,
            pin: None,
            range: None,
            scroll_size: options.min_scroll_size,
            stable: true,
            anchor: None,
            retained: None,
            physical: Arc::new(BTreeMap::new()),
            settled: Vec::new(),
            size_deltas: BTreeMap::new(),
            remeasure: false,
            options,
        })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Replaces the configuration. Measurements are kept.
    pub fn set_options(&mut self, options: LayoutOptions) -> Result<()> {
        options.validate()?;
        self.metrics.set_default_estimate(options.estimate_size);
        self.options = options;
        Ok(())
    }

    pub fn metrics(&self) -> &MetricsStore {
        &self.metrics
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    pub fn scroll_size(&self) -> f64 {
        self.scroll_size
    }

    pub fn max_scroll_position(&self) -> f64 {
        (self.scroll_size - self.viewport.main).max(0.0)
    }

    pub fn range(&self) -> Option<ItemRange> {
        self.range
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// The scroll-to-index request still waiting for a stable pass.
    pub fn pinned(&self) -> Option<ScrollTarget> {
        self.pin
    }

    /// Positions published by the most recent pass.
    pub fn physical_items(&self) -> &PhysicalItems {
        &self.physical
    }

    pub fn item(&self, index: usize) -> Option<PhysicalItem> {
        self.physical.get(&index).copied()
    }

    pub fn state(&self) -> LayoutState {
        LayoutState {
            range: self.range,
            scroll_position: self.scroll_position,
            scroll_size: self.scroll_size,
            viewport: self.viewport,
            anchor: self.anchor,
            stable: self.stable,
        }
    }

    /// Returns `true` if the count changed.
    pub fn set_total_items(&mut self, total_items: usize) -> bool {
        if self.total_items == total_items {
            return false;
        }
        vdebug!(from = self.total_items, to = total_items, "set_total_items");
        self.total_items = total_items;
        true
    }

    /// Sets the viewport size along the scroll axis. Returns `true` if it changed.
    pub fn set_viewport_size(&mut self, main: f64) -> Result<bool> {
        let change = self.set_viewport(Viewport {
            main,
            cross: self.viewport.cross,
        })?;
        Ok(change.main)
    }

    /// Sets both viewport dimensions.
    ///
    /// A cross-axis change invalidates every measurement, since item sizes usually depend on
    /// the available width (or height, for horizontal lists).
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<ViewportChange> {
        for v in [viewport.main, viewport.cross] {
            if !v.is_finite() || v < 0.0 {
                vwarn!(value = v, "set_viewport: rejected");
                return Err(LayoutError::InvalidViewportSize(v));
            }
        }
        let change = ViewportChange {
            main: viewport.main != self.viewport.main,
            cross: viewport.cross != self.viewport.cross,
        };
        if change.cross && self.viewport.cross > 0.0 {
            vdebug!(
                from = self.viewport.cross,
                to = viewport.cross,
                "cross axis resized: invalidating metrics"
            );
            self.metrics.invalidate_all();
            self.size_deltas.clear();
            self.remeasure = true;
        }
        self.viewport = viewport;
        Ok(change)
    }

    /// Applies a scroll position reported by the host. Returns `true` if it changed.
    ///
    /// A real change means the user took over, so any pending scroll-to-index request is
    /// dropped.
    pub fn set_scroll_position(&mut self, position: f64) -> Result<bool> {
        if !position.is_finite() {
            vwarn!(position, "set_scroll_position: rejected");
            return Err(LayoutError::InvalidScrollPosition(position));
        }
        if position == self.scroll_position {
            return Ok(false);
        }
        self.scroll_position = position;
        if self.pin.take().is_some() {
            vdebug!(position, "scroll-to-index request superseded by scroll");
        }
        Ok(true)
    }

    /// Records an authoritative size for `index`.
    ///
    /// Returns `true` when the measurement touches the current window and therefore calls for
    /// a reflow. Measurements outside the window still update the running estimate, and size
    /// changes above the anchor are folded into the next stable pass as a scroll correction.
    pub fn record_measurement(&mut self, index: usize, measurement: Measurement) -> Result<bool> {
        if index >= self.total_items {
            return Err(LayoutError::IndexOutOfRange {
                index,
                total: self.total_items,
            });
        }
        let old_margins = self.metrics.entry(index).map(|e| e.margins);
        let previous = self.metrics.record_measurement(index, measurement)?;
        let delta = measurement.size - previous.value();
        if delta != 0.0 {
            *self.size_deltas.entry(index).or_insert(0.0) += delta;
        }

        let changed = match previous {
            Size::Measured(_) => delta != 0.0 || old_margins != Some(measurement.margins),
            Size::Estimated(_) => true,
        };
        let in_window = self.range.is_some_and(|r| r.contains(index));
        Ok(changed && in_window)
    }

    /// Records several measurements. Stops at the first invalid one; earlier ones stay applied.
    pub fn record_measurements(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, Measurement)>,
    ) -> Result<bool> {
        let mut needs_reflow = false;
        for (index, measurement) in measurements {
            needs_reflow |= self.record_measurement(index, measurement)?;
        }
        Ok(needs_reflow)
    }

    /// Requests that `index` be scrolled into view with the given alignment.
    ///
    /// The request is honored by the next pass and kept until a stable pass has placed the item
    /// with real measurements; every pass in between re-aligns the item against its latest
    /// position and size. A later request replaces this one. Out-of-range indexes are clamped
    /// when the pass runs. [`Align::Nearest`] is resolved here, against the current window.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        let align = self.resolve_align(index, align);
        vdebug!(index, ?align, "scroll_to_index");
        self.pin = Some(ScrollTarget { index, align });
        self.retained = None;
    }

    /// Turns [`Align::Nearest`] into `End` when `index` lies past the middle of the current
    /// window and `Start` otherwise (also when there is no window). Other alignments pass
    /// through.
    pub fn resolve_align(&self, index: usize, align: Align) -> Align {
        match (align, self.range) {
            (Align::Nearest, Some(r)) if index as f64 > r.first as f64 + r.len() as f64 / 2.0 => {
                Align::End
            }
            (Align::Nearest, _) => Align::Start,
            (align, _) => align,
        }
    }

    pub fn unpin(&mut self) {
        self.pin = None;
    }

    /// Forgets everything learned about the dataset (it was replaced wholesale).
    ///
    /// The last published positions are kept as a hint for the next pass, so the viewport
    /// does not snap back to the top.
    pub fn reset(&mut self) {
        vdebug!(total_items = self.total_items, "reset");
        self.metrics.invalidate_all();
        self.settled.clear();
        self.size_deltas.clear();
        self.anchor = None;
        self.retained = None;
        self.pin = None;
    }

    /// Best-known start position of `index`.
    ///
    /// Uses the published position when the item is in the window, otherwise extrapolates from
    /// the window edges with the running estimate.
    pub fn position_of(&self, index: usize) -> f64 {
        if index == 0 {
            return self.space_before(0).value();
        }
        if let Some(item) = self.physical.get(&index) {
            return item.position;
        }
        let n = self.total_items;
        if n > 0 && index == n - 1 {
            let size = self.metrics.size_of(index).value();
            return self.scroll_size - self.space_before(n).value() - size;
        }

        let delta = self.average_delta();
        let (Some((&first, head)), Some((&last, tail))) = (
            self.physical.first_key_value(),
            self.physical.last_key_value(),
        ) else {
            return self.space_before(0).value() + index as f64 * delta;
        };
        if index < first {
            let d = (first - index) as f64;
            let size = self.metrics.estimate();
            head.position - self.space_before(first).value() - d * size - (d - 1.0) * (delta - size)
        } else {
            let d = (index - last) as f64;
            tail.end() + self.space_before(last + 1).value() + (d - 1.0) * delta
        }
    }

    /// The scroll position that brings `index` into view with `align`, clamped to the extent.
    pub fn scroll_into_view_position(&self, index: usize, align: Align) -> f64 {
        let n = self.total_items;
        if n == 0 {
            return 0.0;
        }
        let index = index.min(n - 1);
        let start = self.position_of(index);
        let size = match self.physical.get(&index) {
            Some(item) => item.size,
            None => self.metrics.size_of(index).value(),
        };
        let align = self.resolve_align(index, align);
        let target = align_offset(start, size, self.viewport.main, align);
        target.clamp(0.0, self.max_scroll_position())
    }

    /// Whether a scroll to the current position calls for a reflow.
    ///
    /// That is the case when the published window no longer covers the scroll position plus
    /// the overhang on both sides (clipped to the extent), when the position is out of bounds,
    /// or when a scroll-to-index request is pending. Otherwise
    /// [`Self::update_visible_range`] is enough.
    pub fn needs_reflow(&self) -> bool {
        let n = self.total_items;
        let view = self.viewport.main;
        let (Some(head), Some(tail)) = (
            self.physical.values().next(),
            self.physical.values().next_back(),
        ) else {
            return n > 0 && view > 0.0;
        };
        if view == 0.0 || tail.index >= n || self.pin.is_some() {
            return true;
        }
        let pos = self.scroll_position;
        if pos < 0.0 || pos > self.max_scroll_position() {
            return true;
        }
        let lower = (pos - self.options.overhang).max(0.0);
        let upper = (pos + view + self.options.overhang).min(self.scroll_size);
        let min = head.position - self.space_before(head.index).value();
        let max = tail.end() + self.space_before(tail.index + 1).value();
        min > lower || max < upper
    }

    /// Recomputes the visible sub-range for the current scroll position from the published
    /// window, without running a pass. Returns the range event if it moved.
    pub fn update_visible_range(&mut self) -> Option<RangeChange> {
        let range = self.range?;
        let items: Vec<PhysicalItem> = self.physical.values().copied().collect();
        if items.is_empty() {
            return None;
        }
        let (fv, lv) = visible_span(&items, self.scroll_position, self.viewport.main);
        let next = ItemRange {
            first_visible: items[fv].index,
            last_visible: items[lv].index,
            ..range
        };
        if next == range {
            return None;
        }
        vtrace!(
            first_visible = next.first_visible,
            last_visible = next.last_visible,
            "visible range moved"
        );
        self.range = Some(next);
        Some(self.range_change(false))
    }

    fn range_change(&self, remeasure: bool) -> RangeChange {
        RangeChange {
            range: self.range,
            stable: self.stable,
            remeasure,
            axis: self.options.axis,
        }
    }

    /// Runs one layout pass and emits events for whatever changed.
    pub fn reflow(&mut self, emit: &mut dyn FnMut(LayoutEvent)) -> ReflowReport {
        let prev_range = self.range;
        let prev_stable = self.stable;
        let prev_scroll_size = self.scroll_size;
        let prev_physical = Arc::clone(&self.physical);

        let scroll_error = self.run_pass();
        let remeasure = core::mem::take(&mut self.remeasure);

        if self.range != prev_range || self.stable != prev_stable || remeasure {
            emit(LayoutEvent::RangeChanged(self.range_change(remeasure)));
        }
        if *self.physical != *prev_physical {
            emit(LayoutEvent::ItemPositionsChanged(Arc::clone(&self.physical)));
        }
        if self.scroll_size != prev_scroll_size {
            emit(LayoutEvent::ScrollSizeChanged {
                size: self.scroll_size,
            });
        }
        if scroll_error != 0.0 {
            emit(LayoutEvent::ScrollErrorChanged {
                delta: scroll_error,
            });
        }

        vdebug!(
            first = self.range.map(|r| r.first),
            last = self.range.map(|r| r.last),
            stable = self.stable,
            scroll_size = self.scroll_size,
            scroll_error,
            "reflow"
        );
        ReflowReport {
            range: self.range,
            stable: self.stable,
            scroll_error,
            scroll_size: self.scroll_size,
        }
    }

    /// Convenience wrapper around [`Self::reflow`] that collects the events.
    pub fn reflow_collect(&mut self) -> (ReflowReport, Vec<LayoutEvent>) {
        let mut events = Vec::new();
        let report = self.reflow(&mut |e| events.push(e));
        (report, events)
    }

    fn run_pass(&mut self) -> f64 {
        self.truncate_to_total();
        self.scroll_size = self.estimated_extent();

        let n = self.total_items;
        if n == 0 || self.viewport.main == 0.0 {
            if n == 0 {
                self.pin = None;
            }
            self.clear_items();
            return 0.0;
        }

        let view = self.viewport.main;
        let overhang = self.options.overhang;
        let mut scroll_error = 0.0;

        let (mut anchor, source) = if let Some(target) = self.pin {
            let index = target.index.min(n - 1);
            let position = self.scroll_into_view_position(index, target.align);
            scroll_error += position - self.scroll_position;
            self.scroll_position = position;
            let anchor = Anchor {
                index,
                position: self.position_of(index),
            };
            (anchor, AnchorSource::Pinned)
        } else {
            let clamped = self.scroll_position.clamp(0.0, self.max_scroll_position());
            if clamped != self.scroll_position {
                vdebug!(from = self.scroll_position, to = clamped, "scroll position clamped");
                scroll_error += clamped - self.scroll_position;
                self.scroll_position = clamped;
            }
            let lower = self.scroll_position - overhang;
            let upper = self.scroll_position + view + overhang;
            match self
                .retained
                .filter(|a| a.index < n && self.overlaps(a, lower, upper))
            {
                Some(anchor) => (anchor, AnchorSource::Retained),
                None => self.select_anchor(lower, upper),
            }
        };
        vtrace!(index = anchor.index, position = anchor.position, ?source, "anchor");

        if matches!(source, AnchorSource::Estimated | AnchorSource::Pinned) {
            self.size_deltas.clear();
        }

        let mut lower = self.scroll_position - overhang;
        let mut upper = self.scroll_position + view + overhang;

        let mut stable = true;
        let anchor_size = self.take_size(anchor.index, &mut stable);
        let lead = self.take_space(anchor.index, &mut stable);
        let trail = self.take_space(anchor.index + 1, &mut stable);
        if anchor.index == 0 {
            anchor.position = lead;
        }

        // An estimated anchor can land outside the bounds; move the viewport to it rather than
        // dropping the anchor.
        let mut anchor_err = 0.0;
        if anchor.position + anchor_size + trail < lower {
            anchor_err = lower - (anchor.position + anchor_size + trail);
        } else if anchor.position - lead > upper {
            anchor_err = upper - (anchor.position - lead);
        }
        if anchor_err != 0.0 {
            self.scroll_position -= anchor_err;
            lower -= anchor_err;
            upper -= anchor_err;
            scroll_error -= anchor_err;
        }

        let mut first = anchor.index;
        let mut last = anchor.index;
        let mut physical_min = anchor.position - lead;
        let mut physical_max = anchor.position + anchor_size + trail;
        let mut before = Vec::new();
        let mut after = Vec::new();

        while physical_min > lower && first > 0 {
            first -= 1;
            let size = self.take_size(first, &mut stable);
            let space = self.take_space(first, &mut stable);
            physical_min -= size;
            before.push(PhysicalItem {
                index: first,
                position: physical_min,
                size,
            });
            physical_min -= space;
            if !stable && !self.options.estimate {
                break;
            }
        }

        while physical_max < upper && last < n - 1 {
            last += 1;
            let size = self.take_size(last, &mut stable);
            let space = self.take_space(last + 1, &mut stable);
            after.push(PhysicalItem {
                index: last,
                position: physical_max,
                size,
            });
            physical_max += size + space;
            if !stable && !self.options.estimate {
                break;
            }
        }

        before.reverse();
        let mut items = before;
        items.push(PhysicalItem {
            index: anchor.index,
            position: anchor.position,
            size: anchor_size,
        });
        items.extend(after);

        // Corrections only land once every size in the window is real; provisional passes are
        // superseded as soon as the pending measurements arrive.
        if stable {
            let shift = if source == AnchorSource::Pinned {
                0.0
            } else {
                self.size_deltas.range(..anchor.index).map(|(_, d)| *d).sum::<f64>()
            };
            let err = self.extent_error(first, last, physical_min + shift, physical_max + shift);
            let offset = shift - err;
            if offset != 0.0 {
                for item in &mut items {
                    item.position += offset;
                }
                physical_max += offset;
                anchor.position += offset;
                self.scroll_position += offset;
                scroll_error += offset;
            }
            self.size_deltas.clear();
        }

        let remaining = (n - 1 - last) as f64 * self.average_delta();
        self.scroll_size = self
            .base_extent()
            .max(physical_max + remaining)
            .max(self.options.min_scroll_size);

        // The pin target was worked out from the previous pass; line it up again with where the
        // item landed and what it measures now.
        if let (AnchorSource::Pinned, Some(target)) = (source, self.pin) {
            let max = (self.scroll_size - view).max(0.0);
            let aligned =
                align_offset(anchor.position, anchor_size, view, target.align).clamp(0.0, max);
            let delta = aligned - self.scroll_position;
            if delta != 0.0 {
                vtrace!(index = anchor.index, delta, "pinned item realigned");
                self.scroll_position = aligned;
                scroll_error += delta;
            }
        }

        let (fv, lv) = visible_span(&items, self.scroll_position, view);

        self.range = Some(ItemRange {
            first,
            last,
            first_visible: items[fv].index,
            last_visible: items[lv].index,
        });
        self.stable = stable;
        self.anchor = Some(anchor);

        let map: BTreeMap<usize, PhysicalItem> = items.iter().map(|it| (it.index, *it)).collect();
        if *self.physical != map {
            self.physical = Arc::new(map);
        }

        if stable {
            self.settled = items;
            self.retained = None;
            if self.pin.take().is_some() {
                vdebug!(index = anchor.index, "scroll-to-index request honored");
            }
        } else {
            self.retained = Some(anchor);
        }

        scroll_error
    }

    fn clear_items(&mut self) {
        self.range = None;
        self.anchor = None;
        self.retained = None;
        self.stable = true;
        self.settled.clear();
        self.size_deltas.clear();
        if !self.physical.is_empty() {
            self.physical = Arc::new(BTreeMap::new());
        }
    }

    fn truncate_to_total(&mut self) {
        let n = self.total_items;
        self.settled.retain(|it| it.index < n);
        self.size_deltas.retain(|&i, _| i < n);
        if self.retained.is_some_and(|a| a.index >= n) {
            self.retained = None;
        }
        if self.physical.keys().next_back().is_some_and(|&last| last >= n) {
            let kept: BTreeMap<usize, PhysicalItem> =
                self.physical.range(..n).map(|(&i, &it)| (i, it)).collect();
            self.physical = Arc::new(kept);
        }
    }

    fn select_anchor(&self, lower: f64, upper: f64) -> (Anchor, AnchorSource) {
        if let (Some(head), Some(tail)) = (self.settled.first(), self.settled.last()) {
            if head.position <= upper && tail.end() >= lower {
                let target = self.scroll_position.clamp(head.position, tail.end());
                let i = self
                    .settled
                    .partition_point(|it| it.end() <= target)
                    .min(self.settled.len() - 1);
                let item = self.settled[i];
                let anchor = Anchor {
                    index: item.index,
                    position: item.position,
                };
                return (anchor, AnchorSource::Settled);
            }
        }

        let n = self.total_items;
        let index = if lower <= 0.0 {
            0
        } else if upper >= self.scroll_size {
            n - 1
        } else {
            let delta = self.average_delta();
            if delta > 0.0 {
                (((lower + upper) / (2.0 * delta)) as usize).min(n - 1)
            } else {
                0
            }
        };
        let anchor = Anchor {
            index,
            position: self.position_of(index),
        };
        (anchor, AnchorSource::Estimated)
    }

    fn overlaps(&self, anchor: &Anchor, lower: f64, upper: f64) -> bool {
        let size = self.metrics.size_of(anchor.index).value();
        anchor.position <= upper && anchor.position + size >= lower
    }

    fn extent_error(&self, first: usize, last: usize, physical_min: f64, physical_max: f64) -> f64 {
        let n = self.total_items;
        if first == 0 {
            physical_min
        } else if physical_min <= 0.0 {
            physical_min - first as f64 * self.average_delta()
        } else if last == n - 1 && physical_max < self.base_extent() {
            physical_max - self.base_extent()
        } else {
            0.0
        }
    }

    fn take_size(&mut self, index: usize, stable: &mut bool) -> f64 {
        match self.metrics.size_of(index) {
            Size::Measured(v) => v,
            Size::Estimated(v) => {
                *stable = false;
                self.metrics.note_estimate(index, v);
                v
            }
        }
    }

    fn take_space(&self, index: usize, stable: &mut bool) -> f64 {
        match self.space_before(index) {
            Size::Measured(v) => v,
            Size::Estimated(v) => {
                *stable = false;
                v
            }
        }
    }

    fn space_before(&self, index: usize) -> Size {
        let gap = if index > 0 && index < self.total_items {
            self.options.gap
        } else {
            0.0
        };
        match self.metrics.margin_before(index) {
            Size::Measured(v) => Size::Measured(v + gap),
            Size::Estimated(v) => Size::Estimated(v + gap),
        }
    }

    fn average_delta(&self) -> f64 {
        self.metrics.estimate() + self.metrics.average_margin() + self.options.gap
    }

    fn base_extent(&self) -> f64 {
        let n = self.total_items;
        if n == 0 {
            return 0.0;
        }
        n as f64 * self.average_delta() - self.options.gap + self.metrics.average_margin()
    }

    fn estimated_extent(&self) -> f64 {
        let n = self.total_items;
        let floor = self.options.min_scroll_size;
        if n == 0 {
            return floor;
        }
        let settled = match self.settled.last() {
            Some(tail) => {
                tail.end()
                    + self.space_before(tail.index + 1).value()
                    + (n - 1 - tail.index) as f64 * self.average_delta()
            }
            None => 0.0,
        };
        self.base_extent().max(settled).max(floor)
    }
}

/// Scroll position that puts an item at `start..start + size` at `align` in a viewport of
/// `view`. `Nearest` must already be resolved.
fn align_offset(start: f64, size: f64, view: f64, align: Align) -> f64 {
    match align {
        Align::Start | Align::Nearest => start,
        Align::Center => start + 0.5 * size - 0.5 * view,
        Align::End => start + size - view,
    }
}

/// Positions in `items` (non-empty, ascending) of the first and last entries intersecting
/// `[pos, pos + view)`.
fn visible_span(items: &[PhysicalItem], pos: f64, view: f64) -> (usize, usize) {
    let mut fv = 0;
    while fv + 1 < items.len() && items[fv].end() <= pos {
        fv += 1;
    }
    let mut lv = items.len() - 1;
    while lv > fv && items[lv].position >= pos + view {
        lv -= 1;
    }
    (fv, lv)
}
