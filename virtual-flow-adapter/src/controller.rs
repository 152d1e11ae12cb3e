use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use virtual_flow::{
    Align, Invalidation, LayoutEngine, LayoutEvent, LayoutOptions, PhysicalItems, RangeChange,
    ReflowReport, ReflowScheduler, Result, Viewport,
};

use crate::key::{KeyMap, KeySet};
use crate::{Easing, ItemKey, RenderSurface, Tween};

type KeyFn<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct SmoothScroll {
    tween: Tween,
    index: usize,
    align: Align,
}

/// What one call to [`Controller::frame`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Coalesced invalidation reasons, or `None` if no pass was due.
    pub reasons: Option<Invalidation>,
    pub pass: Option<ReflowReport>,
    /// Targets bound for keys that were not on screen before.
    pub bound: usize,
    /// Targets whose key stayed but moved to another index.
    pub rebound: usize,
    pub released: usize,
    pub measured: usize,
    /// Targets the surface could not measure yet; retried on the next frame.
    pub deferred: usize,
    /// Measurements the engine refused.
    pub rejected: usize,
}

/// A framework-neutral controller that runs a [`LayoutEngine`] against a [`RenderSurface`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `set_viewport` / `on_scroll` / `on_item_resized` when UI events occur
/// - `frame(surface, now_ms)` whenever the frame requester fires (and on every animation frame
///   while a smooth scroll runs)
///
/// A scroll that stays inside the rendered window only moves the visible sub-range; the next
/// frame reports it through [`RenderSurface::range_changed`] without a reflow.
///
/// Render targets are keyed by `get_item_key(index)`, so a target survives as long as its key
/// stays inside the window.
pub struct Controller<K = u64> {
    engine: LayoutEngine,
    scheduler: ReflowScheduler,
    get_item_key: KeyFn<K>,
    targets: KeyMap<K, usize>,
    resized: KeySet<K>,
    visible: Option<RangeChange>,
    smooth: Option<SmoothScroll>,
    events: Vec<LayoutEvent>,
}

impl Controller<u64> {
    /// Creates a controller keyed by item index.
    pub fn new(options: LayoutOptions) -> Result<Self> {
        Self::new_with_key(options, |i| i as u64)
    }
}

impl<K: ItemKey> Controller<K> {
    pub fn new_with_key(
        options: LayoutOptions,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Result<Self> {
        Ok(Self {
            engine: LayoutEngine::new(options)?,
            scheduler: ReflowScheduler::new(),
            get_item_key: Arc::new(get_item_key),
            targets: KeyMap::new(),
            resized: KeySet::new(),
            visible: None,
            smooth: None,
            events: Vec::new(),
        })
    }

    /// Installs the callback used to ask the host for a frame.
    pub fn with_frame_requester(mut self, requester: impl Fn() + Send + Sync + 'static) -> Self {
        self.scheduler.set_frame_requester(Some(Arc::new(requester)));
        self
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &ReflowScheduler {
        &self.scheduler
    }

    /// Number of render targets currently bound.
    pub fn bound_len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_bound(&self, key: &K) -> bool {
        self.targets.contains_key(key)
    }

    pub fn is_animating(&self) -> bool {
        self.smooth.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.smooth = None;
    }

    pub fn set_total_items(&mut self, total_items: usize) {
        if self.engine.set_total_items(total_items) {
            self.scheduler.invalidate(Invalidation::TOTAL_ITEMS);
        }
    }

    /// Call this when the data changed in place (reordered, replaced) without a count change.
    pub fn items_changed(&mut self) {
        self.scheduler.invalidate(Invalidation::ITEMS);
    }

    pub fn set_get_item_key(&mut self, get_item_key: impl Fn(usize) -> K + Send + Sync + 'static) {
        self.get_item_key = Arc::new(get_item_key);
        self.items_changed();
    }

    /// Updates the viewport. A cross-axis change re-measures every bound target.
    pub fn set_viewport(&mut self, main: f64, cross: f64) -> Result<()> {
        let change = self.engine.set_viewport(Viewport::new(main, cross))?;
        if change.any() {
            self.scheduler.invalidate(Invalidation::VIEWPORT);
        }
        Ok(())
    }

    /// Call this when the UI reports a scroll position change (e.g. user wheel/drag).
    ///
    /// This cancels any active smooth scroll. A reflow is only scheduled once the rendered
    /// window stops covering the viewport plus the overhang.
    pub fn on_scroll(&mut self, position: f64) -> Result<()> {
        self.cancel_animation();
        if !self.engine.set_scroll_position(position)? {
            return Ok(());
        }
        if self.engine.needs_reflow() {
            self.scheduler.invalidate(Invalidation::SCROLL);
        } else if let Some(change) = self.engine.update_visible_range() {
            self.visible = Some(change);
            self.scheduler.invalidate(Invalidation::VISIBLE_RANGE);
        }
        Ok(())
    }

    /// Call this when the target showing `index` changed size on its own.
    pub fn on_item_resized(&mut self, index: usize) {
        let key = (self.get_item_key)(index);
        if self.targets.contains_key(&key) {
            self.resized.insert(key);
            self.scheduler.invalidate(Invalidation::MEASUREMENT);
        }
    }

    /// Scrolls `index` into view and keeps it there until its neighbourhood is measured.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        self.cancel_animation();
        self.engine.scroll_to_index(index, align);
        self.scheduler.invalidate(Invalidation::SCROLL_TO_INDEX);
    }

    /// Starts an eased scroll towards `index`.
    ///
    /// The destination is re-evaluated on every frame as measurements come in. When the tween
    /// ends, the controller falls back to [`Self::scroll_to_index`] to land exactly.
    pub fn smooth_scroll_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) {
        let align = self.engine.resolve_align(index, align);
        let from = self.engine.scroll_position();
        let to = self.engine.scroll_into_view_position(index, align);
        vdebug!(index, from, to, duration_ms, "smooth_scroll_to_index");
        self.engine.unpin();
        self.smooth = Some(SmoothScroll {
            tween: Tween::new(from, to, now_ms, duration_ms, easing),
            index,
            align,
        });
        self.scheduler.invalidate(Invalidation::SCROLL);
    }

    /// Drops every measurement (the dataset was replaced) and re-measures the bound targets.
    pub fn reset(&mut self) {
        self.cancel_animation();
        self.engine.reset();
        self.scheduler.invalidate(Invalidation::RESET);
    }

    /// Whether the layout has settled: no pass pending, the last pass was stable, no animation
    /// or scroll-to-index request in flight and nothing left to measure.
    pub fn is_layout_complete(&self) -> bool {
        !self.scheduler.is_pending()
            && self.engine.is_stable()
            && self.engine.pinned().is_none()
            && self.smooth.is_none()
            && self.resized.is_empty()
            && self
                .targets
                .values()
                .all(|&i| self.engine.metrics().is_measured(i))
    }

    /// Runs one tick: advances a smooth scroll, runs the scheduled pass (if any), applies its
    /// events to `surface` and feeds new measurements back to the engine.
    pub fn frame<S>(&mut self, surface: &mut S, now_ms: u64) -> FrameReport
    where
        S: RenderSurface<K> + ?Sized,
    {
        let mut report = FrameReport::default();
        self.advance_smooth_scroll(surface, now_ms);

        let Some(reasons) = self.scheduler.begin_pass() else {
            return report;
        };
        report.reasons = Some(reasons);

        if let Some(change) = self.visible.take() {
            surface.range_changed(&change);
        }
        if !reasons.needs_reflow() {
            return report;
        }

        let mut events = core::mem::take(&mut self.events);
        report.pass = Some(self.engine.reflow(&mut |e| events.push(e)));

        let mut reconciled = false;
        for event in events.drain(..) {
            match event {
                LayoutEvent::RangeChanged(change) => surface.range_changed(&change),
                LayoutEvent::ItemPositionsChanged(items) => {
                    self.reconcile(surface, &items, &mut report);
                    reconciled = true;
                }
                LayoutEvent::ScrollSizeChanged { size } => surface.set_scroll_size(size),
                LayoutEvent::ScrollErrorChanged { delta } => {
                    vtrace!(delta, "applying scroll error");
                    surface.scroll_to(self.engine.scroll_position());
                    if let Some(smooth) = &mut self.smooth {
                        smooth.tween.shift(delta);
                    }
                }
            }
        }
        self.events = events;

        if !reconciled && reasons.contains(Invalidation::ITEMS) {
            let items = Arc::clone(self.engine.physical_items());
            self.reconcile(surface, &items, &mut report);
        }
        self.measure_targets(surface, &mut report);

        if self.smooth.is_some() {
            self.scheduler.invalidate(Invalidation::SCROLL);
        }
        vtrace!(
            bound = report.bound,
            released = report.released,
            measured = report.measured,
            "frame"
        );
        report
    }

    fn advance_smooth_scroll<S>(&mut self, surface: &mut S, now_ms: u64)
    where
        S: RenderSurface<K> + ?Sized,
    {
        let Some(mut smooth) = self.smooth else {
            return;
        };
        smooth.tween.to = self
            .engine
            .scroll_into_view_position(smooth.index, smooth.align);

        if smooth.tween.is_done(now_ms) {
            self.smooth = None;
            self.engine.scroll_to_index(smooth.index, smooth.align);
            self.scheduler.invalidate(Invalidation::SCROLL_TO_INDEX);
            return;
        }

        self.smooth = Some(smooth);
        let position = smooth.tween.sample(now_ms);
        if let Ok(true) = self.engine.set_scroll_position(position) {
            surface.scroll_to(position);
            self.scheduler.invalidate(Invalidation::SCROLL);
        }
    }

    fn reconcile<S>(&mut self, surface: &mut S, items: &PhysicalItems, report: &mut FrameReport)
    where
        S: RenderSurface<K> + ?Sized,
    {
        let mut next = KeyMap::new();
        for item in items.values() {
            let key = (self.get_item_key)(item.index);
            match self.targets.remove(&key) {
                Some(old) if old == item.index => {}
                Some(_) => {
                    surface.bind(&key, item.index);
                    self.resized.insert(key.clone());
                    report.rebound += 1;
                }
                None => {
                    surface.bind(&key, item.index);
                    report.bound += 1;
                }
            }
            surface.place(&key, *item);
            next.insert(key, item.index);
        }

        let stale = core::mem::replace(&mut self.targets, next);
        for key in stale.into_keys() {
            surface.release(&key);
            self.resized.remove(&key);
            report.released += 1;
        }
    }

    fn measure_targets<S>(&mut self, surface: &mut S, report: &mut FrameReport)
    where
        S: RenderSurface<K> + ?Sized,
    {
        let pending: Vec<(K, usize)> = self
            .targets
            .iter()
            .filter(|(key, index)| {
                self.resized.contains(*key) || !self.engine.metrics().is_measured(**index)
            })
            .map(|(key, &index)| (key.clone(), index))
            .collect();

        let mut touched = false;
        for (key, index) in pending {
            // Not laid out yet: keep the key pending and try again next frame.
            let Some(measurement) = surface.measure(&key) else {
                report.deferred += 1;
                continue;
            };
            self.resized.remove(&key);
            match self.engine.record_measurement(index, measurement) {
                Ok(in_window) => {
                    report.measured += 1;
                    touched |= in_window;
                }
                Err(_err) => {
                    vwarn!(index, error = %_err, "measurement rejected");
                    report.rejected += 1;
                }
            }
        }
        if touched || report.deferred > 0 {
            self.scheduler.invalidate(Invalidation::MEASUREMENT);
        }
    }
}

impl<K> fmt::Debug for Controller<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("scheduler", &self.scheduler)
            .field("targets", &self.targets.len())
            .field("smooth", &self.smooth)
            .finish_non_exhaustive()
    }
}
