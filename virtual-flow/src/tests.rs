use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_range_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + unit * (end - start)
    }
}

fn engine(total: usize, viewport: f64) -> LayoutEngine {
    let mut e = LayoutEngine::new(LayoutOptions::new(50.0)).unwrap();
    e.set_total_items(total);
    e.set_viewport_size(viewport).unwrap();
    e
}

fn measure_window(e: &mut LayoutEngine, size: impl Fn(usize) -> f64) {
    let range = e.range().unwrap();
    for i in range.first..=range.last {
        e.record_measurement(i, Measurement::new(size(i))).unwrap();
    }
}

fn assert_covers_viewport(e: &LayoutEngine) {
    let Some(range) = e.range() else {
        return;
    };
    let pos = e.scroll_position();
    let view = e.viewport().main;
    let head = e.item(range.first).unwrap();
    let tail = e.item(range.last).unwrap();
    assert!(
        range.first == 0 || head.position <= pos,
        "window starts below the viewport: {head:?} vs {pos}"
    );
    assert!(
        range.last == e.total_items() - 1 || tail.end() >= pos + view,
        "window ends above the viewport: {tail:?} vs {}",
        pos + view
    );
}

/// Reflows and measures until a pass comes back stable.
fn settle(e: &mut LayoutEngine, size: impl Fn(usize) -> f64) -> Vec<LayoutEvent> {
    let mut all = Vec::new();
    for _ in 0..64 {
        let (report, events) = e.reflow_collect();
        all.extend(events);
        assert_covers_viewport(e);
        if report.stable {
            return all;
        }
        measure_window(e, &size);
    }
    panic!("layout did not settle");
}

fn scroll_errors(events: &[LayoutEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            LayoutEvent::ScrollErrorChanged { delta } => Some(*delta),
            _ => None,
        })
        .collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn range_change(range: Option<ItemRange>, stable: bool) -> RangeChange {
    RangeChange {
        range,
        stable,
        remeasure: false,
        axis: Axis::Vertical,
    }
}

/// Checks that `index` sits at `align` in the viewport, allowing for the extent clamp.
fn assert_aligned(e: &LayoutEngine, index: usize, align: Align) {
    let item = e.item(index).unwrap();
    let view = e.viewport().main;
    let want = match align {
        Align::Start | Align::Nearest => item.position,
        Align::Center => item.position + item.size / 2.0 - view / 2.0,
        Align::End => item.end() - view,
    };
    let want = want.clamp(0.0, e.max_scroll_position());
    assert!(
        close(e.scroll_position(), want),
        "{index} {align:?}: scroll {} != {want} ({item:?})",
        e.scroll_position()
    );
}

#[test]
fn first_pass_estimates_window_around_viewport() {
    let mut e = engine(1000, 500.0);
    let (report, events) = e.reflow_collect();

    let range = report.range.unwrap();
    assert_eq!((range.first, range.last), (0, 29));
    assert_eq!((range.first_visible, range.last_visible), (0, 9));
    assert!(!report.stable);
    assert_eq!(report.scroll_size, 50_000.0);
    assert_eq!(report.scroll_error, 0.0);

    assert!(events.contains(&LayoutEvent::RangeChanged(range_change(Some(range), false))));
    assert!(events.contains(&LayoutEvent::ScrollSizeChanged { size: 50_000.0 }));
    assert!(scroll_errors(&events).is_empty());

    let items = e.physical_items();
    assert_eq!(items.len(), 30);
    assert_eq!(items[&0].position, 0.0);
    assert_eq!(items[&29].position, 1450.0);
    assert_eq!(e.metrics().entry(3).unwrap().primary, Size::Estimated(50.0));
}

#[test]
fn measuring_the_window_converges_without_correction() {
    let mut e = engine(1000, 500.0);
    e.reflow_collect();
    measure_window(&mut e, |_| 50.0);

    let (report, events) = e.reflow_collect();
    assert!(report.stable);
    assert_eq!(report.scroll_error, 0.0);
    assert!(scroll_errors(&events).is_empty());
    assert_eq!(
        events,
        [LayoutEvent::RangeChanged(range_change(report.range, true))]
    );
}

#[test]
fn reflow_without_input_changes_is_silent() {
    let mut e = engine(1000, 500.0);
    settle(&mut e, |_| 50.0);
    let before = e.state();

    let (_, events) = e.reflow_collect();
    assert!(events.is_empty());
    assert_eq!(e.state(), before);
}

#[test]
fn scroll_to_last_index_aligns_end() {
    let mut e = engine(1000, 500.0);
    e.scroll_to_index(999, Align::End);

    let (report, events) = e.reflow_collect();
    let range = report.range.unwrap();
    assert_eq!(e.scroll_position(), 49_500.0);
    assert_eq!(range.last, 999);
    assert_eq!((range.first_visible, range.last_visible), (990, 999));
    assert_eq!(scroll_errors(&events), [49_500.0]);
    // Not honored until the window is measured.
    assert!(e.pinned().is_some());

    measure_window(&mut e, |_| 50.0);
    let (report, _) = e.reflow_collect();
    assert!(report.stable);
    assert_eq!(report.scroll_error, 0.0);
    assert_eq!(e.scroll_position(), 49_500.0);
    assert_eq!(e.item(999).unwrap().end(), 50_000.0);
    assert!(e.pinned().is_none());
}

#[test]
fn scroll_to_last_index_aligns_end_once_items_outgrow_the_estimate() {
    let mut e = engine(1000, 500.0);
    e.scroll_to_index(999, Align::End);
    let events = settle(&mut e, |_| 100.0);

    assert!(e.pinned().is_none());
    assert_eq!(e.scroll_size(), 100_000.0);
    assert_eq!(e.scroll_position(), 99_500.0);
    assert_eq!(e.item(999).unwrap().end(), 100_000.0);
    assert!(close(scroll_errors(&events).iter().sum(), 99_500.0));
}

#[test]
fn scroll_to_index_aligns_when_sizes_differ_from_estimate() {
    for size in [100.0, 80.0, 30.0] {
        for align in [Align::Start, Align::Center, Align::End] {
            for index in [0, 500, 999] {
                let mut e = engine(1000, 500.0);
                e.scroll_to_index(index, align);
                settle(&mut e, |_| size);

                assert!(e.pinned().is_none(), "{size} {align:?} {index}");
                assert_aligned(&e, index, align);
                assert!(e.range().unwrap().is_visible(index));
            }
        }
    }
}

#[test]
fn nearest_resolves_against_the_window_midpoint() {
    let mut e = engine(1000, 500.0);
    settle(&mut e, |_| 80.0);

    e.scroll_to_index(600, Align::Nearest);
    assert_eq!(e.pinned().unwrap().align, Align::End);
    settle(&mut e, |_| 80.0);
    assert_aligned(&e, 600, Align::End);

    let first = e.range().unwrap().first;
    e.scroll_to_index(first, Align::Nearest);
    assert_eq!(e.pinned().unwrap().align, Align::Start);
    settle(&mut e, |_| 80.0);
    assert_aligned(&e, first, Align::Start);

    let fresh = engine(10, 500.0);
    assert_eq!(fresh.resolve_align(9, Align::Nearest), Align::Start);
    assert_eq!(fresh.resolve_align(9, Align::Center), Align::Center);
}

#[test]
fn scroll_to_index_clamps_out_of_range_targets() {
    let mut e = engine(1000, 500.0);
    e.scroll_to_index(5000, Align::Start);
    let (report, _) = e.reflow_collect();

    assert_eq!(report.range.unwrap().last, 999);
    assert_eq!(e.anchor().unwrap().index, 999);
    assert_eq!(e.scroll_position(), e.max_scroll_position());
}

#[test]
fn growth_above_anchor_shifts_content_and_reports_scroll_error() {
    let mut e = engine(1000, 500.0);
    e.set_scroll_position(300.0).unwrap();
    settle(&mut e, |_| 50.0);
    assert_eq!(e.item(6).unwrap().position, 300.0);

    assert!(e.record_measurement(0, Measurement::new(120.0)).unwrap());
    let (report, events) = e.reflow_collect();

    assert!(report.stable);
    assert_eq!(scroll_errors(&events), [70.0]);
    assert_eq!(e.anchor().unwrap().index, 6);
    assert_eq!(e.item(6).unwrap().position, 370.0);
    assert_eq!(e.scroll_position(), 370.0);
    assert_eq!(e.item(0).unwrap().position, 0.0);
    assert_eq!(e.item(1).unwrap().position, 120.0);
}

#[test]
fn size_corrections_wait_for_a_stable_pass() {
    let mut e = engine(1000, 500.0);
    e.set_scroll_position(300.0).unwrap();
    settle(&mut e, |_| 50.0);

    e.record_measurement(0, Measurement::new(120.0)).unwrap();
    e.set_scroll_position(1500.0).unwrap();

    // The window now reaches unmeasured items: no correction yet.
    let (report, events) = e.reflow_collect();
    assert!(!report.stable);
    assert!(scroll_errors(&events).is_empty());
    assert_eq!(e.anchor().unwrap().index, 30);
    assert_eq!(e.item(30).unwrap().position, 1500.0);

    measure_window(&mut e, |_| 50.0);
    let (report, events) = e.reflow_collect();
    assert!(report.stable);
    assert_eq!(scroll_errors(&events), [70.0]);
    assert_eq!(e.item(30).unwrap().position, 1570.0);
    assert_eq!(e.scroll_position(), 1570.0);
}

#[test]
fn anchor_keeps_its_viewport_offset_across_remeasurement() {
    let mut rng = Lcg::new(0x5eed_cafe);
    for round in 0..24 {
        let total = 500;
        let sizes: Vec<f64> = (0..total).map(|_| rng.gen_range_f64(20.0, 120.0)).collect();
        let mut e = engine(total, 400.0);
        settle(&mut e, |i| sizes[i]);

        let target = rng.gen_range_f64(0.0, e.max_scroll_position() * 0.5);
        e.set_scroll_position(target).unwrap();
        settle(&mut e, |i| sizes[i]);
        e.reflow_collect();

        let anchor = e.anchor().unwrap();
        let offset = anchor.position - e.scroll_position();
        let range = e.range().unwrap();

        let mut resized = sizes.clone();
        for _ in 0..6 {
            let i = rng.gen_range_usize(range.first, range.last + 1);
            resized[i] = rng.gen_range_f64(20.0, 120.0);
            e.record_measurement(i, Measurement::new(resized[i])).unwrap();
        }
        e.reflow_collect();

        assert_eq!(e.anchor().unwrap().index, anchor.index, "round {round}");
        let now = e.item(anchor.index).unwrap().position - e.scroll_position();
        assert!(close(now, offset), "round {round}: {now} != {offset}");
        assert_covers_viewport(&e);
    }
}

#[test]
fn window_covers_viewport_at_random_positions() {
    let mut rng = Lcg::new(42);
    let total = 2000;
    let sizes: Vec<f64> = (0..total).map(|_| rng.gen_range_f64(10.0, 200.0)).collect();
    let mut e = engine(total, 600.0);
    settle(&mut e, |i| sizes[i]);

    for _ in 0..40 {
        let target = rng.gen_range_f64(0.0, e.max_scroll_position());
        e.set_scroll_position(target).unwrap();
        settle(&mut e, |i| sizes[i]);
    }
}

#[test]
fn positions_increase_and_follow_measured_sizes() {
    let mut rng = Lcg::new(7);
    let total = 300;
    let sizes: Vec<f64> = (0..total).map(|_| rng.gen_range_f64(5.0, 80.0)).collect();
    let mut e = LayoutEngine::new(LayoutOptions::new(40.0).with_gap(4.0)).unwrap();
    e.set_total_items(total);
    e.set_viewport_size(300.0).unwrap();
    settle(&mut e, |i| sizes[i]);

    let items: Vec<PhysicalItem> = e.physical_items().values().copied().collect();
    for pair in items.windows(2) {
        assert_eq!(pair[1].index, pair[0].index + 1);
        assert!(close(pair[1].position, pair[0].end() + 4.0));
        assert_eq!(pair[0].size, sizes[pair[0].index]);
    }
}

#[test]
fn emptying_the_list_publishes_the_empty_state() {
    let mut e = engine(1000, 500.0);
    e.reflow_collect();

    assert!(e.set_total_items(0));
    let (report, events) = e.reflow_collect();
    assert_eq!(report.range, None);
    assert!(events.contains(&LayoutEvent::RangeChanged(range_change(None, true))));
    assert!(events.contains(&LayoutEvent::ScrollSizeChanged { size: 1.0 }));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, LayoutEvent::ItemPositionsChanged(items) if items.is_empty()))
    );

    let state = e.state();
    assert_eq!(state.anchor, None);
    assert_eq!(state.scroll_size, 1.0);
    assert!(e.physical_items().is_empty());
}

#[test]
fn zero_viewport_publishes_the_empty_state() {
    let mut e = engine(100, 0.0);
    let (report, _) = e.reflow_collect();
    assert_eq!(report.range, None);
    assert_eq!(report.scroll_size, 5000.0);
}

#[test]
fn shrinking_the_count_truncates_the_window() {
    let mut e = engine(1000, 500.0);
    e.reflow_collect();

    e.set_total_items(10);
    let (report, events) = e.reflow_collect();
    let range = report.range.unwrap();
    assert_eq!((range.first, range.last), (0, 9));
    assert_eq!(e.physical_items().keys().next_back(), Some(&9));
    assert_eq!(report.scroll_size, 500.0);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, LayoutEvent::ItemPositionsChanged(items) if items.len() == 10))
    );
    assert!(matches!(
        e.record_measurement(10, Measurement::new(1.0)),
        Err(LayoutError::IndexOutOfRange { index: 10, total: 10 })
    ));
}

#[test]
fn measurement_outside_window_only_updates_the_estimate() {
    let mut e = engine(1000, 500.0);
    e.reflow_collect();

    assert!(!e.record_measurement(800, Measurement::new(100.0)).unwrap());
    assert_eq!(e.metrics().estimate(), 100.0);
    assert!(e.record_measurement(3, Measurement::new(50.0)).unwrap());
    // Same value again: nothing to do.
    assert!(!e.record_measurement(3, Measurement::new(50.0)).unwrap());
}

#[test]
fn estimate_off_grows_window_one_item_at_a_time() {
    let mut e = LayoutEngine::new(LayoutOptions::new(50.0).with_estimate(false)).unwrap();
    e.set_total_items(100);
    e.set_viewport_size(500.0).unwrap();

    let (report, _) = e.reflow_collect();
    let range = report.range.unwrap();
    assert_eq!((range.first, range.last), (0, 1));

    measure_window(&mut e, |_| 50.0);
    let (report, _) = e.reflow_collect();
    assert_eq!(report.range.unwrap().last, 2);
    assert!(!report.stable);
}

#[test]
fn margins_collapse_between_neighbours() {
    assert_eq!(collapse_margins(10.0, 20.0), 20.0);
    assert_eq!(collapse_margins(10.0, -5.0), 5.0);
    assert_eq!(collapse_margins(-3.0, -5.0), -5.0);

    let mut e = engine(3, 500.0);
    e.reflow_collect();
    let m = Measurement::new(50.0).with_margins(Margins::new(10.0, 20.0));
    e.record_measurements((0..3).map(|i| (i, m))).unwrap();

    let (report, _) = e.reflow_collect();
    assert!(report.stable);
    assert_eq!(e.item(0).unwrap().position, 10.0);
    assert_eq!(e.item(1).unwrap().position, 80.0);
    assert_eq!(e.item(2).unwrap().position, 150.0);
    assert_eq!(report.scroll_size, 220.0);
}

#[test]
fn cross_axis_resize_invalidates_measurements() {
    let mut e = LayoutEngine::new(LayoutOptions::default()).unwrap();
    e.set_total_items(100);
    e.set_viewport(Viewport::new(500.0, 300.0)).unwrap();
    settle(&mut e, |_| 50.0);
    assert!(e.metrics().measured_len() > 0);

    let change = e.set_viewport(Viewport::new(500.0, 200.0)).unwrap();
    assert_eq!(change, ViewportChange { main: false, cross: true });
    assert_eq!(e.metrics().measured_len(), 0);

    let (report, events) = e.reflow_collect();
    assert!(!report.stable);
    assert!(events.contains(&LayoutEvent::RangeChanged(RangeChange {
        remeasure: true,
        ..range_change(report.range, false)
    })));

    // The flag is carried by one pass only.
    measure_window(&mut e, |_| 50.0);
    let (report, events) = e.reflow_collect();
    assert!(events.contains(&LayoutEvent::RangeChanged(range_change(report.range, true))));
}

#[test]
fn range_events_carry_the_scroll_axis() {
    let mut e = LayoutEngine::new(LayoutOptions::new(50.0).with_axis(Axis::Horizontal)).unwrap();
    e.set_total_items(10);
    e.set_viewport_size(300.0).unwrap();

    let (_, events) = e.reflow_collect();
    let axes: Vec<Axis> = events
        .iter()
        .filter_map(|e| match e {
            LayoutEvent::RangeChanged(change) => Some(change.axis),
            _ => None,
        })
        .collect();
    assert_eq!(axes, [Axis::Horizontal]);
}

#[test]
fn small_scrolls_inside_the_window_skip_the_reflow() {
    let mut e = engine(1000, 500.0);
    e.set_scroll_position(2010.0).unwrap();
    settle(&mut e, |_| 50.0);
    let range = e.range().unwrap();
    assert_eq!((range.first, range.last), (20, 70));
    assert_eq!((range.first_visible, range.last_visible), (40, 50));
    assert!(!e.needs_reflow());

    e.set_scroll_position(2050.0).unwrap();
    assert!(!e.needs_reflow());
    let change = e.update_visible_range().unwrap();
    let moved = change.range.unwrap();
    assert_eq!((moved.first, moved.last), (20, 70));
    assert_eq!((moved.first_visible, moved.last_visible), (41, 50));
    assert!(change.stable);
    assert_eq!(e.update_visible_range(), None);

    // A later pass re-anchors at the new position and agrees on what is visible.
    e.reflow_collect();
    let range = e.range().unwrap();
    assert_eq!((range.first_visible, range.last_visible), (41, 50));

    e.set_scroll_position(2100.0).unwrap();
    assert!(e.needs_reflow());
    e.set_scroll_position(-5.0).unwrap();
    assert!(e.needs_reflow());
}

#[test]
fn invalid_inputs_are_rejected_and_state_kept() {
    let mut e = engine(10, 500.0);
    e.reflow_collect();
    let before = e.state();

    assert!(matches!(
        e.set_viewport_size(f64::NAN),
        Err(LayoutError::InvalidViewportSize(v)) if v.is_nan()
    ));
    assert!(matches!(
        e.set_viewport_size(-1.0),
        Err(LayoutError::InvalidViewportSize(_))
    ));
    assert!(matches!(
        e.set_scroll_position(f64::INFINITY),
        Err(LayoutError::InvalidScrollPosition(_))
    ));
    assert!(matches!(
        e.record_measurement(2, Measurement::new(-5.0)),
        Err(LayoutError::InvalidMeasurement { index: 2, .. })
    ));
    assert!(matches!(
        e.record_measurement(2, Measurement::new(5.0).with_margins(Margins::new(f64::NAN, 0.0))),
        Err(LayoutError::InvalidMeasurement { .. })
    ));
    assert!(!e.metrics().is_measured(2));
    assert_eq!(e.state(), before);

    assert!(matches!(
        LayoutEngine::new(LayoutOptions::default().with_overhang(-1.0)),
        Err(LayoutError::InvalidOption { name: "overhang", .. })
    ));
    assert!(LayoutOptions::default().with_min_scroll_size(0.0).validate().is_err());
}

#[test]
fn user_scroll_cancels_pending_scroll_to_index() {
    let mut e = engine(1000, 500.0);
    e.scroll_to_index(500, Align::Center);
    e.reflow_collect();
    assert!(e.pinned().is_some());

    // Echoing back the corrected position keeps the request.
    let pos = e.scroll_position();
    assert!(!e.set_scroll_position(pos).unwrap());
    assert!(e.pinned().is_some());

    e.set_scroll_position(10.0).unwrap();
    assert!(e.pinned().is_none());
}

#[test]
fn scroll_into_view_positions_by_alignment() {
    let mut e = engine(1000, 500.0);
    settle(&mut e, |_| 50.0);

    assert_eq!(e.scroll_into_view_position(20, Align::Start), 1000.0);
    assert_eq!(e.scroll_into_view_position(20, Align::End), 550.0);
    assert_eq!(e.scroll_into_view_position(20, Align::Center), 775.0);
    // The window is 0..=29: the first half aligns to the start, the rest to the end.
    assert_eq!(e.scroll_into_view_position(15, Align::Nearest), 750.0);
    assert_eq!(e.scroll_into_view_position(20, Align::Nearest), 550.0);
    assert_eq!(e.scroll_into_view_position(0, Align::End), 0.0);
}

#[test]
fn reset_forgets_measurements_but_keeps_scroll() {
    let mut e = engine(1000, 500.0);
    e.set_scroll_position(2000.0).unwrap();
    settle(&mut e, |_| 50.0);

    e.reset();
    assert_eq!(e.anchor(), None);
    assert!(e.metrics().is_empty());
    assert_eq!(e.scroll_position(), 2000.0);

    let (report, _) = e.reflow_collect();
    assert!(!report.stable);
    assert!(report.range.unwrap().is_visible(40));
}

#[test]
fn metrics_store_tracks_running_average() {
    let mut store = MetricsStore::new(25.0);
    assert_eq!(store.estimate(), 25.0);
    assert_eq!(store.size_of(4), Size::Estimated(25.0));

    assert_eq!(
        store.record_measurement(0, Measurement::new(10.0)).unwrap(),
        Size::Estimated(25.0)
    );
    store.record_measurement(1, Measurement::new(30.0)).unwrap();
    assert_eq!(store.estimate(), 20.0);

    assert_eq!(
        store.record_measurement(1, Measurement::new(50.0)).unwrap(),
        Size::Measured(30.0)
    );
    assert_eq!(store.estimate(), 30.0);
    assert_eq!(store.measured_len(), 2);
    assert_eq!(store.total_measured_size(), 60.0);
}

#[test]
fn metrics_export_import_restores_estimate() {
    let mut store = MetricsStore::new(50.0);
    store
        .record_measurement(3, Measurement::new(12.0).with_secondary(200.0))
        .unwrap();
    store.record_measurement(9, Measurement::new(18.0)).unwrap();
    let exported = store.export();
    assert_eq!(exported.len(), 2);

    let mut restored = MetricsStore::new(50.0);
    restored.import(exported.clone()).unwrap();
    assert_eq!(restored.estimate(), 15.0);
    assert_eq!(restored.secondary_of(3), Some(200.0));

    let bad = [(1, Measurement::new(f64::NAN))];
    assert!(restored.import(bad).is_err());
    assert_eq!(restored.export(), exported);
}

#[test]
fn scheduler_coalesces_invalidations_into_one_frame() {
    let frames = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&frames);
    let mut s = ReflowScheduler::new().with_frame_requester(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(s.begin_pass(), None);

    assert!(s.invalidate(Invalidation::SCROLL));
    assert!(!s.invalidate(Invalidation::MEASUREMENT));
    assert!(!s.invalidate(Invalidation::SCROLL));
    assert_eq!(frames.load(Ordering::SeqCst), 1);
    assert!(s.is_pending());

    let reasons = s.begin_pass().unwrap();
    assert!(reasons.contains(Invalidation::SCROLL | Invalidation::MEASUREMENT));
    assert!(!reasons.contains(Invalidation::VIEWPORT));
    assert_eq!(s.state(), SchedulerState::Idle);

    assert!(!s.invalidate(Invalidation::NONE));
    assert!(s.invalidate(Invalidation::VIEWPORT));
    assert_eq!(frames.load(Ordering::SeqCst), 2);
    assert_eq!(s.frames_requested(), 2);
}

#[test]
fn invalidation_debug_lists_flags() {
    let reasons = Invalidation::ITEMS | Invalidation::RESET;
    assert_eq!(std::format!("{reasons:?}"), "{ITEMS, RESET}");
    assert!(reasons.needs_reflow());
    assert!(!Invalidation::VISIBLE_RANGE.needs_reflow());
    assert!((Invalidation::VISIBLE_RANGE | Invalidation::SCROLL).needs_reflow());
}

#[test]
fn example_basic_smoke_large_count() {
    let mut e = engine(1_000_000, 800.0);
    e.set_scroll_position(25_000_000.0).unwrap();
    let events = settle(&mut e, |i| 20.0 + (i % 7) as f64 * 10.0);

    let range = e.range().unwrap();
    assert!(range.len() < 200);
    assert!(!events.is_empty());
    assert_covers_viewport(&e);
}
