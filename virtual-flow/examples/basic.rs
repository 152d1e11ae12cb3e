// Example: a million rows, estimated first, then measured into place.
use virtual_flow::{LayoutEngine, LayoutEvent, LayoutOptions, Measurement};

fn main() {
    let mut engine = LayoutEngine::new(LayoutOptions::new(20.0)).unwrap();
    engine.set_total_items(1_000_000);
    engine.set_viewport_size(600.0).unwrap();
    engine.set_scroll_position(5_000_000.0).unwrap();

    for pass in 0.. {
        let report = engine.reflow(&mut |event| match event {
            LayoutEvent::RangeChanged(change) => println!("  range={:?}", change.range),
            LayoutEvent::ScrollSizeChanged { size } => println!("  scroll_size={size}"),
            LayoutEvent::ScrollErrorChanged { delta } => println!("  scroll_error={delta}"),
            LayoutEvent::ItemPositionsChanged(items) => println!("  {} items placed", items.len()),
        });
        println!("pass {pass}: stable={}", report.stable);
        if report.stable {
            break;
        }

        // A real surface would render the window and report what it sees.
        let range = engine.range().unwrap();
        for i in range.first..=range.last {
            let size = 16.0 + (i % 5) as f64 * 4.0;
            engine.record_measurement(i, Measurement::new(size)).unwrap();
        }
    }

    let range = engine.range().unwrap();
    println!(
        "visible {}..={} at scroll {}",
        range.first_visible,
        range.last_visible,
        engine.scroll_position()
    );
}
