// Example: an item above the viewport grows, and the content under the viewport stays put.
use virtual_flow::{LayoutEngine, LayoutOptions, Measurement};

fn main() {
    let mut engine = LayoutEngine::new(LayoutOptions::new(50.0)).unwrap();
    engine.set_total_items(1000);
    engine.set_viewport_size(500.0).unwrap();
    engine.set_scroll_position(300.0).unwrap();

    loop {
        let (report, _) = engine.reflow_collect();
        if report.stable {
            break;
        }
        let range = report.range.unwrap();
        for i in range.first..=range.last {
            engine.record_measurement(i, Measurement::new(50.0)).unwrap();
        }
    }

    let before = engine.item(6).unwrap().position - engine.scroll_position();
    println!("item 6 is {before} below the viewport top");

    // Item 0 turns out to be taller than first reported.
    engine.record_measurement(0, Measurement::new(120.0)).unwrap();
    let (report, _) = engine.reflow_collect();

    let after = engine.item(6).unwrap().position - engine.scroll_position();
    println!(
        "scroll_error={} scroll={} item 6 is still {after} below the viewport top",
        report.scroll_error,
        engine.scroll_position()
    );
}
