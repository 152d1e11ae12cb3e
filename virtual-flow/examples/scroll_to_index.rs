// Example: jump to an item far away and keep it aligned while its neighbours get measured.
use virtual_flow::{Align, LayoutEngine, LayoutOptions, Measurement};

fn main() {
    let mut engine = LayoutEngine::new(LayoutOptions::new(50.0)).unwrap();
    engine.set_total_items(10_000);
    engine.set_viewport_size(500.0).unwrap();

    engine.scroll_to_index(7_500, Align::Center);
    for pass in 0.. {
        let (report, _) = engine.reflow_collect();
        println!(
            "pass {pass}: scroll={} error={} pinned={:?}",
            engine.scroll_position(),
            report.scroll_error,
            engine.pinned()
        );
        if report.stable {
            break;
        }
        let range = report.range.unwrap();
        for i in range.first..=range.last {
            let size = if i % 10 == 0 { 120.0 } else { 40.0 };
            engine.record_measurement(i, Measurement::new(size)).unwrap();
        }
    }

    let item = engine.item(7_500).unwrap();
    let center = item.position + item.size / 2.0 - engine.scroll_position();
    println!("item 7500 center sits at {center} in a 500px viewport");
}
