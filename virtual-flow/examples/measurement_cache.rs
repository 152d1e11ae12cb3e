// Example: persist measurements and restore them on the next launch.
use virtual_flow::{LayoutEngine, LayoutOptions, Measurement, MetricsStore};

fn main() {
    let mut engine = LayoutEngine::new(LayoutOptions::new(40.0)).unwrap();
    engine.set_total_items(500);
    engine.set_viewport_size(400.0).unwrap();
    engine.reflow_collect();

    let range = engine.range().unwrap();
    for i in range.first..=range.last {
        engine
            .record_measurement(i, Measurement::new(30.0 + (i % 3) as f64 * 10.0))
            .unwrap();
    }

    let cache = engine.metrics().export();
    println!("cached {} measurements", cache.len());

    // Next launch: seed a fresh store from the cache.
    let mut store = MetricsStore::new(40.0);
    store.import(cache).unwrap();
    println!(
        "restored {} measurements, estimate for unmeasured items = {}",
        store.measured_len(),
        store.estimate()
    );
}
