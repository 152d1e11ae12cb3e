// Example: driving a Controller against a toy surface that "renders" rows into a map.
use std::collections::BTreeMap;

use virtual_flow::{LayoutOptions, Measurement, PhysicalItem};
use virtual_flow_adapter::{Controller, RenderSurface};

#[derive(Default)]
struct Rows {
    rows: BTreeMap<u64, (usize, f64)>,
    scroll: f64,
}

impl RenderSurface<u64> for Rows {
    fn bind(&mut self, key: &u64, index: usize) {
        self.rows.insert(*key, (index, 0.0));
    }

    fn release(&mut self, key: &u64) {
        self.rows.remove(key);
    }

    fn place(&mut self, key: &u64, item: PhysicalItem) {
        if let Some(row) = self.rows.get_mut(key) {
            row.1 = item.position;
        }
    }

    fn measure(&mut self, key: &u64) -> Option<Measurement> {
        // Every seventh row wraps onto two lines.
        let (index, _) = *self.rows.get(key)?;
        Some(Measurement::new(if index % 7 == 0 { 36.0 } else { 18.0 }))
    }

    fn set_scroll_size(&mut self, size: f64) {
        println!("  scroll_size={size}");
    }

    fn scroll_to(&mut self, position: f64) {
        self.scroll = position;
    }
}

fn main() {
    let mut c = Controller::new(LayoutOptions::new(18.0).with_overhang(200.0)).unwrap();
    c.set_total_items(50_000);
    c.set_viewport(400.0, 320.0).unwrap();
    let mut surface = Rows::default();

    let mut now_ms = 0;
    while !c.is_layout_complete() {
        let report = c.frame(&mut surface, now_ms);
        println!(
            "t={now_ms} bound={} released={} measured={}",
            report.bound, report.released, report.measured
        );
        now_ms += 16;
    }

    c.on_scroll(90_000.0).unwrap();
    while !c.is_layout_complete() {
        c.frame(&mut surface, now_ms);
        now_ms += 16;
    }
    println!(
        "scroll={} rows on screen: {:?}",
        surface.scroll,
        surface.rows.values().take(4).collect::<Vec<_>>()
    );
}
