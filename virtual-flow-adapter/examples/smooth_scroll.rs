// Example: an eased scroll to a distant item, landing exactly once it is measured.
use virtual_flow::{Align, LayoutOptions, Measurement, PhysicalItem};
use virtual_flow_adapter::{Controller, Easing, RenderSurface};

#[derive(Default)]
struct Offsets {
    scroll: f64,
    bound: std::collections::HashMap<u64, usize>,
}

impl RenderSurface<u64> for Offsets {
    fn bind(&mut self, key: &u64, index: usize) {
        self.bound.insert(*key, index);
    }

    fn release(&mut self, key: &u64) {
        self.bound.remove(key);
    }

    fn place(&mut self, _key: &u64, _item: PhysicalItem) {}

    fn measure(&mut self, key: &u64) -> Option<Measurement> {
        let index = *self.bound.get(key)?;
        Some(Measurement::new(24.0 + (index % 4) as f64 * 8.0))
    }

    fn set_scroll_size(&mut self, _size: f64) {}

    fn scroll_to(&mut self, position: f64) {
        self.scroll = position;
    }
}

fn main() {
    let mut c = Controller::new(LayoutOptions::new(30.0)).unwrap();
    c.set_total_items(10_000);
    c.set_viewport(600.0, 400.0).unwrap();
    let mut surface = Offsets::default();

    let mut now_ms = 0;
    c.smooth_scroll_to_index(2_000, Align::Center, now_ms, 240, Easing::EaseInOutCubic);
    while !c.is_layout_complete() {
        c.frame(&mut surface, now_ms);
        if now_ms % 80 == 0 {
            println!("t={now_ms} scroll={:.1}", surface.scroll);
        }
        now_ms += 16;
    }
    println!(
        "done: scroll={:.1} range={:?}",
        surface.scroll,
        c.engine().range()
    );
}
