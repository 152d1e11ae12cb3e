use virtual_flow::{Measurement, PhysicalItem, RangeChange};

/// The rendering side of a [`crate::Controller`].
///
/// A surface owns the real render targets (widgets, DOM nodes, terminal rows...). The controller
/// tells it which keys to show and where to put them, and asks it for sizes.
pub trait RenderSurface<K> {
    /// Binds (or rebinds) the target for `key` to item `index`.
    fn bind(&mut self, key: &K, index: usize);

    /// The target for `key` left the window.
    fn release(&mut self, key: &K);

    /// Moves the target for `key`. Each call is independent of every other target.
    fn place(&mut self, key: &K, item: PhysicalItem);

    /// Reports the rendered size of the target, or `None` if it is not laid out yet. A `None`
    /// keeps the target pending; the controller asks again on the next frame.
    fn measure(&mut self, key: &K) -> Option<Measurement>;

    fn set_scroll_size(&mut self, size: f64);

    /// Sets the real scroll offset.
    fn scroll_to(&mut self, position: f64);

    /// Called before the positions of a pass are placed. `change.axis` says which coordinate
    /// [`PhysicalItem::position`] refers to; `change.remeasure` means cached sizes are stale.
    fn range_changed(&mut self, _change: &RangeChange) {}
}
