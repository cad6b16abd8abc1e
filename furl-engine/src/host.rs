use std::cell::Cell;

use furl_core::LayoutDirection;

/// The view that owns a header engine.
///
/// The engine holds it weakly: once the host is dropped, repaint requests
/// are silently skipped and recalculation waits for the next draw.
pub trait HostView {
    fn layout_direction(&self) -> LayoutDirection;

    /// Current (width, height) in device pixels.
    fn size(&self) -> (i32, i32);

    fn request_repaint(&self);
}

/// A host with a fixed size that counts repaint requests.
///
/// Used by the demo binary and by tests; real toolkits implement
/// `HostView` on their own view type.
#[derive(Debug, Default)]
pub struct StaticHost {
    width: Cell<i32>,
    height: Cell<i32>,
    direction: Cell<LayoutDirection>,
    repaints: Cell<u32>,
}

impl StaticHost {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            ..Default::default()
        }
    }

    pub fn with_direction(self, direction: LayoutDirection) -> Self {
        self.direction.set(direction);
        self
    }

    pub fn resize(&self, width: i32, height: i32) {
        self.width.set(width);
        self.height.set(height);
    }

    pub fn set_direction(&self, direction: LayoutDirection) {
        self.direction.set(direction);
    }

    pub fn repaint_count(&self) -> u32 {
        self.repaints.get()
    }
}

impl HostView for StaticHost {
    fn layout_direction(&self) -> LayoutDirection {
        self.direction.get()
    }

    fn size(&self) -> (i32, i32) {
        (self.width.get(), self.height.get())
    }

    fn request_repaint(&self) {
        self.repaints.set(self.repaints.get() + 1);
    }
}
