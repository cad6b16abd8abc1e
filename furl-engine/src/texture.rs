use std::rc::Rc;

use furl_core::Bitmap;
use furl_text::FontMetrics;

use crate::slot::SlotId;

/// A pre-rasterized line at its expanded size.
///
/// `metrics` are the ones the bitmap was laid out with; the baseline sits
/// `-metrics.ascent` pixels below the top edge.
#[derive(Debug)]
pub struct Texture {
    pub bitmap: Bitmap,
    pub metrics: FontMetrics,
}

/// Per-slot bitmaps for surfaces that cannot draw scaled text.
///
/// The engine clears the whole cache on every configuration change and
/// every base recompute, so an entry is only ever reused across fraction
/// changes.
#[derive(Debug, Default)]
pub struct TextureFallbackCache {
    slots: [Option<Rc<Texture>>; 2],
    clear_count: u64,
}

impl TextureFallbackCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotId) -> Option<Rc<Texture>> {
        self.slots[slot.index()].clone()
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.slots[slot.index()].is_some()
    }

    pub fn insert(&mut self, slot: SlotId, texture: Texture) -> Rc<Texture> {
        let texture = Rc::new(texture);
        self.slots[slot.index()] = Some(Rc::clone(&texture));
        texture
    }

    pub fn clear(&mut self) {
        self.slots = [None, None];
        self.clear_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of `clear` calls so far.
    pub fn clear_count(&self) -> u64 {
        self.clear_count
    }
}
