//! Cancellation tokens for asynchronous typeface loads.
//!
//! A host that loads fonts off the UI path asks the engine for a token
//! before starting the load and hands it back with the result. Any newer
//! request, or a direct `set_typeface`, for the same slot and endpoint
//! makes older tokens stale, so the last writer wins.

use crate::slot::{Endpoint, SlotId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontRequest {
    pub slot: SlotId,
    pub endpoint: Endpoint,
    generation: u64,
}

impl FontRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Current generation per (slot, endpoint).
#[derive(Debug, Default)]
pub struct FontRequests {
    generations: [[u64; 2]; 2],
}

impl FontRequests {
    pub fn issue(&mut self, slot: SlotId, endpoint: Endpoint) -> FontRequest {
        let generation = self.bump(slot, endpoint);
        FontRequest { slot, endpoint, generation }
    }

    /// Invalidate every outstanding token for (slot, endpoint).
    pub fn cancel(&mut self, slot: SlotId, endpoint: Endpoint) {
        self.bump(slot, endpoint);
    }

    pub fn is_current(&self, request: &FontRequest) -> bool {
        self.generations[request.slot.index()][request.endpoint.index()] == request.generation
    }

    fn bump(&mut self, slot: SlotId, endpoint: Endpoint) -> u64 {
        let generation = &mut self.generations[slot.index()][endpoint.index()];
        *generation += 1;
        *generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes() {
        let mut requests = FontRequests::default();
        let first = requests.issue(SlotId::Title, Endpoint::Expanded);
        let second = requests.issue(SlotId::Title, Endpoint::Expanded);
        assert!(!requests.is_current(&first));
        assert!(requests.is_current(&second));
    }

    #[test]
    fn test_cancel_invalidates() {
        let mut requests = FontRequests::default();
        let token = requests.issue(SlotId::Subtitle, Endpoint::Collapsed);
        requests.cancel(SlotId::Subtitle, Endpoint::Collapsed);
        assert!(!requests.is_current(&token));
    }

    #[test]
    fn test_generations_are_independent() {
        let mut requests = FontRequests::default();
        let title = requests.issue(SlotId::Title, Endpoint::Collapsed);
        requests.issue(SlotId::Subtitle, Endpoint::Collapsed);
        requests.cancel(SlotId::Title, Endpoint::Expanded);
        assert!(requests.is_current(&title));
    }
}
