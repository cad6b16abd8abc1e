//! End ellipsis: fit a line into an available width by truncating the
//! tail and appending `…`.

use furl_core::FontRef;

use crate::backend::TextBackend;

pub const ELLIPSIS: &str = "\u{2026}";

/// Truncate `text` so it fits in `available` pixels at `font`/`size`.
///
/// - Text that fits is returned unchanged.
/// - Otherwise the longest prefix whose width plus the ellipsis fits is
///   kept and `…` appended.
/// - A non-positive width, or one too narrow for the ellipsis alone,
///   yields an empty string.
pub fn ellipsize<B: TextBackend + ?Sized>(
    backend: &mut B,
    text: &str,
    font: &FontRef,
    size: f32,
    available: f32,
) -> String {
    if text.is_empty() || available <= 0.0 {
        return String::new();
    }
    if backend.measure(text, font, size) <= available {
        return text.to_owned();
    }

    let ellipsis_width = backend.measure(ELLIPSIS, font, size);
    if ellipsis_width > available {
        return String::new();
    }
    let budget = available - ellipsis_width;

    // Byte offset where a prefix of `n` chars ends.
    let ends: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(text.len()))
        .collect();

    // Binary search the number of chars kept; width grows with the prefix.
    let (mut lo, mut hi) = (0usize, ends.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let prefix = &text[..ends[mid - 1]];
        if backend.measure(prefix, font, size) <= budget {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let kept = if lo == 0 { "" } else { &text[..ends[lo - 1]] };
    let mut out = String::with_capacity(kept.len() + ELLIPSIS.len());
    out.push_str(kept);
    out.push_str(ELLIPSIS);
    out
}

// ===================================================================
// Tests
// ===================================================================
