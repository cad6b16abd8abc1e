use furl_core::LayoutDirection;
use unicode_bidi::{get_base_direction, Direction};

/// Paragraph direction of `text` from its first strong character,
/// `fallback` (the host's layout direction) when it has none.
pub fn text_direction(text: &str, fallback: LayoutDirection) -> LayoutDirection {
    match get_base_direction(text) {
        Direction::Ltr => LayoutDirection::Ltr,
        Direction::Rtl => LayoutDirection::Rtl,
        Direction::Mixed => fallback,
    }
}
