//! Gravity flags: where a line of text anchors inside its bounds.
//!
//! Uses the conventional bit layout: the low three bits are the
//! horizontal axis, bits 4–6 the vertical axis, and bit 23 marks the
//! horizontal value as relative (`START`/`END`), which flips under RTL.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Layout direction reported by the host view (or derived from text).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        self == LayoutDirection::Rtl
    }
}

/// Resolved (absolute) horizontal alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Resolved vertical alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gravity(pub u32);

impl Gravity {
    pub const NO_GRAVITY: Gravity = Gravity(0);

    pub const CENTER_HORIZONTAL: Gravity = Gravity(0x01);
    pub const LEFT: Gravity = Gravity(0x03);
    pub const RIGHT: Gravity = Gravity(0x05);
    pub const START: Gravity = Gravity(Self::RELATIVE_FLAG | 0x03);
    pub const END: Gravity = Gravity(Self::RELATIVE_FLAG | 0x05);

    pub const CENTER_VERTICAL: Gravity = Gravity(0x10);
    pub const TOP: Gravity = Gravity(0x30);
    pub const BOTTOM: Gravity = Gravity(0x50);

    pub const CENTER: Gravity = Gravity(0x11);

    pub const HORIZONTAL_MASK: u32 = 0x07;
    pub const VERTICAL_MASK: u32 = 0x70;
    pub const RELATIVE_FLAG: u32 = 0x0080_0000;

    pub fn contains(self, other: Gravity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Absolute horizontal alignment for the given direction.
    ///
    /// Unset horizontal bits resolve to left.
    pub fn horizontal(self, direction: LayoutDirection) -> HorizontalAlign {
        let relative = self.contains(Gravity(Self::RELATIVE_FLAG));
        let rtl = relative && direction.is_rtl();
        match self.0 & Self::HORIZONTAL_MASK {
            0x01 => HorizontalAlign::Center,
            0x03 if rtl => HorizontalAlign::Right,
            0x05 if rtl => HorizontalAlign::Left,
            0x05 => HorizontalAlign::Right,
            _ => HorizontalAlign::Left,
        }
    }

    /// Vertical alignment. Unset vertical bits resolve to center.
    pub fn vertical(self) -> VerticalAlign {
        match self.0 & Self::VERTICAL_MASK {
            0x30 => VerticalAlign::Top,
            0x50 => VerticalAlign::Bottom,
            _ => VerticalAlign::Center,
        }
    }
}

impl BitOr for Gravity {
    type Output = Gravity;

    fn bitor(self, rhs: Gravity) -> Gravity {
        Gravity(self.0 | rhs.0)
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_horizontal() {
        for dir in [LayoutDirection::Ltr, LayoutDirection::Rtl] {
            assert_eq!(Gravity::LEFT.horizontal(dir), HorizontalAlign::Left);
            assert_eq!(Gravity::RIGHT.horizontal(dir), HorizontalAlign::Right);
            assert_eq!(Gravity::CENTER_HORIZONTAL.horizontal(dir), HorizontalAlign::Center);
        }
    }

    #[test]
    fn test_relative_horizontal_flips_under_rtl() {
        assert_eq!(Gravity::START.horizontal(LayoutDirection::Ltr), HorizontalAlign::Left);
        assert_eq!(Gravity::START.horizontal(LayoutDirection::Rtl), HorizontalAlign::Right);
        assert_eq!(Gravity::END.horizontal(LayoutDirection::Ltr), HorizontalAlign::Right);
        assert_eq!(Gravity::END.horizontal(LayoutDirection::Rtl), HorizontalAlign::Left);
    }

    #[test]
    fn test_vertical_decoding() {
        assert_eq!(Gravity::TOP.vertical(), VerticalAlign::Top);
        assert_eq!(Gravity::BOTTOM.vertical(), VerticalAlign::Bottom);
        assert_eq!(Gravity::CENTER_VERTICAL.vertical(), VerticalAlign::Center);
        assert_eq!(Gravity::NO_GRAVITY.vertical(), VerticalAlign::Center);
    }

    #[test]
    fn test_combined_flags() {
        let g = Gravity::START | Gravity::BOTTOM;
        assert_eq!(g.vertical(), VerticalAlign::Bottom);
        assert_eq!(g.horizontal(LayoutDirection::Rtl), HorizontalAlign::Right);
        assert!(g.contains(Gravity::BOTTOM));
        assert!(!g.contains(Gravity::TOP));
        assert_eq!(Gravity::CENTER.horizontal(LayoutDirection::Ltr), HorizontalAlign::Center);
        assert_eq!(Gravity::CENTER.vertical(), VerticalAlign::Center);
    }

    #[test]
    fn test_unset_horizontal_is_left() {
        assert_eq!(Gravity::TOP.horizontal(LayoutDirection::Rtl), HorizontalAlign::Left);
    }
}
