//! Colors and state-dependent color sources.
//!
//! [`Color`] is a packed `0xAARRGGBB` value. A [`ColorSource`] is either a
//! fixed color or a list of `(state spec, color)` entries resolved against
//! the host's active [`StateFlag`]s; the first matching entry wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    #[error("color must have 6 or 8 hex digits: {0}")]
    Length(String),
    #[error("invalid hex digits in color: {0}")]
    Digits(String),
}

/// Packed ARGB color, 8 bits per channel.
///
/// Serialized as `"#RRGGBB"` / `"#AARRGGBB"`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Blend `expanded` towards `collapsed` channel by channel.
    ///
    /// `ratio` 0.0 yields `expanded`, 1.0 yields `collapsed`. Each channel
    /// is `collapsed * ratio + expanded * (1 - ratio)`, rounded to nearest.
    pub fn blend(expanded: Color, collapsed: Color, ratio: f32) -> Color {
        let inverse = 1.0 - ratio;
        let channel = |a: u8, b: u8| (a as f32 * inverse + b as f32 * ratio).round() as u8;
        Color::argb(
            channel(expanded.alpha(), collapsed.alpha()),
            channel(expanded.red(), collapsed.red()),
            channel(expanded.green(), collapsed.green()),
            channel(expanded.blue(), collapsed.blue()),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::MissingHash(s.to_owned()))?;
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ParseColorError::Digits(s.to_owned()))?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ParseColorError::Length(s.to_owned())),
        }
    }
}

// ── Drawable state ──────────────────────────────────────────────────

/// A drawable state the host view can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateFlag {
    Enabled,
    Pressed,
    Focused,
    Selected,
    Activated,
    Checked,
    Hovered,
}

/// Condition on the active states: every `required` flag present and no
/// `excluded` flag present. The empty spec matches any state list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpec {
    #[serde(default)]
    pub required: Vec<StateFlag>,
    #[serde(default)]
    pub excluded: Vec<StateFlag>,
}

impl StateSpec {
    pub fn new(required: &[StateFlag], excluded: &[StateFlag]) -> Self {
        Self {
            required: required.to_vec(),
            excluded: excluded.to_vec(),
        }
    }

    pub fn matches(&self, states: &[StateFlag]) -> bool {
        self.required.iter().all(|s| states.contains(s))
            && !self.excluded.iter().any(|s| states.contains(s))
    }
}

/// Where a text or shadow color comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSource {
    Fixed(Color),
    Stateful {
        entries: Vec<(StateSpec, Color)>,
        default: Color,
    },
}

impl Default for ColorSource {
    fn default() -> Self {
        ColorSource::Fixed(Color::BLACK)
    }
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        ColorSource::Fixed(color)
    }
}

impl ColorSource {
    /// Resolve against the active states.
    ///
    /// `None` (the host never reported a state) resolves to the default.
    pub fn resolve(&self, states: Option<&[StateFlag]>) -> Color {
        match self {
            ColorSource::Fixed(color) => *color,
            ColorSource::Stateful { entries, default } => match states {
                None => *default,
                Some(states) => entries
                    .iter()
                    .find(|(spec, _)| spec.matches(states))
                    .map(|(_, color)| *color)
                    .unwrap_or(*default),
            },
        }
    }


    /// `true` if the resolved color can change with the drawable state.
    pub fn is_stateful(&self) -> bool {
        matches!(self, ColorSource::Stateful { entries, .. } if !entries.is_empty())
    }
}

// ===================================================================
// Tests
// ===================================================================
