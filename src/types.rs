//! Shared value types for the chapter.
//!
//! Small, `Copy`, and free of behavior beyond formatting and clamping.

use std::fmt;

// ============================================================================
// COLOR
// ============================================================================

/// Lowest value a colour channel can hold.
pub const CHANNEL_MIN: i32 = 0;

/// Highest value a colour channel can hold.
pub const CHANNEL_MAX: i32 = 255;

/// Clamp an arbitrary integer into the `[0, 255]` channel range.
///
/// Slider setters funnel through this, so out-of-range input is folded
/// back to the nearest bound instead of wrapping.
pub fn clamp_channel(value: i32) -> u8 {
    // Lossless after the clamp
    value.clamp(CHANNEL_MIN, CHANNEL_MAX) as u8
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// A neutral gray with every channel set to `value`.
    pub const fn gray(value: u8) -> Self {
        Rgb {
            r: value,
            g: value,
            b: value,
        }
    }

    pub const fn tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// True when the colour reads as light (used to pick contrasting text).
    pub fn is_light(self) -> bool {
        let sum = u16::from(self.r) + u16::from(self.g) + u16::from(self.b);
        sum > 3 * 128
    }
}

/// CSS-style notation: `rgb(239,68,68)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Output format for the non-interactive subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
