//! Pixel/channel simulator: sliders in, colour swatch and tuple out.
//!
//! Gray mode drives one channel, RGB mode three. Every setter clamps to
//! `[0, 255]`, and the derived preview is recomputed on read, so there
//! is no window where it disagrees with the sliders.

use crate::types::{clamp_channel, Rgb};

/// How many channels a pixel has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    /// Black and white: one brightness value.
    #[default]
    Gray,
    /// Colour: red, green and blue stacked.
    Rgb,
}

impl PixelMode {
    pub fn label(self) -> &'static str {
        match self {
            PixelMode::Gray => "Black & white (1 channel)",
            PixelMode::Rgb => "Colour RGB (3 channels)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PixelMode::Gray => {
                "In a black-and-white image every pixel is a single number. 0 is complete \
                 darkness (black) and 255 is full brightness (white). The numbers in between \
                 make the shades of gray."
            }
            PixelMode::Rgb => {
                "In a colour image every pixel is three stacked numbers: red, green and blue. \
                 The computer does not know the colour \"red\", it only knows the matrix \
                 [255, 0, 0]!"
            }
        }
    }

    /// Channels whose sliders are visible in this mode.
    pub fn channels(self) -> &'static [Channel] {
        match self {
            PixelMode::Gray => &[Channel::Gray],
            PixelMode::Rgb => &[Channel::Red, Channel::Green, Channel::Blue],
        }
    }
}

/// One slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Gray,
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Channel::Gray => "Value",
            Channel::Red => "R (red)",
            Channel::Green => "G (green)",
            Channel::Blue => "B (blue)",
        }
    }
}

/// Simulator state. Gray and colour values are kept independently, so
/// switching modes never loses a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSimulator {
    mode: PixelMode,
    gray: u8,
    red: u8,
    green: u8,
    blue: u8,
    /// Slider keyboard adjustments go to (RGB mode only).
    cursor: usize,
}

impl Default for PixelSimulator {
    fn default() -> Self {
        PixelSimulator {
            mode: PixelMode::Gray,
            gray: 128,
            red: 239,
            green: 68,
            blue: 68,
            cursor: 0,
        }
    }
}

impl PixelSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PixelMode) {
        self.mode = mode;
        self.cursor = 0;
    }

    pub fn toggle_mode(&mut self) -> PixelMode {
        let next = match self.mode {
            PixelMode::Gray => PixelMode::Rgb,
            PixelMode::Rgb => PixelMode::Gray,
        };
        self.set_mode(next);
        next
    }

    pub fn value(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Gray => self.gray,
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Set a slider, clamping to `[0, 255]`. Returns the stored value.
    pub fn set(&mut self, channel: Channel, value: i32) -> u8 {
        let v = clamp_channel(value);
        match channel {
            Channel::Gray => self.gray = v,
            Channel::Red => self.red = v,
            Channel::Green => self.green = v,
            Channel::Blue => self.blue = v,
        }
        v
    }

    pub fn set_gray(&mut self, value: i32) -> u8 {
        self.set(Channel::Gray, value)
    }

    pub fn set_rgb(&mut self, r: i32, g: i32, b: i32) {
        self.set(Channel::Red, r);
        self.set(Channel::Green, g);
        self.set(Channel::Blue, b);
    }

    /// The slider keyboard input is routed to.
    pub fn active_channel(&self) -> Channel {
        let channels = self.mode.channels();
        channels[self.cursor.min(channels.len() - 1)]
    }

    pub fn next_channel(&mut self) -> Channel {
        let len = self.mode.channels().len();
        self.cursor = (self.cursor + 1) % len;
        self.active_channel()
    }

    pub fn prev_channel(&mut self) -> Channel {
        let len = self.mode.channels().len();
        self.cursor = (self.cursor + len - 1) % len;
        self.active_channel()
    }

    /// Nudge the active slider by `delta`, clamped.
    pub fn adjust(&mut self, delta: i32) -> u8 {
        let channel = self.active_channel();
        let current = i32::from(self.value(channel));
        self.set(channel, current.saturating_add(delta))
    }

    /// Colour of the preview swatch.
    pub fn preview(&self) -> Rgb {
        match self.mode {
            PixelMode::Gray => Rgb::gray(self.gray),
            PixelMode::Rgb => Rgb::new(self.red, self.green, self.blue),
        }
    }

    /// The derived display tuple; `(v, v, v)` in gray mode.
    pub fn tuple(&self) -> (u8, u8, u8) {
        self.preview().tuple()
    }

    /// "What the model sees": `[128]` or `[239, 68, 68]`.
    pub fn matrix_label(&self) -> String {
        match self.mode {
            PixelMode::Gray => format!("[{}]", self.gray),
            PixelMode::Rgb => format!("[{}, {}, {}]", self.red, self.green, self.blue),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
