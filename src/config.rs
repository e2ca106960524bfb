use embassy_time::Duration;

use crate::color::{RAINBOW_PALETTE, Rgb};

/// Default display text
pub const DEFAULT_TEXT: &str = "Hello World. My name is John Foushee";

/// Blank glyphs shown before the text enters the display
pub const DEFAULT_TEXT_PREFIX: usize = 3;

/// Dark pixels shown before the palette enters the strip
pub const DEFAULT_COLOR_PREFIX: usize = 6;

/// Default strip brightness (APA102 global brightness, 0-31)
pub const DEFAULT_BRIGHTNESS: u8 = 1;

/// Default tick period
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(700);

/// Order in which a color window is sent to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripDirection {
    /// First window value goes to the first pixel
    Forward,
    /// First window value goes to the last pixel, so the colors move
    /// towards the strip input
    #[default]
    Reversed,
}

/// Scheduler timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimings {
    /// Delay before the first tick
    pub initial_delay: Duration,
    /// Interval between ticks
    pub period: Duration,
}

impl Default for TickTimings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(0),
            period: DEFAULT_PERIOD,
        }
    }
}

/// Configuration for a marquee session
#[derive(Debug, Clone)]
pub struct MarqueeConfig<'a> {
    /// Text scrolled across the display
    pub text: &'a str,
    /// Colors scrolled along the strip
    pub palette: &'a [Rgb],
    pub text_prefix: usize,
    pub color_prefix: usize,
    /// Strip brightness applied on start
    pub brightness: u8,
    pub direction: StripDirection,
    pub timings: TickTimings,
}

impl Default for MarqueeConfig<'static> {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT,
            palette: &RAINBOW_PALETTE,
            text_prefix: DEFAULT_TEXT_PREFIX,
            color_prefix: DEFAULT_COLOR_PREFIX,
            brightness: DEFAULT_BRIGHTNESS,
            direction: StripDirection::default(),
            timings: TickTimings::default(),
        }
    }
}

impl<'a> MarqueeConfig<'a> {
    /// Set the display text and its blank prefix
    #[must_use]
    pub fn with_text(mut self, text: &'a str, prefix: usize) -> Self {
        self.text = text;
        self.text_prefix = prefix;
        self
    }

    /// Set the strip palette and its dark prefix
    #[must_use]
    pub fn with_palette(mut self, palette: &'a [Rgb], prefix: usize) -> Self {
        self.palette = palette;
        self.color_prefix = prefix;
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: StripDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.timings.period = period;
        self
    }

    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.timings.initial_delay = delay;
        self
    }
}
