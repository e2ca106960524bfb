mod palette;

pub use palette::{
    BLACK, BLUE, CYAN, GREEN, MAGENTA, RAINBOW_PALETTE, RED, WHITE, YELLOW, rgb_from_u32,
};
use smart_leds::RGB8;

pub type Rgb = RGB8;
