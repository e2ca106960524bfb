//! Named colors and the default marquee palette

use crate::color::Rgb;

pub const BLACK: Rgb = rgb_from_u32(0x00_00_00);
pub const RED: Rgb = rgb_from_u32(0xFF_00_00);
pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF_00);
pub const GREEN: Rgb = rgb_from_u32(0x00_FF_00);
pub const CYAN: Rgb = rgb_from_u32(0x00_FF_FF);
pub const BLUE: Rgb = rgb_from_u32(0x00_00_FF);
pub const MAGENTA: Rgb = rgb_from_u32(0xFF_00_FF);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FF_FF);

/// Rainbow bands, three pixels wide each
pub const RAINBOW_PALETTE: [Rgb; 21] = [
    RED, RED, RED, YELLOW, YELLOW, YELLOW, GREEN, GREEN, GREEN, CYAN, CYAN, CYAN, BLUE, BLUE,
    BLUE, MAGENTA, MAGENTA, MAGENTA, WHITE, WHITE, WHITE,
];

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
