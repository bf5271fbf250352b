//! 24-bit terminal output
//!
//! Swatches for the before/after listing and the Linux console palette
//! escape used by `--set-palette`.

use std::sync::LazyLock;

use cam02_ucs::{Codec, Rgb, ViewingConditions};

/// Palette slot characters for `ESC ] P n rrggbb`, one per palette row.
const PALETTE_SLOTS: &[u8] = b"0123456789abcdefghilm";

/// Swatches darker than this CAM02-UCS lightness get white text.
const DARK_SWATCH_LIGHTNESS: f64 = 30.0;

static NEUTRAL: LazyLock<Codec<'static>> =
    LazyLock::new(|| Codec::new(&ViewingConditions::NEUTRAL));

/// A colored `[RRR GGG BBB]` label with `rgb` as its background.
pub fn swatch(rgb: Rgb) -> String {
    let text = if NEUTRAL.to_perceptual(rgb).j < DARK_SWATCH_LIGHTNESS {
        "255;255;255"
    } else {
        "0;0;0"
    };
    let [r, g, b] = rgb.to_bytes();
    format!("\x1b[38;2;{text}m\x1b[48;2;{r};{g};{b}m[{r:>3} {g:>3} {b:>3}]\x1b[0m")
}

/// `name`, the original swatch and the translated swatch.
pub fn row_line(name: &str, before: Rgb, after: Rgb) -> String {
    format!("{name:<18} {} → {}", swatch(before), swatch(after))
}

/// The escape that sets console palette slot `index` to `rgb`, or `None`
/// when `index` has no slot.
pub fn palette_escape(index: usize, rgb: Rgb) -> Option<String> {
    let slot = char::from(*PALETTE_SLOTS.get(index)?);
    let [r, g, b] = rgb.to_bytes();
    Some(format!("\x1b]P{slot}{r:02x}{g:02x}{b:02x}\x1b\\"))
}
