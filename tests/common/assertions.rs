//! Assertion helpers for tests.

use cam02_ucs::Rgb;
use iterm_schemer::models::ColorScheme;
use plist::Value;
use pretty_assertions::assert_eq;

/// Assert every component lies in `[0, 1]`
pub fn assert_in_gamut(row: &str, rgb: Rgb) {
    assert!(rgb.is_in_gamut(), "{row}: {rgb:?} is out of gamut");
}

/// Assert two colors agree within `tolerance` per component
pub fn assert_rgb_close(row: &str, actual: Rgb, expected: Rgb, tolerance: f64) {
    assert!(
        actual.max_difference(expected) < tolerance,
        "{row}: expected {expected:?}, got {actual:?} (tolerance {tolerance})"
    );
}

/// Assert a row's non-component keys are still there
pub fn assert_row_metadata(path: &std::path::Path, row: &str) {
    let value = Value::from_file(path).expect("Failed to re-read scheme");
    let entry = value
        .as_dictionary()
        .and_then(|rows| rows.get(row))
        .and_then(Value::as_dictionary)
        .unwrap_or_else(|| panic!("{row} missing from {}", path.display()));
    assert_eq!(
        entry.get("Color Space").and_then(Value::as_string),
        Some("sRGB"),
        "{row}: Color Space lost"
    );
    assert_eq!(
        entry.get("Alpha Component").and_then(Value::as_real),
        Some(1.0),
        "{row}: Alpha Component lost"
    );
}

/// Read a row's color, panicking with context on failure
pub fn color_of(scheme: &ColorScheme, row: &str) -> Rgb {
    scheme
        .color(row)
        .unwrap_or_else(|e| panic!("Failed to read {row}: {e}"))
}
