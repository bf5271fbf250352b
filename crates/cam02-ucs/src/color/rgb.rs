//! Device RGB color type
//!
//! Components are gamma-encoded display values. The unit cube is the gamut;
//! anything outside it is a transient intermediate that must be projected
//! back before it leaves the crate.

/// A color in device RGB, each component nominally in `0.0..=1.0`.
///
/// Values are not clamped on construction. Out-of-gamut colors show up
/// naturally when a perceptual color is converted for a different viewing
/// condition, and the gamut projection needs to see them unmodified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red channel (gamma-encoded)
    pub r: f64,
    /// Green channel (gamma-encoded)
    pub g: f64,
    /// Blue channel (gamma-encoded)
    pub b: f64,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from 8-bit components.
    ///
    /// # Example
    /// ```
    /// use cam02_ucs::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Convert to a byte array `[R, G, B]`, rounding half to even and
    /// clamping to `0..=255`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        self.to_array()
            .map(|c| (c * 255.0).round_ties_even().clamp(0.0, 255.0) as u8)
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// True when every component lies in `0.0..=1.0`.
    ///
    /// NaN components are never in gamut.
    #[inline]
    pub fn is_in_gamut(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Componentwise clamp to the unit cube.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Largest absolute componentwise difference to `other`.
    #[inline]
    pub fn max_difference(self, other: Rgb) -> f64 {
        (self.r - other.r)
            .abs()
            .max((self.g - other.g).abs())
            .max((self.b - other.b).abs())
    }
}

impl From<[f64; 3]> for Rgb {
    #[inline]
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f64; 3] {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}
