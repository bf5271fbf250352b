//! CAM02-UCS uniform color space
//!
//! Luo, Cui & Li's uniform space built on the CIECAM02 correlates. Lightness
//! and colorfulness are compressed so that Euclidean distance tracks
//! perceived difference, and hue becomes the angle of the `(a', b')` pair.
//!
//! # References
//!
//! M. R. Luo, G. Cui, C. Li, "Uniform colour spaces based on CIECAM02 colour
//! appearance model", Color Research & Application 31(4), 2006

use super::ciecam02::JMh;

/// Lightness coefficient `c1` of CAM02-UCS.
const C1: f64 = 0.007;
/// Colorfulness coefficient `c2` of CAM02-UCS.
const C2: f64 = 0.0228;

/// A color in CAM02-UCS (`J'a'b'`).
///
/// Only meaningful together with the viewing conditions it was computed
/// under: the same RGB has different coordinates on a dark and a light
/// background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam02Ucs {
    /// Uniform lightness `J'`, 0 to 100
    pub j: f64,
    /// Red-green axis `a'`
    pub a: f64,
    /// Yellow-blue axis `b'`
    pub b: f64,
}

impl Cam02Ucs {
    #[inline]
    pub fn new(j: f64, a: f64, b: f64) -> Self {
        Self { j, a, b }
    }

    /// Squared Euclidean distance, the gamut search's loss.
    #[inline]
    pub fn distance_squared(self, other: Cam02Ucs) -> f64 {
        let dj = self.j - other.j;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dj * dj + da * da + db * db
    }

    /// Uniform colorfulness `M' = sqrt(a'^2 + b'^2)`.
    #[inline]
    pub fn colorfulness(self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, `0.0..360.0`.
    #[inline]
    pub fn hue(self) -> f64 {
        self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
    }

    /// Mirror lightness around the middle of the 0–100 scale.
    #[inline]
    pub fn invert_lightness(self) -> Self {
        Self::new(100.0 - self.j, self.a, self.b)
    }

    #[inline]
    pub fn scale_lightness(self, factor: f64) -> Self {
        Self::new(self.j * factor, self.a, self.b)
    }

    /// Scale `a'` and `b'` together, keeping hue.
    #[inline]
    pub fn scale_chroma(self, factor: f64) -> Self {
        Self::new(self.j, self.a * factor, self.b * factor)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.j.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.j, self.a, self.b]
    }
}

impl From<JMh> for Cam02Ucs {
    /// CIECAM02 correlates to CAM02-UCS.
    ///
    /// Colorfulness below `-1/c2` has no logarithm and yields NaN.
    fn from(jmh: JMh) -> Self {
        let j = (1.0 + 100.0 * C1) * jmh.lightness / (1.0 + C1 * jmh.lightness);
        let m = (C2 * jmh.colorfulness).ln_1p() / C2;
        let (sin_h, cos_h) = jmh.hue.to_radians().sin_cos();
        Self::new(j, m * cos_h, m * sin_h)
    }
}

impl From<Cam02Ucs> for JMh {
    /// CAM02-UCS back to CIECAM02 correlates.
    fn from(ucs: Cam02Ucs) -> Self {
        let lightness = -ucs.j / (C1 * ucs.j - 1.0 - 100.0 * C1);
        let colorfulness = (C2 * ucs.colorfulness()).exp_m1() / C2;
        JMh::new(lightness, colorfulness, ucs.hue())
    }
}
