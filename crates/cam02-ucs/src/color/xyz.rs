//! CIE XYZ tristimulus values

use nalgebra::Vector3;

/// CIE 1931 XYZ tristimulus values.
///
/// The scale is whatever the caller chose: the colorspace produces `Y = 1`
/// for its white, while the appearance model works in absolute units
/// (white `Y` equal to the adapting white luminance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply every component by `factor`.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Vector3<f64>> for Xyz {
    #[inline]
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Xyz> for Vector3<f64> {
    #[inline]
    fn from(xyz: Xyz) -> Self {
        Vector3::new(xyz.x, xyz.y, xyz.z)
    }
}
