//! RGB colorspace definition
//!
//! A colorspace is three primaries, a white point and a transfer function.
//! The RGB→XYZ matrix is derived from the chromaticities rather than copied
//! from a standard, so the white maps exactly to `Y = 1`.
//!
//! The crate's working space, [`SRGB_GAMMA_22`], uses the sRGB primaries and
//! D65 white but a pure 2.2 power curve instead of the piecewise sRGB curve.
//! Scheme component values are interpreted with that curve.

use std::sync::LazyLock;

use nalgebra::{Matrix3, Vector3};

use super::rgb::Rgb;
use super::xyz::Xyz;

/// Raise `x` to `power`, mirroring negative inputs: `sign(x) * |x|^power`.
///
/// Finite for any finite `x`, including the slightly negative components
/// the gamut search probes.
///
/// # Example
/// ```
/// use cam02_ucs::color::apow;
/// assert_eq!(apow(-4.0, 0.5), -2.0);
/// assert_eq!(apow(4.0, 0.5), 2.0);
/// ```
#[inline]
pub fn apow(x: f64, power: f64) -> f64 {
    x.abs().powf(power).copysign(x)
}

/// sRGB primaries with a pure 2.2 gamma, built once on first use.
pub static SRGB_GAMMA_22: LazyLock<Colorspace> = LazyLock::new(|| {
    Colorspace::new(
        [[0.64, 0.33], [0.30, 0.60], [0.15, 0.06]],
        [0.3127, 0.3290],
        2.2,
    )
});

/// An RGB colorspace with a power-law transfer function.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorspace {
    primaries: [[f64; 2]; 3],
    white_point: [f64; 2],
    gamma: f64,
    rgb_to_xyz: Matrix3<f64>,
    xyz_to_rgb: Matrix3<f64>,
}

impl Colorspace {
    /// Build a colorspace from xy chromaticities of the red, green and blue
    /// primaries, the white point, and the decoding gamma.
    pub fn new(primaries: [[f64; 2]; 3], white_point: [f64; 2], gamma: f64) -> Self {
        let rgb_to_xyz = normalised_primary_matrix(&primaries, white_point);
        let xyz_to_rgb = rgb_to_xyz.try_inverse().unwrap_or(Matrix3::identity());
        Self {
            primaries,
            white_point,
            gamma,
            rgb_to_xyz,
            xyz_to_rgb,
        }
    }

    #[inline]
    pub fn primaries(&self) -> [[f64; 2]; 3] {
        self.primaries
    }

    #[inline]
    pub fn white_point(&self) -> [f64; 2] {
        self.white_point
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[inline]
    pub fn rgb_to_xyz_matrix(&self) -> &Matrix3<f64> {
        &self.rgb_to_xyz
    }

    /// Encoded RGB to relative XYZ (white has `Y = 1`).
    pub fn rgb_to_xyz(&self, rgb: Rgb) -> Xyz {
        let linear = Vector3::new(
            apow(rgb.r, self.gamma),
            apow(rgb.g, self.gamma),
            apow(rgb.b, self.gamma),
        );
        Xyz::from(self.rgb_to_xyz * linear)
    }

    /// Relative XYZ to encoded RGB. The result is not clamped.
    pub fn xyz_to_rgb(&self, xyz: Xyz) -> Rgb {
        let linear = self.xyz_to_rgb * Vector3::from(xyz);
        let inverse_gamma = 1.0 / self.gamma;
        Rgb::new(
            apow(linear.x, inverse_gamma),
            apow(linear.y, inverse_gamma),
            apow(linear.z, inverse_gamma),
        )
    }

    /// XYZ of RGB white `(1, 1, 1)`.
    #[inline]
    pub fn white(&self) -> Xyz {
        self.rgb_to_xyz(Rgb::new(1.0, 1.0, 1.0))
    }
}

/// xy chromaticity to XYZ with `Y = 1`.
fn xy_to_xyz([x, y]: [f64; 2]) -> Vector3<f64> {
    Vector3::new(x / y, 1.0, (1.0 - x - y) / y)
}

/// Derive the RGB→XYZ matrix whose columns are the primaries scaled so that
/// RGB `(1, 1, 1)` lands on the white point.
fn normalised_primary_matrix(primaries: &[[f64; 2]; 3], white_point: [f64; 2]) -> Matrix3<f64> {
    let columns = Matrix3::from_columns(&[
        xy_to_xyz(primaries[0]),
        xy_to_xyz(primaries[1]),
        xy_to_xyz(primaries[2]),
    ]);
    let white = xy_to_xyz(white_point);
    let scale = columns.try_inverse().unwrap_or(Matrix3::identity()) * white;
    columns * Matrix3::from_diagonal(&scale)
}
