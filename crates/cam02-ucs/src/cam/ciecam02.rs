//! CIECAM02 color appearance model
//!
//! Forward and inverse transforms between absolute XYZ and the lightness /
//! colorfulness / hue correlates, following CIE 159:2004. The power functions
//! in the post-adaptation compression, lightness and chroma equations mirror
//! negative arguments (see [`apow`]) so out-of-gamut intermediates stay
//! finite wherever the published equations allow it.
//!
//! # References
//!
//! CIE 159:2004, "A colour appearance model for colour management systems:
//! CIECAM02"

use std::f64::consts::PI;
use std::sync::LazyLock;

use nalgebra::{Matrix3, Vector3};

use super::conditions::ViewingConditions;
use crate::color::{apow, Xyz};

/// CIECAM02 appearance correlates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JMh {
    /// Lightness `J`, 0 (black) to 100 (adapting white)
    pub lightness: f64,
    /// Colorfulness `M`
    pub colorfulness: f64,
    /// Hue angle `h` in degrees, `0.0..360.0`
    pub hue: f64,
}

impl JMh {
    #[inline]
    pub fn new(lightness: f64, colorfulness: f64, hue: f64) -> Self {
        Self {
            lightness,
            colorfulness,
            hue,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lightness.is_finite() && self.colorfulness.is_finite() && self.hue.is_finite()
    }
}

struct Matrices {
    cat02: Matrix3<f64>,
    cat02_inverse: Matrix3<f64>,
    /// CAT02 sharpened space → Hunt-Pointer-Estevez cone space
    cat02_to_hpe: Matrix3<f64>,
    hpe_to_cat02: Matrix3<f64>,
}

static MATRICES: LazyLock<Matrices> = LazyLock::new(|| {
    #[rustfmt::skip]
    let cat02 = Matrix3::new(
         0.7328, 0.4296, -0.1624,
        -0.7036, 1.6975,  0.0061,
         0.0030, 0.0136,  0.9834,
    );
    #[rustfmt::skip]
    let hpe = Matrix3::new(
         0.38971, 0.68898, -0.07868,
        -0.22981, 1.18340,  0.04641,
         0.0,     0.0,      1.0,
    );
    let cat02_inverse = cat02.try_inverse().unwrap_or(Matrix3::identity());
    let hpe_inverse = hpe.try_inverse().unwrap_or(Matrix3::identity());
    Matrices {
        cat02,
        cat02_inverse,
        cat02_to_hpe: hpe * cat02_inverse,
        hpe_to_cat02: cat02 * hpe_inverse,
    }
});

/// Viewing-condition dependent quantities, computed once per condition.
///
/// Building this is the expensive half of a conversion. Anything converting
/// many colors under the same conditions (the gamut search in particular)
/// keeps one around.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEnvironment {
    conditions: ViewingConditions,
    /// Background induction factor `n = Y_b / Y_w`
    n: f64,
    /// Luminance level adaptation factor `F_L`
    f_l: f64,
    /// Brightness / chromatic background induction `N_bb = N_cb`
    n_bb: f64,
    /// Base exponential nonlinearity `z`
    z: f64,
    /// Degree of adaptation `D`
    d: f64,
    /// Per-channel von Kries gains `Y_w·D/RGB_w + 1 − D`
    adaptation_gain: Vector3<f64>,
    /// Achromatic response of the adapting white
    a_w: f64,
}

impl ModelEnvironment {
    /// Bake the model for `conditions` with adapting white `white`.
    ///
    /// `white` is in absolute units, i.e. already multiplied by the adapting
    /// white luminance.
    pub fn new(conditions: &ViewingConditions, white: Xyz) -> Self {
        let surround = conditions.surround;
        let l_a = conditions.adapting_luminance;
        let y_w = white.y;

        let n = conditions.background_luminance / y_w;
        let k = 1.0 / (5.0 * l_a + 1.0);
        let k4 = k.powi(4);
        let f_l = 0.2 * k4 * (5.0 * l_a) + 0.1 * (1.0 - k4).powi(2) * (5.0 * l_a).cbrt();
        let n_bb = 0.725 * (1.0 / n).powf(0.2);
        let z = 1.48 + n.sqrt();

        let d = (surround.adaptation_factor()
            * (1.0 - (1.0 / 3.6) * ((-l_a - 42.0) / 92.0).exp()))
        .clamp(0.0, 1.0);

        let rgb_w = MATRICES.cat02 * Vector3::from(white);
        let adaptation_gain = rgb_w.map(|c| y_w * d / c + 1.0 - d);

        let mut environment = Self {
            conditions: *conditions,
            n,
            f_l,
            n_bb,
            z,
            d,
            adaptation_gain,
            a_w: 0.0,
        };
        let rgb_aw = environment.compressed_cone_response(Vector3::from(white));
        environment.a_w = environment.achromatic_response(&rgb_aw);
        environment
    }

    #[inline]
    pub fn conditions(&self) -> &ViewingConditions {
        &self.conditions
    }

    #[inline]
    pub fn luminance_adaptation(&self) -> f64 {
        self.f_l
    }

    #[inline]
    pub fn degree_of_adaptation(&self) -> f64 {
        self.d
    }

    #[inline]
    pub fn white_achromatic_response(&self) -> f64 {
        self.a_w
    }

    /// XYZ → chromatically adapted, compressed HPE cone responses.
    fn compressed_cone_response(&self, xyz: Vector3<f64>) -> Vector3<f64> {
        let rgb = MATRICES.cat02 * xyz;
        let adapted = rgb.component_mul(&self.adaptation_gain);
        let cone = MATRICES.cat02_to_hpe * adapted;
        cone.map(|c| compress(c, self.f_l))
    }

    fn achromatic_response(&self, rgb_a: &Vector3<f64>) -> f64 {
        (2.0 * rgb_a.x + rgb_a.y + rgb_a.z / 20.0 - 0.305) * self.n_bb
    }

    /// `(1.64 − 0.29^n)^0.73`, shared by the chroma equations.
    fn chroma_background_term(&self) -> f64 {
        apow(1.64 - 0.29f64.powf(self.n), 0.73)
    }

    /// Absolute XYZ → JMh.
    pub fn forward(&self, xyz: Xyz) -> JMh {
        let surround = self.conditions.surround;
        let rgb_a = self.compressed_cone_response(Vector3::from(xyz));

        let a = rgb_a.x - 12.0 * rgb_a.y / 11.0 + rgb_a.z / 11.0;
        let b = (rgb_a.x + rgb_a.y - 2.0 * rgb_a.z) / 9.0;
        let hue = b.atan2(a).to_degrees().rem_euclid(360.0);

        let achromatic = self.achromatic_response(&rgb_a);
        let lightness = 100.0 * apow(achromatic / self.a_w, surround.impact() * self.z);

        let t = (50000.0 / 13.0) * surround.chromatic_induction() * self.n_bb
            * eccentricity(hue)
            * a.hypot(b)
            / (rgb_a.x + rgb_a.y + 21.0 / 20.0 * rgb_a.z);
        let chroma = apow(t, 0.9) * apow(lightness / 100.0, 0.5) * self.chroma_background_term();
        let colorfulness = chroma * self.f_l.powf(0.25);

        JMh::new(lightness, colorfulness, hue)
    }

    /// JMh → absolute XYZ.
    pub fn inverse(&self, jmh: JMh) -> Xyz {
        let surround = self.conditions.surround;
        let JMh {
            lightness,
            colorfulness,
            hue,
        } = jmh;

        let chroma = colorfulness / self.f_l.powf(0.25);
        let t = if chroma == 0.0 {
            0.0
        } else {
            apow(
                chroma / (apow(lightness / 100.0, 0.5) * self.chroma_background_term()),
                1.0 / 0.9,
            )
        };

        let achromatic = self.a_w * apow(lightness / 100.0, 1.0 / (surround.impact() * self.z));
        let p_2 = achromatic / self.n_bb + 0.305;
        let p_3 = 21.0 / 20.0;

        let (a, b) = if t == 0.0 {
            (0.0, 0.0)
        } else {
            let p_1 = (50000.0 / 13.0) * surround.chromatic_induction() * self.n_bb
                * eccentricity(hue)
                / t;
            let (sin_h, cos_h) = hue.to_radians().sin_cos();
            let numerator = p_2 * (2.0 + p_3) * (460.0 / 1403.0);
            if sin_h.abs() >= cos_h.abs() {
                let b = numerator
                    / (p_1 / sin_h + (2.0 + p_3) * (220.0 / 1403.0) * (cos_h / sin_h)
                        - 27.0 / 1403.0
                        + p_3 * (6300.0 / 1403.0));
                (b * cos_h / sin_h, b)
            } else {
                let a = numerator
                    / (p_1 / cos_h + (2.0 + p_3) * (220.0 / 1403.0)
                        - (27.0 / 1403.0 - p_3 * (6300.0 / 1403.0)) * (sin_h / cos_h));
                (a, a * sin_h / cos_h)
            }
        };

        let rgb_a = Vector3::new(
            (460.0 * p_2 + 451.0 * a + 288.0 * b) / 1403.0,
            (460.0 * p_2 - 891.0 * a - 261.0 * b) / 1403.0,
            (460.0 * p_2 - 220.0 * a - 6300.0 * b) / 1403.0,
        );
        let cone = rgb_a.map(|c| expand(c, self.f_l));
        let adapted = MATRICES.hpe_to_cat02 * cone;
        let rgb = adapted.component_div(&self.adaptation_gain);
        Xyz::from(MATRICES.cat02_inverse * rgb)
    }
}

/// Hue eccentricity factor `e_t` for a hue in degrees.
#[inline]
fn eccentricity(hue: f64) -> f64 {
    0.25 * ((hue * PI / 180.0 + 2.0).cos() + 3.8)
}

/// Post-adaptation nonlinear response compression.
#[inline]
fn compress(c: f64, f_l: f64) -> f64 {
    let response = apow(f_l * c.abs() / 100.0, 0.42);
    400.0 * c.signum() * response / (27.13 + response) + 0.1
}

/// Inverse of [`compress`].
#[inline]
fn expand(c: f64, f_l: f64) -> f64 {
    let offset = c - 0.1;
    offset.signum()
        * (100.0 / f_l)
        * apow(27.13 * offset.abs() / (400.0 - offset.abs()), 1.0 / 0.42)
}
