//! Device RGB ↔ CAM02-UCS under a viewing condition
//!
//! The pipeline in each direction:
//!
//! ```text
//! Rgb ──γ 2.2──► linear ──NPM──► Xyz ·Y_w ──CIECAM02──► JMh ──UCS──► Cam02Ucs
//! Rgb ◄─γ 1/2.2─ linear ◄─NPM⁻¹─ Xyz /Y_w ◄─CIECAM02⁻¹── JMh ◄─UCS⁻¹─ Cam02Ucs
//! ```
//!
//! A [`Codec`] owns the baked [`ModelEnvironment`] for one set of viewing
//! conditions. The free functions [`to_perceptual`] and [`to_rgb`] build a
//! throwaway codec per call, which is fine for a handful of colors; the gamut
//! search converts thousands and keeps one codec for the whole run.

use crate::cam::{Cam02Ucs, JMh, ModelEnvironment, ViewingConditions};
use crate::color::{Colorspace, Rgb, SRGB_GAMMA_22};
use crate::error::{ensure_finite, NumericDomainError, Stage};

/// Converts colors between device RGB and CAM02-UCS for fixed conditions.
#[derive(Debug, Clone)]
pub struct Codec<'a> {
    colorspace: &'a Colorspace,
    environment: ModelEnvironment,
}

impl Codec<'static> {
    /// Codec for `conditions` in the crate's working space, [`SRGB_GAMMA_22`].
    pub fn new(conditions: &ViewingConditions) -> Self {
        Codec::with_colorspace(&SRGB_GAMMA_22, conditions)
    }
}

impl<'a> Codec<'a> {
    pub fn with_colorspace(colorspace: &'a Colorspace, conditions: &ViewingConditions) -> Self {
        let white = colorspace.white().scale(conditions.adapting_white);
        Self {
            colorspace,
            environment: ModelEnvironment::new(conditions, white),
        }
    }

    #[inline]
    pub fn conditions(&self) -> &ViewingConditions {
        self.environment.conditions()
    }

    #[inline]
    pub fn environment(&self) -> &ModelEnvironment {
        &self.environment
    }

    #[inline]
    pub fn colorspace(&self) -> &Colorspace {
        self.colorspace
    }

    /// Device RGB to CAM02-UCS.
    ///
    /// Never fails. Colors far outside the gamut can come back with NaN
    /// components; use [`Codec::try_to_perceptual`] to have that reported.
    pub fn to_perceptual(&self, rgb: Rgb) -> Cam02Ucs {
        let xyz = self
            .colorspace
            .rgb_to_xyz(rgb)
            .scale(self.conditions().adapting_white);
        Cam02Ucs::from(self.environment.forward(xyz))
    }

    /// Like [`Codec::to_perceptual`], but non-finite results are an error.
    pub fn try_to_perceptual(&self, rgb: Rgb) -> Result<Cam02Ucs, NumericDomainError> {
        let ucs = self.to_perceptual(rgb);
        let [j, a, b] = ensure_finite(Stage::Perceptual, ucs.to_array())?;
        Ok(Cam02Ucs::new(j, a, b))
    }

    /// CAM02-UCS back to device RGB.
    ///
    /// The result is not clamped: colors that do not exist on the display
    /// under these conditions come back outside the unit cube.
    pub fn to_rgb(&self, ucs: Cam02Ucs) -> Result<Rgb, NumericDomainError> {
        let jmh = JMh::from(ucs);
        let xyz = self.environment.inverse(jmh);
        ensure_finite(Stage::Tristimulus, xyz.to_array())?;

        let relative = xyz.scale(1.0 / self.conditions().adapting_white);
        let rgb = self.colorspace.xyz_to_rgb(relative);
        ensure_finite(Stage::Rgb, rgb.to_array())?;
        Ok(rgb)
    }
}

/// Device RGB to CAM02-UCS under `conditions`.
///
/// # Example
/// ```
/// use cam02_ucs::{to_perceptual, Rgb, ViewingConditions};
///
/// let white = to_perceptual(Rgb::new(1.0, 1.0, 1.0), &ViewingConditions::NEUTRAL);
/// assert!((white.j - 100.0).abs() < 1e-9);
/// ```
pub fn to_perceptual(rgb: Rgb, conditions: &ViewingConditions) -> Cam02Ucs {
    Codec::new(conditions).to_perceptual(rgb)
}

/// CAM02-UCS to device RGB under `conditions`, the inverse of [`to_perceptual`].
pub fn to_rgb(ucs: Cam02Ucs, conditions: &ViewingConditions) -> Result<Rgb, NumericDomainError> {
    Codec::new(conditions).to_rgb(ucs)
}
