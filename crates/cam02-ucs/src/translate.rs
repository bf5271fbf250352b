//! Color translation between viewing conditions
//!
//! "Which color, shown under the destination conditions, looks like this
//! color shown under the source conditions?" The source RGB is taken into
//! CAM02-UCS under the source conditions, optionally adjusted, brought back
//! out under the destination conditions and projected into the gamut.
//!
//! Adjustments are applied in a fixed order: lightness inversion, then
//! lightness scaling, then chroma scaling.

use crate::cam::{Cam02Ucs, ViewingConditions};
use crate::codec::Codec;
use crate::color::Rgb;
use crate::error::NumericDomainError;
use crate::gamut::{project_with, MinimizerOptions, Projection};

/// A configured translation from one set of viewing conditions to another.
///
/// Holds a codec for each side, so translating many colors with one
/// `Translation` only bakes the appearance model twice.
///
/// # Example
/// ```
/// use cam02_ucs::{Rgb, Translation, ViewingConditions};
///
/// let translation = Translation::new(&ViewingConditions::DARK, &ViewingConditions::LIGHT)
///     .chroma_factor(1.1);
/// let rgb = translation.apply(Rgb::new(0.8, 0.2, 0.2)).unwrap();
/// assert!(rgb.is_in_gamut());
/// ```
#[derive(Debug, Clone)]
pub struct Translation {
    source: Codec<'static>,
    destination: Codec<'static>,
    invert_lightness: bool,
    lightness_factor: f64,
    chroma_factor: f64,
    options: MinimizerOptions,
}

impl Translation {
    pub fn new(source: &ViewingConditions, destination: &ViewingConditions) -> Self {
        Self {
            source: Codec::new(source),
            destination: Codec::new(destination),
            invert_lightness: false,
            lightness_factor: 1.0,
            chroma_factor: 1.0,
            options: MinimizerOptions::default(),
        }
    }

    /// Mirror lightness (`J' → 100 − J'`) before scaling it.
    pub fn invert_lightness(mut self, invert: bool) -> Self {
        self.invert_lightness = invert;
        self
    }

    /// Multiply lightness `J'`.
    pub fn lightness_factor(mut self, factor: f64) -> Self {
        self.lightness_factor = factor;
        self
    }

    /// Multiply both chroma components `a'` and `b'`.
    pub fn chroma_factor(mut self, factor: f64) -> Self {
        self.chroma_factor = factor;
        self
    }

    /// Options for the gamut search.
    pub fn minimizer_options(mut self, options: MinimizerOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn source(&self) -> &ViewingConditions {
        self.source.conditions()
    }

    #[inline]
    pub fn destination(&self) -> &ViewingConditions {
        self.destination.conditions()
    }

    /// Apply the configured adjustments to a perceptual color.
    pub fn adjust(&self, ucs: Cam02Ucs) -> Cam02Ucs {
        let ucs = if self.invert_lightness {
            ucs.invert_lightness()
        } else {
            ucs
        };
        ucs.scale_lightness(self.lightness_factor)
            .scale_chroma(self.chroma_factor)
    }

    /// The translated color before gamut projection.
    pub fn unconstrained(&self, rgb: Rgb) -> Result<Rgb, NumericDomainError> {
        let ucs = self.adjust(self.source.try_to_perceptual(rgb)?);
        self.destination.to_rgb(ucs)
    }

    /// Project an [`unconstrained`](Translation::unconstrained) result into
    /// the gamut under the destination conditions.
    pub fn constrain(&self, unconstrained: Rgb) -> Result<Projection, NumericDomainError> {
        project_with(&self.destination, unconstrained, &self.options)
    }

    /// Translate `rgb`, reporting the gamut search.
    pub fn project(&self, rgb: Rgb) -> Result<Projection, NumericDomainError> {
        self.constrain(self.unconstrained(rgb)?)
    }

    /// Translate `rgb` to an in-gamut color.
    pub fn apply(&self, rgb: Rgb) -> Result<Rgb, NumericDomainError> {
        self.project(rgb).map(|projection| projection.rgb)
    }
}

/// Translate `rgb` from `source` to `destination` conditions.
///
/// `invert_j` mirrors lightness, `j_factor` scales lightness and `m_factor`
/// scales colorfulness, in that order, before the color is brought back into
/// RGB and the gamut.
///
/// # Example
/// ```
/// use cam02_ucs::{translate, Rgb, ViewingConditions};
///
/// let white = Rgb::new(1.0, 1.0, 1.0);
/// let on_light = translate(
///     white,
///     &ViewingConditions::DARK,
///     &ViewingConditions::LIGHT,
///     false,
///     1.0,
///     1.0,
/// )
/// .unwrap();
/// assert!(on_light.r > 0.98 && on_light.g > 0.98 && on_light.b > 0.98);
/// ```
pub fn translate(
    rgb: Rgb,
    source: &ViewingConditions,
    destination: &ViewingConditions,
    invert_j: bool,
    j_factor: f64,
    m_factor: f64,
) -> Result<Rgb, NumericDomainError> {
    Translation::new(source, destination)
        .invert_lightness(invert_j)
        .lightness_factor(j_factor)
        .chroma_factor(m_factor)
        .apply(rgb)
}
