//! Perceptual gamut projection
//!
//! Clamping an out-of-gamut RGB componentwise is fast but shifts hue and
//! lightness. Instead, find the in-gamut RGB whose CAM02-UCS coordinates are
//! closest to those of the out-of-gamut color, starting the search from the
//! clamped point.

use nalgebra::Vector3;

use super::minimizer::{BoundedMinimizer, Bounds, Minimum, MinimizerOptions};
use crate::cam::ViewingConditions;
use crate::codec::Codec;
use crate::color::Rgb;
use crate::error::NumericDomainError;

/// Result of projecting a color into the gamut.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The in-gamut color
    pub rgb: Rgb,
    /// Search statistics; `None` when the input was already in gamut
    pub search: Option<Minimum>,
}

impl Projection {
    /// False only when the search ran out of budget or stalled.
    pub fn converged(&self) -> bool {
        self.search.as_ref().map_or(true, |s| s.converged)
    }

    /// Squared CAM02-UCS distance between the input and the result.
    pub fn residual(&self) -> f64 {
        self.search.as_ref().map_or(0.0, |s| s.value)
    }
}

/// Project `rgb` into the gamut with an existing codec and minimizer options.
pub fn project_with(
    codec: &Codec<'_>,
    rgb: Rgb,
    options: &MinimizerOptions,
) -> Result<Projection, NumericDomainError> {
    if rgb.is_in_gamut() {
        return Ok(Projection { rgb, search: None });
    }

    let target = codec.try_to_perceptual(rgb)?;
    let seed = rgb.clamped();

    let minimizer = BoundedMinimizer::with_options(Bounds::unit_cube(), options.clone());
    let minimum = minimizer.minimize(
        |x: &Vector3<f64>| {
            let candidate = codec.to_perceptual(Rgb::new(x.x, x.y, x.z));
            target.distance_squared(candidate)
        },
        Vector3::new(seed.r, seed.g, seed.b),
    );
    if !minimum.value.is_finite() {
        return Err(NumericDomainError::NoFeasiblePoint { seed });
    }

    let point = minimum.point;
    Ok(Projection {
        rgb: Rgb::new(point.x, point.y, point.z),
        search: Some(minimum),
    })
}

/// Project `rgb` into the gamut under `conditions`, with default options.
pub fn project_to_gamut(
    rgb: Rgb,
    conditions: &ViewingConditions,
) -> Result<Projection, NumericDomainError> {
    project_with(&Codec::new(conditions), rgb, &MinimizerOptions::default())
}

/// The nearest in-gamut color to `rgb`, measured in CAM02-UCS.
///
/// In-gamut input is returned unchanged, bit for bit.
///
/// # Example
/// ```
/// use cam02_ucs::{constrain, Rgb, ViewingConditions};
///
/// let rgb = constrain(Rgb::new(1.2, -0.1, 0.3), &ViewingConditions::NEUTRAL).unwrap();
/// assert!(rgb.is_in_gamut());
/// ```
pub fn constrain(rgb: Rgb, conditions: &ViewingConditions) -> Result<Rgb, NumericDomainError> {
    project_to_gamut(rgb, conditions).map(|projection| projection.rgb)
}
