//! Numeric failure reporting
//!
//! The conversions themselves never panic. When a color is far enough outside
//! the model's domain the equations produce NaN or infinity; the public
//! operations check for that at stage boundaries and return
//! [`NumericDomainError`] instead of handing the NaN on.

use std::fmt;

use crate::color::Rgb;

/// The conversion step at which a non-finite value appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Device RGB → CAM02-UCS
    Perceptual,
    /// CAM02-UCS → CIECAM02 correlates → XYZ
    Tristimulus,
    /// XYZ → device RGB
    Rgb,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Perceptual => "perceptual",
            Stage::Tristimulus => "tristimulus",
            Stage::Rgb => "rgb",
        };
        f.write_str(name)
    }
}

/// A color left the numerically meaningful domain of the appearance model.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericDomainError {
    /// A conversion produced NaN or infinity.
    NonFinite {
        /// Where it happened
        stage: Stage,
        /// The offending triple, as produced by that stage
        components: [f64; 3],
    },
    /// The gamut search could not evaluate its loss even at the clamped seed.
    NoFeasiblePoint {
        /// The clamped starting point
        seed: Rgb,
    },
}

impl fmt::Display for NumericDomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericDomainError::NonFinite { stage, components } => write!(
                f,
                "non-finite {} components [{}, {}, {}]",
                stage, components[0], components[1], components[2]
            ),
            NumericDomainError::NoFeasiblePoint { seed } => write!(
                f,
                "gamut search has no finite loss at seed ({}, {}, {})",
                seed.r, seed.g, seed.b
            ),
        }
    }
}

impl std::error::Error for NumericDomainError {}

/// Return `components` unchanged if all are finite, else the error for `stage`.
pub(crate) fn ensure_finite(stage: Stage, components: [f64; 3]) -> Result<[f64; 3], NumericDomainError> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(components)
    } else {
        Err(NumericDomainError::NonFinite { stage, components })
    }
}
