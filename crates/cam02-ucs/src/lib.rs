#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! cam02-ucs: perceptual color translation across viewing conditions
//!
//! The same RGB triple looks different on a dark terminal background than on
//! a light one. This crate answers "which color, shown on background B, looks
//! like this color shown on background A?" using the CIECAM02 color
//! appearance model and its uniform space CAM02-UCS.
//!
//! # Quick Start
//!
//! ```
//! use cam02_ucs::{translate, Rgb, ViewingConditions};
//!
//! let dark = ViewingConditions::by_name(Some("dark"));
//! let light = ViewingConditions::by_name(Some("light"));
//!
//! // Foreground red from a dark-background scheme, for a light background
//! let red = translate(Rgb::from_u8(204, 36, 29), &dark, &light, false, 1.0, 1.0).unwrap();
//! assert!(red.is_in_gamut());
//! ```
//!
//! # Operations
//!
//! | Operation | Item |
//! |-----------|------|
//! | Named viewing conditions | [`ViewingConditions::by_name`], [`ViewingConditions::lookup`] |
//! | RGB → CAM02-UCS | [`to_perceptual`], [`Codec::to_perceptual`] |
//! | CAM02-UCS → RGB | [`to_rgb`], [`Codec::to_rgb`] |
//! | Gamut projection | [`constrain`], [`project_to_gamut`] |
//! | Translation | [`translate`], [`Translation`] |
//!
//! # Pipeline
//!
//! ```text
//! Rgb (source)
//!     |  gamma 2.2, sRGB primaries, ·80 cd/m²
//!     v
//! Xyz ──CIECAM02 (source conditions)──► JMh ──► Cam02Ucs
//!                                                 |
//!                              invert J' / scale J' / scale a'b'
//!                                                 |
//! Xyz ◄─CIECAM02⁻¹ (destination conditions)── JMh ◄┘
//!     |
//!     v
//! Rgb (may be outside [0, 1]³)
//!     |
//!     v
//! constrain: nearest in-gamut Rgb by CAM02-UCS distance
//! ```
//!
//! # Working Color Space
//!
//! RGB is sRGB primaries with a D65 white, decoded with a pure 2.2 power law
//! rather than the piecewise sRGB curve. The power is sign-preserving
//! ([`color::apow`]), so the negative components that appear during gamut
//! projection decode to negative light instead of NaN.
//!
//! # Numeric Failures
//!
//! Colors far outside the model's domain produce NaN partway through the
//! pipeline. Fallible operations check each stage and return
//! [`NumericDomainError`] naming where it happened. What to do about it (clamp,
//! skip, abort) is left to the caller.

pub mod cam;
pub mod codec;
pub mod color;
pub mod error;
pub mod gamut;
pub mod translate;

#[cfg(test)]
mod domain_tests;

pub use cam::{Cam02Ucs, JMh, ModelEnvironment, Surround, ViewingConditions};
pub use codec::{to_perceptual, to_rgb, Codec};
pub use color::{Colorspace, Rgb, Xyz, SRGB_GAMMA_22};
pub use error::{NumericDomainError, Stage};
pub use gamut::{constrain, project_to_gamut, BoundedMinimizer, Minimum, MinimizerOptions, Projection};
pub use translate::{translate, Translation};
