//! Device color types and the RGB↔XYZ step
//!
//! - [`Rgb`]: gamma-encoded device color, the type palettes are made of.
//! - [`Xyz`]: tristimulus values, the appearance model's input.
//! - [`Colorspace`]: primaries + white point + transfer curve tying the two
//!   together. [`SRGB_GAMMA_22`] is the working space for everything in the
//!   crate.
//!
//! # Example
//!
//! ```
//! use cam02_ucs::{Rgb, SRGB_GAMMA_22};
//!
//! let xyz = SRGB_GAMMA_22.rgb_to_xyz(Rgb::new(1.0, 1.0, 1.0));
//! assert!((xyz.y - 1.0).abs() < 1e-12);
//! ```

mod colorspace;
mod rgb;
mod xyz;

pub use colorspace::{apow, Colorspace, SRGB_GAMMA_22};
pub use rgb::Rgb;
pub use xyz::Xyz;
