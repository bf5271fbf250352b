//! Color appearance modelling
//!
//! - [`ViewingConditions`]: the named background presets and the parameters
//!   they stand for.
//! - [`ModelEnvironment`]: CIECAM02 baked for one set of conditions, with the
//!   forward (XYZ → [`JMh`]) and inverse transforms.
//! - [`Cam02Ucs`]: the uniform space used for every distance and adjustment.

mod ciecam02;
mod conditions;
mod ucs;

pub use ciecam02::{JMh, ModelEnvironment};
pub use conditions::{Surround, ViewingConditions};
pub use ucs::Cam02Ucs;
