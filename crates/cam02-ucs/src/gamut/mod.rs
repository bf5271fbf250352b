//! Gamut constraint
//!
//! [`constrain`] maps any RGB into the unit cube by minimizing CAM02-UCS
//! distance with a [`BoundedMinimizer`]. In-gamut colors skip the search.

mod minimizer;
mod projection;

pub use minimizer::{BoundedMinimizer, Bounds, Minimum, MinimizerOptions};
pub use projection::{constrain, project_to_gamut, project_with, Projection};
