//! Box-constrained minimization with numeric gradients
//!
//! Projected quasi-Newton: a BFGS inverse-Hessian estimate restricted to the
//! variables not pinned at a bound, an Armijo backtracking search along the
//! projection of the step onto the box, and forward-difference gradients.
//!
//! The stopping rules and default tolerances follow the usual L-BFGS-B
//! conventions (`pgtol`, `factr`, `maxiter`, `maxfun`), so results are
//! comparable with a SciPy `minimize(method="L-BFGS-B")` call using the same
//! numbers.

use nalgebra::{Matrix3, Vector3};

/// Sufficient-decrease constant of the Armijo condition.
const ARMIJO: f64 = 1e-4;
/// Step halvings before the line search gives up.
const MAX_BACKTRACKS: usize = 40;
/// Curvature `sᵀy` below which the BFGS update is skipped.
const CURVATURE_FLOOR: f64 = 1e-10;

/// Lower and upper bound per variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: Vector3<f64>,
    upper: Vector3<f64>,
}

impl Bounds {
    pub fn new(lower: Vector3<f64>, upper: Vector3<f64>) -> Self {
        Self { lower, upper }
    }

    /// `[0, 1]³`, the RGB gamut.
    pub fn unit_cube() -> Self {
        Self::new(Vector3::zeros(), Vector3::repeat(1.0))
    }

    /// Nearest point inside the box.
    #[inline]
    pub fn project(&self, x: &Vector3<f64>) -> Vector3<f64> {
        x.zip_zip_map(&self.lower, &self.upper, |v, lo, hi| v.clamp(lo, hi))
    }

    #[inline]
    pub fn contains(&self, x: &Vector3<f64>) -> bool {
        (0..3).all(|i| (self.lower[i]..=self.upper[i]).contains(&x[i]))
    }

    /// 1.0 for variables the gradient could move into the box's interior,
    /// 0.0 for those pinned at a bound by the sign of their derivative.
    fn free_mask(&self, x: &Vector3<f64>, gradient: &Vector3<f64>) -> Vector3<f64> {
        Vector3::from_fn(|i, _| {
            let pinned = (x[i] <= self.lower[i] && gradient[i] > 0.0)
                || (x[i] >= self.upper[i] && gradient[i] < 0.0);
            if pinned {
                0.0
            } else {
                1.0
            }
        })
    }
}

/// Stopping rules for [`BoundedMinimizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerOptions {
    /// Forward-difference step for the numeric gradient
    pub gradient_step: f64,
    /// Stop once the projected gradient's largest component is this small
    pub projected_gradient_tolerance: f64,
    /// Stop once an iteration improves the loss by less than
    /// `reduction_factor · ε · max(|f|, 1)`
    pub reduction_factor: f64,
    pub max_iterations: usize,
    /// Budget of loss evaluations, gradient estimates included
    pub max_evaluations: usize,
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            gradient_step: 1e-8,
            projected_gradient_tolerance: 1e-5,
            reduction_factor: 1e7,
            max_iterations: 15_000,
            max_evaluations: 15_000,
        }
    }
}

impl MinimizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gradient_step(mut self, step: f64) -> Self {
        self.gradient_step = step;
        self
    }

    pub fn projected_gradient_tolerance(mut self, tolerance: f64) -> Self {
        self.projected_gradient_tolerance = tolerance;
        self
    }

    pub fn reduction_factor(mut self, factor: f64) -> Self {
        self.reduction_factor = factor;
        self
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn max_evaluations(mut self, evaluations: usize) -> Self {
        self.max_evaluations = evaluations;
        self
    }
}

/// Outcome of a minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point found; always inside the bounds
    pub point: Vector3<f64>,
    /// Loss at `point`, `+∞` if it could not be evaluated
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    /// True when a tolerance was met, false when a budget ran out or the
    /// line search could not make progress
    pub converged: bool,
}

/// Loss function wrapper counting evaluations. Non-finite losses count as +∞
/// so they lose every comparison.
struct Objective<F> {
    loss: F,
    evaluations: usize,
}

impl<F: FnMut(&Vector3<f64>) -> f64> Objective<F> {
    fn eval(&mut self, x: &Vector3<f64>) -> f64 {
        self.evaluations += 1;
        let value = (self.loss)(x);
        if value.is_finite() {
            value
        } else {
            f64::INFINITY
        }
    }

    /// Forward differences, stepping backwards where the forward point would
    /// leave the box.
    fn gradient(&mut self, x: &Vector3<f64>, fx: f64, bounds: &Bounds, step: f64) -> Vector3<f64> {
        let mut gradient = Vector3::zeros();
        for i in 0..3 {
            let h = if x[i] + step > bounds.upper[i] { -step } else { step };
            let mut probe = *x;
            probe[i] += h;
            gradient[i] = (self.eval(&probe) - fx) / h;
        }
        gradient
    }
}

/// Minimizes a function of three variables inside a box.
///
/// # Example
/// ```
/// use cam02_ucs::gamut::{Bounds, BoundedMinimizer};
/// use nalgebra::Vector3;
///
/// let minimizer = BoundedMinimizer::new(Bounds::unit_cube());
/// let target = Vector3::new(0.25, 1.5, 0.5);
/// let minimum = minimizer.minimize(|x| (x - target).norm_squared(), Vector3::zeros());
/// assert!(minimum.converged);
/// assert!((minimum.point.y - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedMinimizer {
    bounds: Bounds,
    options: MinimizerOptions,
}

impl BoundedMinimizer {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_options(bounds, MinimizerOptions::default())
    }

    pub fn with_options(bounds: Bounds, options: MinimizerOptions) -> Self {
        Self { bounds, options }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn options(&self) -> &MinimizerOptions {
        &self.options
    }

    /// Minimize `loss` starting from `start` (projected into the box first).
    ///
    /// Never fails: if the loss is non-finite at the start the returned
    /// minimum has `value == +∞` and `converged == false`.
    pub fn minimize<F>(&self, loss: F, start: Vector3<f64>) -> Minimum
    where
        F: FnMut(&Vector3<f64>) -> f64,
    {
        let options = &self.options;
        let bounds = &self.bounds;
        let reduction_tolerance = options.reduction_factor * f64::EPSILON;

        let mut objective = Objective {
            loss,
            evaluations: 0,
        };
        let mut x = bounds.project(&start);
        let mut fx = objective.eval(&x);
        let mut iterations = 0;

        let finish = |point, value, iterations, evaluations, converged| Minimum {
            point,
            value,
            iterations,
            evaluations,
            converged,
        };

        if !fx.is_finite() {
            return finish(x, fx, 0, objective.evaluations, false);
        }

        let mut gradient = objective.gradient(&x, fx, bounds, options.gradient_step);
        let mut inverse_hessian = Matrix3::identity();
        let mut previous_mask: Option<Vector3<f64>> = None;

        while iterations < options.max_iterations && objective.evaluations < options.max_evaluations {
            if !gradient.iter().all(|g| g.is_finite()) {
                return finish(x, fx, iterations, objective.evaluations, false);
            }

            let projected_gradient = bounds.project(&(x - gradient)) - x;
            if projected_gradient.amax() <= options.projected_gradient_tolerance {
                return finish(x, fx, iterations, objective.evaluations, true);
            }

            let mask = bounds.free_mask(&x, &gradient);
            if previous_mask != Some(mask) {
                inverse_hessian = Matrix3::identity();
            }
            previous_mask = Some(mask);

            let mut direction =
                -(inverse_hessian * gradient.component_mul(&mask)).component_mul(&mask);
            if direction.dot(&gradient) >= 0.0 {
                inverse_hessian = Matrix3::identity();
                direction = -gradient.component_mul(&mask);
            }

            // Backtrack along the projection arc
            let mut step = 1.0;
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let candidate = bounds.project(&(x + direction * step));
                let value = objective.eval(&candidate);
                let predicted = gradient.dot(&(candidate - x));
                if value.is_finite() && value <= fx + ARMIJO * predicted {
                    accepted = Some((candidate, value));
                    break;
                }
                step *= 0.5;
            }
            let Some((next, next_value)) = accepted else {
                return finish(x, fx, iterations, objective.evaluations, false);
            };

            let next_gradient = objective.gradient(&next, next_value, bounds, options.gradient_step);
            iterations += 1;

            let s = (next - x).component_mul(&mask);
            let y = (next_gradient - gradient).component_mul(&mask);
            let curvature = s.dot(&y);
            if curvature > CURVATURE_FLOOR {
                let rho = 1.0 / curvature;
                let hy = inverse_hessian * y;
                let yhy = y.dot(&hy);
                inverse_hessian -= (hy * s.transpose() + s * hy.transpose()) * rho;
                inverse_hessian += s * s.transpose() * (rho * rho * yhy + rho);
            }

            let reduction = fx - next_value;
            let scale = fx.abs().max(next_value.abs()).max(1.0);
            x = next;
            fx = next_value;
            gradient = next_gradient;

            if reduction <= reduction_tolerance * scale {
                return finish(x, fx, iterations, objective.evaluations, true);
            }
        }

        finish(x, fx, iterations, objective.evaluations, false)
    }
}
