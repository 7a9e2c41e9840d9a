use nalgebra::DVector;

use crate::math::derivativeestimator::{
    DerivativeEstimator,
    FINE_GRID_STEPS
};
use crate::math::realfunction::RealFunction;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::ruleid::RuleId;
use crate::quadrature::uniformgrid::{
    finite_result,
    weighted_sum,
    UniformGrid
};

// M_n = h·Σ_{i=0}^{n-1} f(a+(i+½)h)
// |E| ≤ (b-a)³·M₂ / (24n²)
pub struct Midpoint;

impl Midpoint {
    pub fn new() -> Midpoint {
        Midpoint
    }
}

impl QuadratureRule for Midpoint {
    fn id(&self) -> RuleId {
        RuleId::Midpoint
    }

    fn integrate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let grid = UniformGrid::new(a, b, n);
        let values = grid.sample_midpoints(f)?;
        let weights = DVector::from_element(n, 1.0);
        finite_result(self.id(), grid.h() * weighted_sum(&weights, &values))
    }

    fn error_estimate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Option<f64>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let m2 = DerivativeEstimator::second_derivative_bound(f, a, b, FINE_GRID_STEPS);
        Ok(Some(((b - a).powi(3) * m2 / (24.0 * (n as f64).powi(2))).abs()))
    }
}
