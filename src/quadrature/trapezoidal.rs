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

// ─────────────────────────────────────────────────────────────────────────────
// Trapezoidal
// ─────────────────────────────────────────────────────────────────────────────
//
//   T_n = h·[f(a)/2 + Σ_{i=1}^{n-1} f(a+ih) + f(b)/2]
//   |E| ≤ (b-a)³·M₂ / (12n²),  M₂ = max|f''|

pub struct Trapezoidal;

impl Trapezoidal {
    pub fn new() -> Trapezoidal {
        Trapezoidal
    }

    /// 梯形權重 [½, 1, …, 1, ½]
    pub fn weights(n: usize) -> DVector<f64> {
        let mut weights = DVector::from_element(n + 1, 1.0);
        weights[0] = 0.5;
        weights[n] = 0.5;
        weights
    }

    /// 不做參數檢查的複合梯形公式，Simpson 規則補尾端 panel 時共用
    pub(crate) fn composite(f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        let grid = UniformGrid::new(a, b, n);
        let values = grid.sample_nodes(f)?;
        Ok(grid.h() * weighted_sum(&Self::weights(n), &values))
    }

    pub(crate) fn bound(f: &dyn RealFunction, a: f64, b: f64, n: usize, steps: usize) -> f64 {
        let m2 = DerivativeEstimator::second_derivative_bound(f, a, b, steps);
        ((b - a).powi(3) * m2 / (12.0 * (n as f64).powi(2))).abs()
    }
}

impl QuadratureRule for Trapezoidal {
    fn id(&self) -> RuleId {
        RuleId::Trapezoidal
    }

    fn integrate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        self.check_parameters(a, b, n)?;
        finite_result(self.id(), Self::composite(f, a, b, n)?)
    }

    fn error_estimate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Option<f64>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        Ok(Some(Self::bound(f, a, b, n, FINE_GRID_STEPS)))
    }
}

#[cfg(test)]
mod tests {
    use approx::{
        assert_abs_diff_eq,
        assert_relative_eq
    };

    use super::*;
    use crate::math::realfunction::ClosureFunction;

    #[test]
    fn square_on_zero_two() {
        let f = ClosureFunction::new(|x: f64| x * x);
        let value = Trapezoidal.integrate(&f, 0.0, 2.0, 1000).unwrap();
        assert_abs_diff_eq!(value, 8.0 / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn exact_for_linear_functions() {
        let f = ClosureFunction::new(|x: f64| 3.0 * x - 1.0);
        assert_relative_eq!(Trapezoidal.integrate(&f, 1.0, 4.0, 1).unwrap(), 19.5);
    }

    #[test]
    fn bound_covers_the_actual_error() {
        let f = ClosureFunction::new(|x: f64| x.exp());
        let exact = 1f64.exp() - 1.0;
        let value = Trapezoidal.integrate(&f, 0.0, 1.0, 8).unwrap();
        let bound = Trapezoidal.error_estimate(&f, 0.0, 1.0, 8).unwrap().unwrap();
        assert!((value - exact).abs() <= bound);
        // (b-a)³·e / (12·64)
        assert_relative_eq!(bound, 1f64.exp() / 768.0, max_relative = 1e-4);
    }

    #[test]
    fn rejects_reversed_bounds() {
        let f = ClosureFunction::new(|x: f64| x);
        assert!(Trapezoidal.integrate(&f, 1.0, 0.0, 4).unwrap_err().is_parameter());
        assert!(Trapezoidal.integrate(&f, 0.0, 1.0, 0).unwrap_err().is_parameter());
    }
}
