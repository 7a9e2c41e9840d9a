use nalgebra::DVector;

use crate::math::derivativeestimator::{
    DerivativeEstimator,
    COARSE_GRID_STEPS,
    FINE_GRID_STEPS
};
use crate::math::realfunction::RealFunction;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::ruleid::RuleId;
use crate::quadrature::trapezoidal::Trapezoidal;
use crate::quadrature::uniformgrid::{
    finite_result,
    weighted_sum,
    UniformGrid
};

// ─────────────────────────────────────────────────────────────────────────────
// Simpson 1/3
// ─────────────────────────────────────────────────────────────────────────────
//
// n 為偶數：
//   S_n = (h/3)·[f(a) + f(b) + 4·Σ_{i odd} f(x_i) + 2·Σ_{i even, 0<i<n} f(x_i)]
//   |E| ≤ (b-a)⁵·M₄ / (180n⁴)
//
// n 為奇數：前 n-1 個 panel 用 Simpson，最後一個 panel 用梯形；
// 誤差上界為兩者相加，梯形部分的 M₂ 只在最後一個 panel 上估計。

pub struct SimpsonOneThird;

impl SimpsonOneThird {
    pub fn new() -> SimpsonOneThird {
        SimpsonOneThird
    }

    /// 權重 [1, 4, 2, 4, …, 2, 4, 1]，n 必須為偶數
    pub fn weights(n: usize) -> DVector<f64> {
        DVector::from_fn(n + 1, |i, _| {
            if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            }
        })
    }

    fn even_composite(f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        let grid = UniformGrid::new(a, b, n);
        let values = grid.sample_nodes(f)?;
        Ok(grid.h() / 3.0 * weighted_sum(&Self::weights(n), &values))
    }

    fn even_bound(f: &dyn RealFunction, a: f64, b: f64, n: usize) -> f64 {
        let m4 = DerivativeEstimator::fourth_derivative_bound(f, a, b, FINE_GRID_STEPS);
        ((b - a).powi(5) * m4 / (180.0 * (n as f64).powi(4))).abs()
    }

    /// Simpson 部分的右端點 a + (n-1)·h
    fn split_point(a: f64, b: f64, n: usize) -> f64 {
        a + (n - 1) as f64 * (b - a) / n as f64
    }
}

impl QuadratureRule for SimpsonOneThird {
    fn id(&self) -> RuleId {
        RuleId::SimpsonOneThird
    }

    fn integrate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let value = if n % 2 == 0 {
            Self::even_composite(f, a, b, n)?
        } else if n == 1 {
            Trapezoidal::composite(f, a, b, 1)?
        } else {
            let split = Self::split_point(a, b, n);
            Self::even_composite(f, a, split, n - 1)? + Trapezoidal::composite(f, split, b, 1)?
        };
        finite_result(self.id(), value)
    }

    fn error_estimate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Option<f64>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let bound = if n % 2 == 0 {
            Self::even_bound(f, a, b, n)
        } else if n == 1 {
            Trapezoidal::bound(f, a, b, 1, COARSE_GRID_STEPS)
        } else {
            let split = Self::split_point(a, b, n);
            Self::even_bound(f, a, split, n - 1) + Trapezoidal::bound(f, split, b, 1, COARSE_GRID_STEPS)
        };
        Ok(Some(bound))
    }
}
