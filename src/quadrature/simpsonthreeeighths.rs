use nalgebra::DVector;

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
// Simpson 3/8
// ─────────────────────────────────────────────────────────────────────────────
//
// 取不超過 n 的最大 3 的倍數 m 作為主區塊：
//   S = (3h/8)·[f(a) + f(x_m) + 3·Σ_{i mod 3 ≠ 0} f(x_i) + 2·Σ_{i mod 3 = 0, 0<i<m} f(x_i)]
// 剩餘 1 ~ 2 個 panel 以梯形公式補上。不提供誤差估計。

pub struct SimpsonThreeEighths;

impl SimpsonThreeEighths {
    pub fn new() -> SimpsonThreeEighths {
        SimpsonThreeEighths
    }

    /// 權重 [1, 3, 3, 2, 3, 3, 2, …, 3, 3, 1]，m 必須為 3 的倍數
    pub fn weights(m: usize) -> DVector<f64> {
        DVector::from_fn(m + 1, |i, _| {
            if i == 0 || i == m {
                1.0
            } else if i % 3 == 0 {
                2.0
            } else {
                3.0
            }
        })
    }
}

impl QuadratureRule for SimpsonThreeEighths {
    fn id(&self) -> RuleId {
        RuleId::SimpsonThreeEighths
    }

    fn min_intervals(&self) -> usize {
        3
    }

    fn integrate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let grid = UniformGrid::new(a, b, n);
        let main_n = n - n % 3;

        let main_values = UniformGrid::sample_at(f, main_n + 1, |i| grid.node(i))?;
        let mut value = 3.0 * grid.h() / 8.0 * weighted_sum(&Self::weights(main_n), &main_values);

        if main_n < n {
            let remainder = n - main_n;
            value += Trapezoidal::composite(f, grid.node(main_n), b, remainder)?;
        }
        finite_result(self.id(), value)
    }

    fn error_estimate(&self, _f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Option<f64>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        Ok(None)
    }
}
