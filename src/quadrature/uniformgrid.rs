use nalgebra::DVector;

use crate::math::realfunction::RealFunction;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::ruleid::RuleId;

/// `[a, b]` 切成 `n` 個等寬 panel 的網格，節點 `x_i = a + i·h`。
pub struct UniformGrid {
    a: f64,
    b: f64,
    n: usize,
    h: f64
}

impl UniformGrid {
    pub fn new(a: f64, b: f64, n: usize) -> UniformGrid {
        UniformGrid { a, b, n, h: (b - a) / n as f64 }
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    /// 第 `i` 個節點；最後一點直接回傳 `b`，避免累積誤差
    pub fn node(&self, i: usize) -> f64 {
        if i == self.n {
            self.b
        } else {
            self.a + i as f64 * self.h
        }
    }

    /// 全部 `n + 1` 個節點上的函數值
    pub fn sample_nodes(&self, f: &dyn RealFunction) -> Result<DVector<f64>, QuadratureError> {
        Self::sample_at(f, self.n + 1, |i| self.node(i))
    }

    /// 各 panel 中點上的函數值
    pub fn sample_midpoints(&self, f: &dyn RealFunction) -> Result<DVector<f64>, QuadratureError> {
        Self::sample_at(f, self.n, |i| self.a + (i as f64 + 0.5) * self.h)
    }

    pub fn sample_at<X>(f: &dyn RealFunction, count: usize, x_of: X) -> Result<DVector<f64>, QuadratureError> where
        X: Fn(usize) -> f64 {
        let mut values = DVector::zeros(count);
        for i in 0..count {
            let x = x_of(i);
            values[i] = f
                .evaluate(x)
                .map_err(|source| QuadratureError::Evaluation { x, source })?;
        }
        Ok(values)
    }
}

/// Σ wᵢ·f(xᵢ)
pub fn weighted_sum(weights: &DVector<f64>, values: &DVector<f64>) -> f64 {
    weights.dot(values)
}

pub fn finite_result(rule: RuleId, value: f64) -> Result<f64, QuadratureError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuadratureError::NonFinite { rule })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::realfunction::ClosureFunction;

    #[test]
    fn nodes_cover_the_interval() {
        let grid = UniformGrid::new(0.0, 1.0, 10);
        assert_eq!(grid.node(0), 0.0);
        assert_eq!(grid.node(10), 1.0);
        assert_eq!(grid.h(), 0.1);
    }

    #[test]
    fn evaluation_failure_carries_the_node() {
        let grid = UniformGrid::new(-1.0, 1.0, 2);
        let f = ClosureFunction::new(|x: f64| x.sqrt());
        match grid.sample_nodes(&f) {
            Err(QuadratureError::Evaluation { x, .. }) => assert_eq!(x, -1.0),
            other => panic!("unexpected {:?}", other)
        }
    }

    #[test]
    fn weighted_sum_is_a_dot_product() {
        let weights = DVector::from_vec(vec![0.5, 1.0, 0.5]);
        let values = DVector::from_vec(vec![2.0, 4.0, 6.0]);
        assert_eq!(weighted_sum(&weights, &values), 8.0);
    }
}
