use std::cell::RefCell;

use log::trace;
use nalgebra::DVector;
use rand::{
    Rng,
    SeedableRng
};
use rand_chacha::ChaCha8Rng;

use crate::math::point2d::Point2D;
use crate::math::realfunction::RealFunction;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::ruleid::RuleId;
use crate::quadrature::uniformgrid::{
    finite_result,
    UniformGrid
};

// ─────────────────────────────────────────────────────────────────────────────
// MonteCarlo
// ─────────────────────────────────────────────────────────────────────────────
//
//   I ≈ (b-a)·mean(f(X_i)),  X_i ~ U[a, b]
//   95% 信賴區間半寬 = 1.96·(b-a)·sqrt(s²/n)，s² 為不偏樣本變異數
//
// 亂數源與最近一次的樣本都屬於此 instance；每次抽樣覆寫快取。
// 內部使用 RefCell，同一個 instance 不可跨執行緒共用。

const CONFIDENCE_Z: f64 = 1.96;

struct SampleCache {
    a: f64,
    b: f64,
    points: Vec<Point2D>
}

impl SampleCache {
    fn matches(&self, a: f64, b: f64, n: usize) -> bool {
        self.a == a && self.b == b && self.points.len() == n
    }
}

pub struct MonteCarlo {
    rng: RefCell<ChaCha8Rng>,
    last_samples: RefCell<Option<SampleCache>>
}

impl MonteCarlo {
    pub fn new() -> MonteCarlo {
        MonteCarlo::from_rng(ChaCha8Rng::from_entropy())
    }

    /// 固定種子，結果可重現
    pub fn with_seed(seed: u64) -> MonteCarlo {
        MonteCarlo::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> MonteCarlo {
        MonteCarlo { rng: RefCell::new(rng), last_samples: RefCell::new(None) }
    }

    /// 最近一次抽樣的點；尚未抽樣時為空
    pub fn last_samples(&self) -> Vec<Point2D> {
        self.last_samples
            .borrow()
            .as_ref()
            .map_or_else(Vec::new, |cache| cache.points.clone())
    }

    fn draw(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Vec<Point2D>, QuadratureError> {
        let xs: Vec<f64> = {
            let mut rng = self.rng.borrow_mut();
            (0..n).map(|_| rng.gen_range(a..b)).collect()
        };
        trace!("monte carlo drew {} samples on [{}, {}]", n, a, b);
        self.evaluate_at(f, a, b, xs)
    }

    fn evaluate_at(&self, f: &dyn RealFunction, a: f64, b: f64, xs: Vec<f64>) -> Result<Vec<Point2D>, QuadratureError> {
        let values = UniformGrid::sample_at(f, xs.len(), |i| xs[i])?;
        let points: Vec<Point2D> = xs
            .iter()
            .zip(values.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect();
        *self.last_samples.borrow_mut() = Some(SampleCache { a, b, points: points.clone() });
        Ok(points)
    }

    /// 同一組 (a, b, n) 沿用快取的抽樣位置，並以傳入的 `f` 重新求值
    fn samples_for(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Vec<Point2D>, QuadratureError> {
        let cached_xs: Option<Vec<f64>> = self.last_samples
            .borrow()
            .as_ref()
            .filter(|cache| cache.matches(a, b, n))
            .map(|cache| cache.points.iter().map(|point| point.x()).collect());
        match cached_xs {
            Some(xs) => self.evaluate_at(f, a, b, xs),
            None => self.draw(f, a, b, n)
        }
    }

    fn values(points: &[Point2D]) -> DVector<f64> {
        DVector::from_iterator(points.len(), points.iter().map(|point| point.y()))
    }
}

impl QuadratureRule for MonteCarlo {
    fn id(&self) -> RuleId {
        RuleId::MonteCarlo
    }

    fn integrate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<f64, QuadratureError> {
        self.check_parameters(a, b, n)?;
        let points = self.draw(f, a, b, n)?;
        finite_result(self.id(), (b - a) * Self::values(&points).mean())
    }

    fn error_estimate(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Option<f64>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        if n < 2 {
            return Ok(None);
        }
        let values = Self::values(&self.samples_for(f, a, b, n)?);
        let mean = values.mean();
        let sample_variance = values.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let half_width = CONFIDENCE_Z * (b - a) * (sample_variance / n as f64).sqrt();
        finite_result(self.id(), half_width).map(Some)
    }

    fn visualization_samples(&self, f: &dyn RealFunction, a: f64, b: f64, n: usize) -> Result<Vec<Point2D>, QuadratureError> {
        self.check_parameters(a, b, n)?;
        self.samples_for(f, a, b, n)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::realfunction::ClosureFunction;

    #[test]
    fn same_seed_same_estimate() {
        let f = ClosureFunction::new(|x: f64| x * x);
        let first = MonteCarlo::with_seed(7).integrate(&f, 0.0, 2.0, 500).unwrap();
        let second = MonteCarlo::with_seed(7).integrate(&f, 0.0, 2.0, 500).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn estimate_lies_within_a_few_half_widths() {
        let f = ClosureFunction::new(|x: f64| x * x);
        let rule = MonteCarlo::with_seed(2024);
        let value = rule.integrate(&f, 0.0, 2.0, 20_000).unwrap();
        let half_width = rule.error_estimate(&f, 0.0, 2.0, 20_000).unwrap().unwrap();
        assert!(half_width > 0.0);
        assert!((value - 8.0 / 3.0).abs() < 4.0 * half_width);
    }

    #[test]
    fn constant_function_has_zero_half_width() {
        let f = ClosureFunction::new(|_x: f64| 2.0);
        let rule = MonteCarlo::with_seed(1);
        assert_relative_eq!(rule.integrate(&f, -1.0, 3.0, 100).unwrap(), 8.0);
        assert_eq!(rule.error_estimate(&f, -1.0, 3.0, 100).unwrap(), Some(0.0));
    }

    #[test]
    fn error_estimate_reuses_the_integration_samples() {
        let f = ClosureFunction::new(|x: f64| x.sin());
        let rule = MonteCarlo::with_seed(11);
        rule.integrate(&f, 0.0, 1.0, 50).unwrap();
        let drawn = rule.last_samples();
        rule.error_estimate(&f, 0.0, 1.0, 50).unwrap();
        assert_eq!(rule.visualization_samples(&f, 0.0, 1.0, 50).unwrap(), drawn);
        assert!(drawn.iter().all(|point| (0.0..1.0).contains(&point.x())));
    }

    #[test]
    fn cache_is_overwritten_not_merged() {
        let f = ClosureFunction::new(|x: f64| x);
        let rule = MonteCarlo::with_seed(3);
        rule.integrate(&f, 0.0, 1.0, 40).unwrap();
        rule.integrate(&f, 0.0, 1.0, 10).unwrap();
        assert_eq!(rule.last_samples().len(), 10);
    }

    #[test]
    fn half_width_belongs_to_the_function_passed_in() {
        let square = ClosureFunction::new(|x: f64| x * x);
        let constant = ClosureFunction::new(|_x: f64| 1.0);
        let rule = MonteCarlo::with_seed(17);
        rule.integrate(&square, 0.0, 2.0, 200).unwrap();
        let positions: Vec<f64> = rule.last_samples().iter().map(|point| point.x()).collect();
        assert_eq!(rule.error_estimate(&constant, 0.0, 2.0, 200).unwrap(), Some(0.0));
        let reused: Vec<f64> = rule.last_samples().iter().map(|point| point.x()).collect();
        assert_eq!(reused, positions);
        assert!(rule.error_estimate(&square, 0.0, 2.0, 200).unwrap().unwrap() > 0.0);
    }

    #[test]
    fn overflowing_interval_width_is_a_parameter_error() {
        let f = ClosureFunction::new(|_x: f64| 1.0);
        let error = MonteCarlo::with_seed(5).integrate(&f, -1e308, 1e308, 4).unwrap_err();
        assert!(error.is_parameter());
    }

    #[test]
    fn single_sample_has_no_half_width() {
        let f = ClosureFunction::new(|x: f64| x);
        assert_eq!(MonteCarlo::with_seed(5).error_estimate(&f, 0.0, 1.0, 1), Ok(None));
    }
}
