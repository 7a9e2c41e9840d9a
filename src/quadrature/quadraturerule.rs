use crate::math::point2d::Point2D;
use crate::math::realfunction::RealFunction;
use crate::quadrature::quadratureerror::{
    ParameterError,
    QuadratureError
};
use crate::quadrature::ruleid::RuleId;

/// 數值積分規則的共同介面。
///
/// 各規則只持有自身設定（Monte Carlo 另持有亂數源與最近一次的樣本），
/// 由 `RuleRegistry` 依 `RuleId` 取得。
pub trait QuadratureRule {
    fn id(&self) -> RuleId;

    fn min_intervals(&self) -> usize {
        1
    }

    fn integrate(&self,
                 f: &dyn RealFunction,
                 a: f64,
                 b: f64,
                 n: usize) -> Result<f64, QuadratureError>;

    /// 理論誤差上界或信賴區間半寬；規則未定義時回傳 `None`。
    /// 抽樣型規則在 (a, b, n) 相同時沿用上一次的抽樣位置，但一律以 `f` 求值。
    fn error_estimate(&self,
                      f: &dyn RealFunction,
                      a: f64,
                      b: f64,
                      n: usize) -> Result<Option<f64>, QuadratureError>;

    /// 規則本身會抽樣時，回傳用於繪圖的 (x, f(x))
    fn visualization_samples(&self,
                             _f: &dyn RealFunction,
                             _a: f64,
                             _b: f64,
                             _n: usize) -> Result<Vec<Point2D>, QuadratureError> {
        Ok(Vec::new())
    }

    fn check_parameters(&self, a: f64, b: f64, n: usize) -> Result<(), ParameterError> {
        ParameterError::check_bounds(a, b)?;
        if n == 0 {
            return Err(ParameterError::ZeroIntervals);
        }
        let minimum = self.min_intervals();
        if n < minimum {
            return Err(ParameterError::TooFewIntervals { rule: self.id(), n, minimum });
        }
        Ok(())
    }
}
