use log::trace;

use crate::math::realfunction::RealFunction;

// ─────────────────────────────────────────────────────────────────────────────
// DerivativeEstimator
// ─────────────────────────────────────────────────────────────────────────────
//
// 以中央差分在等距網格上估計 max|f''| 與 max|f''''|，供 Newton-Cotes
// 類規則的理論誤差上界使用：
//
//   f''(x)   ≈ (f(x+h) - 2f(x) + f(x-h)) / h²
//   f''''(x) ≈ (f(x+2h) - 4f(x+h) + 6f(x) - 4f(x-h) + f(x-2h)) / h⁴
//
// 任一點求值失敗或結果非有限，該點略過；全部略過時上界為 0。

/// Trapezoidal / Midpoint 與四階導數使用的網格步數
pub const FINE_GRID_STEPS: usize = 1000;

/// Simpson 奇數區間補上的梯形 panel 所用的網格步數
pub const COARSE_GRID_STEPS: usize = 100;

const SECOND_DERIVATIVE_STEP: f64 = 1e-3;
const FOURTH_DERIVATIVE_STEP: f64 = 1e-2;

pub struct DerivativeEstimator;

impl DerivativeEstimator {
    pub fn second_derivative_bound<F>(f: &F, a: f64, b: f64, steps: usize) -> f64 where
        F: RealFunction + ?Sized {
        let h = SECOND_DERIVATIVE_STEP;
        Self::grid_max(a, b, steps, |x| {
            let f_minus = f.evaluate(x - h).ok()?;
            let f_mid = f.evaluate(x).ok()?;
            let f_plus = f.evaluate(x + h).ok()?;
            Some((f_plus - 2.0 * f_mid + f_minus) / (h * h))
        })
    }

    pub fn fourth_derivative_bound<F>(f: &F, a: f64, b: f64, steps: usize) -> f64 where
        F: RealFunction + ?Sized {
        let h = FOURTH_DERIVATIVE_STEP;
        Self::grid_max(a, b, steps, |x| {
            let f_m2 = f.evaluate(x - 2.0 * h).ok()?;
            let f_m1 = f.evaluate(x - h).ok()?;
            let f_0 = f.evaluate(x).ok()?;
            let f_p1 = f.evaluate(x + h).ok()?;
            let f_p2 = f.evaluate(x + 2.0 * h).ok()?;
            Some((f_p2 - 4.0 * f_p1 + 6.0 * f_0 - 4.0 * f_m1 + f_m2) / h.powi(4))
        })
    }

    fn grid_max<D>(a: f64, b: f64, steps: usize, derivative: D) -> f64 where
        D: Fn(f64) -> Option<f64> {
        let steps = steps.max(1);
        let dx = (b - a) / steps as f64;
        let mut bound = 0.0f64;
        let mut skipped = 0usize;

        for i in 0..=steps {
            let x = a + i as f64 * dx;
            match derivative(x) {
                Some(value) if value.is_finite() => bound = bound.max(value.abs()),
                _ => skipped += 1
            }
        }

        if skipped > 0 {
            trace!("derivative grid on [{}, {}]: skipped {} of {} nodes", a, b, skipped, steps + 1);
        }
        bound
    }
}
