use thiserror::Error;

use crate::math::realfunction::EvaluationError;
use crate::quadrature::ruleid::RuleId;

/// 請求參數不合法；對整個計算而言是致命錯誤。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("invalid bounds: expected finite a < b with finite b - a, got a = {a}, b = {b}")]
    InvalidBounds {
        a: f64,
        b: f64
    },
    #[error("{rule} needs at least {minimum} intervals, got {n}")]
    TooFewIntervals {
        rule: RuleId,
        n: usize,
        minimum: usize
    },
    #[error("interval count must be positive")]
    ZeroIntervals,
    #[error("no quadrature rule selected")]
    EmptyRuleSelection,
    #[error("rule {0} is not registered")]
    UnregisteredRule(RuleId)
}

impl ParameterError {
    /// `b - a` 溢位時亦視為不合法，各規則的步長與抽樣範圍都依賴它
    pub fn check_bounds(a: f64, b: f64) -> Result<(), ParameterError> {
        if a.is_finite() && b.is_finite() && a < b && (b - a).is_finite() {
            Ok(())
        } else {
            Err(ParameterError::InvalidBounds { a, b })
        }
    }
}

/// 單一規則計算失敗；由 engine 轉成該規則的失敗結果，不影響其他規則。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("evaluation failed at x = {x}: {source}")]
    Evaluation {
        x: f64,
        source: EvaluationError
    },
    #[error("{rule} produced a non-finite result")]
    NonFinite {
        rule: RuleId
    }
}

impl QuadratureError {
    pub fn is_parameter(&self) -> bool {
        matches!(self, QuadratureError::Parameter(_))
    }
}
