use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// EvaluationError
// ─────────────────────────────────────────────────────────────────────────────

/// 單點求值失敗的原因。
///
/// `RealFunction` 不會回傳 NaN 或 ±inf，而是以此錯誤表示。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("{function}({argument}) is outside the domain of {function}")]
    Domain {
        function: &'static str,
        argument: f64
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("numerical overflow in {0}")]
    Overflow(&'static str),
    #[error("{0} produced a value that is not a number")]
    NotANumber(&'static str)
}

impl EvaluationError {
    /// 將一個運算結果轉為 `Result`：NaN 視為 `NotANumber`，±inf 視為 `Overflow`。
    pub fn check(operation: &'static str, value: f64) -> Result<f64, EvaluationError> {
        if value.is_nan() {
            Err(EvaluationError::NotANumber(operation))
        } else if value.is_infinite() {
            Err(EvaluationError::Overflow(operation))
        } else {
            Ok(value)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RealFunction
// ─────────────────────────────────────────────────────────────────────────────

pub trait RealFunction {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError>;
}

impl<T: RealFunction + ?Sized> RealFunction for &T {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        (**self).evaluate(x)
    }
}

/// 以一般 closure 包裝成 `RealFunction`。
pub struct ClosureFunction<F> {
    function: F
}

impl<F> ClosureFunction<F> where
    F: Fn(f64) -> f64 {
    pub fn new(function: F) -> ClosureFunction<F> {
        ClosureFunction { function }
    }
}

impl<F> RealFunction for ClosureFunction<F> where
    F: Fn(f64) -> f64 {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        EvaluationError::check("function", (self.function)(x))
    }
}
