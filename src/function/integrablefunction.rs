use std::rc::Rc;

use crate::expression::compiler::CompiledExpression;
use crate::function::predefinedfunction::PredefinedFunction;
use crate::math::realfunction::{
    EvaluationError,
    RealFunction
};

/// 一次計算中使用的被積函數：預設函數或使用者輸入的運算式，二擇一。
#[derive(Debug, Clone)]
pub enum IntegrableFunction {
    Predefined(Rc<PredefinedFunction>),
    Expression(CompiledExpression)
}

impl IntegrableFunction {
    pub fn label(&self) -> &str {
        match self {
            IntegrableFunction::Predefined(function) => function.label(),
            IntegrableFunction::Expression(expression) => expression.raw()
        }
    }

    pub fn normalized(&self) -> &str {
        match self {
            IntegrableFunction::Predefined(function) => function.expression().normalized(),
            IntegrableFunction::Expression(expression) => expression.normalized()
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            IntegrableFunction::Predefined(function) => Some(function.description()),
            IntegrableFunction::Expression(_) => None
        }
    }

    /// 只有附帶反導函數的預設函數才有解析解
    pub fn exact(&self, a: f64, b: f64) -> Option<f64> {
        match self {
            IntegrableFunction::Predefined(function) => function.exact(a, b),
            IntegrableFunction::Expression(_) => None
        }
    }
}

impl RealFunction for IntegrableFunction {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        match self {
            IntegrableFunction::Predefined(function) => function.evaluate(x),
            IntegrableFunction::Expression(expression) => expression.evaluate(x)
        }
    }
}
