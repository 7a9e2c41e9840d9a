use serde::Deserialize;

use crate::expression::compiler::{
    CompiledExpression,
    ExpressionCompiler
};
use crate::manager::managererror::ManagerError;
use crate::math::derivativeestimator::COARSE_GRID_STEPS;
use crate::math::realfunction::{
    EvaluationError,
    RealFunction
};

/// 內建的預設函數：(id, 顯示名稱, 運算式, 反導函數, 說明)
pub const BUILTIN_FUNCTIONS: [(&str, &str, &str, Option<&str>, &str); 11] = [
    ("square", "x²", "x^2", Some("x^3/3"), "Simple parabola; Simpson's rule is exact for it."),
    ("cube", "x³", "x^3", Some("x^4/4"), "Cubic polynomial; both Simpson rules are exact for it."),
    ("sine", "sin(x)", "sin(x)", Some("-cos(x)"), "Smooth periodic function."),
    ("cosine", "cos(x)", "cos(x)", Some("sin(x)"), "Smooth periodic function."),
    ("exponential", "eˣ", "e^x", Some("e^x"), "Every derivative equals the function itself."),
    ("reciprocal", "1/x", "1/x", Some("ln(abs(x))"), "Singular at 0; integrate over intervals not containing 0."),
    ("square_root", "√x", "sqrt(x)", Some("2x^1.5/3"), "Unbounded derivative at 0."),
    ("natural_log", "ln(x)", "ln(x)", Some("x*ln(x)-x"), "Defined for x > 0."),
    ("arctan_kernel", "1/(1+x²)", "1/(1+x^2)", Some("atan(x)"), "Integrates to π/4 over [0, 1]."),
    ("x_sine", "x·sin(x)", "x*sin(x)", Some("sin(x)-x*cos(x)"), "Integration by parts example."),
    ("gaussian", "e^(-x²)", "e^(-x^2)", None, "No elementary antiderivative; no exact value is reported.")
];

#[derive(Deserialize)]
struct PredefinedFunctionJsonProp {
    name: String,
    #[serde(default)]
    label: Option<String>,
    expression: String,
    #[serde(default)]
    antiderivative: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    singularities: Vec<f64>
}

/// 被積函數在此不可積的點；區間包含其一時不回報解析解
pub const BUILTIN_SINGULARITIES: [(&str, &[f64]); 1] = [
    ("reciprocal", &[0.0])
];

// ─────────────────────────────────────────────────────────────────────────────
// PredefinedFunction
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PredefinedFunction {
    id: String,
    label: String,
    description: String,
    function: CompiledExpression,
    antiderivative: Option<CompiledExpression>,
    singularities: Vec<f64>
}

impl PredefinedFunction {
    pub fn new(id: &str,
               label: &str,
               expression: &str,
               antiderivative: Option<&str>,
               description: &str) -> Result<PredefinedFunction, ManagerError> {
        let compile = |text: &str| {
            ExpressionCompiler::compile_text(text).map_err(|source| ManagerError::CompileError {
                name: id.to_owned(),
                source
            })
        };
        Ok(PredefinedFunction {
            id: id.to_owned(),
            label: label.to_owned(),
            description: description.to_owned(),
            function: compile(expression)?,
            antiderivative: antiderivative.map(compile).transpose()?,
            singularities: Vec::new()
        })
    }

    pub fn with_singularities(mut self, singularities: &[f64]) -> PredefinedFunction {
        self.singularities = singularities.to_vec();
        self
    }

    pub fn singularities(&self) -> &[f64] {
        &self.singularities
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<PredefinedFunction, ManagerError> {
        let prop: PredefinedFunctionJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        let label = prop.label.as_deref().unwrap_or(&prop.expression);
        let function = PredefinedFunction::new(
            &prop.name,
            label,
            &prop.expression,
            prop.antiderivative.as_deref(),
            &prop.description
        )?;
        Ok(function.with_singularities(&prop.singularities))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expression(&self) -> &CompiledExpression {
        &self.function
    }

    pub fn has_antiderivative(&self) -> bool {
        self.antiderivative.is_some()
    }

    /// F(b) - F(a)；沒有反導函數、端點無法求值，或被積函數在 [a, b] 內有奇點時為 `None`
    pub fn exact(&self, a: f64, b: f64) -> Option<f64> {
        let antiderivative = self.antiderivative.as_ref()?;
        if !self.integrable_on(a, b) {
            return None;
        }
        let upper = antiderivative.evaluate(b).ok()?;
        let lower = antiderivative.evaluate(a).ok()?;
        Some(upper - lower).filter(|value| value.is_finite())
    }
}

impl PredefinedFunction {
    /// 已知奇點落在區間內，或粗網格上任一點求值失敗，皆視為不可積
    fn integrable_on(&self, a: f64, b: f64) -> bool {
        if self.singularities.iter().any(|point| (a..=b).contains(point)) {
            return false;
        }
        let steps = COARSE_GRID_STEPS;
        let dx = (b - a) / steps as f64;
        (0..=steps).all(|i| {
            let x = if i == steps { b } else { a + i as f64 * dx };
            self.function.evaluate(x).is_ok()
        })
    }
}

impl RealFunction for PredefinedFunction {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        self.function.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_builtin_compiles() {
        for (id, label, expression, antiderivative, description) in BUILTIN_FUNCTIONS {
            let function = PredefinedFunction::new(id, label, expression, antiderivative, description).unwrap();
            assert_eq!(function.has_antiderivative(), antiderivative.is_some());
        }
    }

    #[test]
    fn exact_value_from_antiderivative() {
        let square = PredefinedFunction::new("square", "x²", "x^2", Some("x^3/3"), "").unwrap();
        assert_relative_eq!(square.exact(0.0, 2.0).unwrap(), 8.0 / 3.0);

        let kernel = PredefinedFunction::new("k", "k", "1/(1+x^2)", Some("atan(x)"), "").unwrap();
        assert_relative_eq!(kernel.exact(0.0, 1.0).unwrap(), std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn exact_value_is_absent_outside_the_antiderivative_domain() {
        let log = PredefinedFunction::new("log", "ln(x)", "ln(x)", Some("x*ln(x)-x"), "").unwrap();
        assert_eq!(log.exact(0.0, 1.0), None);
        assert_relative_eq!(log.exact(1.0, std::f64::consts::E).unwrap(), 1.0);

        let gaussian = PredefinedFunction::new("g", "g", "e^(-x^2)", None, "").unwrap();
        assert_eq!(gaussian.exact(0.0, 1.0), None);
    }

    #[test]
    fn no_exact_value_across_a_singularity() {
        let reciprocal = PredefinedFunction::new("reciprocal", "1/x", "1/x", Some("ln(abs(x))"), "")
            .unwrap()
            .with_singularities(&[0.0]);
        assert_eq!(reciprocal.exact(-1.0, 1.0), None);
        assert_eq!(reciprocal.exact(0.0, 1.0), None);
        assert_relative_eq!(reciprocal.exact(1.0, std::f64::consts::E).unwrap(), 1.0);
        assert_relative_eq!(reciprocal.exact(-2.0, -1.0).unwrap(), -std::f64::consts::LN_2);

        // 未宣告奇點時由網格求值攔下
        let shifted = PredefinedFunction::new("shifted", "1/(x-1)", "1/(x-1)", Some("ln(abs(x-1))"), "").unwrap();
        assert_eq!(shifted.exact(-25.0, 75.0), None);
        assert!(shifted.exact(2.0, 3.0).is_some());
    }

    #[test]
    fn from_json_reads_singularities() {
        let function = PredefinedFunction::from_json(json!({
            "name": "pole",
            "expression": "1/(x-0.3)^2",
            "antiderivative": "-1/(x-0.3)",
            "singularities": [0.3]
        })).unwrap();
        assert_eq!(function.singularities(), &[0.3]);
        assert_eq!(function.exact(0.0, 1.0), None);
        assert!(function.exact(1.0, 2.0).is_some());
    }

    #[test]
    fn from_json_defaults_the_label() {
        let function = PredefinedFunction::from_json(json!({
            "name": "quartic",
            "expression": "x^4",
            "antiderivative": "x^5/5"
        })).unwrap();
        assert_eq!(function.id(), "quartic");
        assert_eq!(function.label(), "x^4");
        assert_relative_eq!(function.exact(0.0, 1.0).unwrap(), 0.2);
    }

    #[test]
    fn from_json_reports_compile_errors() {
        let error = PredefinedFunction::from_json(json!({"name": "bad", "expression": "x+"})).unwrap_err();
        assert!(matches!(error, ManagerError::CompileError { ref name, .. } if name == "bad"));
    }
}
