use serde::{
    Serialize,
    Deserialize
};

use crate::quadrature::quadratureerror::ParameterError;
use crate::quadrature::ruleid::RuleId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSource {
    /// 使用者輸入的運算式
    Expression(String),
    /// 預設函數的 id
    Predefined(String)
}

impl FunctionSource {
    /// `@id` 表示預設函數，其餘視為運算式
    pub fn parse(text: &str) -> FunctionSource {
        match text.trim().strip_prefix('@') {
            Some(id) => FunctionSource::Predefined(id.trim().to_owned()),
            None => FunctionSource::Expression(text.to_owned())
        }
    }
}

#[derive(Deserialize)]
struct IntegrationRequestJsonProp {
    function: FunctionSource,
    a: f64,
    b: f64,
    n: usize,
    rules: Vec<RuleId>,
    #[serde(default)]
    convergence: bool
}

impl From<IntegrationRequestJsonProp> for IntegrationRequest {
    fn from(prop: IntegrationRequestJsonProp) -> Self {
        IntegrationRequest::new(prop.function, prop.a, prop.b, prop.n, &prop.rules)
            .with_convergence(prop.convergence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IntegrationRequestJsonProp")]
pub struct IntegrationRequest {
    function: FunctionSource,
    a: f64,
    b: f64,
    n: usize,
    rules: Vec<RuleId>,
    convergence: bool
}

impl IntegrationRequest {
    /// 重複的規則只保留第一次出現
    pub fn new(function: FunctionSource, a: f64, b: f64, n: usize, rules: &[RuleId]) -> IntegrationRequest {
        let mut unique: Vec<RuleId> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !unique.contains(rule) {
                unique.push(*rule);
            }
        }
        IntegrationRequest { function, a, b, n, rules: unique, convergence: false }
    }

    pub fn with_convergence(mut self, convergence: bool) -> IntegrationRequest {
        self.convergence = convergence;
        self
    }

    pub fn function(&self) -> &FunctionSource {
        &self.function
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

    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }

    pub fn convergence(&self) -> bool {
        self.convergence
    }

    /// 與規則無關的檢查；各規則的最少區間數由 engine 檢查
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::check_bounds(self.a, self.b)?;
        if self.n == 0 {
            return Err(ParameterError::ZeroIntervals);
        }
        if self.rules.is_empty() {
            return Err(ParameterError::EmptyRuleSelection);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_source_prefix() {
        assert_eq!(FunctionSource::parse("@square"), FunctionSource::Predefined("square".to_owned()));
        assert_eq!(FunctionSource::parse("x^2"), FunctionSource::Expression("x^2".to_owned()));
    }

    #[test]
    fn duplicate_rules_collapse_in_order() {
        let request = IntegrationRequest::new(
            FunctionSource::parse("x"),
            0.0,
            1.0,
            4,
            &[RuleId::MonteCarlo, RuleId::Trapezoidal, RuleId::MonteCarlo]
        );
        assert_eq!(request.rules(), &[RuleId::MonteCarlo, RuleId::Trapezoidal]);
    }

    #[test]
    fn validation() {
        let source = FunctionSource::parse("x");
        assert!(IntegrationRequest::new(source.clone(), 0.0, 1.0, 4, &[RuleId::Midpoint]).validate().is_ok());
        assert_eq!(
            IntegrationRequest::new(source.clone(), 1.0, 1.0, 4, &[RuleId::Midpoint]).validate(),
            Err(ParameterError::InvalidBounds { a: 1.0, b: 1.0 })
        );
        assert_eq!(
            IntegrationRequest::new(source.clone(), 0.0, 1.0, 0, &[RuleId::Midpoint]).validate(),
            Err(ParameterError::ZeroIntervals)
        );
        assert_eq!(
            IntegrationRequest::new(source, 0.0, 1.0, 4, &[]).validate(),
            Err(ParameterError::EmptyRuleSelection)
        );
    }

    #[test]
    fn deserializes_from_json() {
        let request: IntegrationRequest = serde_json::from_str(
            r#"{"function": {"predefined": "sine"}, "a": 0.0, "b": 3.0, "n": 6, "rules": ["Simpson1/3"]}"#
        ).unwrap();
        assert_eq!(request.function(), &FunctionSource::Predefined("sine".to_owned()));
        assert_eq!(request.rules(), &[RuleId::SimpsonOneThird]);
        assert!(!request.convergence());
    }

    #[test]
    fn deserialized_rules_collapse_like_new() {
        let request: IntegrationRequest = serde_json::from_str(
            r#"{"function": {"expression": "x"}, "a": 0.0, "b": 1.0, "n": 4,
                "rules": ["MonteCarlo", "Trapezoidal", "MonteCarlo"], "convergence": true}"#
        ).unwrap();
        assert_eq!(request.rules(), &[RuleId::MonteCarlo, RuleId::Trapezoidal]);
        assert!(request.convergence());
    }
}
