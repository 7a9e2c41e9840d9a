use std::collections::BTreeMap;

use serde::{
    Serialize,
    Deserialize
};

use crate::quadrature::ruleid::RuleId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    rule: RuleId,
    value: Option<f64>,
    error_bound: Option<f64>,
    absolute_error: Option<f64>,
    /// 百分比
    relative_error: Option<f64>,
    failure: Option<String>
}

impl RuleResult {
    pub fn new(rule: RuleId,
               value: Option<f64>,
               error_bound: Option<f64>,
               absolute_error: Option<f64>,
               relative_error: Option<f64>,
               failure: Option<String>) -> RuleResult {
        RuleResult { rule, value, error_bound, absolute_error, relative_error, failure }
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn error_bound(&self) -> Option<f64> {
        self.error_bound
    }

    pub fn absolute_error(&self) -> Option<f64> {
        self.absolute_error
    }

    pub fn relative_error(&self) -> Option<f64> {
        self.relative_error
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    n: usize,
    values: BTreeMap<RuleId, f64>
}

impl ConvergencePoint {
    pub fn new(n: usize, values: BTreeMap<RuleId, f64>) -> ConvergencePoint {
        ConvergencePoint { n, values }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn values(&self) -> &BTreeMap<RuleId, f64> {
        &self.values
    }

    pub fn value(&self, rule: RuleId) -> Option<f64> {
        self.values.get(&rule).copied()
    }
}
