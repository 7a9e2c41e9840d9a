use crate::analysis::ruleresult::RuleResult;
use crate::quadrature::ruleid::RuleId;

/// 將規則輸出與（若有的）解析解合併成 `RuleResult`。
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn aggregate(rule: RuleId,
                     value: f64,
                     error_bound: Option<f64>,
                     exact: Option<f64>) -> RuleResult {
        let absolute_error = exact.map(|exact| (value - exact).abs());
        let relative_error = exact
            .zip(absolute_error)
            .filter(|(exact, _)| *exact != 0.0)
            .map(|(exact, absolute)| absolute / exact.abs() * 100.0);
        RuleResult::new(rule, Some(value), error_bound, absolute_error, relative_error, None)
    }

    pub fn failure(rule: RuleId, message: impl Into<String>) -> RuleResult {
        RuleResult::new(rule, None, None, None, None, Some(message.into()))
    }
}
