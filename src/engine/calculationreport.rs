use std::fmt;

use chrono::{
    DateTime,
    Utc
};
use serde::{
    Serialize,
    Deserialize
};
use uuid::Uuid;

use crate::analysis::ruleresult::{
    ConvergencePoint,
    RuleResult
};
use crate::math::point2d::Point2D;
use crate::math::round::format_rounded;
use crate::quadrature::ruleid::RuleId;

pub const DEFAULT_REPORT_DIGITS: u32 = 8;

/// 一次計算的完整輸出，可序列化成 JSON，`Display` 輸出純文字報表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationReport {
    id: Uuid,
    created_at: DateTime<Utc>,
    function_label: String,
    normalized_expression: String,
    description: Option<String>,
    a: f64,
    b: f64,
    n: usize,
    exact: Option<f64>,
    results: Vec<RuleResult>,
    convergence: Vec<ConvergencePoint>,
    monte_carlo_samples: Vec<Point2D>,
    #[serde(skip, default = "default_digits")]
    digits: u32
}

fn default_digits() -> u32 {
    DEFAULT_REPORT_DIGITS
}

impl CalculationReport {
    #[allow(clippy::too_many_arguments)]
    pub fn new(function_label: &str,
               normalized_expression: &str,
               description: Option<&str>,
               a: f64,
               b: f64,
               n: usize,
               exact: Option<f64>,
               results: Vec<RuleResult>,
               convergence: Vec<ConvergencePoint>,
               monte_carlo_samples: Vec<Point2D>) -> CalculationReport {
        CalculationReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            function_label: function_label.to_owned(),
            normalized_expression: normalized_expression.to_owned(),
            description: description.map(str::to_owned),
            a,
            b,
            n,
            exact,
            results,
            convergence,
            monte_carlo_samples,
            digits: DEFAULT_REPORT_DIGITS
        }
    }

    /// 文字報表的小數位數
    pub fn with_digits(mut self, digits: u32) -> CalculationReport {
        self.digits = digits;
        self
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn function_label(&self) -> &str {
        &self.function_label
    }

    pub fn normalized_expression(&self) -> &str {
        &self.normalized_expression
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
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

    pub fn exact(&self) -> Option<f64> {
        self.exact
    }

    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    pub fn result(&self, rule: RuleId) -> Option<&RuleResult> {
        self.results.iter().find(|result| result.rule() == rule)
    }

    pub fn convergence(&self) -> &[ConvergencePoint] {
        &self.convergence
    }

    pub fn monte_carlo_samples(&self) -> &[Point2D] {
        &self.monte_carlo_samples
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn cell(&self, value: Option<f64>) -> String {
        value.map_or_else(|| "-".to_owned(), |value| format_rounded(value, self.digits))
    }
}

impl fmt::Display for CalculationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report {} ({})", self.id, self.created_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Function:    {}", self.function_label)?;
        writeln!(f, "Normalized:  {}", self.normalized_expression)?;
        if let Some(description) = self.description.as_deref().filter(|text| !text.is_empty()) {
            writeln!(f, "Description: {}", description)?;
        }
        writeln!(f, "Interval:    [{}, {}], n = {}", self.a, self.b, self.n)?;
        writeln!(f, "Exact value: {}", self.cell(self.exact))?;
        writeln!(f)?;

        writeln!(f, "{:<12} {:>18} {:>18} {:>18} {:>16}", "Rule", "Value", "Error bound", "Abs. error", "Rel. error (%)")?;
        for result in &self.results {
            match result.failure() {
                Some(message) => writeln!(f, "{:<12} failed: {}", result.rule().name(), message)?,
                None => writeln!(
                    f,
                    "{:<12} {:>18} {:>18} {:>18} {:>16}",
                    result.rule().name(),
                    self.cell(result.value()),
                    self.cell(result.error_bound()),
                    self.cell(result.absolute_error()),
                    self.cell(result.relative_error())
                )?
            }
        }

        if !self.convergence.is_empty() {
            let rules: Vec<RuleId> = self.results.iter().map(|result| result.rule()).collect();
            writeln!(f)?;
            write!(f, "{:>4}", "n")?;
            for rule in &rules {
                write!(f, " {:>18}", rule.name())?;
            }
            writeln!(f)?;
            for point in &self.convergence {
                write!(f, "{:>4}", point.n())?;
                for rule in &rules {
                    write!(f, " {:>18}", self.cell(point.value(*rule)))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
