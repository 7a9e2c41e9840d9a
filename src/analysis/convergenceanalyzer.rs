use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;
use serde::{
    Serialize,
    Deserialize
};

use crate::analysis::ruleresult::ConvergencePoint;
use crate::math::realfunction::RealFunction;
use crate::quadrature::quadraturerule::QuadratureRule;

/// 掃描的 n 範圍：start, start + step, …, ≤ end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceSettings {
    pub start: usize,
    pub end: usize,
    pub step: usize
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        ConvergenceSettings { start: 2, end: 50, step: 2 }
    }
}

impl ConvergenceSettings {
    pub fn interval_counts(&self) -> impl Iterator<Item = usize> {
        (self.start.max(1)..=self.end).step_by(self.step.max(1))
    }
}

pub struct ConvergenceAnalyzer {
    settings: ConvergenceSettings
}

impl ConvergenceAnalyzer {
    pub fn new(settings: ConvergenceSettings) -> ConvergenceAnalyzer {
        ConvergenceAnalyzer { settings }
    }

    pub fn settings(&self) -> &ConvergenceSettings {
        &self.settings
    }

    /// 每個 n 對每條規則重新積分；失敗的規則只在該點略過
    pub fn sweep(&self,
                 f: &dyn RealFunction,
                 a: f64,
                 b: f64,
                 rules: &[Rc<dyn QuadratureRule>]) -> Vec<ConvergencePoint> {
        self.settings
            .interval_counts()
            .map(|n| {
                let mut values = BTreeMap::new();
                for rule in rules {
                    match rule.integrate(f, a, b, n) {
                        Ok(value) => {
                            values.insert(rule.id(), value);
                        },
                        Err(error) => debug!("convergence sweep: {} skipped at n = {}: {}", rule.id(), n, error)
                    }
                }
                ConvergencePoint::new(n, values)
            })
            .collect()
    }
}

impl Default for ConvergenceAnalyzer {
    fn default() -> Self {
        ConvergenceAnalyzer::new(ConvergenceSettings::default())
    }
}
