use std::rc::Rc;

use log::{
    debug,
    info,
    warn
};

use crate::analysis::convergenceanalyzer::ConvergenceAnalyzer;
use crate::analysis::resultaggregator::ResultAggregator;
use crate::analysis::ruleresult::RuleResult;
use crate::configuration::Configuration;
use crate::engine::calculationreport::CalculationReport;
use crate::engine::engineerror::EngineError;
use crate::engine::integrationrequest::{
    FunctionSource,
    IntegrationRequest
};
use crate::expression::compiler::ExpressionCompiler;
use crate::function::integrablefunction::IntegrableFunction;
use crate::manager::manager::IManager;
use crate::math::point2d::Point2D;
use crate::quadrature::quadratureerror::ParameterError;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::ruleid::RuleId;
use crate::quadrature::ruleregistry::RuleRegistry;

/// 串接編譯、積分、誤差估計與收斂分析，產生 `CalculationReport`。
///
/// 參數錯誤、編譯錯誤、找不到預設函數會使整個計算失敗；
/// 單一規則的求值失敗只記錄在該規則的結果中。
pub struct IntegrationEngine {
    configuration: Configuration,
    registry: RuleRegistry,
    compiler: ExpressionCompiler,
    analyzer: ConvergenceAnalyzer
}

impl IntegrationEngine {
    pub fn new(configuration: Configuration) -> IntegrationEngine {
        let settings = configuration.engine_settings();
        IntegrationEngine {
            registry: RuleRegistry::with_default_rules(settings.monte_carlo_seed),
            compiler: ExpressionCompiler::default(),
            analyzer: ConvergenceAnalyzer::new(settings.convergence),
            configuration
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn calculate(&self, request: &IntegrationRequest) -> Result<CalculationReport, EngineError> {
        info!(
            "calculating {:?} on [{}, {}] with n = {}, rules = {:?}",
            request.function(),
            request.a(),
            request.b(),
            request.n(),
            request.rules()
        );
        request.validate()?;
        let (a, b, n) = (request.a(), request.b(), request.n());

        let rules = self.resolve_rules(request.rules())?;
        for rule in &rules {
            rule.check_parameters(a, b, n)?;
        }

        let function = self.resolve_function(request.function())?;
        let exact = function.exact(a, b);
        debug!("normalized expression: {}, exact value: {:?}", function.normalized(), exact);

        let mut results: Vec<RuleResult> = Vec::with_capacity(rules.len());
        let mut monte_carlo_samples: Vec<Point2D> = Vec::new();
        for rule in &rules {
            results.push(Self::run_rule(rule.as_ref(), &function, a, b, n, exact));
            if rule.id() == RuleId::MonteCarlo && monte_carlo_samples.is_empty() {
                match rule.visualization_samples(&function, a, b, n) {
                    Ok(samples) => monte_carlo_samples = samples,
                    Err(error) => warn!("{}: no visualization samples: {}", rule.id(), error)
                }
            }
        }

        let convergence = if request.convergence() {
            self.analyzer.sweep(&function, a, b, &rules)
        } else {
            Vec::new()
        };

        let settings = self.configuration.engine_settings();
        let report = CalculationReport::new(
            function.label(),
            function.normalized(),
            function.description(),
            a,
            b,
            n,
            exact,
            results,
            convergence,
            monte_carlo_samples
        ).with_digits(settings.report_digits);
        info!("report {} done", report.id());
        Ok(report)
    }

    fn resolve_rules(&self, ids: &[RuleId]) -> Result<Vec<Rc<dyn QuadratureRule>>, ParameterError> {
        ids.iter()
            .map(|id| self.registry.get(*id).ok_or(ParameterError::UnregisteredRule(*id)))
            .collect()
    }

    fn resolve_function(&self, source: &FunctionSource) -> Result<IntegrableFunction, EngineError> {
        match source {
            FunctionSource::Expression(text) => Ok(IntegrableFunction::Expression(self.compiler.compile(text)?)),
            FunctionSource::Predefined(name) => {
                let function = self.configuration.predefined_function_manager().get(name)?;
                Ok(IntegrableFunction::Predefined(function))
            }
        }
    }

    fn run_rule(rule: &dyn QuadratureRule,
                function: &IntegrableFunction,
                a: f64,
                b: f64,
                n: usize,
                exact: Option<f64>) -> RuleResult {
        let value = match rule.integrate(function, a, b, n) {
            Ok(value) => value,
            Err(error) => {
                warn!("{} failed: {}", rule.id(), error);
                return ResultAggregator::failure(rule.id(), error.to_string());
            }
        };
        let error_bound = rule.error_estimate(function, a, b, n).unwrap_or_else(|error| {
            warn!("{}: error estimate unavailable: {}", rule.id(), error);
            None
        });
        ResultAggregator::aggregate(rule.id(), value, error_bound, exact)
    }
}
