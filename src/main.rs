use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use compquad::configuration::Configuration;
use compquad::engine::engineerror::EngineError;
use compquad::engine::integrationengine::IntegrationEngine;
use compquad::engine::integrationrequest::{
    FunctionSource,
    IntegrationRequest
};
use compquad::manager::managererror::ManagerError;
use compquad::quadrature::ruleid::RuleId;

/// Compare numerical integration rules on one function.
#[derive(Parser, Debug)]
#[command(name = "compquad", version, allow_negative_numbers = true)]
struct Cli {
    /// Expression in x, or @id of a predefined function
    function: String,

    /// Lower bound
    a: f64,

    /// Upper bound
    b: f64,

    /// Number of subintervals (Monte Carlo: number of samples)
    n: usize,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma separated rule ids, e.g. trapezoidal,simpson1/3
    #[arg(long, value_delimiter = ',')]
    rules: Vec<RuleId>,

    /// Skip the convergence sweep
    #[arg(long, default_value_t = false)]
    no_convergence: bool,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Decimal digits in the text report
    #[arg(long)]
    digits: Option<u32>,

    /// Monte Carlo seed
    #[arg(long)]
    seed: Option<u64>
}

fn load_configuration(cli: &Cli) -> Result<Configuration, EngineError> {
    let configuration = Configuration::new()?;
    if let Some(path) = &cli.config {
        configuration.from_reader(path)?;
    }
    let mut settings = configuration.engine_settings();
    if let Some(seed) = cli.seed {
        settings.monte_carlo_seed = Some(seed);
    }
    if let Some(digits) = cli.digits {
        settings.report_digits = digits;
    }
    configuration.set_engine_settings(settings);
    Ok(configuration)
}

fn run(cli: Cli) -> Result<(), EngineError> {
    debug!("{:?}", cli);
    let engine = IntegrationEngine::new(load_configuration(&cli)?);
    let rules = if cli.rules.is_empty() { RuleId::ALL.to_vec() } else { cli.rules };
    let request = IntegrationRequest::new(FunctionSource::parse(&cli.function), cli.a, cli.b, cli.n, &rules)
        .with_convergence(!cli.no_convergence);
    let report = engine.calculate(&request)?;
    if cli.json {
        let json = report.to_json().map_err(ManagerError::from)?;
        println!("{}", json);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
