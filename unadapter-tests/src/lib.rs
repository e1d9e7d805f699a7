mod auth;
mod scenarios;

pub use auth::*;
pub use scenarios::Scenario;

use log::LevelFilter;
use scenarios::Suite;
use std::{collections::BTreeSet, env};
use unadapter::{Adapter, AdapterOptions, Driver, Result, TraceSink, Where};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}

/// Which scenarios to skip and how to label the others.
#[derive(Default, Debug, Clone)]
pub struct TestOptions {
    pub disabled: BTreeSet<Scenario>,
    pub prefix: Option<String>,
}

impl TestOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn disable(mut self, scenario: Scenario) -> Self {
        self.disabled.insert(scenario);
        self
    }
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
    fn label(&self, scenario: Scenario) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix} - {}", scenario.name()),
            None => scenario.name().to_string(),
        }
    }
}

async fn run_scenarios<D: Driver>(
    suite: &mut Suite<'_, D>,
    scenarios: &[Scenario],
    options: &TestOptions,
    failures: &mut Vec<String>,
) {
    for &scenario in scenarios {
        let label = options.label(scenario);
        if options.disabled.contains(&scenario) {
            log::info!("Skipping `{label}`");
            continue;
        }
        suite.sink.reset();
        log::debug!("Running `{label}`");
        if let Err(e) = scenarios::run(scenario, suite).await {
            log::error!("Scenario `{label}` failed: {e:#}");
            suite.sink.print();
            failures.push(label);
        }
    }
}

fn report(failures: Vec<String>) {
    if !failures.is_empty() {
        panic!(
            "{} scenario(s) failed:\n  {}",
            failures.len(),
            failures.join("\n  ")
        );
    }
}

/// Run the standard id suite against the adapters produced by `factory`.
///
/// Every adapter the factory builds must share the same storage. Panics listing the failed
/// scenarios, their captured traces are logged as errors.
pub async fn run_adapter_tests<D, F>(factory: F, options: TestOptions)
where
    D: Driver,
    F: Fn(AdapterOptions, &TraceSink) -> Result<Adapter<D>>,
{
    let mut failures = Vec::new();
    let mut suite = match Suite::new(&factory, AdapterOptions::new()) {
        Ok(suite) => suite,
        Err(e) => panic!("Could not create the adapter: {e:#}"),
    };
    run_scenarios(&mut suite, Scenario::STANDARD, &options, &mut failures).await;
    report(failures);
}

/// Run the numeric id scenarios, remove what they created, then the standard suite with numeric
/// ids enabled.
pub async fn run_number_id_adapter_tests<D, F>(factory: F, options: TestOptions)
where
    D: Driver,
    F: Fn(AdapterOptions, &TraceSink) -> Result<Adapter<D>>,
{
    let mut failures = Vec::new();
    let mut suite = match Suite::new(&factory, AdapterOptions::new().with_number_id(true)) {
        Ok(suite) => suite,
        Err(e) => panic!("Could not create the adapter: {e:#}"),
    };
    run_scenarios(&mut suite, Scenario::NUMBER_ID, &options, &mut failures).await;
    for id in std::mem::take(&mut suite.cleanup) {
        if let Err(e) = suite.adapter.delete("user", &[Where::eq("id", id)]).await {
            log::error!("Could not clean up the numeric id users: {e:#}");
        }
    }
    let options = options.disable(Scenario::ShouldPreferGenerateIdIfProvided);
    run_scenarios(&mut suite, Scenario::STANDARD, &options, &mut failures).await;
    report(failures);
}
