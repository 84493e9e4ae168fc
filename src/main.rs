//! Rigid4 - transform chain benchmark
//!
//! Times repeated composition of the reference transform sequence in each
//! configured representation and prints the elapsed time.

use std::process::ExitCode;

use rigid4::bench::{run_trials, verify_equivalence};
use rigid4::chains::reference_steps;
use rigid4::config::AppConfig;

fn main() -> ExitCode {
    let loaded = AppConfig::load();
    let log_level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging (RUST_LOG overrides the configured level)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    log::info!(
        "Starting rigid4: {} trials per chain, chains {:?}",
        config.bench.trials,
        config.bench.chains
    );

    let steps = reference_steps();

    if config.verify.enabled {
        let points = config.verify.points();
        if let Err(e) = verify_equivalence(&config.bench.chains, &steps, &points, config.verify.tolerance) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
        log::info!(
            "All chains agree on {} probe points (tolerance {:e})",
            points.len(),
            config.verify.tolerance
        );
    } else {
        log::debug!("Verification disabled");
    }

    for &chain in &config.bench.chains {
        println!("{} test: ", chain.description());
        let report = run_trials(chain, &steps, config.bench.trials);
        println!("{}", report);
        log::debug!("{} chain: {:?} per trial", chain, report.per_trial());

        if config.debug.print_results {
            println!("{}", chain.run(&steps));
        }
    }

    ExitCode::SUCCESS
}
