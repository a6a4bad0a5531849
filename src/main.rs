mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::subscriber::set_global_default;
use tracing::{error, info};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::EnvFilter;

use sepexplorer::{
    run_explorer, Dataset, DirectoryFetcher, Explorer, ExplorerConfig, ExplorerError,
    FetchedIsotherm, IsothermFetch,
};

fn setup_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE));

    if let Err(e) = set_global_default(subscriber) {
        eprintln!("Setting default subscriber failed: {e}");
    }
}

fn build_explorer(args: &cli::Cli, cfg: &mut ExplorerConfig) -> sepexplorer::Result<Explorer> {
    if let Some(path) = args.dataset_path() {
        cfg.dataset = Some(path);
    }
    if let Some(dir) = &args.isotherms {
        cfg.isotherm_dir = Some(dir.clone());
    }
    if let Some(g) = args.gas1 {
        cfg.gas1 = g;
    }
    if let Some(g) = args.gas2 {
        cfg.gas2 = g;
    }

    let Some(dataset_path) = cfg.dataset.clone() else {
        return Err(ExplorerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no dataset given (pass a path or set `dataset` in the config)",
        )));
    };
    let dataset = Arc::new(Dataset::load(&dataset_path)?);

    let fetcher: Arc<dyn IsothermFetch> = match &cfg.isotherm_dir {
        Some(dir) => {
            let fetcher = DirectoryFetcher::new(dir.clone());
            info!(dir = %fetcher.root().display(), "fetching isotherms from directory");
            Arc::new(fetcher)
        }
        None => {
            info!("no isotherm directory; only median curves will be shown");
            Arc::new(|_: &str| -> Option<FetchedIsotherm> { None })
        }
    };

    Explorer::new(dataset, fetcher, cfg.gas_pair()?, cfg.pressure_params())
}

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    setup_logging(args.log_level());

    let mut cfg = match &args.config {
        Some(path) => match ExplorerConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => ExplorerConfig::default(),
    };

    let explorer = match build_explorer(&args, &mut cfg) {
        Ok(explorer) => explorer,
        Err(e) => {
            error!(error = %e, "failed to start explorer");
            return ExitCode::FAILURE;
        }
    };

    match run_explorer(explorer, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "window closed with error");
            ExitCode::FAILURE
        }
    }
}
