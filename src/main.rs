use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use lfcompose::config_loader::{self, CliOverrides};
use lfcompose::orchestrator::{self, GenerationOptions};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Resolve capture-node addresses and generate the federated LF program
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the device configuration YAML file
    #[arg(short, long, default_value = "lf_config.yaml")]
    config: PathBuf,

    /// Output path for the generated program
    #[arg(short, long, default_value = "src/MotionTrackingArena.lf")]
    output: PathBuf,

    /// Address for devices missing from the neighbor table (overrides YAML)
    #[arg(long)]
    fallback_ip: Option<String>,

    /// Also write a JSON registry of the generated nodes
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Print the program to stdout instead of writing it
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Configuration file: {:?}", args.config);

    let mut config = config_loader::load_config(&args.config)?;
    config_loader::apply_overrides(&mut config, &CliOverrides { fallback_ip: args.fallback_ip })?;

    let options = GenerationOptions {
        output: (!args.stdout).then(|| args.output.clone()),
        registry: args.registry,
    };

    let report = orchestrator::generate(&config, config.arp_command(), &options)?;

    if args.stdout {
        print!("{}", report.configuration);
    }

    let fallbacks = report.fallback_count();
    if fallbacks > 0 {
        warn!("{} of {} nodes use the fallback address; re-run once they are online",
              fallbacks, report.nodes.len());
    }

    if report.persist_error.is_some() {
        error!("Generated program was not saved");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
