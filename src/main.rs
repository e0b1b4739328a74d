mod core;

use clap::{Parser, ValueEnum};

use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::counter::TristatePolicy;
use crate::core::script::{builtin, run_fresh, Script};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    DriveZero,
    HighImpedance,
}

impl From<Policy> for TristatePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::DriveZero => TristatePolicy::DriveZero,
            Policy::HighImpedance => TristatePolicy::HighImpedance,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON stimulus script. Runs the built-in scenarios when omitted.
    #[arg(short, long)]
    script: Option<PathBuf>,
    /// Bus behaviour while output enable is low.
    #[arg(short, long, value_enum, default_value_t = Policy::HighImpedance)]
    policy: Policy,
    #[arg(long, default_value_t = String::from("./logs"))]
    log_dir: String,
    /// Print the selected scripts as JSON instead of running them.
    #[arg(long)]
    print_scripts: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = parse_command_line_args();

    let _guard = init_tracing(&args.log_dir)?;

    let scripts = match &args.script {
        Some(path) => vec![Script::load(path)?],
        None => builtin(args.policy.into()),
    };

    if args.print_scripts {
        for script in &scripts {
            println!("{}", String::from_utf8(script.to_bytes()?)?);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut failures = 0;
    for script in &scripts {
        match run_fresh(script, args.policy.into()) {
            Ok(report) => println!(
                "PASS {} ({} steps, {} checks, {} cycles)",
                report.name, report.steps, report.checks, report.cycles
            ),
            Err(e) => {
                failures += 1;
                println!("FAIL {}", e);
            }
        }
    }

    println!("{} passed, {} failed", scripts.len() - failures, failures);
    if failures > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_command_line_args() -> Args {
    Args::parse()
}

fn init_tracing(log_dir: &str) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "trace.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(guard)
}
