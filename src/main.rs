mod cli;

use clap::Parser;
use racer_reward::config;
use racer_reward::replay;
use racer_reward::{evaluate_traced, RewardError, TelemetrySnapshot, Tuning, TuningPreset};
use std::fs::File;
use std::io::BufReader;
use tracing::warn;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose > 0 {
        let level = match verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("racer_reward={level}"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_tuning(args: &cli::TuningArgs) -> Result<Tuning, RewardError> {
    if let Some(path) = &args.tuning {
        return config::load_tuning(path);
    }
    if let Some(preset) = args.preset {
        return Ok(match preset {
            cli::Preset::CenterlineV2 => TuningPreset::CenterlineV2,
            cli::Preset::LookaheadV3 => TuningPreset::LookaheadV3,
        }
        .tuning());
    }

    let cwd = std::env::current_dir()?;
    match config::load_tuning_layers(&cwd)? {
        Some(tuning) => Ok(tuning),
        None => {
            warn!(
                "no {} found in {}, using {}",
                config::DEFAULT_TUNING_FILE,
                cwd.display(),
                TuningPreset::LookaheadV3.name()
            );
            Ok(TuningPreset::LookaheadV3.tuning())
        }
    }
}

fn run() -> Result<i32, RewardError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            if !cmd.path.exists() {
                return Err(RewardError::PathNotFound(cmd.path.display().to_string()));
            }
            let tuning = resolve_tuning(&cmd.tuning)?;
            let content = std::fs::read_to_string(&cmd.path)?;
            let snapshot = TelemetrySnapshot::from_json(&content)?;
            let trace = evaluate_traced(&snapshot, &tuning)?;

            if cmd.trace {
                for step in &trace.steps {
                    println!(
                        "{:<16} {:>10.6} -> {:>10.6}",
                        step.checkpoint.name(),
                        step.before,
                        step.after
                    );
                }
                if let Some(hazard) = trace.floored_by {
                    println!("floored by {}", hazard.name());
                }
            }
            println!("reward: {}", trace.reward);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Replay(cmd) => {
            if !cmd.path.exists() {
                return Err(RewardError::PathNotFound(cmd.path.display().to_string()));
            }
            let tuning = resolve_tuning(&cmd.tuning)?;
            let reader = BufReader::new(File::open(&cmd.path)?);
            let report = replay::score_lines(reader, &tuning)?;

            match cmd.format {
                cli::ReplayFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                cli::ReplayFormat::Text => {
                    for (step, reward) in report.rewards.iter().enumerate() {
                        println!("{step}\t{reward}");
                    }
                    let summary = &report.summary;
                    println!(
                        "tuning: {} steps: {} total: {:.6} mean: {:.6} min: {:.6} max: {:.6} floored: {}",
                        summary.tuning,
                        summary.steps,
                        summary.total,
                        summary.mean,
                        summary.min,
                        summary.max,
                        summary.floored
                    );
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Tuning(args) => {
            let tuning = resolve_tuning(&args)?;
            print!("{}", toml::to_string_pretty(&tuning)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
