use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "racer-reward",
    version,
    about = "Offline scoring of track racing telemetry with the training reward function"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single JSON telemetry snapshot
    Score(ScoreCommand),
    /// Score a JSON-lines telemetry log
    Replay(ReplayCommand),
    /// Print the effective tuning as TOML
    Tuning(TuningArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Preset {
    CenterlineV2,
    LookaheadV3,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReplayFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct TuningArgs {
    /// Built-in tuning; without it or --tuning, ./reward.toml is layered when present, else lookahead-v3
    #[arg(long, value_enum, conflicts_with = "tuning")]
    pub preset: Option<Preset>,

    /// TOML tuning file; its `base` key picks the preset it overlays
    #[arg(long)]
    pub tuning: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[command(flatten)]
    pub tuning: TuningArgs,
    /// Print the score after every checkpoint
    #[arg(long)]
    pub trace: bool,
}

#[derive(Args)]
pub struct ReplayCommand {
    pub path: PathBuf,
    #[command(flatten)]
    pub tuning: TuningArgs,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReplayFormat,
}
