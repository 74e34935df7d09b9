//! CLI argument definitions for `immunize`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use imm_model::ScheduleType;

#[derive(Parser)]
#[command(
    name = "immunize",
    version,
    about = "Immunization schedules - extract, clean and query vaccination tables",
    long_about = "Extract NIP and IAP vaccination schedules from OCR output, build\n\
                  canonical schedule definitions, and list the vaccines due for a\n\
                  child's age."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw OCR lines and ages in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract NIP and IAP tables from OCR output into CSV files.
    Extract(ExtractArgs),

    /// Fold a malformed NIP CSV into one clean row per vaccine.
    Clean(CleanArgs),

    /// Build schedule definition files from extracted CSV tables.
    Build(BuildArgs),

    /// List the vaccines due for a child's age.
    Recommend(RecommendArgs),

    /// Show one schedule in readable form.
    Schedule(ScheduleArgs),

    /// Show both schedules side by side.
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct StandardsArgs {
    /// Directory holding nip_schedule.json and iap_schedule.json
    /// (default: $IMM_STANDARDS_DIR, then the bundled standards/).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// OCR source for the NIP table (text dump, or image with --images).
    #[arg(long = "nip-source", value_name = "PATH")]
    pub nip_source: PathBuf,

    /// OCR source for the IAP table (text dump, or image with --images).
    #[arg(long = "iap-source", value_name = "PATH")]
    pub iap_source: PathBuf,

    /// Treat sources as page images and run tesseract on them.
    #[arg(long = "images")]
    pub images: bool,

    /// Tesseract executable.
    #[arg(long = "tesseract", value_name = "PATH", default_value = "tesseract")]
    pub tesseract: PathBuf,

    /// Tesseract language.
    #[arg(long = "lang", default_value = "eng")]
    pub lang: String,

    /// Canonicalize IAP vaccine names and skip rows with unknown names.
    #[arg(long = "canonical-names")]
    pub canonical_names: bool,

    /// Vaccine vocabulary TOML (default: built-in table).
    #[arg(long = "vocabulary", value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,

    /// Output directory for the CSV tables.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data")]
    pub output_dir: PathBuf,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Malformed NIP table.
    #[arg(value_name = "NIP_CSV")]
    pub input: PathBuf,

    /// Cleaned output (default: <NIP_CSV stem>_cleaned.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Vaccine vocabulary TOML (default: built-in table).
    #[arg(long = "vocabulary", value_name = "PATH")]
    pub vocabulary: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[arg(long = "nip-csv", value_name = "PATH")]
    pub nip_csv: PathBuf,

    #[arg(long = "iap-csv", value_name = "PATH")]
    pub iap_csv: PathBuf,

    /// JSON object mapping IAP vaccine names to categories.
    #[arg(long = "categories", value_name = "PATH")]
    pub categories: Option<PathBuf>,

    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Child's age in `--unit`s.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Unit of VALUE: hours, days, weeks, months or years.
    #[arg(long = "unit", default_value = "weeks")]
    pub unit: String,

    /// Also list IAP recommendations.
    #[arg(long = "include-iap")]
    pub include_iap: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Args)]
pub struct ScheduleArgs {
    #[arg(long = "type", value_enum, default_value = "nip")]
    pub schedule_type: ScheduleTypeArg,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print JSON instead of tables.
    #[arg(long = "json", conflicts_with = "markdown")]
    pub json: bool,

    /// Print plain Markdown tables.
    #[arg(long = "markdown")]
    pub markdown: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScheduleTypeArg {
    Nip,
    Iap,
}

impl From<ScheduleTypeArg> for ScheduleType {
    fn from(value: ScheduleTypeArg) -> Self {
        match value {
            ScheduleTypeArg::Nip => ScheduleType::Nip,
            ScheduleTypeArg::Iap => ScheduleType::Iap,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
