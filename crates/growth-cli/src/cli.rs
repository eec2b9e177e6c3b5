//! CLI argument definitions for the `growth` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use growth_model::Sex;

#[derive(Parser)]
#[command(
    name = "growth",
    version,
    about = "Height-for-age Z-scores against WHO growth reference tables",
    long_about = "Height-for-age Z-scores against WHO growth reference tables.\n\n\
                  Tables are read from --reference-dir, GROWTH_REFERENCE_DIR, or ./reference.\n\
                  Both LMS and -3..+3 SD boundary tables are accepted."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the reference tables (and optional manifest.toml).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// Include child identifiers from batch files in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate one child's height, with optional BMI and blood pressure.
    Evaluate(EvaluateArgs),

    /// Height at a given Z-score for an age and sex.
    Height(HeightArgs),

    /// Evaluate every row of a CSV with age, sex and height columns.
    Batch(BatchArgs),

    /// Show which reference tables loaded and what was dropped.
    Tables,
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Age in years (0 to 19).
    #[arg(long, value_name = "YEARS")]
    pub age: f64,

    /// male or female.
    #[arg(long, value_parser = parse_sex)]
    pub sex: Sex,

    /// Height in centimetres.
    #[arg(long, value_name = "CM")]
    pub height: f64,

    /// Weight in kilograms; adds a BMI screen.
    #[arg(long, value_name = "KG", value_parser = parse_weight)]
    pub weight: Option<f64>,

    /// Systolic pressure in mmHg; needs --diastolic.
    #[arg(long, value_name = "MMHG", requires = "diastolic")]
    pub systolic: Option<u32>,

    /// Diastolic pressure in mmHg; needs --systolic.
    #[arg(long, value_name = "MMHG", requires = "systolic")]
    pub diastolic: Option<u32>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl EvaluateArgs {
    pub fn blood_pressure(&self) -> Option<(u32, u32)> {
        self.systolic.zip(self.diastolic)
    }
}

#[derive(Args)]
pub struct HeightArgs {
    /// Age in years (0 to 19).
    #[arg(long, value_name = "YEARS")]
    pub age: f64,

    /// male or female.
    #[arg(long, value_parser = parse_sex)]
    pub sex: Sex,

    /// Target Z-score.
    #[arg(long, allow_negative_numbers = true)]
    pub z: f64,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// CSV file with age, sex, height and optional weight and id columns.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
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

fn parse_sex(value: &str) -> Result<Sex, String> {
    value.parse().map_err(|e: growth_model::ModelError| e.to_string())
}

fn parse_weight(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight > 0.0 => Ok(weight),
        Ok(weight) => Err(format!("weight must be a positive number of kilograms, got {weight}")),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate_with_weight(weight: &str) -> Result<Cli, clap::Error> {
        let weight = format!("--weight={weight}");
        Cli::try_parse_from([
            "growth", "evaluate", "--age", "5", "--sex", "male", "--height", "110", weight.as_str(),
        ])
    }

    #[test]
    fn positive_weight_is_accepted() {
        let cli = evaluate_with_weight("33").unwrap();
        let Command::Evaluate(args) = cli.command else {
            panic!("expected the evaluate command");
        };
        assert_eq!(args.weight, Some(33.0));
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        for weight in ["0", "-4", "NaN", "inf", "heavy"] {
            let error = evaluate_with_weight(weight).err().unwrap();
            assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation, "{weight}");
        }
    }
}
