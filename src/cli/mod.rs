//! Command-line interface definitions.

use crate::collage::PoemVariant;
use crate::constants::{
    APP_DESCRIPTION, APP_NAME, ENV_VAR_LOG_FORMAT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::errors::{AppError, AppResult};
use crate::journal::parse_date;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turn daily journal text into collage poems.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
#[command(arg_required_else_help = true, propagate_version = true)]
pub struct CliArgs {
    /// Print debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log format on stderr (falls back to MOSAIC_LOG_FORMAT, then text)
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// `--date` shared by every per-day command.
#[derive(Args, Debug, Clone, Default)]
pub struct DateArg {
    /// Entry date (format: YYYY-MM-DD or YYYYMMDD); defaults to today
    #[arg(short = 'd', long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

impl DateArg {
    /// The requested date, or `today`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the day's entry in your editor
    Write {
        #[command(flatten)]
        date: DateArg,

        /// Save this text instead of opening the editor
        #[arg(short = 't', long)]
        text: Option<String>,
    },

    /// Print the day's entry
    Show {
        #[command(flatten)]
        date: DateArg,
    },

    /// List retained entries, newest first
    List,

    /// Generate a collage poem from the day's entry
    Generate {
        #[command(flatten)]
        date: DateArg,

        /// Use this text instead of the stored entry
        #[arg(short = 't', long)]
        text: Option<String>,

        /// Skip the AI service and split the text locally
        #[arg(long)]
        offline: bool,

        /// Variant to print: 4-lines, 8-lines, image-only
        #[arg(long, default_value = "4-lines")]
        variant: PoemVariant,

        /// Also write the printed variant as an SVG card
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Print the latest collage for a day
    View {
        #[command(flatten)]
        date: DateArg,

        /// Variant to print: 4-lines, 8-lines, image-only, manual
        #[arg(long, default_value = "4-lines")]
        variant: PoemVariant,
    },

    /// Print the numbered phrase pool of the latest collage
    Pool {
        #[command(flatten)]
        date: DateArg,
    },

    /// Arrange pool phrases into a manual layout
    Compose {
        #[command(flatten)]
        date: DateArg,

        /// One line of pool indices, e.g. "0 3 5"; repeat for more lines
        #[arg(short = 'l', long = "line", required = true, value_name = "INDICES")]
        lines: Vec<String>,

        /// Also write the manual layout as an SVG card
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Write the latest collage as an SVG card
    Export {
        #[command(flatten)]
        date: DateArg,

        /// Variant to export: 4-lines, 8-lines, image-only, manual
        #[arg(long, default_value = "4-lines")]
        variant: PoemVariant,

        /// Destination file
        #[arg(short = 'o', long, value_name = "PATH")]
        output: PathBuf,
    },
}

impl CliArgs {
    /// The log format from the flag, then the environment, then text.
    pub fn log_format(&self) -> AppResult<String> {
        let format = match &self.log_format {
            Some(format) => format.clone(),
            None => std::env::var(ENV_VAR_LOG_FORMAT)
                .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string()),
        };
        match format.as_str() {
            LOG_FORMAT_TEXT | LOG_FORMAT_JSON => Ok(format),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}', expected '{}' or '{}'",
                other, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            ))),
        }
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}
