//! Flags shared by every command and rendering of the result.

use clap::{Args, ValueEnum};
use evgverify_core::logging_facility::Profile;
use evgverify_engine::VerificationReport;

pub const BANNER_RULE: &str = "---------------------------------------------------------------";
pub const BANNER_TITLE: &str = "Arguments to create evergreen patch with to verify the changes:";

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Result format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    /// Print only the `evergreen patch` arguments
    #[arg(long, global = true, conflicts_with = "output")]
    pub args_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// JSON lines
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Text => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Banner followed by the patch arguments
    Text,
    /// The full report, including why each entity was flagged
    Json,
}

/// Render the report as it is printed on stdout
pub fn render(report: &VerificationReport, global: &GlobalArgs) -> Result<String, serde_json::Error> {
    if global.args_only {
        return Ok(report.patch_args());
    }
    match global.output {
        OutputFormat::Text => Ok(format!(
            "{}\n{}\n{}",
            BANNER_RULE,
            BANNER_TITLE,
            report.patch_args()
        )),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Print the report on stdout
pub fn print(report: &VerificationReport, global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render(report, global)?);
    Ok(())
}
