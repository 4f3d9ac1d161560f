//! CLI argument definitions for the registration statistics dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use regstat_model::View;

#[derive(Parser)]
#[command(
    name = "regstat",
    version,
    about = "Registration statistics dashboard - aggregate views over CSV datasets",
    long_about = "Browse aggregate views over the enrolment, demographic update and \
                  biometric update datasets.\n\n\
                  Each dataset is a folder of CSV files concatenated into one table. \
                  The convert command turns spreadsheet folders into CSV folders."
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

    /// JSON file with directory settings; flags override its values.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the available views.
    Views,

    /// Render one view.
    View(ViewArgs),

    /// List the states offered by the regional view.
    States(DataArgs),

    /// Convert spreadsheet folders to CSV folders.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct DataArgs {
    /// Folder holding one sub-folder of CSV files per dataset.
    #[arg(long = "data-root", value_name = "DIR")]
    pub data_root: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ViewArgs {
    /// View slug or label (see `regstat views`).
    #[arg(value_name = "VIEW", value_parser = parse_view)]
    pub view: View,

    #[command(flatten)]
    pub data: DataArgs,

    /// State for the regional view (default: first state).
    #[arg(long = "state", value_name = "NAME")]
    pub state: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Folder holding one sub-folder of spreadsheets per dataset.
    #[arg(long = "input-root", value_name = "DIR")]
    pub input_root: Option<PathBuf>,

    /// Folder the CSV sub-folders are written to.
    #[arg(long = "output-root", value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Skip spreadsheets that fail to convert instead of stopping.
    #[arg(long = "keep-going")]
    pub keep_going: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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

fn parse_view(value: &str) -> Result<View, String> {
    value.parse::<View>().map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_accepts_slug_and_label() {
        let cli = Cli::try_parse_from(["regstat", "view", "regional-insights", "--state", "Goa"])
            .unwrap();
        let Command::View(args) = cli.command else {
            panic!("expected view command");
        };
        assert_eq!(args.view, View::RegionalInsights);
        assert_eq!(args.state.as_deref(), Some("Goa"));

        let cli = Cli::try_parse_from(["regstat", "view", "Biometric Lifecycle"]).unwrap();
        assert!(matches!(cli.command, Command::View(args) if args.view == View::BiometricLifecycle));
    }

    #[test]
    fn test_unknown_view_is_rejected() {
        assert!(Cli::try_parse_from(["regstat", "view", "weather"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "regstat",
            "convert",
            "--keep-going",
            "--config",
            "dashboard.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("dashboard.json")));
        let Command::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert!(args.keep_going);
        assert!(args.input_root.is_none());
    }
}
