use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use regstat_cli::dashboard::Dashboard;
use regstat_cli::render::{
    conversion_table, load_warnings_table, print_view, print_view_json, states_table, views_table,
};
use regstat_convert::{ConversionReport, ConvertConfig, FailurePolicy, convert_folders};
use regstat_model::{DashboardConfig, View};

use crate::cli::{ConvertArgs, DataArgs, OutputFormatArg, ViewArgs};

/// Config file values, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

pub fn run_views() -> Result<()> {
    println!("{}", views_table());
    Ok(())
}

pub fn run_view(args: &ViewArgs, config: DashboardConfig) -> Result<()> {
    let view = args.view;
    let span = info_span!("view", view = view.slug());
    let _guard = span.enter();

    let dashboard = open_dashboard(&args.data, config);
    let data = match dashboard.evaluate(view, args.state.as_deref()) {
        Ok(data) => data,
        Err(error) => {
            warn!(%error, "view unavailable");
            return Err(anyhow::Error::new(error).context(view.unavailable_message()));
        }
    };

    match args.format {
        OutputFormatArg::Table => print_view(view, &data),
        OutputFormatArg::Json => print_view_json(view, &data).context("serialize view")?,
    }
    Ok(())
}

pub fn run_states(args: &DataArgs, config: DashboardConfig) -> Result<()> {
    let dashboard = open_dashboard(args, config);
    let states = dashboard
        .states()
        .context(View::RegionalInsights.unavailable_message())?;
    println!("{}", states_table(&states));
    Ok(())
}

pub fn run_convert(args: &ConvertArgs, config: DashboardConfig) -> Result<ConversionReport> {
    let mut config = config;
    if let Some(root) = &args.input_root {
        config = config.with_input_root(root.clone());
    }
    if let Some(root) = &args.output_root {
        config = config.with_output_root(root.clone());
    }
    let policy = if args.keep_going {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };
    let convert_config = ConvertConfig::from_dashboard(&config).with_policy(policy);

    let span = info_span!(
        "convert",
        input = %convert_config.input_root.display(),
        output = %convert_config.output_root.display()
    );
    let _guard = span.enter();

    let report = convert_folders(&convert_config).context("convert spreadsheets")?;
    info!(
        converted = report.converted.len(),
        failed = report.failures.len(),
        "conversion complete"
    );
    Ok(report)
}

pub fn print_conversion(report: &ConversionReport) {
    println!("{}", conversion_table(report));
    if report.has_failures() {
        eprintln!("{} spreadsheet(s) failed to convert", report.failures.len());
    }
}

/// Loads all datasets once and reports skipped files on stderr.
fn open_dashboard(args: &DataArgs, config: DashboardConfig) -> Dashboard {
    let config = match &args.data_root {
        Some(root) => config.with_data_root(root.clone()),
        None => config,
    };
    let dashboard = Dashboard::new(config);
    let tables = dashboard.load_all();
    if let Some(table) = load_warnings_table(&tables) {
        eprintln!("{table}");
    }
    dashboard
}
