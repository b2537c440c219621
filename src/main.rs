mod catalog;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod templates;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::catalog::MetricCatalog;
use crate::input::{InputError, load_axes, load_catalog, load_companies};
use crate::model::config::ScoringConfig;
use crate::model::metric::Direction;
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};
use crate::model::selection::{Axis, AxisMetricSelection};
use crate::pipeline::stage4_apply::{ApplyError, ScoringSession};
use crate::pipeline::stage5_report::{ReportError, Stage5Inputs, write_reports};
use crate::templates::TemplateError;
use crate::templates::defs::{DEFAULT_TEMPLATE_ID, builtin_templates};
use crate::templates::loader::{apply_template, load_template};

#[derive(Debug, Parser)]
#[command(
    name = "scatterscore",
    version,
    about = "Multi-axis composite scoring for mining companies"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a company dataset and write chart-ready reports.
    Run(RunArgs),
    /// List built-in templates.
    Templates,
    /// List the metric catalog.
    Metrics {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(long)]
    companies: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(long, conflicts_with = "axes")]
    template: Option<String>,
    #[arg(long)]
    axes: Option<PathBuf>,
    #[arg(long, value_enum)]
    normalization: Option<NormalizationMode>,
    #[arg(long, value_enum)]
    imputation: Option<ImputationMode>,
    #[arg(long)]
    z_metric: Option<String>,
    #[arg(long, value_enum)]
    z_scale: Option<ZScale>,
    /// Remove a metric: `x:KEY`.
    #[arg(long = "drop", value_parser = parse_axis_edit)]
    drops: Vec<AxisEdit>,
    /// Add a metric: `x:KEY=WEIGHT`.
    #[arg(long = "add", value_parser = parse_axis_edit)]
    adds: Vec<AxisEdit>,
    /// Set a weight and rebalance the rest: `y:KEY=WEIGHT`.
    #[arg(long = "weight", value_parser = parse_axis_edit)]
    weights: Vec<AxisEdit>,
    /// Override directionality: `x:KEY=higher|lower|default`.
    #[arg(long = "direction", value_parser = parse_axis_edit)]
    directions: Vec<AxisEdit>,
    #[arg(long)]
    include_invalid: bool,
}

/// `AXIS:KEY[=VALUE]` from the command line.
#[derive(Debug, Clone, PartialEq)]
struct AxisEdit {
    axis: Axis,
    key: String,
    value: Option<String>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("scoring pass was superseded before it could be published")]
    Superseded,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Run(args) => run_scoring(&args),
        Command::Templates => {
            print!("{}", render_template_list());
            Ok(())
        }
        Command::Metrics { catalog } => {
            let catalog = load_catalog_or_builtin(catalog.as_deref())?;
            print!("{}", render_metric_list(&catalog));
            Ok(())
        }
    }
}

fn run_scoring(args: &RunArgs) -> Result<(), AppError> {
    let catalog = load_catalog_or_builtin(args.catalog.as_deref())?;
    let universe = load_companies(&args.companies)?;
    let config = resolve_config(args, &catalog)?;

    let mut session = ScoringSession::new(catalog);
    if session.apply(&universe, &config)?.is_none() {
        return Err(AppError::Superseded);
    }
    let pass = session.latest().ok_or(AppError::Superseded)?;

    for warning in &pass.output.warnings {
        tracing::warn!("{warning}");
    }
    tracing::info!(
        pass_id = pass.pass_id,
        plottable = pass.output.plottable().count(),
        companies = pass.universe_size,
        cached_metrics = session.cache().len(),
        generation = ?session.cache().generation(),
        "scoring complete"
    );

    write_reports(
        &Stage5Inputs {
            pass,
            catalog: session.catalog(),
            include_invalid: args.include_invalid,
        },
        &args.out,
    )?;
    Ok(())
}

fn load_catalog_or_builtin(path: Option<&Path>) -> Result<MetricCatalog, InputError> {
    match path {
        Some(path) => load_catalog(path),
        None => Ok(MetricCatalog::builtin()),
    }
}

/// Base config from `--axes` or a template, then command-line overrides in a
/// fixed order: modes, z, drops, adds, weights, directions.
fn resolve_config(args: &RunArgs, catalog: &MetricCatalog) -> Result<ScoringConfig, AppError> {
    let mut config = match &args.axes {
        Some(path) => load_axes(path)?,
        None => {
            let id = args.template.as_deref().unwrap_or(DEFAULT_TEMPLATE_ID);
            apply_template(load_template(id)?, catalog)?
        }
    };

    config = config.with_modes(
        args.normalization.unwrap_or(config.normalization),
        args.imputation.unwrap_or(config.imputation),
    );
    if args.z_metric.is_some() || args.z_scale.is_some() {
        let z_metric = args.z_metric.clone().or_else(|| config.z_metric.clone());
        config = config.with_z_metric(z_metric, args.z_scale.unwrap_or(config.z_scale));
    }

    for edit in &args.drops {
        config = config.with_metric_removed(edit.axis, &edit.key);
    }
    for edit in &args.adds {
        let weight = edit_weight(edit)?;
        let selection = AxisMetricSelection::new(&edit.key, weight);
        config = config.with_metric_added(edit.axis, selection);
    }
    for edit in &args.weights {
        let weight = edit_weight(edit)?;
        config = config.with_weight(edit.axis, &edit.key, weight);
    }
    for edit in &args.directions {
        let direction = match edit.value.as_deref() {
            Some("higher") => Direction::HigherIsBetter,
            Some("lower") => Direction::LowerIsBetter,
            Some("default") | None => Direction::CatalogDefault,
            Some(other) => {
                return Err(AppError::InvalidArgument(format!(
                    "direction for {} must be higher, lower or default, got {other}",
                    edit.key
                )));
            }
        };
        config = config.with_direction(edit.axis, &edit.key, direction);
    }
    Ok(config)
}

fn edit_weight(edit: &AxisEdit) -> Result<f64, AppError> {
    let raw = edit
        .value
        .as_deref()
        .ok_or_else(|| AppError::InvalidArgument(format!("missing weight for {}", edit.key)))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidArgument(format!("invalid weight for {}: {raw}", edit.key)))
}

fn parse_axis_edit(s: &str) -> Result<AxisEdit, String> {
    let (axis, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected AXIS:KEY[=VALUE], got {s}"))?;
    let axis = match axis.trim().to_ascii_lowercase().as_str() {
        "x" => Axis::X,
        "y" => Axis::Y,
        other => return Err(format!("unknown axis {other} (use x or y)")),
    };
    let (key, value) = match rest.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value.trim().to_string())),
        None => (rest.trim(), None),
    };
    if key.is_empty() {
        return Err(format!("missing metric key in {s}"));
    }
    Ok(AxisEdit {
        axis,
        key: key.to_string(),
        value,
    })
}

fn render_template_list() -> String {
    let mut out = String::new();
    for t in builtin_templates() {
        out.push_str(&format!(
            "{}\t{}\t{}/{}\t{}\n",
            t.id,
            t.name,
            t.default_normalization.as_str(),
            t.default_imputation.as_str(),
            t.description
        ));
    }
    out
}

fn render_metric_list(catalog: &MetricCatalog) -> String {
    let mut out = String::new();
    for d in catalog.descriptors() {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            d.key,
            d.label,
            if d.higher_is_better { "higher" } else { "lower" },
            d.unit.as_deref().unwrap_or("-")
        ));
    }
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
