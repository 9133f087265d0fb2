//! Org chart command line interface
//!
//! Loads an employee list and prints validation results, the visible tree
//! or search hits.
//!
//! # Usage
//!
//! ```bash
//! # Integrity report
//! orgchart validate --file staff.json
//!
//! # Tree, two levels open, Engineering only
//! orgchart tree --file staff.yaml --depth 2 --org-unit Engineering
//!
//! # Search names, titles, org units and offices
//! orgchart search --file staff.json "berlin" -o json
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `org_chart=info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use org_chart::{
    load_records, Employee, FilterCriteria, OrgChartConfig, OrgChartState, MAX_EXPAND_DEPTH,
};

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(version)]
#[command(about = "Validate, filter and print org charts built from employee lists")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Employee records (.json, .yaml or .yml array of objects)
    #[arg(long, short, global = true, env = "ORGCHART_FILE")]
    file: Option<PathBuf>,

    /// Engine configuration (.yaml, .yml or .json)
    #[arg(long, short, global = true, env = "ORGCHART_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Report cycles, dangling managers, root count and naming problems
    Validate,

    /// Print the visible tree
    Tree {
        /// Expand depth (overrides the configured default)
        #[arg(long)]
        depth: Option<usize>,

        /// Expand every node
        #[arg(long, conflicts_with = "depth")]
        all: bool,

        /// Show only this person's subtree
        #[arg(long)]
        focus: Option<String>,

        /// Keep these org units (repeatable)
        #[arg(long = "org-unit")]
        org_units: Vec<String>,

        /// Keep these offices (repeatable)
        #[arg(long = "office")]
        offices: Vec<String>,

        /// Keep levels below this (0 = no cap)
        #[arg(long)]
        max_level: Option<usize>,
    },

    /// Case-insensitive search over name, title, org unit and office
    Search {
        /// Text to look for
        query: String,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "org_chart=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = load_state(cli.file.as_deref(), cli.config.as_deref()).and_then(|state| {
        match cli.command {
            Commands::Validate => cmd_validate(&state, cli.format),
            Commands::Tree {
                depth,
                all,
                focus,
                org_units,
                offices,
                max_level,
            } => {
                let criteria = FilterCriteria {
                    org_units: org_units.into_iter().collect(),
                    offices: offices.into_iter().collect(),
                    max_level,
                };
                cmd_tree(state, TreeArgs { depth, all, focus, criteria }, cli.format)
            }
            Commands::Search { query } => cmd_search(&state, &query, cli.format),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{e:#}") }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn load_state(file: Option<&Path>, config: Option<&Path>) -> Result<OrgChartState> {
    let config = match config {
        Some(path) => OrgChartConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => OrgChartConfig::default(),
    };

    let file = file.context("No records file given (use --file or ORGCHART_FILE)")?;
    let records: Vec<Employee> = load_records(file, &config.field_mapping)
        .with_context(|| format!("Failed to load records from {}", file.display()))?;

    tracing::info!(records = records.len(), file = %file.display(), "loaded records");
    Ok(OrgChartState::new(records, config))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_validate(state: &OrgChartState, format: OutputFormat) -> Result<()> {
    let report = state.report();
    let categories = state.categorization();

    match format {
        OutputFormat::Json => {
            let names = |records: &[Employee]| -> Vec<String> {
                records.iter().map(|r| r.name.clone()).collect()
            };
            let output = serde_json::json!({
                "clean": report.is_clean(),
                "warnings": report.warnings,
                "stats": report.stats,
                "unmapped": names(&categories.unmapped),
                "cyclic": names(&categories.cyclic),
                "stranded": names(&categories.stranded),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            let stats = &report.stats;
            println!(
                "{} records, {} root(s), {} mapped",
                stats.total.to_string().bold(),
                stats.roots,
                categories.mapped.len()
            );
            if report.is_clean() {
                println!("{} No integrity problems found", "OK".green());
                return Ok(());
            }
            for warning in &report.warnings {
                println!("{} {}", "warning:".yellow().bold(), warning);
            }
            for (label, records) in [
                ("manager not found", &categories.unmapped),
                ("on a reporting loop", &categories.cyclic),
                ("below an unresolved chain", &categories.stranded),
            ] {
                for record in records.iter() {
                    println!("  {} {} ({})", "-".dimmed(), record.name, label.dimmed());
                }
            }
        }
    }
    Ok(())
}

struct TreeArgs {
    depth: Option<usize>,
    all: bool,
    focus: Option<String>,
    criteria: FilterCriteria,
}

fn cmd_tree(mut state: OrgChartState, args: TreeArgs, format: OutputFormat) -> Result<()> {
    if let Some(depth) = args.depth {
        anyhow::ensure!(
            depth <= MAX_EXPAND_DEPTH,
            "--depth must be at most {MAX_EXPAND_DEPTH}"
        );
        state.expand_to_depth(depth);
    }
    if args.all {
        state.expand_all();
    }
    if let Some(id) = &args.focus {
        anyhow::ensure!(state.focus(id), "No employee named '{id}'");
    }
    state.set_filter(args.criteria);

    let (matched, total) = state.filter_counts();
    let visible = state.visible_nodes();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = visible
                .iter()
                .map(|node| {
                    serde_json::json!({
                        "id": node.id,
                        "level": node.level,
                        "title": node.title(),
                        "expanded": state.is_expanded(&node.id),
                        "reports": node.children.len(),
                        "descendants": node.descendant_count(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "matched": matched,
                "total": total,
                "visible": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Pretty => {
            let base = visible.first().map_or(0, |node| node.level);
            for node in &visible {
                let marker = if node.is_leaf() {
                    " "
                } else if state.is_expanded(&node.id) {
                    "▾"
                } else {
                    "▸"
                };
                let indent = "  ".repeat(node.level.saturating_sub(base));
                let mut line = format!("{indent}{marker} {}", node.id.bold());
                if let Some(title) = node.title() {
                    line.push_str(&format!(" {}", title.dimmed()));
                }
                if !node.is_leaf() && !state.is_expanded(&node.id) {
                    line.push_str(&format!(" (+{})", node.descendant_count()));
                }
                println!("{line}");
            }
            if state.filter().is_active() {
                println!("{} {matched} of {total} match", "filter:".cyan());
            }
        }
    }
    Ok(())
}

fn cmd_search(state: &OrgChartState, query: &str, format: OutputFormat) -> Result<()> {
    let hits = state.search(query);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
        OutputFormat::Pretty => {
            if hits.is_empty() {
                println!("No matches for '{query}'");
            }
            for hit in &hits {
                println!(
                    "{} {}",
                    hit.id.bold(),
                    format!("[{:?}] {}", hit.field, hit.path.join(" > ")).dimmed()
                );
            }
        }
    }
    Ok(())
}
