//! hilbert-fraction command line front-end.
//!
//! Resolves a fraction to its nested Hilbert quadrants and prints the path,
//! either as a table or as JSON for an external renderer.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hilbert_fraction::hilbert::{trace, CurveMode, SelectionPath};
use hilbert_fraction::{Fraction, Result, Settings, Square, Visualizer};

// =============================================================================
// Arguments
// =============================================================================

/// A fraction given on the command line.
#[derive(Clone, Debug)]
enum FractionArg {
    /// Decimal literal such as `0.1875`.
    Decimal(f64),
    /// Binary literal such as `0b0.0011`.
    Binary(Fraction),
}

fn parse_fraction(s: &str) -> std::result::Result<FractionArg, String> {
    let trimmed = s.trim();
    if trimmed.starts_with("0b") || trimmed.starts_with("0B") {
        Fraction::from_binary_str(trimmed)
            .map(FractionArg::Binary)
            .map_err(|e| e.to_string())
    } else {
        trimmed
            .parse::<f64>()
            .map(FractionArg::Decimal)
            .map_err(|e| format!("'{s}' is not a number: {e}"))
    }
}

#[derive(Debug, Parser)]
#[command(name = "hilbert-fraction", version, about = "Locate a binary fraction on the Hilbert curve")]
struct Cli {
    /// Fraction in [0, 1): decimal (0.1875) or binary with a 0b prefix (0b0.0011).
    #[arg(value_parser = parse_fraction, allow_hyphen_values = true)]
    fraction: FractionArg,

    /// Recursion depth; defaults to the configured maximum.
    #[arg(short, long, allow_hyphen_values = true)]
    depth: Option<i64>,

    /// Curve mode: `hilbert` or `fixed` (rotation-free quadtree order).
    #[arg(short, long)]
    mode: Option<CurveMode>,

    /// Level to highlight (1..=depth).
    #[arg(long)]
    highlight: Option<usize>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Also print every cell of the curve at this depth, in curve order.
    #[arg(long)]
    trace: bool,

    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// =============================================================================
// Output
// =============================================================================

#[derive(Serialize)]
struct Report<'a> {
    fraction: String,
    mode: CurveMode,
    depth: usize,
    cell: (u64, u64),
    index: u64,
    path: &'a SelectionPath,
    squares: Vec<Square>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<(u64, u64)>>,
}

fn print_table(report: &Report<'_>) {
    println!(
        "fraction {} ({} order, depth {})",
        report.fraction, report.mode, report.depth
    );
    println!("{:>5}  {:>5}  {:<12}  square", "level", "label", "quadrant");

    for (selection, square) in report.path.iter().zip(report.squares.iter().skip(1)) {
        let marker = if square.is_highlighted {
            '*'
        } else if square.is_highlighted_ancestor {
            '+'
        } else {
            ' '
        };
        println!(
            "{:>5}  {:>5}  {:<12}  [{}, {}) x [{}, {}) {marker}",
            selection.level,
            selection.label,
            selection.quadrant.name(),
            square.origin.0,
            square.origin.0 + square.size,
            square.origin.1,
            square.origin.1 + square.size,
        );
    }

    println!("cell {:?}, curve index {}", report.cell, report.index);

    if let Some(cells) = &report.trace {
        println!();
        for (d, (x, y)) in cells.iter().enumerate() {
            println!("{d:>6}: ({x}, {y})");
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }
    let depth = cli.depth.unwrap_or(settings.max_depth as i64);

    let mut visualizer = Visualizer::new(settings);
    let path = match &cli.fraction {
        FractionArg::Decimal(value) => visualizer.request_resolution(*value, depth)?,
        FractionArg::Binary(fraction) => visualizer.request_fraction(fraction, depth)?,
    };

    if let Some(level) = cli.highlight {
        visualizer.set_highlight(level)?;
    }

    let trace = if cli.trace {
        Some(trace(path.len(), path.mode())?)
    } else {
        None
    };

    let report = Report {
        fraction: visualizer
            .current_fraction()
            .map(ToString::to_string)
            .unwrap_or_default(),
        mode: path.mode(),
        depth: path.len(),
        cell: path.cell(),
        index: path.index(),
        path: &path,
        squares: visualizer.squares(),
        trace,
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: failed to encode JSON: {e}"),
        }
    } else {
        print_table(&report);
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fraction_forms() {
        assert!(matches!(parse_fraction("0.25"), Ok(FractionArg::Decimal(v)) if v == 0.25));
        assert!(matches!(parse_fraction("0b0.01"), Ok(FractionArg::Binary(_))));
        assert!(parse_fraction("half").is_err());
        assert!(parse_fraction("0b0.2").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "hilbert-fraction",
            "0.1875",
            "--depth",
            "2",
            "--mode",
            "fixed",
            "--highlight",
            "1",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.depth, Some(2));
        assert_eq!(cli.mode, Some(CurveMode::FixedTable));
        assert_eq!(cli.highlight, Some(1));
        assert!(cli.json);
    }
}
