//! Curve command implementation.
//!
//! Shows a curve's pillars or evaluates it at arbitrary times.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use pillar_curves::{Curve, PwFlatCurve};

use crate::commands::Context;
use crate::input::{load_curve, parse_list};
use crate::output::NumericRow;

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(subcommand)]
    pub command: CurveCommand,
}

/// Curve subcommands.
#[derive(Subcommand, Debug)]
pub enum CurveCommand {
    /// List pillars with their discount factors and spot rates
    Show(CurveSource),

    /// Evaluate forward, discount and spot at given times
    Eval(EvalArgs),
}

/// Where a curve comes from.
#[derive(Args, Debug)]
pub struct CurveSource {
    /// Curve JSON file ({"times": [..], "forwards": [..]})
    #[arg(long, conflicts_with_all = ["times", "forwards"])]
    pub file: Option<PathBuf>,

    /// Pillar times in years (comma-separated, e.g., "1,2,5")
    #[arg(long, requires = "forwards")]
    pub times: Option<String>,

    /// Forward rates (comma-separated, e.g., "0.03,0.035,0.04")
    #[arg(long, requires = "times", allow_hyphen_values = true)]
    pub forwards: Option<String>,
}

impl CurveSource {
    /// Builds the curve.
    pub fn load(&self) -> Result<PwFlatCurve> {
        load_curve(
            self.file.as_deref(),
            self.times.as_deref(),
            self.forwards.as_deref(),
        )
    }
}

/// Arguments for curve evaluation.
#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub source: CurveSource,

    /// Evaluation times in years (comma-separated)
    #[arg(long)]
    pub at: String,
}

#[derive(Debug, Serialize)]
struct PillarRow {
    time: f64,
    forward: f64,
    discount: f64,
    spot: f64,
}

impl NumericRow for PillarRow {
    const HEADERS: &'static [&'static str] = &["Time", "Forward", "Discount", "Spot"];

    fn values(&self) -> Vec<f64> {
        vec![self.time, self.forward, self.discount, self.spot]
    }
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CurveCommand::Show(source) => execute_show(&source, ctx),
        CurveCommand::Eval(eval) => execute_eval(&eval, ctx),
    }
}

fn execute_show(source: &CurveSource, ctx: &Context) -> Result<()> {
    let curve = source.load()?;
    tracing::info!(pillars = curve.len(), "showing curve");

    ctx.printer.header("Curve Pillars");
    print_curve(&curve, ctx)
}

/// Prints one row per pillar.
pub fn print_curve(curve: &PwFlatCurve, ctx: &Context) -> Result<()> {
    let rows = curve
        .times()
        .iter()
        .map(|&t| evaluate(curve, t))
        .collect::<Result<Vec<_>>>()?;
    ctx.printer.rows(&rows)
}

fn execute_eval(args: &EvalArgs, ctx: &Context) -> Result<()> {
    let curve = args.source.load()?;
    let times = parse_list(&args.at)?;
    tracing::info!(points = times.len(), "evaluating curve");

    let rows = times
        .iter()
        .map(|&t| evaluate(&curve, t))
        .collect::<Result<Vec<_>>>()?;

    ctx.printer.header("Curve Values");
    ctx.printer.rows(&rows)
}

fn evaluate(curve: &PwFlatCurve, t: f64) -> Result<PillarRow> {
    Ok(PillarRow {
        time: t,
        forward: curve.forward(t)?,
        discount: curve.discount(t)?,
        spot: curve.spot(t)?,
    })
}
