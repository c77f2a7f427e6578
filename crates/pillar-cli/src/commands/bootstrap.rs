//! Bootstrap command implementation.
//!
//! Builds a curve from a quote file, one pillar per quote.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pillar_curves::bootstrap::{BootstrapConfig, RootMethod, SequentialBootstrapper};
use pillar_curves::repricing::RepricingCheck;

use crate::cli::OutputFormat;
use crate::commands::curve::print_curve;
use crate::commands::Context;
use crate::input::read_quotes;
use crate::output::{print_warning, KeyValue};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Quote file: .json ([{"instrument": {..}, "price": ..}]) or CSV
    /// (kind,maturity,coupon,frequency,price)
    #[arg(long)]
    pub quotes: PathBuf,

    /// Lower end of the forward-rate bracket
    #[arg(long, allow_hyphen_values = true)]
    pub lower: Option<f64>,

    /// Upper end of the forward-rate bracket
    #[arg(long, allow_hyphen_values = true)]
    pub upper: Option<f64>,

    /// Absolute tolerance on the pricing residual
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Iteration budget per pillar
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Root-finding method (brent, bisection, hybrid)
    #[arg(long)]
    pub method: Option<RootMethod>,

    /// Print how well each quote reprices
    #[arg(long)]
    pub show_repricing: bool,

    /// Write the curve as JSON to this file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl BootstrapArgs {
    /// Applies command-line overrides to the configured settings.
    fn config(&self, base: BootstrapConfig) -> BootstrapConfig {
        let mut config = base;
        if let Some(lower) = self.lower {
            config.lower = lower;
        }
        if let Some(upper) = self.upper {
            config.upper = upper;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(method) = self.method {
            config.method = method;
        }
        config
    }
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, ctx: &Context) -> Result<()> {
    let quotes = read_quotes(&args.quotes)?;
    let config = args.config(ctx.settings.bootstrap);
    tracing::info!(
        quotes = quotes.len(),
        method = %config.method,
        lower = config.lower,
        upper = config.upper,
        "bootstrapping"
    );

    let result = SequentialBootstrapper::new()
        .with_config(config)
        .bootstrap_quotes(&quotes)?;
    tracing::info!(
        iterations = result.iterations,
        max_error = result.max_error(),
        "bootstrap complete"
    );
    if !result.is_valid() {
        print_warning(&format!(
            "{} quote(s) do not reprice within tolerance",
            result.report.failed_checks().len()
        ));
    }

    if let Some(path) = &args.save {
        std::fs::write(path, serde_json::to_string_pretty(&result.curve)?)?;
        ctx.printer.success(&format!("Curve written to {}", path.display()));
    }

    match ctx.printer.format {
        OutputFormat::Json if args.show_repricing => {
            let output = serde_json::json!({
                "curve": &result.curve,
                "repricing": result.report.checks(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.curve)?),
        _ => {
            ctx.printer.header("Bootstrapped Curve");
            print_curve(&result.curve, ctx)?;

            if args.show_repricing {
                ctx.printer.header("Repricing");
                ctx.printer.pairs(&repricing_pairs(result.report.checks(), ctx))?;
            }
        }
    }

    Ok(())
}

fn repricing_pairs(checks: &[RepricingCheck], ctx: &Context) -> Vec<KeyValue> {
    checks
        .iter()
        .map(|check| {
            let status = if check.passed { "ok" } else { "FAILED" };
            KeyValue::new(
                check.instrument.clone(),
                format!(
                    "{} vs {} (error {:.2e}, {status})",
                    ctx.printer.number(check.model),
                    ctx.printer.number(check.target),
                    check.error
                ),
            )
        })
        .collect()
}
