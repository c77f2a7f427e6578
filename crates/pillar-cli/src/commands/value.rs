//! Value command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pillar_core::{CashFlowStream, Frequency, Instrument};
use pillar_curves::present;

use crate::commands::Context;
use crate::error::CliError;
use crate::input::{parse_list, read_curve};
use crate::output::KeyValue;

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Curve JSON file
    #[arg(long)]
    pub curve: PathBuf,

    /// Bond maturity in years (zero-coupon unless --coupon is given)
    #[arg(long, conflicts_with_all = ["times", "cash"])]
    pub maturity: Option<f64>,

    /// Annual coupon rate as a decimal (e.g., 0.05)
    #[arg(long, requires = "maturity")]
    pub coupon: Option<f64>,

    /// Coupon frequency (annual, semi-annual, quarterly, monthly or 1/2/4/12;
    /// defaults to semi-annual)
    #[arg(long, requires = "coupon")]
    pub frequency: Option<Frequency>,

    /// Cash-flow times in years (comma-separated)
    #[arg(long, requires = "cash")]
    pub times: Option<String>,

    /// Cash-flow amounts (comma-separated)
    #[arg(long, requires = "times", allow_hyphen_values = true)]
    pub cash: Option<String>,
}

impl ValueArgs {
    fn instrument(&self) -> Result<Instrument> {
        let instrument = match (self.maturity, self.coupon, &self.times, &self.cash) {
            (Some(maturity), Some(coupon), _, _) => {
                let frequency = self.frequency.unwrap_or_default();
                Instrument::fixed_coupon_bond(maturity, coupon, frequency)?
            }
            (Some(maturity), None, _, _) => Instrument::zero_coupon_bond(maturity)?,
            (None, _, Some(times), Some(cash)) => {
                Instrument::cash_flows(parse_list(times)?, parse_list(cash)?)?
            }
            _ => {
                return Err(CliError::MissingArgument(
                    "--maturity or both --times and --cash".into(),
                )
                .into())
            }
        };
        Ok(instrument)
    }
}

/// Execute the value command.
pub fn execute(args: ValueArgs, ctx: &Context) -> Result<()> {
    let curve = read_curve(&args.curve)?;
    let instrument = args.instrument()?;
    let pv = present(&instrument, &curve)?;
    tracing::info!(instrument = %instrument.description(), pv, "valued");

    ctx.printer.header("Present Value");
    ctx.printer.pairs(&[
        KeyValue::new("Instrument", instrument.description()),
        KeyValue::new("Cash Flows", instrument.size().to_string()),
        KeyValue::new("PV", ctx.printer.number(pv)),
    ])
}
