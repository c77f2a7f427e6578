//! Reading curves, quotes and number lists from the command line and files.

use std::path::Path;

use pillar_core::{Frequency, Instrument};
use pillar_curves::bootstrap::Quote;
use pillar_curves::PwFlatCurve;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Parses a comma-separated list of numbers, e.g. `"0.5,1,2"`.
pub fn parse_list(s: &str) -> CliResult<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| CliError::InvalidNumber(part.to_string()))
        })
        .collect()
}

/// Builds a curve from a JSON file or from inline lists.
pub fn load_curve(
    file: Option<&Path>,
    times: Option<&str>,
    forwards: Option<&str>,
) -> anyhow::Result<PwFlatCurve> {
    match (file, times, forwards) {
        (Some(path), _, _) => read_curve(path),
        (None, Some(times), Some(forwards)) => {
            Ok(PwFlatCurve::from_pillars(parse_list(times)?, parse_list(forwards)?)?)
        }
        _ => Err(CliError::MissingArgument(
            "--curve/--file <PATH> or both --times and --forwards".into(),
        )
        .into()),
    }
}

/// Reads a curve saved as `{"times": [..], "forwards": [..]}`.
pub fn read_curve(path: &Path) -> anyhow::Result<PwFlatCurve> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read curve file {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid curve file {}: {e}", path.display()))
}

/// Reads quotes from a `.json` file (`[Quote]`) or a CSV file with columns
/// `kind,maturity,coupon,frequency,price`.
pub fn read_quotes(path: &Path) -> anyhow::Result<Vec<Quote>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let quotes = if is_json {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid quote file {}: {e}", path.display()))?
    } else {
        let file = std::fs::File::open(path)
            .map_err(|e| anyhow::anyhow!("cannot read quote file {}: {e}", path.display()))?;
        parse_quote_csv(file)?
    };
    Ok(quotes)
}

/// One CSV quote line.
#[derive(Debug, Deserialize)]
struct QuoteRecord {
    kind: String,
    maturity: f64,
    coupon: Option<f64>,
    frequency: Option<String>,
    price: f64,
}

impl QuoteRecord {
    fn into_quote(self, line: usize) -> CliResult<Quote> {
        let instrument = match self.kind.trim().to_lowercase().as_str() {
            "zcb" | "zero" | "zero_coupon_bond" => Instrument::zero_coupon_bond(self.maturity),
            "bond" | "fixed" | "fixed_coupon_bond" => {
                let coupon = self.coupon.ok_or_else(|| {
                    CliError::InvalidInput(format!("line {line}: bond quote needs a coupon"))
                })?;
                let frequency = match self.frequency.as_deref().map(str::trim) {
                    None | Some("") => Frequency::default(),
                    Some(f) => f
                        .parse()
                        .map_err(|e| CliError::InvalidInput(format!("line {line}: {e}")))?,
                };
                Instrument::fixed_coupon_bond(self.maturity, coupon, frequency)
            }
            other => {
                return Err(CliError::InvalidInput(format!(
                    "line {line}: unknown instrument kind '{other}' (use zcb or bond)"
                )))
            }
        }
        .map_err(|e| CliError::InvalidInput(format!("line {line}: {e}")))?;

        Ok(Quote::new(instrument, self.price))
    }
}

fn parse_quote_csv<R: std::io::Read>(reader: R) -> anyhow::Result<Vec<Quote>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut quotes = Vec::new();
    for (i, record) in rdr.deserialize::<QuoteRecord>().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = record.map_err(|e| CliError::InvalidInput(format!("line {line}: {e}")))?;
        quotes.push(record.into_quote(line)?);
    }
    if quotes.is_empty() {
        return Err(CliError::InvalidInput("quote file has no rows".into()).into());
    }
    Ok(quotes)
}
