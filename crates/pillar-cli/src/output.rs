//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Output settings resolved from flags and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    /// Selected format.
    pub format: OutputFormat,
    /// Decimals in table output.
    pub precision: usize,
    /// Suppress headers and status lines.
    pub quiet: bool,
}

/// A row of numbers with fixed column names.
pub trait NumericRow: Serialize {
    /// Column headers, in [`values`](Self::values) order.
    const HEADERS: &'static [&'static str];

    /// The row's numbers.
    fn values(&self) -> Vec<f64>;
}

impl Printer {
    /// Prints numeric rows in the selected format.
    pub fn rows<T: NumericRow>(&self, rows: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(T::HEADERS.iter().map(|h| (*h).to_string()));
                for row in rows {
                    builder.push_record(row.values().into_iter().map(|v| self.number(v)));
                }
                print_table(builder.build());
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
            OutputFormat::Csv => print_csv(rows)?,
            OutputFormat::Minimal => {
                for row in rows {
                    let line: Vec<String> = row.values().iter().map(f64::to_string).collect();
                    println!("{}", line.join(" "));
                }
            }
        }
        Ok(())
    }

    /// Prints key-value pairs in the selected format.
    pub fn pairs(&self, pairs: &[KeyValue]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                if pairs.is_empty() {
                    println!("No results.");
                } else {
                    print_table(Table::new(pairs));
                }
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(pairs)?),
            OutputFormat::Csv => print_csv(pairs)?,
            OutputFormat::Minimal => {
                for pair in pairs {
                    println!("{}", pair.value);
                }
            }
        }
        Ok(())
    }

    /// Formats a number to the configured precision.
    pub fn number(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.precision)
    }

    /// Prints a section header unless quiet or machine-readable.
    pub fn header(&self, title: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("\n{}", title.bold().underline());
        }
    }

    /// Prints a success line unless quiet.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "✓".green(), message);
        }
    }
}

fn print_table(mut table: Table) {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()));
    println!("{table}");
}

fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
