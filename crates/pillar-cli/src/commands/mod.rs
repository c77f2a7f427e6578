//! CLI command implementations.

pub mod bootstrap;
pub mod config;
pub mod curve;
pub mod value;

pub use bootstrap::BootstrapArgs;
pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use value::ValueArgs;

use std::path::PathBuf;

use crate::output::Printer;
use crate::settings::Settings;

/// Everything a command needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format, precision and verbosity.
    pub printer: Printer,
    /// Loaded settings.
    pub settings: Settings,
    /// Explicit `--config` path, if any.
    pub config_path: Option<PathBuf>,
}
