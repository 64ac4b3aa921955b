//! # Tickwap Reporter
//!
//! Wires a tick event source, the TWAP engine and a chart renderer into
//! the `tickwap` command-line tool. Configuration comes from a TOML file;
//! see [`config::create_example_config`] for a complete example.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;

// Re-export commonly used items
pub use config::{create_example_config, ChartFormat, ReporterConfig};
pub use error::{ReporterError, ReporterResult};
pub use logging::init_logging;
pub use pipeline::{evaluate_windows, PoolReport, TwapPipeline};
pub use report::generate_report;
