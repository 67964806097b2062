//! # SMC Exporter - Apple SMC sensors as Prometheus metrics
//!
//! Reads fan speeds and temperatures from the System Management Controller
//! and serves them on a pull-based metrics endpoint. Every scrape re-reads
//! the hardware; a broken sensor only drops its own sample.
//!
//! ## Features
//!
//! - **Native IOKit session** on macOS, or the companion `smc` tool as a fallback
//! - **Per-key fault isolation**: partial results instead of failed scrapes
//! - **Prometheus text format** on `/metrics`, with metric names compatible
//!   with existing SMC exporter dashboards
//! - **Library + Binary**: use as a crate or standalone exporter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smc_exporter::{open_session, start_web_server, KeyCatalog, SessionConfig, SmcExporter, WebConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = open_session(&SessionConfig::default())?;
//!     let catalog = Arc::new(KeyCatalog::build()?);
//!     let exporter = Arc::new(SmcExporter::new(session, catalog));
//!
//!     start_web_server(WebConfig::default(), exporter).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod smc;
pub mod web;

// Re-export public API
pub use error::{DecodeError, Result, SmcError};
pub use metrics::{
    catalog::{Descriptor, FanAttribute, KeyCatalog},
    collector::{Collector, FanCollector, PassReport, TemperatureCollector},
    exporter::{SmcExporter, Snapshot},
    sink::{MetricSink, Sample, TextEncoder},
};
pub use smc::{
    decode, open_session, Backend, RawValue, SensorKey, SessionConfig, SimulatedSession,
    SmcSession, TypeTag,
};

pub use web::{start_web_server, WebConfig};

/// The default listen address
pub const DEFAULT_LISTEN_ADDRESS: &str = ":9259";

/// The default path under which metrics are exposed
pub const DEFAULT_TELEMETRY_PATH: &str = "/metrics";

/// Where the Stats app installs its `smc` helper
pub const DEFAULT_SMC_BINARY: &str = "/Applications/Stats.app/Contents/Resources/smc";
