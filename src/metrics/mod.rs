//! Sensor collection and metric exposition.
//!
//! This module binds SMC keys to metric descriptors, runs the fan and
//! temperature collectors against a session, and renders the results for
//! the metric sink.

pub mod catalog;
pub mod collector;
pub mod exporter;
pub mod sink;
pub mod temperature_keys;

// Re-export commonly used items
pub use catalog::{Descriptor, FanAttribute, KeyCatalog};
pub use collector::{Collector, FanCollector, PassReport, TemperatureCollector};
pub use exporter::{SmcExporter, Snapshot};
pub use sink::{MetricSink, Sample, TextEncoder};
