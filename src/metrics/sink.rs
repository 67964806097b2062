//! Metric sink: where collectors send samples.
//!
//! The text encoder hands samples to a `prometheus` registry and renders the
//! text exposition format from it.

use crate::error::{Result, SmcError};
use crate::metrics::catalog::Descriptor;
use prometheus::{Encoder, GaugeVec, Opts, Registry};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

/// Content type of [`TextEncoder`] output.
pub const TEXT_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Receiver of `(descriptor, label values, value)` samples.
pub trait MetricSink {
    /// Record one sample. `label_values` lines up with `descriptor.labels`.
    fn emit(&mut self, descriptor: &Descriptor, label_values: &[&str], value: f64);
}

/// One emitted sample, owned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl Sample {
    /// Value of the named label, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl MetricSink for Vec<Sample> {
    fn emit(&mut self, descriptor: &Descriptor, label_values: &[&str], value: f64) {
        self.push(Sample {
            name: descriptor.name.clone(),
            labels: descriptor
                .labels
                .iter()
                .zip(label_values)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            value,
        });
    }
}

/// Sink that renders gauges as Prometheus text.
///
/// Each encoder owns a fresh registry, so one scrape never sees values left
/// over from another. A gauge vector is registered the first time its
/// descriptor is emitted.
pub struct TextEncoder {
    registry: Registry,
    gauges: HashMap<String, GaugeVec>,
}

impl TextEncoder {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            gauges: HashMap::new(),
        }
    }

    /// Finished exposition text.
    pub fn finish(self) -> Result<String> {
        let mut buffer = Vec::new();
        prometheus::TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| SmcError::Exposition(prometheus::Error::Msg(e.to_string())))
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSink for TextEncoder {
    fn emit(&mut self, descriptor: &Descriptor, label_values: &[&str], value: f64) {
        let gauges = match self.gauges.entry(descriptor.name.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match register_gauges(&self.registry, descriptor) {
                Ok(gauges) => entry.insert(gauges),
                Err(e) => {
                    warn!(metric = %descriptor.name, error = %e, "Failed to register metric");
                    return;
                }
            },
        };

        match gauges.get_metric_with_label_values(label_values) {
            Ok(gauge) => gauge.set(value),
            Err(e) => warn!(metric = %descriptor.name, error = %e, "Dropping sample"),
        }
    }
}

fn register_gauges(registry: &Registry, descriptor: &Descriptor) -> prometheus::Result<GaugeVec> {
    let opts = Opts::new(descriptor.name.clone(), descriptor.help.clone());
    let gauges = GaugeVec::new(opts, &descriptor.labels)?;
    registry.register(Box::new(gauges.clone()))?;
    Ok(gauges)
}
