//! Fan and temperature collectors.
//!
//! A collector runs one pass over its keys against an already-locked session.
//! Per-key faults are logged and counted, never returned: a pass always
//! completes with whatever subset of samples could be read.

use crate::error::{Result, SmcError};
use crate::metrics::catalog::KeyCatalog;
use crate::metrics::sink::MetricSink;
use crate::smc::{decode, SensorKey, SmcSession};
use std::sync::Arc;
use tracing::{debug, warn};

/// Highest fan count honoured; fan keys only have room for one index digit.
pub const MAX_FANS: u8 = 10;

/// Outcome counts for one collector pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Samples handed to the sink
    pub emitted: usize,
    /// Keys that could not be read or decoded
    pub failed: usize,
}

impl std::ops::AddAssign for PassReport {
    fn add_assign(&mut self, other: PassReport) {
        self.emitted += other.emitted;
        self.failed += other.failed;
    }
}

/// One family of sensors read during a scrape.
pub trait Collector: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Read every key of this family and emit what succeeds.
    fn collect(&self, session: &mut dyn SmcSession, sink: &mut dyn MetricSink) -> PassReport;
}

/// Read and decode one key.
pub fn read_value(session: &mut dyn SmcSession, key: SensorKey) -> Result<f64> {
    let raw = session.read(key)?;
    Ok(decode(&raw)?)
}

/// Turn the decoded `FNum` value into a usable fan count.
fn fan_count(value: f64) -> Result<u8> {
    if !value.is_finite() || value < 0.0 {
        return Err(SmcError::fan_count_error(format!(
            "implausible fan count {}",
            value
        )));
    }
    let count = value.trunc();
    if count > MAX_FANS as f64 {
        warn!(
            "SMC reports {} fans, only the first {} are read",
            count, MAX_FANS
        );
        return Ok(MAX_FANS);
    }
    Ok(count as u8)
}

/// Collects fan count plus max/min/actual/target speed per fan.
pub struct FanCollector {
    catalog: Arc<KeyCatalog>,
}

impl FanCollector {
    pub fn new(catalog: Arc<KeyCatalog>) -> Self {
        Self { catalog }
    }
}

impl Collector for FanCollector {
    fn name(&self) -> &'static str {
        "fan"
    }

    fn collect(&self, session: &mut dyn SmcSession, sink: &mut dyn MetricSink) -> PassReport {
        let mut report = PassReport::default();
        let count_key = self.catalog.fan_count_key();

        let count =
            read_value(session, count_key).and_then(|value| Ok((value, fan_count(value)?)));
        let (value, fans) = match count {
            Ok(count) => count,
            Err(e) => {
                warn!(key = %count_key, error = %e, "Fan count unavailable, skipping fan metrics");
                report.failed += 1;
                return report;
            }
        };

        sink.emit(self.catalog.fan_count(), &[], value);
        report.emitted += 1;

        for index in 0..fans {
            let label = index.to_string();
            for (attribute, descriptor) in self.catalog.fan_attributes() {
                let result = SensorKey::fan(index, attribute.suffix())
                    .and_then(|key| read_value(session, key));
                match result {
                    Ok(value) => {
                        sink.emit(descriptor, &[&label], value);
                        report.emitted += 1;
                    }
                    Err(e) => {
                        warn!(
                            key = %format!("F{}{}", index, attribute.suffix()),
                            index,
                            error = %e,
                            "Failed to read fan sensor"
                        );
                        report.failed += 1;
                    }
                }
            }
        }

        debug!(
            fans,
            emitted = report.emitted,
            failed = report.failed,
            "Fan pass complete"
        );
        report
    }
}

/// Collects one unlabeled gauge per catalog temperature key.
pub struct TemperatureCollector {
    catalog: Arc<KeyCatalog>,
}

impl TemperatureCollector {
    pub fn new(catalog: Arc<KeyCatalog>) -> Self {
        Self { catalog }
    }
}

impl Collector for TemperatureCollector {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn collect(&self, session: &mut dyn SmcSession, sink: &mut dyn MetricSink) -> PassReport {
        let mut report = PassReport::default();

        for sensor in self.catalog.temperatures() {
            match read_value(session, sensor.key) {
                Ok(value) => {
                    sink.emit(&sensor.descriptor, &[], value);
                    report.emitted += 1;
                }
                Err(e) => {
                    debug!(key = %sensor.key, error = %e, "Failed to read temperature sensor");
                    report.failed += 1;
                }
            }
        }

        debug!(
            emitted = report.emitted,
            failed = report.failed,
            "Temperature pass complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_count_conversion() {
        assert_eq!(fan_count(2.0).unwrap(), 2);
        assert_eq!(fan_count(0.0).unwrap(), 0);
        assert_eq!(fan_count(2.9).unwrap(), 2);
        assert_eq!(fan_count(42.0).unwrap(), MAX_FANS);
        assert!(fan_count(-1.0).is_err());
        assert!(fan_count(f64::NAN).is_err());
        assert!(matches!(
            fan_count(f64::INFINITY),
            Err(SmcError::FanCountUnavailable(_))
        ));
    }

    #[test]
    fn test_report_merge() {
        let mut total = PassReport {
            emitted: 3,
            failed: 1,
        };
        total += PassReport {
            emitted: 2,
            failed: 0,
        };
        assert_eq!(
            total,
            PassReport {
                emitted: 5,
                failed: 1
            }
        );
    }
}
