//! Scrape orchestration over one shared session.

use crate::error::Result;
use crate::metrics::catalog::KeyCatalog;
use crate::metrics::collector::{Collector, FanCollector, PassReport, TemperatureCollector};
use crate::metrics::sink::{MetricSink, Sample, TextEncoder};
use crate::smc::SmcSession;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Result of one full scrape, suitable for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub backend: &'static str,
    pub failed: usize,
    pub samples: Vec<Sample>,
}

/// Owns the session and runs every collector against it, one scrape at a time.
pub struct SmcExporter {
    session: Mutex<Box<dyn SmcSession>>,
    backend: &'static str,
    catalog: Arc<KeyCatalog>,
    collectors: Vec<Box<dyn Collector>>,
}

impl SmcExporter {
    /// Create an exporter with the fan and temperature collectors.
    pub fn new(session: Box<dyn SmcSession>, catalog: Arc<KeyCatalog>) -> Self {
        let collectors: Vec<Box<dyn Collector>> = vec![
            Box::new(FanCollector::new(catalog.clone())),
            Box::new(TemperatureCollector::new(catalog.clone())),
        ];
        Self {
            backend: session.backend_name(),
            session: Mutex::new(session),
            catalog,
            collectors,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend
    }

    pub fn catalog(&self) -> &KeyCatalog {
        &self.catalog
    }

    /// Run one collection pass into `sink`. Blocks on hardware reads and on
    /// any scrape already in progress.
    pub fn scrape(&self, sink: &mut dyn MetricSink) -> PassReport {
        let mut session = self.lock_session();
        if let Err(e) = session.begin_pass() {
            warn!("Collection pass starting without fresh data: {}", e);
        }

        let mut report = PassReport::default();
        for collector in &self.collectors {
            let pass = collector.collect(&mut **session, sink);
            debug!(
                collector = collector.name(),
                emitted = pass.emitted,
                failed = pass.failed,
                "Collector finished"
            );
            report += pass;
        }
        report
    }

    /// One pass rendered as Prometheus text.
    pub fn render_text(&self) -> Result<String> {
        let mut encoder = TextEncoder::new();
        self.scrape(&mut encoder);
        encoder.finish()
    }

    /// One pass captured as owned samples.
    pub fn snapshot(&self) -> Snapshot {
        let mut samples = Vec::new();
        let report = self.scrape(&mut samples);
        Snapshot {
            timestamp: Utc::now(),
            backend: self.backend,
            failed: report.failed,
            samples,
        }
    }

    /// Release the hardware handle. Later scrapes fail per key.
    pub fn close(&self) {
        self.lock_session().close();
    }

    fn lock_session(&self) -> MutexGuard<'_, Box<dyn SmcSession>> {
        // Sessions carry no cross-pass invariants, so a panicked scrape leaves nothing to repair
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::SimulatedSession;

    #[test]
    fn test_demo_scrape() {
        let catalog = Arc::new(KeyCatalog::build().unwrap());
        let exporter = SmcExporter::new(Box::new(SimulatedSession::demo().unwrap()), catalog);
        assert_eq!(exporter.backend_name(), "simulated");

        let snapshot = exporter.snapshot();
        // 1 count + 2 fans x 4 attributes + 7 demo temperatures
        assert_eq!(snapshot.samples.len(), 16);
        assert!(snapshot.failed > 0);

        let text = exporter.render_text().unwrap();
        assert!(text.contains("smc_fan_count 2\n"));
        assert!(text.contains("smc_actual_fan_speed_rpm{index=\"1\"} 2010\n"));
        assert!(text.contains("smc_temp_TC0P 48.25\n"));
    }
}
