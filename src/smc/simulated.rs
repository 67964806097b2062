//! In-memory session for tests, benchmarks and hosts without an SMC.

use crate::error::{Result, SmcError};
use crate::smc::{RawValue, SensorKey, SmcSession, TypeTag};
use std::collections::{HashMap, HashSet};

/// Fixed values served by [`SimulatedSession::demo`]: a two-fan machine with a
/// handful of temperature sensors.
const DEMO_FLOATS: &[(&str, f32)] = &[
    ("F0Mx", 6000.0),
    ("F0Ac", 1850.0),
    ("F0Tg", 1800.0),
    ("F1Mx", 6500.0),
    ("F1Ac", 2010.0),
    ("F1Tg", 2000.0),
    ("TC0P", 48.25),
    ("TG0P", 41.5),
    ("Tp01", 52.75),
    ("Tp05", 51.0),
    ("Tp09", 49.5),
    ("TB0T", 31.0),
    ("TW0P", 38.0),
];

const DEMO_BYTES: &[(&str, u8)] = &[("FNum", 2), ("F0Mn", 0), ("F1Mn", 0)];

/// A session answering reads from a fixed table.
#[derive(Debug, Default, Clone)]
pub struct SimulatedSession {
    values: HashMap<SensorKey, RawValue>,
    failing: HashSet<SensorKey>,
    reads: Vec<SensorKey>,
    passes: usize,
}

impl SimulatedSession {
    /// Empty session; every read fails until values are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session preloaded with plausible values for a two-fan laptop.
    pub fn demo() -> Result<Self> {
        let mut session = Self::new();
        for &(key, value) in DEMO_FLOATS {
            session = session.with_float(SensorKey::new(key)?, value);
        }
        for &(key, value) in DEMO_BYTES {
            session = session.with_u8(SensorKey::new(key)?, value);
        }
        Ok(session)
    }

    /// Serve `value` as a 4-byte `flt ` register.
    pub fn with_float(self, key: SensorKey, value: f32) -> Self {
        self.with_raw(key, RawValue::new(TypeTag::FLT, value.to_le_bytes().to_vec()))
    }

    /// Serve `value` as a 1-byte `ui8 ` register.
    pub fn with_u8(self, key: SensorKey, value: u8) -> Self {
        self.with_raw(key, RawValue::new(TypeTag::UI8, vec![value]))
    }

    /// Serve an arbitrary raw value, e.g. an unsupported type or a short payload.
    pub fn with_raw(mut self, key: SensorKey, raw: RawValue) -> Self {
        self.values.insert(key, raw);
        self
    }

    /// Make every read of `key` fail, as a flaky or missing register would.
    pub fn failing(mut self, key: SensorKey) -> Self {
        self.failing.insert(key);
        self
    }

    /// Keys read since the current pass began, in order.
    pub fn reads(&self) -> &[SensorKey] {
        &self.reads
    }

    /// Number of collection passes started.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl SmcSession for SimulatedSession {
    fn backend_name(&self) -> &'static str {
        "simulated"
    }

    fn begin_pass(&mut self) -> Result<()> {
        self.passes += 1;
        self.reads.clear();
        Ok(())
    }

    fn read(&mut self, key: SensorKey) -> Result<RawValue> {
        self.reads.push(key);
        if self.failing.contains(&key) {
            return Err(SmcError::key_read_error(key.to_string(), "simulated hardware fault"));
        }
        self.values
            .get(&key)
            .cloned()
            .ok_or_else(|| SmcError::key_read_error(key.to_string(), "key not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::decode;

    fn key(k: &str) -> SensorKey {
        SensorKey::new(k).unwrap()
    }

    #[test]
    fn test_demo_values() {
        let mut session = SimulatedSession::demo().unwrap();
        assert_eq!(decode(&session.read(key("FNum")).unwrap()).unwrap(), 2.0);
        assert_eq!(decode(&session.read(key("F1Mx")).unwrap()).unwrap(), 6500.0);
        assert_eq!(session.reads().len(), 2);
    }

    #[test]
    fn test_read_log_covers_current_pass() {
        let mut session = SimulatedSession::demo().unwrap();
        session.begin_pass().unwrap();
        session.read(key("FNum")).unwrap();
        session.read(key("TC0P")).unwrap();
        assert_eq!(session.reads().len(), 2);

        session.begin_pass().unwrap();
        session.read(key("F0Ac")).unwrap();
        assert_eq!(session.reads(), &[key("F0Ac")]);
        assert_eq!(session.passes(), 2);
    }

    #[test]
    fn test_failures_and_missing_keys() {
        let mut session = SimulatedSession::new()
            .with_u8(key("FNum"), 1)
            .failing(key("FNum"));
        assert!(session.read(key("FNum")).is_err());
        assert!(session.read(key("TC0P")).is_err());
    }
}
