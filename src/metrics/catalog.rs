//! Key catalog: which SMC keys are read and which metric each one feeds.
//!
//! Built once at startup and shared read-only by the collectors.

use crate::error::{Result, SmcError};
use crate::metrics::temperature_keys::TEMPERATURE_KEYS;
use crate::smc::SensorKey;
use serde::Serialize;
use std::collections::HashSet;

/// Key holding the number of fans.
pub const FAN_COUNT_KEY: &str = "FNum";

/// Label carrying the fan index on per-fan metrics.
pub const INDEX_LABEL: &str = "index";

/// Static description of one exported metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub name: String,
    pub help: String,
    pub labels: Vec<&'static str>,
}

impl Descriptor {
    /// Create a new descriptor.
    pub fn new(name: impl Into<String>, help: impl Into<String>, labels: &[&'static str]) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            labels: labels.to_vec(),
        }
    }
}

/// Per-fan register read for every fan index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FanAttribute {
    Max,
    Min,
    Actual,
    Target,
}

impl FanAttribute {
    /// Attributes in the order they are read for each fan.
    pub const ALL: [FanAttribute; 4] = [
        FanAttribute::Max,
        FanAttribute::Min,
        FanAttribute::Actual,
        FanAttribute::Target,
    ];

    /// Key suffix after `F{index}`.
    pub fn suffix(self) -> &'static str {
        match self {
            FanAttribute::Max => "Mx",
            FanAttribute::Min => "Mn",
            FanAttribute::Actual => "Ac",
            FanAttribute::Target => "Tg",
        }
    }

    fn word(self) -> &'static str {
        match self {
            FanAttribute::Max => "max",
            FanAttribute::Min => "min",
            FanAttribute::Actual => "actual",
            FanAttribute::Target => "target",
        }
    }

    /// Descriptor shared by every fan for this attribute.
    pub fn descriptor(self) -> Descriptor {
        Descriptor::new(
            format!("smc_{}_fan_speed_rpm", self.word()),
            format!("{} fan speed (rotations per minute).", self.word()),
            &[INDEX_LABEL],
        )
    }
}

/// A temperature key bound to its own unlabeled metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureSensor {
    pub key: SensorKey,
    pub descriptor: Descriptor,
}

impl TemperatureSensor {
    fn new(key: SensorKey) -> Self {
        let descriptor = Descriptor::new(
            format!("smc_temp_{}", key),
            format!("temperature reported by SMC key {} (celsius).", key),
            &[],
        );
        Self { key, descriptor }
    }
}

/// All keys and descriptors the collectors work from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCatalog {
    fan_count_key: SensorKey,
    fan_count: Descriptor,
    fan_attributes: Vec<(FanAttribute, Descriptor)>,
    temperatures: Vec<TemperatureSensor>,
}

impl KeyCatalog {
    /// Catalog over the built-in temperature key table.
    pub fn build() -> Result<Self> {
        Self::with_temperature_keys(TEMPERATURE_KEYS)
    }

    /// Catalog over a custom temperature key list. Duplicates are rejected
    /// since they would export the same metric twice.
    pub fn with_temperature_keys(keys: &[&str]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut temperatures = Vec::with_capacity(keys.len());
        for &raw in keys {
            let key = SensorKey::new(raw)?;
            if !seen.insert(key) {
                return Err(SmcError::config_error(format!(
                    "duplicate temperature key '{}'",
                    key
                )));
            }
            temperatures.push(TemperatureSensor::new(key));
        }

        Ok(Self {
            fan_count_key: SensorKey::new(FAN_COUNT_KEY)?,
            fan_count: Descriptor::new("smc_fan_count", "number of fans", &[]),
            fan_attributes: FanAttribute::ALL
                .iter()
                .map(|&attr| (attr, attr.descriptor()))
                .collect(),
            temperatures,
        })
    }

    pub fn fan_count_key(&self) -> SensorKey {
        self.fan_count_key
    }

    pub fn fan_count(&self) -> &Descriptor {
        &self.fan_count
    }

    pub fn fan_attributes(&self) -> &[(FanAttribute, Descriptor)] {
        &self.fan_attributes
    }

    pub fn temperatures(&self) -> &[TemperatureSensor] {
        &self.temperatures
    }

    /// Every descriptor, fans first, in a stable order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        std::iter::once(&self.fan_count)
            .chain(self.fan_attributes.iter().map(|(_, d)| d))
            .chain(self.temperatures.iter().map(|t| &t.descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_descriptor_names() {
        let catalog = KeyCatalog::with_temperature_keys(&[]).unwrap();
        let names: Vec<&str> = catalog
            .fan_attributes()
            .iter()
            .map(|(_, d)| d.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "smc_max_fan_speed_rpm",
                "smc_min_fan_speed_rpm",
                "smc_actual_fan_speed_rpm",
                "smc_target_fan_speed_rpm",
            ]
        );
        for (_, d) in catalog.fan_attributes() {
            assert_eq!(d.labels, vec!["index"]);
        }
        assert_eq!(catalog.fan_count().name, "smc_fan_count");
        assert!(catalog.fan_count().labels.is_empty());
        assert_eq!(catalog.fan_count_key().to_string(), "FNum");
    }

    #[test]
    fn test_help_text() {
        assert_eq!(
            FanAttribute::Max.descriptor().help,
            "max fan speed (rotations per minute)."
        );
        assert_eq!(
            FanAttribute::Target.descriptor().help,
            "target fan speed (rotations per minute)."
        );
    }

    #[test]
    fn test_temperature_descriptors() {
        let catalog = KeyCatalog::with_temperature_keys(&["TC0P", "Tp01"]).unwrap();
        let temps = catalog.temperatures();
        assert_eq!(temps.len(), 2);
        assert_eq!(temps[0].descriptor.name, "smc_temp_TC0P");
        assert_eq!(temps[1].descriptor.name, "smc_temp_Tp01");
        assert!(temps[1].descriptor.labels.is_empty());
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let catalog = KeyCatalog::build().unwrap();
        assert_eq!(catalog.temperatures().len(), TEMPERATURE_KEYS.len());
        assert!(catalog.temperatures().len() >= 250);
        assert_eq!(catalog.descriptors().count(), 5 + TEMPERATURE_KEYS.len());
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = KeyCatalog::build().unwrap();
        let second = KeyCatalog::build().unwrap();
        assert_eq!(first, second);
        let a: Vec<_> = first.descriptors().map(|d| (&d.name, &d.labels)).collect();
        let b: Vec<_> = second.descriptors().map(|d| (&d.name, &d.labels)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(KeyCatalog::with_temperature_keys(&["TC0P", "TC0P"]).is_err());
        assert!(KeyCatalog::with_temperature_keys(&["TOOLONG"]).is_err());
    }
}
