//! Session backed by the companion `smc list -f` tool.
//!
//! The tool prints every key at once, so the listing is refreshed in
//! [`SmcSession::begin_pass`] and per-key reads are answered from it. Values
//! arrive already converted to decimal text and are handed on as 8-byte
//! doubles.

use crate::error::{Result, SmcError};
use crate::smc::{RawValue, SensorKey, SmcSession, TypeTag};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Session that shells out to the companion tool.
pub struct CommandSession {
    binary: PathBuf,
    listing: HashMap<SensorKey, f64>,
}

impl CommandSession {
    /// Run the tool once to confirm it works.
    pub fn open(binary: impl AsRef<Path>) -> Result<Self> {
        let binary = binary.as_ref().to_path_buf();
        let mut session = Self {
            binary,
            listing: HashMap::new(),
        };
        session.refresh().map_err(|e| {
            SmcError::connection_error(format!("{}: {}", session.binary.display(), e))
        })?;
        Ok(session)
    }

    /// Path of the companion tool.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn refresh(&mut self) -> Result<()> {
        let output = Command::new(&self.binary).args(["list", "-f"]).output()?;
        if !output.status.success() {
            return Err(SmcError::Io(io::Error::other(format!(
                "{} exited with {}",
                self.binary.display(),
                output.status
            ))));
        }
        self.listing = parse_listing(&String::from_utf8_lossy(&output.stdout));
        debug!("smc listing refreshed with {} keys", self.listing.len());
        Ok(())
    }
}

impl SmcSession for CommandSession {
    fn backend_name(&self) -> &'static str {
        "command"
    }

    fn begin_pass(&mut self) -> Result<()> {
        if let Err(e) = self.refresh() {
            // Stale values from a previous pass must not be served
            self.listing.clear();
            warn!("Failed to refresh smc listing: {}", e);
            return Err(e);
        }
        Ok(())
    }

    fn read(&mut self, key: SensorKey) -> Result<RawValue> {
        self.listing
            .get(&key)
            .map(|value| RawValue::new(TypeTag::F64, value.to_le_bytes().to_vec()))
            .ok_or_else(|| SmcError::key_read_error(key.to_string(), "not present in smc listing"))
    }
}

/// Parse `smc list -f` output. Lines look like `[TC0P]  45.125`; anything
/// else, including keys that are not four characters, is skipped.
pub fn parse_listing(text: &str) -> HashMap<SensorKey, f64> {
    let mut values = HashMap::new();
    for line in text.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            continue;
        }
        let key = parts[0].trim_matches(|c| c == '[' || c == ']');
        let (Ok(key), Ok(value)) = (SensorKey::new(key), parts[1].parse::<f64>()) else {
            continue;
        };
        values.insert(key, value);
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smc::decode;

    const LISTING: &str = "\
[FNum]  2
[F0Ac]  1200.5
[F0Mx]  6000
[TC0P]  45.125
[TG0P]  n/a
[BAD]   1
garbage line with many words
[F1Ac]
";

    #[test]
    fn test_parse_listing() {
        let values = parse_listing(LISTING);
        assert_eq!(values.len(), 4);
        assert_eq!(values[&SensorKey::new("FNum").unwrap()], 2.0);
        assert_eq!(values[&SensorKey::new("F0Ac").unwrap()], 1200.5);
        assert_eq!(values[&SensorKey::new("TC0P").unwrap()], 45.125);
        assert!(!values.contains_key(&SensorKey::new("TG0P").unwrap()));
        assert!(!values.contains_key(&SensorKey::new("F1Ac").unwrap()));
    }

    #[test]
    fn test_read_from_listing_decodes_as_double() {
        let mut session = CommandSession {
            binary: PathBuf::from("smc"),
            listing: parse_listing(LISTING),
        };
        let raw = session.read(SensorKey::new("F0Ac").unwrap()).unwrap();
        assert_eq!(raw.tag, TypeTag::F64);
        assert_eq!(decode(&raw).unwrap(), 1200.5);

        let err = session.read(SensorKey::new("F9Ac").unwrap()).unwrap_err();
        assert!(matches!(err, SmcError::KeyRead { .. }));
    }

    #[test]
    fn test_failed_refresh_clears_listing() {
        let mut session = CommandSession {
            binary: PathBuf::from("/nonexistent/smc"),
            listing: parse_listing(LISTING),
        };
        assert!(session.begin_pass().is_err());
        assert!(session.read(SensorKey::new("FNum").unwrap()).is_err());
    }
}
