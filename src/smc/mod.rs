//! Hardware session layer for the System Management Controller.
//!
//! A session owns the only handle to the controller and answers point queries
//! for single keys. Every backend yields the same [`RawValue`], so collectors
//! and the decoder never care which one is in use.

pub mod command;
pub mod decode;
#[cfg(target_os = "macos")]
pub mod iokit;
pub mod key;
pub mod simulated;

pub use command::CommandSession;
pub use decode::decode;
#[cfg(target_os = "macos")]
pub use iokit::IokitSession;
pub use key::{SensorKey, TypeTag};
pub use simulated::SimulatedSession;

use crate::error::{Result, SmcError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One controller read result: declared type, declared size and the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValue {
    pub tag: TypeTag,
    pub size: usize,
    pub bytes: Vec<u8>,
}

impl RawValue {
    /// Raw value whose declared size is the full buffer.
    pub fn new(tag: TypeTag, bytes: Vec<u8>) -> Self {
        Self {
            tag,
            size: bytes.len(),
            bytes,
        }
    }

    /// Raw value with an explicit declared size, e.g. from a fixed 32-byte controller buffer.
    pub fn with_size(tag: TypeTag, size: usize, bytes: Vec<u8>) -> Self {
        Self { tag, size, bytes }
    }

    /// The meaningful bytes: the declared size, capped at what was actually returned.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.size.min(self.bytes.len())]
    }
}

/// An open connection to the controller.
///
/// Reads are blocking and must not be issued concurrently on one session;
/// callers serialize access (see [`crate::metrics::SmcExporter`]).
pub trait SmcSession: Send {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Hook run once at the start of every collection pass.
    fn begin_pass(&mut self) -> Result<()> {
        Ok(())
    }

    /// Read one key. Never writes to the controller.
    fn read(&mut self, key: SensorKey) -> Result<RawValue>;

    /// Best-effort release of the underlying handle. Safe to call twice.
    fn close(&mut self) {}
}

/// Which session implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Native AppleSMC user client (macOS only)
    Iokit,
    /// Companion `smc` command-line tool
    Command,
    /// In-memory demo values
    Simulated,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Backend::Iokit
        } else {
            Backend::Command
        }
    }
}

impl FromStr for Backend {
    type Err = SmcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "iokit" => Ok(Backend::Iokit),
            "command" => Ok(Backend::Command),
            "simulated" => Ok(Backend::Simulated),
            other => Err(SmcError::config_error(format!(
                "unknown backend '{}': expected iokit, command or simulated",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Iokit => write!(f, "iokit"),
            Backend::Command => write!(f, "command"),
            Backend::Simulated => write!(f, "simulated"),
        }
    }
}

/// Settings needed to open a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Backend to open
    pub backend: Backend,
    /// Path of the companion `smc` tool, used by the command backend
    pub smc_binary: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            smc_binary: PathBuf::from(crate::DEFAULT_SMC_BINARY),
        }
    }
}

impl SessionConfig {
    /// Set the backend.
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the companion tool path.
    pub fn with_smc_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.smc_binary = path.into();
        self
    }
}

/// Open the configured session. Any error here is a `Connection` error and fatal.
pub fn open_session(config: &SessionConfig) -> Result<Box<dyn SmcSession>> {
    match config.backend {
        #[cfg(target_os = "macos")]
        Backend::Iokit => Ok(Box::new(IokitSession::open()?)),
        #[cfg(not(target_os = "macos"))]
        Backend::Iokit => Err(SmcError::connection_error(
            "the iokit backend is only available on macOS",
        )),
        Backend::Command => Ok(Box::new(CommandSession::open(&config.smc_binary)?)),
        Backend::Simulated => Ok(Box::new(SimulatedSession::demo()?)),
    }
}
