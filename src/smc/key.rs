//! Four-character SMC codes: sensor keys and data type tags.

use crate::error::{Result, SmcError};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Width of every SMC key and type tag.
pub const CODE_LEN: usize = 4;

fn write_code(code: &[u8; CODE_LEN], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for &b in code {
        f.write_char(b as char)?;
    }
    Ok(())
}

/// A 4-character identifier naming one SMC register, e.g. `FNum` or `TC0P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SensorKey([u8; CODE_LEN]);

impl SensorKey {
    /// Parse a key, rejecting anything that is not exactly four printable ASCII characters.
    pub fn new(key: &str) -> Result<Self> {
        let bytes = key.as_bytes();
        if bytes.len() != CODE_LEN || !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(SmcError::config_error(format!(
                "invalid SMC key '{}': expected 4 printable ASCII characters",
                key
            )));
        }
        let mut code = [0u8; CODE_LEN];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }

    /// Build an indexed fan key `F{index}{suffix}`.
    pub fn fan(index: u8, suffix: &str) -> Result<Self> {
        Self::new(&format!("F{}{}", index, suffix))
    }

    /// The key packed big-endian into 32 bits, as the controller expects it.
    pub fn to_code(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Raw ASCII bytes.
    pub fn as_bytes(&self) -> &[u8; CODE_LEN] {
        &self.0
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code(&self.0, f)
    }
}

impl FromStr for SensorKey {
    type Err = SmcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Serialize for SensorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Data type tag reported alongside a register's bytes, e.g. `flt ` or `ui8 `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag([u8; CODE_LEN]);

impl TypeTag {
    /// IEEE-754 single precision, 4 bytes little-endian.
    pub const FLT: TypeTag = TypeTag(*b"flt ");
    /// Unsigned 8-bit integer.
    pub const UI8: TypeTag = TypeTag(*b"ui8 ");
    /// IEEE-754 double precision, 8 bytes little-endian.
    pub const F64: TypeTag = TypeTag(*b"f64 ");

    /// Build a tag from text. Short tags are space-padded, so `"flt"` equals
    /// `"flt "`. Only the first four bytes of a longer tag are kept.
    pub fn new(tag: &str) -> Self {
        let mut code = [b' '; CODE_LEN];
        for (slot, b) in code.iter_mut().zip(tag.bytes().take(CODE_LEN)) {
            *slot = b;
        }
        Self(code)
    }

    /// Unpack a big-endian 32-bit type code as returned by the controller.
    pub fn from_code(code: u32) -> Self {
        Self(code.to_be_bytes())
    }

    /// Raw ASCII bytes.
    pub fn as_bytes(&self) -> &[u8; CODE_LEN] {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_code(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(SensorKey::new("FNum").is_ok());
        assert!(SensorKey::new("TC0P").is_ok());
        assert!(SensorKey::new("FNu").is_err());
        assert!(SensorKey::new("FNumm").is_err());
        assert!(SensorKey::new("F N ").is_err());
        assert!(SensorKey::new("Fé1").is_err());
    }

    #[test]
    fn test_fan_key_synthesis() {
        assert_eq!(SensorKey::fan(0, "Mx").unwrap().to_string(), "F0Mx");
        assert_eq!(SensorKey::fan(9, "Tg").unwrap().to_string(), "F9Tg");
        // Two-digit indices no longer fit the four-character pattern
        assert!(SensorKey::fan(10, "Ac").is_err());
    }

    #[test]
    fn test_key_code_is_big_endian() {
        let key = SensorKey::new("FNum").unwrap();
        assert_eq!(key.to_code(), 0x464E_756D);
    }

    #[test]
    fn test_type_tag_padding_and_codes() {
        assert_eq!(TypeTag::new("flt"), TypeTag::FLT);
        assert_eq!(TypeTag::new("ui8 "), TypeTag::UI8);
        assert_eq!(TypeTag::from_code(0x666C_7420), TypeTag::FLT);
        assert_eq!(TypeTag::FLT.to_string(), "flt ");
    }

    #[test]
    fn test_long_type_tag_keeps_first_four_bytes() {
        assert_eq!(TypeTag::new("ui16x"), TypeTag::new("ui16"));
        assert_eq!(TypeTag::new("ui16x").to_string(), "ui16");
    }
}
