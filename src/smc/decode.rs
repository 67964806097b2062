//! Typed value decoding.
//!
//! The decode rule is chosen by the declared type tag only. Payload length is
//! checked against the rule, never used to pick one.

use crate::error::DecodeError;
use crate::smc::{RawValue, TypeTag};

/// Decode a raw controller value into a float.
pub fn decode(raw: &RawValue) -> Result<f64, DecodeError> {
    let payload = raw.payload();
    match raw.tag {
        TypeTag::FLT => read_array::<4>(raw.tag, payload).map(|b| f32::from_le_bytes(b) as f64),
        TypeTag::UI8 => read_array::<1>(raw.tag, payload).map(|b| b[0] as f64),
        TypeTag::F64 => read_array::<8>(raw.tag, payload).map(f64::from_le_bytes),
        other => Err(DecodeError::UnsupportedType {
            tag: other.to_string(),
        }),
    }
}

fn read_array<const N: usize>(tag: TypeTag, payload: &[u8]) -> Result<[u8; N], DecodeError> {
    payload
        .get(..N)
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or_else(|| DecodeError::Truncated {
            tag: tag.to_string(),
            expected: N,
            actual: payload.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_50() {
        let raw = RawValue::new(TypeTag::FLT, vec![0x00, 0x00, 0x48, 0x42]);
        assert_eq!(decode(&raw).unwrap(), 50.0);
    }

    #[test]
    fn test_u8_255() {
        let raw = RawValue::new(TypeTag::UI8, vec![0xFF]);
        assert_eq!(decode(&raw).unwrap(), 255.0);
    }

    #[test]
    fn test_float_is_little_endian() {
        // 6000.0f32 = 0x45BB8000
        let raw = RawValue::new(TypeTag::FLT, vec![0x00, 0x80, 0xBB, 0x45]);
        assert_eq!(decode(&raw).unwrap(), 6000.0);

        // Same bytes in the other order are a tiny number, not 6000
        let swapped = RawValue::new(TypeTag::FLT, vec![0x45, 0xBB, 0x80, 0x00]);
        assert_ne!(decode(&swapped).unwrap(), 6000.0);
    }

    #[test]
    fn test_double() {
        let raw = RawValue::new(TypeTag::F64, 42.5f64.to_le_bytes().to_vec());
        assert_eq!(decode(&raw).unwrap(), 42.5);
    }

    #[test]
    fn test_unaligned_payload() {
        // Slice starting at an odd offset must decode the same
        let buffer = [0xAA, 0x00, 0x00, 0x48, 0x42];
        let raw = RawValue::new(TypeTag::FLT, buffer[1..].to_vec());
        assert_eq!(decode(&raw).unwrap(), 50.0);
    }

    #[test]
    fn test_unsupported_type() {
        let raw = RawValue::new(TypeTag::new("sp78"), vec![0x32, 0x00]);
        assert_eq!(
            decode(&raw),
            Err(DecodeError::UnsupportedType {
                tag: "sp78".to_string()
            })
        );
    }

    #[test]
    fn test_tag_wins_over_length() {
        // 4-byte payload under a ui8 tag decodes the first byte, not a float
        let raw = RawValue::new(TypeTag::UI8, vec![0x02, 0x00, 0x48, 0x42]);
        assert_eq!(decode(&raw).unwrap(), 2.0);

        // 8-byte payload under an unknown tag is still rejected
        let raw = RawValue::new(TypeTag::new("ioft"), vec![0; 8]);
        assert!(matches!(
            decode(&raw),
            Err(DecodeError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_truncated_payloads() {
        let raw = RawValue::new(TypeTag::FLT, vec![0x00, 0x48]);
        assert_eq!(
            decode(&raw),
            Err(DecodeError::Truncated {
                tag: "flt ".to_string(),
                expected: 4,
                actual: 2
            })
        );

        let raw = RawValue::new(TypeTag::UI8, Vec::new());
        assert!(matches!(decode(&raw), Err(DecodeError::Truncated { .. })));

        let raw = RawValue::new(TypeTag::F64, vec![0; 7]);
        assert!(matches!(decode(&raw), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_declared_size_limits_payload() {
        // Controller buffers are 32 bytes; only `size` of them are meaningful
        let mut bytes = vec![0u8; 32];
        bytes[..4].copy_from_slice(&50.0f32.to_le_bytes());
        let raw = RawValue::with_size(TypeTag::FLT, 2, bytes);
        assert!(matches!(decode(&raw), Err(DecodeError::Truncated { actual: 2, .. })));
    }
}
