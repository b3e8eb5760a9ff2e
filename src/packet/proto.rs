//! Structured-message payload support.
//!
//! Messages cross the packet boundary as a full type name plus serialized
//! wire bytes. Construction validates the wire framing so that a malformed
//! serialization is a construction error and never produces a malformed
//! packet. Extraction verifies the recorded type name against the statically
//! requested message type before decoding.

use prost::{Message, Name};
use tracing::trace;

use crate::error::{PacketError, Result};

/// A structured message held in serialized form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProtoBytes {
    type_name: String,
    bytes: Vec<u8>,
}

impl ProtoBytes {
    /// Wrap pre-serialized message bytes, validating the wire framing.
    pub(crate) fn new(type_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let type_name = type_name.into();
        if type_name.is_empty() {
            return Err(PacketError::invalid_argument("message type name is empty"));
        }
        validate_wire_format(&bytes).map_err(|err| {
            PacketError::invalid_argument(format!("malformed {type_name} serialization: {err}"))
        })?;
        Ok(Self { type_name, bytes })
    }

    /// Serialize a message value.
    pub(crate) fn encode<T: Message + Name>(value: &T) -> Result<Self> {
        Self::new(T::full_name(), value.encode_to_vec())
    }

    /// Decode as `T`, verifying the recorded type name first.
    pub(crate) fn decode<T: Message + Default + Name>(&self) -> Result<T> {
        let requested = T::full_name();
        if self.type_name != requested {
            return Err(PacketError::not_found(format!(
                "packet holds {}, not {requested}",
                self.type_name
            )));
        }
        trace!(type_name = %self.type_name, len = self.bytes.len(), "decoding message payload");
        Ok(T::decode(self.bytes.as_slice())?)
    }

    pub(crate) fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Structural scan of a protobuf wire stream.
///
/// Checks tag/varint/length framing and group nesting without interpreting
/// field contents. Accepts exactly the streams a conforming decoder would not
/// reject at the framing level.
fn validate_wire_format(bytes: &[u8]) -> std::result::Result<(), String> {
    let mut pos = 0usize;
    let mut group_depth = 0u32;

    while pos < bytes.len() {
        let (key, consumed) = read_varint(bytes, pos)?;
        pos += consumed;

        let field_number = key >> 3;
        if field_number == 0 {
            return Err(format!("field number 0 at byte {}", pos - consumed));
        }

        match key & 0x7 {
            0 => {
                let (_, consumed) = read_varint(bytes, pos)?;
                pos += consumed;
            }
            1 => pos = advance(bytes, pos, 8)?,
            2 => {
                let (len, consumed) = read_varint(bytes, pos)?;
                pos += consumed;
                let len = usize::try_from(len)
                    .map_err(|_| format!("length {len} overflows at byte {pos}"))?;
                pos = advance(bytes, pos, len)?;
            }
            3 => group_depth += 1,
            4 => {
                group_depth = group_depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unmatched end-group at byte {}", pos - consumed))?;
            }
            5 => pos = advance(bytes, pos, 4)?,
            wire_type => {
                return Err(format!("invalid wire type {wire_type} at byte {}", pos - consumed));
            }
        }
    }

    if group_depth != 0 {
        return Err(format!("{group_depth} unterminated group(s)"));
    }
    Ok(())
}

fn advance(bytes: &[u8], pos: usize, len: usize) -> std::result::Result<usize, String> {
    let end = pos
        .checked_add(len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| format!("truncated field: need {len} bytes at byte {pos}"))?;
    Ok(end)
}

/// Read a base-128 varint, returning (value, bytes consumed).
fn read_varint(bytes: &[u8], pos: usize) -> std::result::Result<(u64, usize), String> {
    let mut value = 0u64;
    for i in 0..10 {
        let byte = *bytes
            .get(pos + i)
            .ok_or_else(|| format!("truncated varint at byte {pos}"))?;
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(format!("varint longer than 10 bytes at byte {pos}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_is_valid() {
        assert!(validate_wire_format(&[]).is_ok());
    }

    #[test]
    fn rejects_truncated_varint() {
        // Continuation bit set with no following byte
        assert!(validate_wire_format(&[0x80]).is_err());
    }

    #[test]
    fn accepts_simple_fields() {
        // field 1 varint 150, field 2 len-delimited "hi"
        let bytes = [0x08, 0x96, 0x01, 0x12, 0x02, b'h', b'i'];
        assert!(validate_wire_format(&bytes).is_ok());
    }

    #[test]
    fn rejects_overrunning_length() {
        // field 1 len-delimited claiming 5 bytes with only 2 present
        let bytes = [0x0A, 0x05, 0x00, 0x00];
        assert!(validate_wire_format(&bytes).is_err());
    }

    #[test]
    fn rejects_field_number_zero() {
        assert!(validate_wire_format(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn rejects_unmatched_groups() {
        // field 1 start-group without end-group
        assert!(validate_wire_format(&[0x0B]).is_err());
        // end-group without start-group
        assert!(validate_wire_format(&[0x0C]).is_err());
        // properly nested group is fine
        assert!(validate_wire_format(&[0x0B, 0x0C]).is_ok());
    }

    #[test]
    fn proto_bytes_rejects_empty_type_name() {
        assert!(ProtoBytes::new("", vec![]).is_err());
    }
}
