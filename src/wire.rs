//! Binary wire encoding for [`Op`]: a sequence of kind-tagged records
//! terminated by a zero kind byte.
//!
//! Record layout per component:
//!
//! | kind byte | payload                                  |
//! |-----------|-------------------------------------------|
//! | `1` Skip  | 4-byte little-endian character count       |
//! | `3` Insert| UTF-8 bytes, NUL-terminated                |
//! | `4` Delete| 4-byte little-endian character count       |
//! | `0` end   | (none — marks the end of the op)           |
//!
//! Counts are little-endian; nothing in the original format picked an
//! endianness, so this crate fixes one rather than leaving it ambiguous.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::component::Component;
use crate::error::WireError;
use crate::op::Op;
use crate::small_string::SmallStr;

const KIND_END: u8 = 0;
const KIND_SKIP: u8 = 1;
const KIND_INSERT: u8 = 3;
const KIND_DELETE: u8 = 4;

/// Serializes `op` to its wire form.
#[must_use]
pub fn to_bytes(op: &Op) -> Vec<u8> {
    let mut buf = Vec::new();
    for c in op.iter_components() {
        match c {
            Component::Skip(n) => {
                buf.push(KIND_SKIP);
                buf.write_u32::<LittleEndian>(n as u32).expect("Vec write never fails");
            }
            Component::Delete(n) => {
                buf.push(KIND_DELETE);
                buf.write_u32::<LittleEndian>(n as u32).expect("Vec write never fails");
            }
            Component::Insert(s) => {
                buf.push(KIND_INSERT);
                buf.extend_from_slice(s.as_str().as_bytes());
                buf.push(0);
            }
        }
    }
    buf.push(KIND_END);
    buf
}

/// Parses one op out of the front of `bytes`, returning it along with the
/// number of bytes consumed.
pub fn from_bytes(bytes: &[u8]) -> Result<(Op, usize), WireError> {
    let mut pos = 0usize;
    let mut components = Vec::new();

    loop {
        let kind = *bytes.get(pos).ok_or(WireError::Truncated)?;
        pos += 1;
        match kind {
            KIND_END => break,
            KIND_SKIP | KIND_DELETE => {
                let mut slice = bytes.get(pos..pos + 4).ok_or(WireError::Truncated)?;
                let n = slice.read_u32::<LittleEndian>().expect("length checked above") as usize;
                pos += 4;
                components.push(if kind == KIND_SKIP {
                    Component::Skip(n)
                } else {
                    Component::Delete(n)
                });
            }
            KIND_INSERT => {
                let rest = bytes.get(pos..).ok_or(WireError::Truncated)?;
                let nul = rest
                    .iter()
                    .position(|&b| b == 0)
                    .ok_or(WireError::MissingNulTerminator)?;
                let text = std::str::from_utf8(&rest[..nul]).map_err(|_| WireError::InvalidUtf8)?;
                components.push(Component::Insert(SmallStr::from(text)));
                pos += nul + 1;
            }
            other => return Err(WireError::UnknownKind(other)),
        }
    }

    Ok((Op::from_components(components), pos))
}

impl Op {
    /// Serializes this op to its wire form. See the [module docs](self) for
    /// the record layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        to_bytes(self)
    }

    /// Parses one op off the front of `bytes`, returning it along with the
    /// number of bytes consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), WireError> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_insert() {
        let op = Op::insert(3, "hi");
        let bytes = to_bytes(&op);
        let (parsed, consumed) = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, op);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn round_trips_delete() {
        let op = Op::delete(7, 12);
        let bytes = to_bytes(&op);
        let (parsed, consumed) = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, op);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn round_trips_multibyte_insert() {
        let op = Op::insert(0, "h🥕llo");
        let bytes = to_bytes(&op);
        let (parsed, _) = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, op);
    }

    #[test]
    fn round_trips_empty_op() {
        let op = Op::empty();
        let bytes = to_bytes(&op);
        assert_eq!(bytes, vec![KIND_END]);
        let (parsed, consumed) = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, op);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn rejects_unknown_kind_byte() {
        let bytes = vec![42u8];
        assert_eq!(from_bytes(&bytes), Err(WireError::UnknownKind(42)));
    }

    #[test]
    fn rejects_truncated_skip_count() {
        let bytes = vec![KIND_SKIP, 1, 2];
        assert_eq!(from_bytes(&bytes), Err(WireError::Truncated));
    }

    #[test]
    fn rejects_missing_nul_terminator() {
        let mut bytes = vec![KIND_INSERT];
        bytes.extend_from_slice(b"hi");
        assert_eq!(from_bytes(&bytes), Err(WireError::MissingNulTerminator));
    }

    #[test]
    fn leaves_trailing_bytes_after_end_marker_untouched() {
        let op = Op::insert(0, "a");
        let mut bytes = to_bytes(&op);
        let trailer = [9, 9, 9];
        bytes.extend_from_slice(&trailer);
        let (parsed, consumed) = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, op);
        assert_eq!(&bytes[consumed..], &trailer);
    }
}
