//! Character-counting helpers.
//!
//! Every position and length in [`crate::op`] is a Unicode codepoint count,
//! never a byte offset. These two functions are the only place the algebra
//! crosses between the two: [`char_count`] turns a byte buffer into the
//! character count the rest of the crate works with, and [`advance_chars`]
//! turns a character count back into a byte offset usable as a `str` slice
//! boundary.

/// Number of Unicode codepoints encoded in `s`.
///
/// Counts bytes that are *not* UTF-8 continuation bytes (`10xxxxxx`), which
/// is equivalent to `s.chars().count()` but doesn't need to decode each
/// codepoint. Ported from the original `strlen_utf8`'s classification
/// (every byte whose top two bits are `10` is a continuation byte and is
/// not counted).
#[must_use]
pub fn char_count(s: &str) -> usize {
    s.bytes().filter(|b| b & 0b1100_0000 != 0b1000_0000).count()
}

/// Byte offset reached after walking `n` codepoints forward from the start
/// of `s`.
///
/// Returns `s.len()` if `s` contains fewer than `n` codepoints. Leading
/// bytes are classified by their high bits into codepoint widths the same
/// way the original `count_utf8_chars` does; 5- and 6-byte lead bytes (not
/// valid UTF-8, but tolerated for forward progress) advance by their
/// nominal width.
#[must_use]
pub fn advance_chars(s: &str, n: usize) -> usize {
    let bytes = s.as_bytes();
    let mut offset = 0;
    for _ in 0..n {
        if offset >= bytes.len() {
            break;
        }
        offset += codepoint_width(bytes[offset]);
    }
    offset.min(bytes.len())
}

/// Width in bytes of the codepoint starting with lead byte `b`.
fn codepoint_width(b: u8) -> usize {
    if b <= 0x7f {
        1
    } else if b <= 0xbf {
        // Continuation byte in lead position: not valid UTF-8. Advance by
        // one so callers always make forward progress.
        1
    } else if b <= 0xdf {
        2
    } else if b <= 0xef {
        3
    } else if b <= 0xf7 {
        4
    } else if b <= 0xfb {
        5
    } else if b <= 0xfd {
        6
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii() {
        assert_eq!(char_count("hello"), 5);
        assert_eq!(advance_chars("hello", 3), 3);
    }

    #[test]
    fn empty() {
        assert_eq!(char_count(""), 0);
        assert_eq!(advance_chars("", 0), 0);
    }

    #[test]
    fn multibyte() {
        let s = "h🥕llo,\nneue\nwelt";
        assert_eq!(char_count(s), 17);
        // 'h' (1) + carrot (4 bytes) = byte offset 5 after 2 chars.
        assert_eq!(advance_chars(s, 2), 5);
    }

    #[test]
    fn advance_past_end_saturates_to_len() {
        let s = "hi";
        assert_eq!(advance_chars(s, 100), s.len());
    }

    #[test]
    fn advance_zero_is_zero() {
        assert_eq!(advance_chars("anything", 0), 0);
    }

    #[test]
    fn two_and_three_and_four_byte_sequences() {
        // ö = 2 bytes, € = 3 bytes, 🥕 = 4 bytes
        let s = "ö€🥕";
        assert_eq!(char_count(s), 3);
        assert_eq!(advance_chars(s, 1), 2);
        assert_eq!(advance_chars(s, 2), 2 + 3);
        assert_eq!(advance_chars(s, 3), s.len());
    }
}
