//! A small UTF-8 string value with an inline-storage fast path.
//!
//! Realistic edit streams are overwhelmingly single-character or short
//! multi-character inserts. [`SmallStr`] keeps those inline in a
//! [`SmallVec`] instead of heap-allocating a `String`, which is what lets
//! the common "one skip, one insert/delete" [`crate::op::Op`] stay
//! allocation-free end to end.

use smallvec::SmallVec;
use std::fmt;

use crate::utf8;

/// Bytes held inline before [`SmallStr`] spills to the heap. Two 64-bit
/// words on a 64-bit target, matching the original `STR_MAX_INLINE`.
const INLINE_CAP: usize = 16;

/// An owned, immutable-by-convention UTF-8 string carrying both its byte
/// length and its character length.
///
/// Cloning deep-copies. There is no shared ownership anywhere in this
/// type, so there's no analogue of the original C library's
/// double-free-during-split hazard: [`SmallStr::substring`] always
/// allocates (or inlines) a fresh copy.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SmallStr {
    buf: SmallVec<[u8; INLINE_CAP]>,
    char_len: usize,
}

impl SmallStr {
    /// The empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The string's content as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // `buf` is only ever built from valid UTF-8 (`&str`/`String` sources),
        // and no method exposes mutable byte access, so this never fails.
        std::str::from_utf8(&self.buf).expect("SmallStr always holds valid UTF-8")
    }

    /// Number of UTF-8 bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Number of Unicode codepoints.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True if the string's bytes are stored inline (no heap allocation).
    #[must_use]
    pub fn is_inline(&self) -> bool {
        !self.buf.spilled()
    }

    /// Append `other`'s content to the end of `self`.
    pub fn append(&mut self, other: &Self) {
        self.buf.extend_from_slice(&other.buf);
        self.char_len += other.char_len;
    }

    /// A new string holding the `length` characters starting at character
    /// offset `start`. Clamped to the string's actual length, the way the
    /// original `str_init_with_substring` clamps out-of-range requests
    /// instead of panicking.
    #[must_use]
    pub fn substring(&self, start: usize, length: usize) -> Self {
        let s = self.as_str();
        if start >= self.char_len {
            return Self::new();
        }
        let length = length.min(self.char_len - start);
        let start_byte = utf8::advance_chars(s, start);
        let end_byte = start_byte + utf8::advance_chars(&s[start_byte..], length);
        Self::from(&s[start_byte..end_byte])
    }
}

impl From<&str> for SmallStr {
    fn from(s: &str) -> Self {
        Self {
            buf: SmallVec::from_slice(s.as_bytes()),
            char_len: utf8::char_count(s),
        }
    }
}

impl From<String> for SmallStr {
    fn from(s: String) -> Self {
        let char_len = utf8::char_count(&s);
        Self {
            buf: SmallVec::from_vec(s.into_bytes()),
            char_len,
        }
    }
}

impl fmt::Debug for SmallStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SmallStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for SmallStr {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SmallStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_strings_are_inline() {
        let s = SmallStr::from("hi");
        assert!(s.is_inline());
        assert_eq!(s.byte_len(), 2);
        assert_eq!(s.char_len(), 2);
    }

    #[test]
    fn long_strings_spill() {
        let s = SmallStr::from("this string is definitely longer than sixteen bytes");
        assert!(!s.is_inline());
    }

    #[test]
    fn append_merges_lengths() {
        let mut a = SmallStr::from("foo");
        a.append(&SmallStr::from("bar"));
        assert_eq!(a.as_str(), "foobar");
        assert_eq!(a.char_len(), 6);
    }

    #[test]
    fn substring_multibyte() {
        let s = SmallStr::from("h🥕llo");
        let sub = s.substring(1, 1);
        assert_eq!(sub.as_str(), "🥕");
        assert_eq!(sub.char_len(), 1);
    }

    #[test]
    fn substring_out_of_range_clamps() {
        let s = SmallStr::from("hi");
        assert_eq!(s.substring(0, 100).as_str(), "hi");
        assert_eq!(s.substring(10, 5).as_str(), "");
    }

    #[test]
    fn equality_with_str() {
        assert_eq!(SmallStr::from("abc"), "abc");
    }
}
