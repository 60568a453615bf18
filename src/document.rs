//! The document contract an [`crate::op::Op`] is applied against.

use ropey::Rope;

/// The minimal surface [`crate::op::Op::apply`] needs from whatever holds
/// the text being edited. `pos`/`count` are always character (not byte)
/// offsets.
pub trait Document {
    fn char_count(&self) -> usize;
    fn insert(&mut self, pos: usize, text: &str);
    fn delete(&mut self, pos: usize, count: usize);
}

/// A plain `String` is a valid, if O(n)-per-edit, document. Handy for small
/// test fixtures that don't want to pull in `ropey`.
impl Document for String {
    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn insert(&mut self, pos: usize, text: &str) {
        let byte_pos = self.char_indices().nth(pos).map_or(self.len(), |(i, _)| i);
        self.insert_str(byte_pos, text);
    }

    fn delete(&mut self, pos: usize, count: usize) {
        let start = self.char_indices().nth(pos).map_or(self.len(), |(i, _)| i);
        let end = self
            .char_indices()
            .nth(pos + count)
            .map_or(self.len(), |(i, _)| i);
        self.replace_range(start..end, "");
    }
}

/// A rope-backed [`Document`], for edit streams too large for `String`'s
/// O(n) splicing to stay practical.
#[derive(Debug, Clone, Default)]
pub struct RopeDocument(Rope);

impl RopeDocument {
    #[must_use]
    pub fn new() -> Self {
        Self(Rope::new())
    }
}

impl From<&str> for RopeDocument {
    fn from(s: &str) -> Self {
        Self(Rope::from_str(s))
    }
}

impl std::fmt::Display for RopeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.0.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl Document for RopeDocument {
    fn char_count(&self) -> usize {
        self.0.len_chars()
    }

    fn insert(&mut self, pos: usize, text: &str) {
        self.0.insert(pos, text);
    }

    fn delete(&mut self, pos: usize, count: usize) {
        self.0.remove(pos..pos + count);
    }
}
