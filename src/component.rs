//! The three component kinds an [`crate::op::Op`] is built from.

use crate::small_string::SmallStr;

/// One step of an [`crate::op::Op`]: retain characters, insert text, or
/// delete characters.
///
/// There is no `None`/sentinel variant here the way the original C
/// `component_type` has one — Rust expresses "no component" with
/// `Option<Component>` at the handful of call sites that need it
/// ([`crate::op::OpIter::take`], [`crate::op::OpIter::peek`]), so every
/// value of this type is a real, well-formed component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Advance the cursor by `n` characters, retaining them.
    Skip(usize),
    /// Insert `s` at the current cursor.
    Insert(SmallStr),
    /// Remove the next `n` characters.
    Delete(usize),
}

impl Component {
    /// The kind tag, ignoring any payload. Used to compare "is this the
    /// same variant" without matching out the data.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Skip(_) => ComponentKind::Skip,
            Self::Insert(_) => ComponentKind::Insert,
            Self::Delete(_) => ComponentKind::Delete,
        }
    }

    /// Length in characters: the `Skip`/`Delete` count, or the `Insert`
    /// string's character length.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Skip(n) | Self::Delete(n) => *n,
            Self::Insert(s) => s.char_len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [`Component`]'s variant tag, without the payload. Used by the
/// normalizer and the transform/compose "indivisible kind" parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Skip,
    Insert,
    Delete,
}
