//! Typed errors for the algebra's three fallible operations: checking an op
//! against a document, applying one, and parsing one off the wire.

use thiserror::Error;

/// Why [`crate::op::Op::check`] rejected an op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    /// A `Skip`, `Insert`, or `Delete` component carried zero length (I1).
    #[error("op contains a zero-length component")]
    ZeroLength,

    /// Two adjacent components shared a kind; they should have been merged
    /// into one (I2).
    #[error("op contains two adjacent components of the same kind")]
    AdjacentSameKind,

    /// The op's last component is a `Skip` (I3).
    #[error("op ends in a trailing skip")]
    TrailingSkip,

    /// A `Skip` or `Delete` reached past the end of the document as it
    /// would stand at that point in the op.
    #[error("component at position {pos} (length {len}) runs past the document's {doc_len} characters")]
    OutOfBounds {
        pos: usize,
        len: usize,
        doc_len: usize,
    },
}

/// Why [`crate::op::Op::apply`] failed.
///
/// `apply` always runs `check` first, in both debug and release builds:
/// `check` is cheap relative to the document mutation it guards, and
/// skipping it in release would let a malformed op partially mutate the
/// document before failing partway through.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error(transparent)]
    Invalid(#[from] CheckError),
}

/// Why [`crate::wire::from_bytes`] failed to parse an op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// The buffer ended before a complete record did.
    #[error("truncated wire record")]
    Truncated,

    /// The kind byte wasn't 0 (end), 1 (skip), 3 (insert), or 4 (delete).
    #[error("unknown component kind byte {0}")]
    UnknownKind(u8),

    /// An insert record's string wasn't NUL-terminated before the buffer
    /// ended.
    #[error("insert record missing its NUL terminator")]
    MissingNulTerminator,

    /// An insert record's bytes weren't valid UTF-8.
    #[error("insert record is not valid UTF-8")]
    InvalidUtf8,
}
