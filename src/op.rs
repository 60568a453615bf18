//! The operational-transformation algebra: [`Op`] construction, the shared
//! `take`/`peek` streaming cursor, and `transform`/`compose`/`check`/`apply`.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::component::{Component, ComponentKind};
use crate::document::Document;
use crate::error::{ApplyError, CheckError};
use crate::small_string::SmallStr;

/// A sequence of [`Component`]s describing an edit to a document.
///
/// Most real-world edits are a single skip followed by a single insert or
/// delete, so `Op` keeps that case inline (`Repr::Small`) and only spills to
/// a heap-backed component vector (`Repr::Big`) once a third component is
/// appended. Callers never see the distinction: every public method works
/// the same regardless of which representation backs a given `Op`.
#[derive(Clone)]
pub struct Op {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    /// `skip` characters retained, then at most one insert or delete.
    /// `content` is never a `Skip` — skips are folded into `skip` directly.
    Small {
        skip: usize,
        content: Option<Component>,
    },
    Big(SmallVec<[Component; 4]>),
}

impl Default for Op {
    fn default() -> Self {
        Self::empty()
    }
}

impl Op {
    /// An op with no components: applying it changes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            repr: Repr::Small {
                skip: 0,
                content: None,
            },
        }
    }

    /// An op that inserts `text` at character position `pos`.
    #[must_use]
    pub fn insert(pos: usize, text: impl Into<SmallStr>) -> Self {
        let mut op = Self::empty();
        op.append(Component::Skip(pos));
        op.append(Component::Insert(text.into()));
        op
    }

    /// An op that deletes `len` characters starting at character position
    /// `pos`.
    #[must_use]
    pub fn delete(pos: usize, len: usize) -> Self {
        let mut op = Self::empty();
        op.append(Component::Skip(pos));
        op.append(Component::Delete(len));
        op
    }

    /// Builds an op from a list of components, normalizing as it goes:
    /// adjacent same-kind components merge, zero-length components vanish,
    /// and a trailing `Skip` is dropped (I3).
    #[must_use]
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut components: Vec<Component> = components.into_iter().collect();
        while matches!(components.last(), Some(c) if c.is_empty() || c.kind() == ComponentKind::Skip)
        {
            components.pop();
        }
        let mut op = Self::empty();
        for c in components {
            op.append(c);
        }
        op
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_components() == 0
    }

    /// Number of characters this op expects to find in the document it's
    /// applied to (the sum of `Skip` and `Delete` lengths).
    #[must_use]
    pub fn input_length(&self) -> usize {
        self.iter_components()
            .map(|c| match c {
                Component::Skip(n) | Component::Delete(n) => n,
                Component::Insert(_) => 0,
            })
            .sum()
    }

    /// Appends one more component, merging it into the last component if
    /// they share a kind, and promoting to the big representation once a
    /// second, differently-kinded component needs to coexist with the first.
    fn append(&mut self, c: Component) {
        if c.is_empty() {
            return;
        }
        match &mut self.repr {
            Repr::Small { skip, content } => match content.as_mut() {
                Some(existing) if existing.kind() == c.kind() => merge_same_kind(existing, c),
                Some(_) => {
                    let mut v: SmallVec<[Component; 4]> = SmallVec::new();
                    if *skip > 0 {
                        v.push(Component::Skip(*skip));
                    }
                    v.push(content.take().expect("content is Some"));
                    v.push(c);
                    self.repr = Repr::Big(v);
                }
                None => {
                    if let Component::Skip(n) = c {
                        *skip += n;
                    } else {
                        *content = Some(c);
                    }
                }
            },
            Repr::Big(v) => {
                if let Some(last) = v.last_mut() {
                    if last.kind() == c.kind() {
                        merge_same_kind(last, c);
                        return;
                    }
                }
                v.push(c);
            }
        }
    }

    /// Drops a trailing `Skip`, restoring I3 after a `transform` that may
    /// have produced one (a/b's own trailing skips don't, since both inputs
    /// are already normalized, but the merged remainder of `a` can be one).
    fn trim_trailing_skip(&mut self) {
        match &mut self.repr {
            Repr::Small { skip, content } => {
                if content.is_none() {
                    *skip = 0;
                }
            }
            Repr::Big(v) => {
                while matches!(v.last(), Some(Component::Skip(_))) {
                    v.pop();
                }
            }
        }
    }

    fn num_components(&self) -> usize {
        match &self.repr {
            Repr::Small { skip, content } => match (*skip > 0, content.is_some()) {
                (true, true) => 2,
                (true, false) | (false, true) => 1,
                (false, false) => 0,
            },
            Repr::Big(v) => v.len(),
        }
    }

    /// The component at `idx`, materialized by value (the `Skip` slot of the
    /// small representation doesn't exist as a stored `Component`, so it's
    /// synthesized here).
    fn component_at(&self, idx: usize) -> Option<Component> {
        match &self.repr {
            Repr::Small { skip, content } => {
                if *skip > 0 {
                    match idx {
                        0 => Some(Component::Skip(*skip)),
                        1 => content.clone(),
                        _ => None,
                    }
                } else if idx == 0 {
                    content.clone()
                } else {
                    None
                }
            }
            Repr::Big(v) => v.get(idx).cloned(),
        }
    }

    pub(crate) fn iter_components(&self) -> ComponentIter<'_> {
        ComponentIter { op: self, idx: 0 }
    }

    /// Checks that applying this op to `doc` wouldn't violate any invariant:
    /// no zero-length or adjacent same-kind components (I1/I2), no trailing
    /// skip (I3), and every `Skip`/`Delete` stays within the document as it
    /// grows and shrinks under the op.
    pub fn check(&self, doc: &impl Document) -> Result<(), CheckError> {
        let result = self.check_impl(doc);
        match &result {
            Ok(()) => debug!("op checked ok against a {}-character document", doc.char_count()),
            Err(e) => warn!("op failed check: {e}"),
        }
        result
    }

    fn check_impl(&self, doc: &impl Document) -> Result<(), CheckError> {
        let mut doc_len = doc.char_count();
        let mut pos = 0usize;
        let mut prev_kind: Option<ComponentKind> = None;
        let n = self.num_components();
        for i in 0..n {
            let c = self.component_at(i).expect("index in range");
            if prev_kind == Some(c.kind()) {
                return Err(CheckError::AdjacentSameKind);
            }
            prev_kind = Some(c.kind());
            match &c {
                Component::Skip(len) => {
                    if *len == 0 {
                        return Err(CheckError::ZeroLength);
                    }
                    pos += len;
                    if pos > doc_len {
                        return Err(CheckError::OutOfBounds {
                            pos,
                            len: *len,
                            doc_len,
                        });
                    }
                }
                Component::Insert(s) => {
                    if s.is_empty() {
                        return Err(CheckError::ZeroLength);
                    }
                    doc_len += s.char_len();
                    pos += s.char_len();
                }
                Component::Delete(len) => {
                    if *len == 0 {
                        return Err(CheckError::ZeroLength);
                    }
                    if pos + len > doc_len {
                        return Err(CheckError::OutOfBounds {
                            pos,
                            len: *len,
                            doc_len,
                        });
                    }
                    doc_len -= len;
                }
            }
        }
        if n > 0 && matches!(self.component_at(n - 1), Some(Component::Skip(_))) {
            return Err(CheckError::TrailingSkip);
        }
        Ok(())
    }

    /// Applies this op to `doc` in place. Always checks first (see
    /// `ApplyError`'s doc comment for why that's unconditional here, not
    /// just in debug builds).
    pub fn apply<D: Document>(&self, doc: &mut D) -> Result<(), ApplyError> {
        self.check(doc)?;
        let mut pos = 0usize;
        for c in self.iter_components() {
            match c {
                Component::Skip(n) => pos += n,
                Component::Insert(s) => {
                    doc.insert(pos, s.as_str());
                    pos += s.char_len();
                }
                Component::Delete(n) => doc.delete(pos, n),
            }
        }
        debug!("applied op ({} components)", self.num_components());
        Ok(())
    }

    /// Transforms `self` against a concurrently-applied `other`, producing
    /// an op that has the same effect on a document that already has
    /// `other` applied as `self` had on the document before it.
    ///
    /// `is_lefthand` breaks the tie when both ops insert at the same
    /// position: the left-hand op's insert ends up first.
    #[must_use]
    pub fn transform(&self, other: &Self, is_lefthand: bool) -> Self {
        let mut result = Self::empty();
        if self.is_empty() {
            return result;
        }
        let mut iter = OpIter::new();

        'b: for i in 0..other.num_components() {
            if iter.peek(self).is_none() {
                break;
            }
            let c = other.component_at(i).expect("index in range");
            match c {
                Component::Skip(mut n) => {
                    while n > 0 {
                        match iter.take(self, n, Some(ComponentKind::Insert)) {
                            None => break,
                            Some(taken) => {
                                let is_insert = matches!(taken, Component::Insert(_));
                                let len = taken.len();
                                result.append(taken);
                                if !is_insert {
                                    n -= len;
                                }
                            }
                        }
                    }
                }
                Component::Insert(s) => {
                    if is_lefthand && iter.peek(self) == Some(ComponentKind::Insert) {
                        if let Some(taken) = iter.take(self, usize::MAX, None) {
                            result.append(taken);
                        }
                    }
                    if iter.peek(self).is_none() {
                        break 'b;
                    }
                    result.append(Component::Skip(s.char_len()));
                }
                Component::Delete(mut n) => {
                    while n > 0 {
                        match iter.take(self, n, Some(ComponentKind::Insert)) {
                            None => break,
                            Some(Component::Skip(len) | Component::Delete(len)) => n -= len,
                            Some(ins @ Component::Insert(_)) => result.append(ins),
                        }
                    }
                }
            }
        }

        while let Some(c) = iter.take(self, usize::MAX, None) {
            result.append(c);
        }
        result.trim_trailing_skip();
        result
    }

    /// Composes `self` followed by `other` into a single equivalent op.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let mut result = Self::empty();
        let mut iter = OpIter::new();

        for i in 0..other.num_components() {
            let c = other.component_at(i).expect("index in range");
            match c {
                Component::Skip(mut n) => {
                    while n > 0 {
                        match iter.take(self, n, Some(ComponentKind::Delete)) {
                            None => {
                                result.append(Component::Skip(n));
                                n = 0;
                            }
                            Some(taken) => {
                                let is_delete = matches!(taken, Component::Delete(_));
                                let len = taken.len();
                                result.append(taken);
                                if !is_delete {
                                    n -= len;
                                }
                            }
                        }
                    }
                }
                Component::Insert(s) => result.append(Component::Insert(s)),
                Component::Delete(n) => {
                    let mut offset = 0;
                    while offset < n {
                        match iter.take(self, n - offset, Some(ComponentKind::Delete)) {
                            None => {
                                result.append(Component::Delete(n - offset));
                                offset = n;
                            }
                            Some(Component::Skip(len)) => {
                                result.append(Component::Delete(len));
                                offset += len;
                            }
                            Some(Component::Insert(s)) => offset += s.char_len(),
                            Some(del @ Component::Delete(_)) => result.append(del),
                        }
                    }
                }
            }
        }

        while let Some(c) = iter.take(self, usize::MAX, None) {
            result.append(c);
        }
        result
    }
}

fn merge_same_kind(existing: &mut Component, incoming: Component) {
    match (existing, incoming) {
        (Component::Skip(n), Component::Skip(m)) | (Component::Delete(n), Component::Delete(m)) => {
            *n += m;
        }
        (Component::Insert(s), Component::Insert(t)) => s.append(&t),
        _ => unreachable!("merge_same_kind called on mismatched component kinds"),
    }
}

impl PartialEq for Op {
    fn eq(&self, other: &Self) -> bool {
        self.iter_components().eq(other.iter_components())
    }
}

impl fmt::Debug for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter_components()).finish()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.iter_components().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match c {
                Component::Skip(n) => write!(f, "skip   {n}")?,
                Component::Insert(s) => write!(f, "insert {} {s:?}", s.char_len())?,
                Component::Delete(n) => write!(f, "delete {n}")?,
            }
        }
        Ok(())
    }
}

pub(crate) struct ComponentIter<'a> {
    op: &'a Op,
    idx: usize,
}

impl Iterator for ComponentIter<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Component> {
        let c = self.op.component_at(self.idx)?;
        self.idx += 1;
        Some(c)
    }
}

/// A streaming cursor over an [`Op`]'s components, shared by `transform` and
/// `compose`. Tracks how far into the current component the previous `take`
/// left off, so a long component can be consumed in several smaller bites.
struct OpIter {
    idx: usize,
    offset: usize,
}

impl OpIter {
    fn new() -> Self {
        Self { idx: 0, offset: 0 }
    }

    /// The kind of the component that the next `take` would return, without
    /// consuming anything.
    fn peek(&self, op: &Op) -> Option<ComponentKind> {
        op.component_at(self.idx).map(|c| c.kind())
    }

    /// Takes up to `max_len` characters' worth of the current component. If
    /// the component's kind equals `indivisible`, the whole remainder of
    /// that component is returned regardless of `max_len` — this is how
    /// `transform` keeps an `Insert` atomic and `compose` keeps a `Delete`
    /// atomic.
    fn take(&mut self, op: &Op, max_len: usize, indivisible: Option<ComponentKind>) -> Option<Component> {
        let e = op.component_at(self.idx)?;
        let length = e.len();
        let take_len = if Some(e.kind()) == indivisible {
            length - self.offset
        } else {
            max_len.min(length - self.offset)
        };

        let result = match e {
            Component::Insert(s) => {
                if take_len < length {
                    Component::Insert(s.substring(self.offset, take_len))
                } else {
                    Component::Insert(s)
                }
            }
            Component::Skip(_) => Component::Skip(take_len),
            Component::Delete(_) => Component::Delete(take_len),
        };

        self.offset += take_len;
        if self.offset >= length {
            self.offset = 0;
            self.idx += 1;
        }
        Some(result)
    }
}
