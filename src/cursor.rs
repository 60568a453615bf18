//! Transforming a selection's endpoints across a concurrently-applied op.

use crate::component::Component;
use crate::op::Op;

/// A text selection as a pair of character offsets. `anchor` is where the
/// selection started, `focus` is the end the user is actively moving;
/// `anchor == focus` is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub anchor: usize,
    pub focus: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    #[must_use]
    pub fn caret(pos: usize) -> Self {
        Self {
            anchor: pos,
            focus: pos,
        }
    }

    #[must_use]
    pub fn is_caret(&self) -> bool {
        self.anchor == self.focus
    }

    /// Where this cursor should move to once `op` has been applied.
    ///
    /// If `op` is the caller's own edit (`is_own`), the cursor teleports to
    /// wherever the op left off — there's no ambiguity, since the caller
    /// made the edit and the cursor should simply follow it. Otherwise each
    /// endpoint is transformed independently, the same way a character
    /// position would be.
    #[must_use]
    pub fn transformed(&self, op: &Op, is_own: bool) -> Self {
        if is_own {
            let pos = end_position(op);
            return Self::caret(pos);
        }
        Self {
            anchor: transform_position(self.anchor, op),
            focus: transform_position(self.focus, op),
        }
    }
}

/// Where the op's own edit point ends up: the sum of everything it retains
/// or inserts, ignoring deletes (which consume characters, not produce
/// them).
fn end_position(op: &Op) -> usize {
    let mut pos = 0;
    for c in op.iter_components() {
        match c {
            Component::Skip(n) => pos += n,
            Component::Insert(s) => pos += s.char_len(),
            Component::Delete(_) => {}
        }
    }
    pos
}

fn transform_position(mut x: usize, op: &Op) -> usize {
    let mut pos = 0usize;
    for c in op.iter_components() {
        if x <= pos {
            break;
        }
        match c {
            Component::Skip(n) => {
                if x <= pos + n {
                    return x;
                }
                pos += n;
            }
            Component::Insert(s) => {
                x += s.char_len();
                pos += s.char_len();
            }
            Component::Delete(n) => {
                x -= n.min(x - pos);
            }
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn own_insert_teleports_caret_to_end_of_insert() {
        let cursor = Cursor::caret(3);
        let op = Op::insert(3, "xyz");
        let moved = cursor.transformed(&op, true);
        assert_eq!(moved, Cursor::caret(6));
    }

    #[test]
    fn own_delete_teleports_caret_to_deletion_point() {
        let cursor = Cursor::caret(5);
        let op = Op::delete(2, 3);
        let moved = cursor.transformed(&op, true);
        assert_eq!(moved, Cursor::caret(2));
    }

    #[test]
    fn remote_insert_before_caret_pushes_it_forward() {
        let cursor = Cursor::caret(5);
        let op = Op::insert(2, "abc");
        let moved = cursor.transformed(&op, false);
        assert_eq!(moved, Cursor::caret(8));
    }

    #[test]
    fn remote_insert_after_caret_leaves_it_alone() {
        let cursor = Cursor::caret(2);
        let op = Op::insert(5, "abc");
        let moved = cursor.transformed(&op, false);
        assert_eq!(moved, Cursor::caret(2));
    }

    #[test]
    fn remote_delete_spanning_caret_clamps_to_deletion_point() {
        let cursor = Cursor::caret(4);
        let op = Op::delete(2, 10);
        let moved = cursor.transformed(&op, false);
        assert_eq!(moved, Cursor::caret(2));
    }

    #[test]
    fn selection_endpoints_transform_independently() {
        let selection = Cursor::new(2, 6);
        let op = Op::insert(4, "XX");
        let moved = selection.transformed(&op, false);
        assert_eq!(moved, Cursor::new(2, 8));
    }

    /// `ins = insert(10, "oh hi")`, `del = delete(25, 20)`, `op =
    /// compose(ins, del)`. `op` is therefore a four-component op
    /// (skip/insert/skip/delete), so this is the one test that exercises
    /// `end_position`/`transform_position`'s loop across more than a single
    /// component.
    #[test]
    fn composed_op_cursor_transform() {
        let ins = Op::insert(10, "oh hi");
        let del = Op::delete(25, 20);
        let op = ins.compose(&del);

        assert_eq!(Cursor::new(10, 10).transformed(&ins, false), Cursor::new(10, 10));
        assert_eq!(Cursor::new(10, 11).transformed(&ins, false), Cursor::new(10, 16));
        assert_eq!(Cursor::new(10, 10).transformed(&ins, true), Cursor::caret(15));
        assert_eq!(Cursor::new(99, 99).transformed(&ins, true), Cursor::caret(15));

        assert_eq!(Cursor::new(25, 40).transformed(&del, false), Cursor::new(25, 25));
        assert_eq!(Cursor::new(35, 50).transformed(&del, false), Cursor::new(25, 30));
        assert_eq!(Cursor::new(45, 60).transformed(&del, false), Cursor::new(25, 40));
        assert_eq!(Cursor::new(25, 40).transformed(&del, true), Cursor::caret(25));
        assert_eq!(Cursor::new(35, 50).transformed(&del, true), Cursor::caret(25));
        assert_eq!(Cursor::new(45, 60).transformed(&del, true), Cursor::caret(25));

        assert_eq!(Cursor::new(11, 5).transformed(&op, false), Cursor::new(16, 5));
        assert_eq!(Cursor::new(20, 5).transformed(&op, false), Cursor::new(25, 5));
        assert_eq!(Cursor::new(41, 5).transformed(&op, false), Cursor::new(26, 5));
        assert_eq!(Cursor::new(0, 100).transformed(&op, true), Cursor::caret(25));
    }
}
