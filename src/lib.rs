// SPDX-FileCopyrightText: 2024 blinry
// SPDX-FileCopyrightText: 2024 zormit
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A composable operational-transformation algebra for plain UTF-8 text.
//!
//! An [`op::Op`] describes an edit to a document as a sequence of skip,
//! insert, and delete components. Two ops made concurrently against the
//! same document can be reconciled with [`op::Op::transform`]; a sequence
//! of ops can be folded into one with [`op::Op::compose`]. Neither function
//! needs the document itself — only [`op::Op::apply`] and
//! [`op::Op::check`] do, through the [`document::Document`] trait.
//!
//! ```
//! use optex::document::RopeDocument;
//! use optex::op::Op;
//!
//! let mut doc = RopeDocument::from("hello world");
//! let op = Op::insert(5, ",");
//! op.apply(&mut doc).unwrap();
//! assert_eq!(doc.to_string(), "hello, world");
//! ```

pub mod component;
pub mod cursor;
pub mod document;
pub mod error;
pub mod logging;
pub mod op;
pub mod small_string;
pub mod utf8;
pub mod wire;

pub use component::{Component, ComponentKind};
pub use cursor::Cursor;
pub use document::{Document, RopeDocument};
pub use error::{ApplyError, CheckError, WireError};
pub use op::Op;
pub use small_string::SmallStr;
