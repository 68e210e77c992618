// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Element Tree: a Kurbo-native element tree with ordered children.
//!
//! This crate is a small stand-in for a document object model.
//! It is the host tree that interaction crates such as `understory_drop` operate on in
//! headless tests, demos, and toolkits that do not have a browser DOM.
//!
//! - Represents a hierarchy of elements with a tag, optional `id`, class list, layout box, z-order, and flags.
//! - Supports ownership-transferring reparenting with [`Document::append_child`].
//! - Carries inline style overrides (positioning, offsets, stacking, opacity, border).
//! - Answers front-to-back point queries with [`Document::elements_from_point`].
//! - Counts elements matching a compound selector with [`Document::count_matching`].
//!
//! ## Not a layout engine
//!
//! Layout boxes are supplied by upstream code, relative to the parent's origin.
//! The only geometry this crate derives is positioning: static, relative, and absolute offsets,
//! plus the viewport scroll offset.
//!
//! ## Paint order
//!
//! Every element paints above its parent. Siblings paint in order of effective z-index
//! (the inline override if set, else [`Element::z_index`]), ties in document order.
//! [`Document::elements_from_point`] returns the reverse of that order, filtered to pickable
//! elements whose rendered box contains the point.
//!
//! ## Example
//!
//! ```
//! use understory_element_tree::{Document, Element};
//! use kurbo::{Point, Rect, Size};
//!
//! let mut doc = Document::new(Size::new(400.0, 300.0));
//! let body = doc.body();
//! let list = doc.insert(Some(body), Element::new("ul", Rect::new(0.0, 0.0, 200.0, 200.0)));
//! let item = doc.insert(Some(list), Element::new("li", Rect::new(0.0, 0.0, 200.0, 20.0)));
//!
//! assert_eq!(doc.elements_from_point(Point::new(10.0, 10.0)), vec![item, list, body]);
//!
//! // Move the item out of the list.
//! assert!(doc.append_child(body, item));
//! assert_eq!(doc.children(body), &[list, item]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod types;

pub use document::Document;
pub use types::{Border, Element, ElementFlags, ElementId, Position, SimpleSelector, Style};
