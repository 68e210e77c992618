// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-target hit testing.
//!
//! While dragging, the subject follows the pointer and sits on top of everything, so a plain
//! topmost-element query would always answer with the subject (or one of its children).
//! [`find_drop_target`] walks the full front-to-back stack instead and skips the subject's subtree.

use kurbo::Point;

use crate::types::Layout;

/// First element under the viewport point `client` that is neither `subject` nor inside it.
///
/// Returns `None` when every element at that point is excluded.
pub fn find_drop_target<T: Layout + ?Sized>(
    host: &T,
    client: Point,
    subject: &T::Element,
) -> Option<T::Element> {
    host.elements_from_point(client)
        .into_iter()
        .find(|e| !host.contains(subject, e))
}
