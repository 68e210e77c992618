// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable selectors for drop notifications.
//!
//! [`selector_for`] builds `tag[#id][.class…]` and, when that compound selector matches more
//! than one element in the document, appends `:nth-child(n)` with the element's 1-based
//! position among its siblings.
//!
//! The result is a best-effort label for logs and listeners. It is not guaranteed to be
//! unique: two matching elements can share a sibling index under different parents.

use alloc::format;
use alloc::string::String;

use crate::types::ElementTree;

/// Derive a selector string for `element`.
pub fn selector_for<T: ElementTree + ?Sized>(tree: &T, element: &T::Element) -> String {
    let descriptor = tree.describe(element);
    let mut selector = descriptor.tag.to_ascii_lowercase();
    if let Some(id) = descriptor.id.as_deref().filter(|id| !id.is_empty()) {
        selector.push('#');
        selector.push_str(id);
    }
    for class in descriptor.classes.iter().filter(|c| !c.is_empty()) {
        selector.push('.');
        selector.push_str(class);
    }
    if tree.count_matching(&descriptor) > 1 {
        // A parentless element is the sole child of its container.
        let n = tree.index_in_parent(element).map_or(1, |i| i + 1);
        selector.push_str(&format!(":nth-child({n})"));
    }
    selector
}
