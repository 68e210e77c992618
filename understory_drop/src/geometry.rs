// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport to document coordinate translation.

use kurbo::Point;

use crate::types::Layout;

/// Top-left corner of `element` in document space.
///
/// Combines the viewport-relative bounding box with the current scroll offset.
/// Query this at grab time; reparenting the subject can shift layout, so the value is not
/// meaningful across a gesture.
pub fn document_position<T: Layout + ?Sized>(host: &T, element: &T::Element) -> Point {
    host.bounding_client_rect(element).origin() + host.scroll_offset()
}
