// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities and shared value types.
//!
//! ## Overview
//!
//! The drag machinery never owns the element tree. Instead, a host (a browser DOM binding,
//! a retained-mode toolkit, or [`understory_element_tree`](https://docs.rs/understory_element_tree)
//! via the `element_tree_adapter` feature) implements these traits and is passed by reference
//! into every operation.
//!
//! - [`ElementTree`]: structure, reparenting, and the data needed to name an element.
//! - [`Layout`]: geometry and front-to-back point queries.
//! - [`Styles`]: the visual overrides applied while dragging and hovering.
//! - [`Scheduler`]: cancellable deferred callbacks, driven by the host's event loop.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

/// Structural access to the host's element tree.
pub trait ElementTree {
    /// Handle to an element. Cheap to copy; compared by identity.
    type Element: Copy + Eq + Debug + 'static;

    /// Returns true if `element` still refers to a live element.
    fn is_alive(&self, element: &Self::Element) -> bool;

    /// Returns the parent of `element`, or `None` for a root or detached element.
    fn parent_of(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Zero-based position of `element` among its parent's children.
    fn index_in_parent(&self, element: &Self::Element) -> Option<usize>;

    /// The document's top-level container.
    fn body(&self) -> Self::Element;

    /// Detach `child` from its current parent and append it as the last child of `parent`.
    ///
    /// Returns `false` if the host refused the move (for example a cycle).
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element) -> bool;

    /// Tag, `id`, and class list of `element`.
    fn describe(&self, element: &Self::Element) -> ElementDescriptor;

    /// Number of elements in the document matching every part of `descriptor`.
    fn count_matching(&self, descriptor: &ElementDescriptor) -> usize;

    /// Returns true if `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool {
        let mut cur = Some(*node);
        // Walk to the root; the host guarantees acyclic ancestry.
        while let Some(e) = cur {
            if e == *ancestor {
                return true;
            }
            cur = self.parent_of(&e);
        }
        false
    }
}

/// Geometry queries against the host's rendering.
pub trait Layout: ElementTree {
    /// Rendered box of `element` relative to the viewport.
    fn bounding_client_rect(&self, element: &Self::Element) -> Rect;

    /// Current scroll offset of the viewport into the document.
    fn scroll_offset(&self) -> Vec2;

    /// All elements under a viewport point, ordered front to back as the renderer hit-tests them.
    fn elements_from_point(&self, point: Point) -> Vec<Self::Element>;
}

/// Visual overrides written by the drag machinery.
pub trait Styles: ElementTree {
    /// Apply a single inline style property.
    fn set_style(&mut self, element: &Self::Element, property: StyleProperty);

    /// Enable or suppress the host's native drag-image behavior for `element`.
    fn set_native_drag(&mut self, element: &Self::Element, enabled: bool);
}

/// Everything a drag session needs from the host document.
pub trait Host: ElementTree + Layout + Styles {}

impl<T: ElementTree + Layout + Styles> Host for T {}

/// Handle to a deferred callback issued by a [`Scheduler`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Cancellable deferred callbacks.
///
/// The host's event loop reports expiry by calling
/// [`Draggable::timer_fired`](crate::draggable::Draggable::timer_fired) with the returned id.
pub trait Scheduler {
    /// Request a callback after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending callback. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, timer: TimerId);
}

/// Pointer sample delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in document space (viewport position plus scroll).
    pub page: Point,
    /// Position relative to the viewport.
    pub client: Point,
}

impl PointerEvent {
    /// Build an event from a viewport position and the current scroll offset.
    pub fn from_client(client: Point, scroll: Vec2) -> Self {
        Self {
            page: client + scroll,
            client,
        }
    }
}

/// The parts of an element that make up its selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Tag name as reported by the host.
    pub tag: String,
    /// `id` attribute, if any.
    pub id: Option<String>,
    /// Class list in attribute order.
    pub classes: Vec<String>,
}

/// Positioning scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// Normal flow, shifted by the offset if one is set.
    Relative,
    /// Out of flow, placed at the offset in document space.
    Absolute,
}

/// A solid border.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    /// Stroke width in pixels.
    pub width: f64,
    /// Straight RGBA color.
    pub color: [u8; 4],
}

impl Border {
    /// `1px solid red`.
    pub const HOVER: Self = Self {
        width: 1.0,
        color: [0xff, 0x00, 0x00, 0xff],
    };
}

/// A single inline style write.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StyleProperty {
    /// Positioning scheme.
    Position(Position),
    /// `left`/`top`; `None` clears them.
    Offset(Option<Point>),
    /// Stacking override; `None` clears it.
    ZIndex(Option<i32>),
    /// Opacity in `0.0..=1.0`.
    Opacity(f64),
    /// Border decoration; `None` clears it.
    Border(Option<Border>),
}
