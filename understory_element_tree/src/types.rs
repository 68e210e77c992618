// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, flags, element data, and inline styles.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Rect, Vec2};

/// Identifier for an element in a [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable while the element lives but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an id still refers to a
/// live element. Stale ids never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking, and native drag behavior.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element and its subtree are rendered and take part in point queries.
        const VISIBLE     = 0b0000_0001;
        /// Element is returned by point queries (`pointer-events`).
        const PICKABLE    = 0b0000_0010;
        /// Element may start a native drag with a ghost image.
        const NATIVE_DRAG = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE | Self::NATIVE_DRAG
    }
}

/// Positioning scheme of an element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Laid out in normal flow at its layout box.
    #[default]
    Static,
    /// Laid out in normal flow, then shifted by [`Style::offset`].
    Relative,
    /// Taken out of flow and placed at [`Style::offset`] in document space.
    Absolute,
}

/// A solid border.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    /// Stroke width in pixels.
    pub width: f64,
    /// Color as straight RGBA.
    pub color: [u8; 4],
}

/// Inline style overrides applied on top of an element's layout box.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Positioning scheme.
    pub position: Position,
    /// `left`/`top` offset; its meaning depends on [`Style::position`].
    pub offset: Option<Vec2>,
    /// Stacking override; falls back to [`Element::z_index`] when `None`.
    pub z_index: Option<i32>,
    /// Opacity in `0.0..=1.0`. Does not affect point queries.
    pub opacity: f64,
    /// Optional border decoration.
    pub border: Option<Border>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            position: Position::Static,
            offset: None,
            z_index: None,
            opacity: 1.0,
            border: None,
        }
    }
}

/// Data carried by a single element.
#[derive(Clone, Debug)]
pub struct Element {
    /// Tag name, e.g. `div`. Matched case-insensitively.
    pub tag: String,
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// Class list in attribute order.
    pub classes: Vec<String>,
    /// Layout box relative to the parent's origin, as computed by an upstream layout pass.
    pub layout_box: Rect,
    /// Z-order within the parent. Higher paints on top.
    pub z_index: i32,
    /// Visibility, picking, and drag flags.
    pub flags: ElementFlags,
    /// Inline style overrides.
    pub style: Style,
}

impl Element {
    /// Create an element with the given tag and layout box.
    pub fn new(tag: impl Into<String>, layout_box: Rect) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            layout_box,
            z_index: 0,
            flags: ElementFlags::default(),
            style: Style::default(),
        }
    }

    /// Set the `id` attribute.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a class to the class list.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the z-index.
    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Effective stacking order: the style override if present, else the element's z-index.
    pub fn effective_z(&self) -> i32 {
        self.style.z_index.unwrap_or(self.z_index)
    }
}

/// A compound selector of the form `tag#id.class1.class2`.
///
/// Used by [`Document::count_matching`](crate::Document::count_matching).
#[derive(Copy, Clone, Debug)]
pub struct SimpleSelector<'a> {
    /// Tag name, matched case-insensitively.
    pub tag: &'a str,
    /// Required `id`, if any.
    pub id: Option<&'a str>,
    /// Classes that must all be present.
    pub classes: &'a [String],
}

impl SimpleSelector<'_> {
    /// Returns true if `element` satisfies every part of this selector.
    pub fn matches(&self, element: &Element) -> bool {
        if !element.tag.eq_ignore_ascii_case(self.tag) {
            return false;
        }
        if let Some(id) = self.id
            && element.id.as_deref() != Some(id)
        {
            return false;
        }
        self.classes.iter().all(|c| element.classes.contains(c))
    }
}
