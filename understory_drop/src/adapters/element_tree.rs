// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`](crate::types::Host) for [`understory_element_tree::Document`].
//!
//! Elements are [`ElementId`]s. Stale ids are tolerated everywhere: they report no parent,
//! a zero rect, and ignore style writes.
//!
//! ```
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_drop::config::DragConfig;
//! use understory_drop::draggable::attach;
//! use understory_drop::timer::ManualScheduler;
//! use understory_drop::types::PointerEvent;
//! use understory_element_tree::{Document, Element};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let body = doc.body();
//! let bin = doc.insert(Some(body), Element::new("div", Rect::new(0.0, 300.0, 800.0, 600.0)).with_id("bin"));
//! let card = doc.insert(Some(body), Element::new("div", Rect::new(10.0, 10.0, 60.0, 60.0)));
//!
//! let mut timers = ManualScheduler::new();
//! let mut drag = attach(&mut doc, Some(card), DragConfig::default()).unwrap();
//! let ev = |x, y| PointerEvent::from_client(Point::new(x, y), Vec2::ZERO);
//!
//! drag.pointer_down(&mut doc, &card, &ev(20.0, 20.0));
//! drag.pointer_move(&mut doc, &mut timers, &ev(400.0, 400.0));
//! for timer in timers.advance(DragConfig::default().debounce) {
//!     drag.timer_fired(&mut doc, timer);
//! }
//! let dropped = drag.pointer_up(&mut doc, &mut timers, &card).unwrap();
//! assert_eq!(dropped.target_selector, "div#bin");
//! assert_eq!(doc.parent(card), Some(bin));
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use understory_element_tree::{Document, ElementFlags, ElementId, SimpleSelector};

use crate::types::{
    Border, ElementDescriptor, ElementTree, Layout, Position, StyleProperty, Styles,
};

impl ElementTree for Document {
    type Element = ElementId;

    fn is_alive(&self, element: &ElementId) -> bool {
        Self::is_alive(self, *element)
    }

    fn parent_of(&self, element: &ElementId) -> Option<ElementId> {
        self.parent(*element)
    }

    fn index_in_parent(&self, element: &ElementId) -> Option<usize> {
        Self::index_in_parent(self, *element)
    }

    fn body(&self) -> ElementId {
        Self::body(self)
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) -> bool {
        Self::append_child(self, *parent, *child)
    }

    fn describe(&self, element: &ElementId) -> ElementDescriptor {
        self.element(*element)
            .map(|e| ElementDescriptor {
                tag: e.tag.clone(),
                id: e.id.clone(),
                classes: e.classes.clone(),
            })
            .unwrap_or_default()
    }

    fn count_matching(&self, descriptor: &ElementDescriptor) -> usize {
        Self::count_matching(
            self,
            &SimpleSelector {
                tag: &descriptor.tag,
                id: descriptor.id.as_deref(),
                classes: &descriptor.classes,
            },
        )
    }

    fn contains(&self, ancestor: &ElementId, node: &ElementId) -> bool {
        Self::contains(self, *ancestor, *node)
    }
}

impl Layout for Document {
    fn bounding_client_rect(&self, element: &ElementId) -> Rect {
        Self::bounding_client_rect(self, *element).unwrap_or(Rect::ZERO)
    }

    fn scroll_offset(&self) -> Vec2 {
        Self::scroll_offset(self)
    }

    fn elements_from_point(&self, point: Point) -> Vec<ElementId> {
        Self::elements_from_point(self, point)
    }
}

impl Styles for Document {
    fn set_style(&mut self, element: &ElementId, property: StyleProperty) {
        let Some(style) = self.style_mut(*element) else {
            return;
        };
        match property {
            StyleProperty::Position(Position::Relative) => {
                style.position = understory_element_tree::Position::Relative;
            }
            StyleProperty::Position(Position::Absolute) => {
                style.position = understory_element_tree::Position::Absolute;
            }
            StyleProperty::Offset(at) => style.offset = at.map(Point::to_vec2),
            StyleProperty::ZIndex(z) => style.z_index = z,
            StyleProperty::Opacity(opacity) => style.opacity = opacity,
            StyleProperty::Border(border) => {
                style.border = border.map(|Border { width, color }| {
                    understory_element_tree::Border { width, color }
                });
            }
        }
    }

    fn set_native_drag(&mut self, element: &ElementId, enabled: bool) {
        let Some(mut flags) = self.element(*element).map(|e| e.flags) else {
            return;
        };
        flags.set(ElementFlags::NATIVE_DRAG, enabled);
        self.set_flags(*element, flags);
    }
}
