// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by unit tests.
//!
//! Element `0` is the body. Boxes are stored in document space; an absolutely positioned
//! element with an offset is drawn at that offset. Point queries order elements by the
//! effective z of their top-level ancestor, then depth, then recency.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::types::{Border, ElementDescriptor, ElementTree, Layout, Position, StyleProperty, Styles};

#[derive(Clone, Debug, Default)]
pub(crate) struct MockStyle {
    pub(crate) position: Option<Position>,
    pub(crate) offset: Option<Point>,
    pub(crate) z_index: Option<i32>,
    pub(crate) opacity: Option<f64>,
    pub(crate) border: Option<Border>,
}

#[derive(Clone, Debug)]
struct MockNode {
    parent: Option<u32>,
    children: Vec<u32>,
    desc: ElementDescriptor,
    rect: Rect,
    style: MockStyle,
    native_drag: bool,
    alive: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct MockHost {
    nodes: Vec<MockNode>,
    pub(crate) scroll: Vec2,
    /// Every style write, in order.
    pub(crate) writes: Vec<(u32, StyleProperty)>,
}

impl MockHost {
    pub(crate) const BODY: u32 = 0;

    pub(crate) fn new() -> Self {
        let mut host = Self {
            nodes: Vec::new(),
            scroll: Vec2::ZERO,
            writes: Vec::new(),
        };
        host.push(None, "body", Rect::new(0.0, 0.0, 1000.0, 1000.0));
        host
    }

    pub(crate) fn add(&mut self, parent: u32, tag: &str, rect: Rect) -> u32 {
        self.push(Some(parent), tag, rect)
    }

    pub(crate) fn add_detached(&mut self, tag: &str, rect: Rect) -> u32 {
        self.push(None, tag, rect)
    }

    pub(crate) fn set_id(&mut self, e: u32, id: &str) {
        self.nodes[e as usize].desc.id = Some(String::from(id));
    }

    pub(crate) fn add_class(&mut self, e: u32, class: &str) {
        self.nodes[e as usize].desc.classes.push(String::from(class));
    }

    pub(crate) fn kill(&mut self, e: u32) {
        self.nodes[e as usize].alive = false;
    }

    pub(crate) fn children(&self, e: u32) -> &[u32] {
        &self.nodes[e as usize].children
    }

    pub(crate) fn style(&self, e: u32) -> &MockStyle {
        &self.nodes[e as usize].style
    }

    pub(crate) fn native_drag(&self, e: u32) -> bool {
        self.nodes[e as usize].native_drag
    }

    /// Elements currently carrying a border.
    pub(crate) fn marked(&self) -> Vec<u32> {
        (0..self.len())
            .filter(|&e| self.nodes[e as usize].style.border.is_some())
            .collect()
    }

    fn len(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, reason = "Test hosts are tiny.")]
        let n = self.nodes.len() as u32;
        n
    }

    fn push(&mut self, parent: Option<u32>, tag: &str, rect: Rect) -> u32 {
        let id = self.len();
        self.nodes.push(MockNode {
            parent,
            children: Vec::new(),
            desc: ElementDescriptor {
                tag: String::from(tag),
                ..Default::default()
            },
            rect,
            style: MockStyle::default(),
            native_drag: true,
            alive: true,
        });
        if let Some(p) = parent {
            self.nodes[p as usize].children.push(id);
        }
        id
    }

    fn rendered(&self, e: u32) -> Rect {
        let node = &self.nodes[e as usize];
        match (node.style.position, node.style.offset) {
            (Some(Position::Absolute), Some(at)) => Rect::from_origin_size(at, node.rect.size()),
            _ => node.rect,
        }
    }

    fn connected(&self, e: u32) -> bool {
        self.nodes[e as usize].alive && self.contains(&Self::BODY, &e)
    }

    fn stacking_key(&self, e: u32) -> (i32, usize, u32) {
        let mut top = e;
        let mut depth = 0;
        while let Some(p) = self.nodes[top as usize].parent {
            if p == Self::BODY {
                break;
            }
            top = p;
            depth += 1;
        }
        let z = if e == Self::BODY {
            i32::MIN
        } else {
            self.nodes[top as usize].style.z_index.unwrap_or(0)
        };
        (z, depth, e)
    }
}

impl ElementTree for MockHost {
    type Element = u32;

    fn is_alive(&self, element: &u32) -> bool {
        self.nodes.get(*element as usize).is_some_and(|n| n.alive)
    }

    fn parent_of(&self, element: &u32) -> Option<u32> {
        self.nodes[*element as usize].parent
    }

    fn index_in_parent(&self, element: &u32) -> Option<usize> {
        let p = self.parent_of(element)?;
        self.nodes[p as usize].children.iter().position(|c| c == element)
    }

    fn body(&self) -> u32 {
        Self::BODY
    }

    fn append_child(&mut self, parent: &u32, child: &u32) -> bool {
        if self.contains(child, parent) {
            return false;
        }
        if let Some(old) = self.nodes[*child as usize].parent {
            self.nodes[old as usize].children.retain(|c| c != child);
        }
        self.nodes[*parent as usize].children.push(*child);
        self.nodes[*child as usize].parent = Some(*parent);
        true
    }

    fn describe(&self, element: &u32) -> ElementDescriptor {
        self.nodes[*element as usize].desc.clone()
    }

    fn count_matching(&self, descriptor: &ElementDescriptor) -> usize {
        (0..self.len())
            .filter(|&e| self.connected(e))
            .filter(|&e| {
                let d = &self.nodes[e as usize].desc;
                d.tag == descriptor.tag
                    && (descriptor.id.is_none() || d.id == descriptor.id)
                    && descriptor.classes.iter().all(|c| d.classes.contains(c))
            })
            .count()
    }
}

impl Layout for MockHost {
    fn bounding_client_rect(&self, element: &u32) -> Rect {
        self.rendered(*element) - self.scroll
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn elements_from_point(&self, point: Point) -> Vec<u32> {
        let doc = point + self.scroll;
        let mut hits: Vec<u32> = (0..self.len())
            .filter(|&e| self.connected(e) && self.rendered(e).contains(doc))
            .collect();
        hits.sort_by_key(|&e| core::cmp::Reverse(self.stacking_key(e)));
        hits
    }
}

impl Styles for MockHost {
    fn set_style(&mut self, element: &u32, property: StyleProperty) {
        self.writes.push((*element, property));
        let style = &mut self.nodes[*element as usize].style;
        match property {
            StyleProperty::Position(p) => style.position = Some(p),
            StyleProperty::Offset(o) => style.offset = o,
            StyleProperty::ZIndex(z) => style.z_index = z,
            StyleProperty::Opacity(o) => style.opacity = Some(o),
            StyleProperty::Border(b) => style.border = b,
        }
    }

    fn set_native_drag(&mut self, element: &u32, enabled: bool) {
        self.nodes[*element as usize].native_drag = enabled;
    }
}
