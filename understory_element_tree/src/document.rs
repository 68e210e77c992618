// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, reparenting, geometry, and queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};

use crate::types::{Element, ElementFlags, ElementId, Position, SimpleSelector, Style};

/// An element tree rooted at a `body` element.
///
/// Elements inserted without a parent are detached: they live in the document's storage
/// but are not reachable from [`Document::body`], so they are skipped by
/// [`Document::elements_from_point`] and [`Document::count_matching`].
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    body: ElementId,
    scroll: Vec2,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("body", &self.body)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
}

impl Document {
    /// Create a document whose `body` covers `viewport` at the origin.
    pub fn new(viewport: Size) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            body: ElementId::new(0, 1),
            scroll: Vec2::ZERO,
        };
        doc.body = doc.insert(None, Element::new("body", Rect::from_origin_size(Point::ZERO, viewport)));
        doc
    }

    /// The top-level container.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Insert a new element as the last child of `parent` (or detached if `None`).
    ///
    /// A stale `parent` leaves the new element detached.
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element and its subtree. The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.body {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
    }

    /// Move `child` to become the last child of `parent`, detaching it from its old parent.
    ///
    /// Returns `false` and leaves the tree untouched if either id is stale, or if the move
    /// would make an element its own ancestor.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || self.contains(child, parent) {
            return false;
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        true
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns true if `id` is live and reachable from the body.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.is_alive(id) && self.contains(self.body, id)
    }

    /// Parent of a live element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live element in document order. Empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Zero-based position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: ElementId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// Returns true if `node` is `ancestor` or lies in its subtree.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Element data of a live element.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Inline style of a live element, for mutation.
    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut Style> {
        self.node_opt_mut(id).map(|n| &mut n.element.style)
    }

    /// Update element flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.flags = flags;
        }
    }

    /// Update the layout box (relative to the parent's origin).
    pub fn set_layout_box(&mut self, id: ElementId, layout_box: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.layout_box = layout_box;
        }
    }

    /// Current scroll offset of the viewport into the document.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    /// Scroll the viewport.
    pub fn set_scroll_offset(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Rendered box of an element in document space.
    ///
    /// Static elements sit at their layout box inside the parent. Relative elements are
    /// shifted by their style offset. Absolute elements with an offset are placed at that
    /// offset in document space, regardless of their parent.
    pub fn document_rect(&self, id: ElementId) -> Option<Rect> {
        let node = self.node_opt(id)?;
        let size = node.element.layout_box.size();
        Some(Rect::from_origin_size(self.document_origin(id), size))
    }

    /// Rendered box of an element relative to the viewport.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<Rect> {
        self.document_rect(id).map(|r| r - self.scroll)
    }

    /// All pickable elements under a viewport point, front to back.
    ///
    /// Paint order is a pre-order walk from the body in which every element paints above
    /// its parent and siblings are ordered by effective z-index, ties in document order.
    /// Invisible elements hide their whole subtree. Opacity is ignored.
    pub fn elements_from_point(&self, pt: Point) -> Vec<ElementId> {
        let doc_pt = pt + self.scroll;
        let mut order = Vec::new();
        self.paint_order(self.body, &mut order);
        order
            .into_iter()
            .rev()
            .filter(|id| {
                let node = self.node(*id);
                node.element.flags.contains(ElementFlags::PICKABLE)
                    && self
                        .document_rect(*id)
                        .is_some_and(|r| r.contains(doc_pt))
            })
            .collect()
    }

    /// Number of connected elements (body included) matching `selector`.
    pub fn count_matching(&self, selector: &SimpleSelector<'_>) -> usize {
        let mut count = 0;
        let mut stack = Vec::from([self.body]);
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if selector.matches(&node.element) {
                count += 1;
            }
            stack.extend(node.children.iter().copied());
        }
        count
    }

    // --- internals ---

    fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn free_subtree(&mut self, id: ElementId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn document_origin(&self, id: ElementId) -> Point {
        let node = self.node(id);
        let layout_origin = node.element.layout_box.origin();
        let static_origin = match node.parent {
            Some(p) => self.document_origin(p) + layout_origin.to_vec2(),
            None => layout_origin,
        };
        let style = &node.element.style;
        match style.position {
            Position::Static => static_origin,
            Position::Relative => static_origin + style.offset.unwrap_or(Vec2::ZERO),
            Position::Absolute => style.offset.map_or(static_origin, Vec2::to_point),
        }
    }

    fn paint_order(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let node = self.node(id);
        if !node.element.flags.contains(ElementFlags::VISIBLE) {
            return;
        }
        out.push(id);
        let mut children = node.children.clone();
        // Stable: equal z keeps document order, so later siblings paint on top.
        children.sort_by_key(|c| self.node(*c).element.effective_z());
        for child in children {
            self.paint_order(child, out);
        }
    }
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn doc() -> Document {
        Document::new(Size::new(400.0, 400.0))
    }

    #[test]
    fn insert_appends_in_order() {
        let mut d = doc();
        let body = d.body();
        let a = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(d.children(body), &[a, b]);
        assert_eq!(d.index_in_parent(b), Some(1));
        assert_eq!(d.parent(a), Some(body));
    }

    #[test]
    fn append_child_moves_to_last_position() {
        let mut d = doc();
        let body = d.body();
        let a = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let c = d.insert(Some(a), Element::new("span", Rect::new(0.0, 0.0, 5.0, 5.0)));
        let x = d.insert(Some(b), Element::new("span", Rect::new(0.0, 0.0, 5.0, 5.0)));

        assert!(d.append_child(b, c));
        assert_eq!(d.children(a), &[] as &[ElementId]);
        assert_eq!(d.children(b), &[x, c]);
        assert_eq!(d.parent(c), Some(b));
    }

    #[test]
    fn append_child_rejects_cycles() {
        let mut d = doc();
        let body = d.body();
        let a = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        let inner = d.insert(Some(a), Element::new("div", Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!d.append_child(inner, a), "element cannot move under its own descendant");
        assert!(!d.append_child(a, a));
        assert_eq!(d.parent(a), Some(body));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut d = doc();
        let body = d.body();
        let a = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 1.0, 1.0)));
        let child = d.insert(Some(a), Element::new("div", Rect::new(0.0, 0.0, 1.0, 1.0)));
        d.remove(a);
        assert!(!d.is_alive(a));
        assert!(!d.is_alive(child), "subtree is removed with its root");
        assert!(d.children(body).is_empty());

        let b = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(d.is_alive(b));
        assert!(!d.is_alive(a));
        if a.0 == b.0 || child.0 == b.0 {
            assert!(b.1 > 1, "generation must increase on reuse");
        }

        d.remove(body);
        assert!(d.is_alive(body), "body is never removed");
    }

    #[test]
    fn document_and_client_rects_follow_scroll() {
        let mut d = doc();
        let body = d.body();
        let outer = d.insert(Some(body), Element::new("div", Rect::new(10.0, 20.0, 110.0, 120.0)));
        let inner = d.insert(Some(outer), Element::new("div", Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert_eq!(d.document_rect(inner), Some(Rect::new(15.0, 25.0, 25.0, 35.0)));

        d.set_scroll_offset(Vec2::new(0.0, 20.0));
        assert_eq!(d.bounding_client_rect(inner), Some(Rect::new(15.0, 5.0, 25.0, 15.0)));
    }

    #[test]
    fn relayout_moves_subtree_and_hit_area() {
        let mut d = doc();
        let body = d.body();
        let outer = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 50.0, 50.0)));
        let inner = d.insert(Some(outer), Element::new("span", Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(d.elements_from_point(Point::new(8.0, 8.0)).contains(&inner));

        d.set_layout_box(outer, Rect::new(100.0, 100.0, 150.0, 150.0));
        assert_eq!(d.document_rect(inner), Some(Rect::new(105.0, 105.0, 115.0, 115.0)));
        assert_eq!(d.elements_from_point(Point::new(8.0, 8.0)), vec![body]);
        assert_eq!(d.elements_from_point(Point::new(108.0, 108.0))[0], inner);
    }

    #[test]
    fn absolute_and_relative_positioning() {
        let mut d = doc();
        let body = d.body();
        let host = d.insert(Some(body), Element::new("div", Rect::new(100.0, 100.0, 200.0, 200.0)));
        let n = d.insert(Some(host), Element::new("div", Rect::new(10.0, 10.0, 30.0, 30.0)));

        let style = d.style_mut(n).unwrap();
        style.position = Position::Absolute;
        style.offset = Some(Vec2::new(5.0, 6.0));
        assert_eq!(d.document_rect(n), Some(Rect::new(5.0, 6.0, 25.0, 26.0)));

        let style = d.style_mut(n).unwrap();
        style.position = Position::Relative;
        style.offset = None;
        assert_eq!(d.document_rect(n), Some(Rect::new(110.0, 110.0, 130.0, 130.0)));
    }

    #[test]
    fn elements_from_point_is_front_to_back() {
        let mut d = doc();
        let body = d.body();
        let back = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 100.0, 100.0)));
        let front = d.insert(
            Some(body),
            Element::new("div", Rect::new(50.0, 50.0, 150.0, 150.0)).with_z_index(5),
        );
        let nested = d.insert(Some(back), Element::new("p", Rect::new(60.0, 60.0, 90.0, 90.0)));

        let hits = d.elements_from_point(Point::new(70.0, 70.0));
        assert_eq!(hits, vec![front, nested, back, body]);

        let hits = d.elements_from_point(Point::new(20.0, 20.0));
        assert_eq!(hits, vec![back, body]);

        d.style_mut(front).unwrap().z_index = Some(-1);
        let hits = d.elements_from_point(Point::new(70.0, 70.0));
        assert_eq!(hits, vec![nested, back, front, body]);
    }

    #[test]
    fn hidden_and_unpickable_elements_are_skipped() {
        let mut d = doc();
        let body = d.body();
        let hidden = d.insert(Some(body), Element::new("div", Rect::new(0.0, 0.0, 50.0, 50.0)));
        let under_hidden = d.insert(Some(hidden), Element::new("div", Rect::new(0.0, 0.0, 50.0, 50.0)));
        let ghost = d.insert(
            Some(body),
            Element::new("div", Rect::new(0.0, 0.0, 50.0, 50.0))
                .with_flags(ElementFlags::VISIBLE),
        );
        d.set_flags(hidden, ElementFlags::PICKABLE);

        let hits = d.elements_from_point(Point::new(10.0, 10.0));
        assert!(!hits.contains(&hidden));
        assert!(!hits.contains(&under_hidden), "invisible parent hides its subtree");
        assert!(!hits.contains(&ghost));
        assert_eq!(hits, vec![body]);
    }

    #[test]
    fn detached_elements_are_not_queried() {
        let mut d = doc();
        let detached = d.insert(None, Element::new("div", Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert!(d.is_alive(detached));
        assert!(!d.is_connected(detached));
        assert!(!d.elements_from_point(Point::new(10.0, 10.0)).contains(&detached));
        let classes: [String; 0] = [];
        let sel = SimpleSelector { tag: "div", id: None, classes: &classes };
        assert_eq!(d.count_matching(&sel), 0);
    }

    #[test]
    fn count_matching_requires_all_parts() {
        let mut d = doc();
        let body = d.body();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        d.insert(Some(body), Element::new("DIV", r).with_class("a").with_class("b"));
        d.insert(Some(body), Element::new("div", r).with_class("a"));
        d.insert(Some(body), Element::new("div", r).with_id("x").with_class("a"));

        let ab = [String::from("a"), String::from("b")];
        let a = [String::from("a")];
        let div_a = SimpleSelector { tag: "div", id: None, classes: &a };
        let div_ab = SimpleSelector { tag: "div", id: None, classes: &ab };
        let div_x_a = SimpleSelector { tag: "div", id: Some("x"), classes: &a };
        assert_eq!(d.count_matching(&div_a), 3);
        assert_eq!(d.count_matching(&div_ab), 1);
        assert_eq!(d.count_matching(&div_x_a), 1);
    }
}
