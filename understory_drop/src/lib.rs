// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drop: a deterministic, `no_std` drag-to-reparent interaction.
//!
//! ## Overview
//!
//! Press on an element, drag it around, release it over another element, and the dragged
//! element (the *subject*) becomes the last child of the element under the pointer (the
//! *target*). Listeners are told which element was dropped where.
//!
//! The crate owns no element tree and no event loop. A host implements the traits in
//! [`types`] and passes itself by reference into every operation; a [`Scheduler`](crate::types::Scheduler)
//! provides the deferred callbacks used for debouncing. Hosts without a real timer can use
//! [`ManualScheduler`](crate::timer::ManualScheduler).
//!
//! ## Gesture
//!
//! - Press: the subject is lifted to the document body, raised to the top, and faded.
//!   Its top-left keeps the same distance to the pointer for the whole gesture.
//! - Move: the subject follows every pointer sample immediately. The search for a drop target
//!   runs only once the pointer has been still for [`DragConfig::debounce`](crate::config::DragConfig::debounce).
//! - Hover: the current drop candidate carries a marker border. Exactly one element is marked at a time.
//! - Release: the subject's drag styles are reset. If there is a candidate, the subject is
//!   appended to it and a [`DropNotification`](crate::notify::DropNotification) is published.
//!
//! The subject and its descendants are never drop targets.
//!
//! ## Workflow
//!
//! 1) Attach — [`attach`](crate::draggable::attach) validates the subject, suppresses native
//!    drag, and returns a [`Draggable`](crate::draggable::Draggable).
//! 2) Route input — forward pointer down, move, up, and cancel from your toolkit.
//!    Forward each expired [`TimerId`](crate::types::TimerId) to `timer_fired`.
//! 3) Observe — [`Draggable::subscribe_on_dropped`](crate::draggable::Draggable::subscribe_on_dropped)
//!    or a shared [`DropBus`](crate::notify::DropBus) for container-level listeners.
//!
//! ```
//! use core::time::Duration;
//! use understory_drop::config::DragConfig;
//! use understory_drop::draggable::attach;
//! use understory_drop::timer::ManualScheduler;
//! use understory_drop::types::PointerEvent;
//! # use understory_drop::types::*;
//! # use kurbo::{Point, Rect, Vec2};
//! # #[derive(Default)]
//! # struct Page { parent: Vec<Option<usize>>, rects: Vec<Rect>, top: Option<usize> }
//! # impl ElementTree for Page {
//! #     type Element = usize;
//! #     fn is_alive(&self, e: &usize) -> bool { *e < self.parent.len() }
//! #     fn parent_of(&self, e: &usize) -> Option<usize> { self.parent[*e] }
//! #     fn index_in_parent(&self, e: &usize) -> Option<usize> {
//! #         let p = self.parent[*e]?;
//! #         (0..self.parent.len()).filter(|c| self.parent[*c] == Some(p)).position(|c| c == *e)
//! #     }
//! #     fn body(&self) -> usize { 0 }
//! #     fn append_child(&mut self, p: &usize, c: &usize) -> bool { self.parent[*c] = Some(*p); true }
//! #     fn describe(&self, _: &usize) -> ElementDescriptor {
//! #         ElementDescriptor { tag: "div".into(), ..Default::default() }
//! #     }
//! #     fn count_matching(&self, _: &ElementDescriptor) -> usize { 1 }
//! # }
//! # impl Layout for Page {
//! #     fn bounding_client_rect(&self, e: &usize) -> Rect { self.rects[*e] }
//! #     fn scroll_offset(&self) -> Vec2 { Vec2::ZERO }
//! #     fn elements_from_point(&self, p: Point) -> Vec<usize> {
//! #         let mut hits: Vec<usize> = (0..self.rects.len()).rev().filter(|e| self.rects[*e].contains(p)).collect();
//! #         if let Some(t) = self.top { hits.retain(|e| *e != t); hits.insert(0, t); }
//! #         hits
//! #     }
//! # }
//! # impl Styles for Page {
//! #     fn set_style(&mut self, e: &usize, s: StyleProperty) {
//! #         match s {
//! #             StyleProperty::Offset(Some(at)) => self.rects[*e] = Rect::from_origin_size(at, self.rects[*e].size()),
//! #             StyleProperty::ZIndex(z) => self.top = z.map(|_| *e),
//! #             _ => {}
//! #         }
//! #     }
//! #     fn set_native_drag(&mut self, _: &usize, _: bool) {}
//! # }
//! # let mut page = Page {
//! #     parent: vec![None, Some(0), Some(0)],
//! #     rects: vec![
//! #         Rect::new(0.0, 0.0, 500.0, 500.0),
//! #         Rect::new(0.0, 0.0, 40.0, 40.0),
//! #         Rect::new(200.0, 200.0, 400.0, 400.0),
//! #     ],
//! #     top: None,
//! # };
//! # let (card, tray) = (1, 2);
//! let mut timers = ManualScheduler::new();
//! let mut drag = attach(&mut page, Some(card), DragConfig::default()).unwrap();
//! drag.subscribe_on_dropped(|n| println!("dropped onto {}", n.target_selector));
//!
//! let at = |x, y| PointerEvent::from_client(Point::new(x, y), Vec2::ZERO);
//! drag.pointer_down(&mut page, &card, &at(10.0, 10.0));
//! drag.pointer_move(&mut page, &mut timers, &at(300.0, 300.0));
//! for timer in timers.advance(Duration::from_millis(25)) {
//!     drag.timer_fired(&mut page, timer);
//! }
//! let dropped = drag.pointer_up(&mut page, &mut timers, &card);
//! assert_eq!(dropped.map(|n| n.target), Some(tray));
//! ```
//!
//! With the `element_tree_adapter` feature, [`understory_element_tree::Document`](https://docs.rs/understory_element_tree)
//! implements the host traits directly; see [`adapters`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `tracing` (default): logs gesture transitions through `tracing`. Committed drops are
//!   logged at `info` as `move <subject> to <target>`.
//! - `libm`: `no_std` float math for `kurbo`.
//! - `element_tree_adapter`: host trait implementations for `understory_element_tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod draggable;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod hover;
pub mod notify;
pub mod selector;
pub mod session;
pub mod timer;
pub mod types;

#[cfg(test)]
mod testing;
