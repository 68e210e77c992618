// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag a card from one column to another and print the tree before and after.
//!
//! This example drives a full gesture against an element tree: press, a few moves, the
//! debounced hit test, and the release that reparents the card.
//!
//! Run:
//! - `cargo run -p understory_drop_demos --example drag_to_reparent`

use kurbo::{Point, Rect, Size, Vec2};
use understory_drop::config::DragConfig;
use understory_drop::draggable::attach;
use understory_drop::selector::selector_for;
use understory_drop::timer::ManualScheduler;
use understory_drop::types::PointerEvent;
use understory_element_tree::{Document, Element, ElementId};

fn main() {
    let mut doc = Document::new(Size::new(640.0, 480.0));
    let body = doc.body();

    // Two columns; the left one holds three cards.
    let left = doc.insert(
        Some(body),
        Element::new("section", Rect::new(20.0, 20.0, 300.0, 460.0)).with_class("column"),
    );
    let right = doc.insert(
        Some(body),
        Element::new("section", Rect::new(340.0, 20.0, 620.0, 460.0)).with_class("column"),
    );
    let cards: Vec<ElementId> = (0..3)
        .map(|i| {
            let y = 10.0 + 50.0 * f64::from(i);
            doc.insert(
                Some(left),
                Element::new("div", Rect::new(10.0, y, 270.0, y + 40.0)).with_class("card"),
            )
        })
        .collect();

    println!("Before:");
    print_ascii_tree(&doc, body);

    let card = cards[1];
    let mut timers = ManualScheduler::new();
    let mut drag = attach(&mut doc, Some(card), DragConfig::default()).expect("card is live");
    drag.subscribe_on_dropped(|n| println!("\n== Dropped ==\n  onto {}", n.target_selector));

    let at = |x, y| PointerEvent::from_client(Point::new(x, y), Vec2::ZERO);

    // The card sits at (30, 80) in the document; grab it near its top-left.
    assert!(drag.pointer_down(&mut doc, &card, &at(40.0, 90.0)));
    println!("\nGrab offset: {:?}", drag.session().grab_offset());

    for (x, y) in [(120.0, 120.0), (260.0, 160.0), (420.0, 200.0), (460.0, 210.0)] {
        drag.pointer_move(&mut doc, &mut timers, &at(x, y));
        let origin = doc.document_rect(card).map(|r| r.origin());
        println!("  move → ({x:.0}, {y:.0})  card at {origin:?}");
    }
    for timer in timers.advance(DragConfig::default().debounce) {
        for ev in drag.timer_fired(&mut doc, timer) {
            println!("  hover {ev:?}");
        }
    }

    let dropped = drag
        .pointer_up(&mut doc, &mut timers, &card)
        .expect("right column is the candidate");
    assert_eq!(dropped.target, right);
    assert_eq!(doc.parent(card), Some(right));

    println!("\nAfter:");
    print_ascii_tree(&doc, body);
}

fn print_ascii_tree(doc: &Document, root: ElementId) {
    print_node(doc, "", root);
    fn go(doc: &Document, node: ElementId, prefix: &str) {
        let kids = doc.children(node);
        let len = kids.len();
        for (i, &k) in kids.iter().enumerate() {
            let last = i + 1 == len;
            let branch = if last { "└── " } else { "├── " };
            print_node(doc, &format!("{}{}", prefix, branch), k);
            let next_prefix = if last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            go(doc, k, &next_prefix);
        }
    }
    go(doc, root, "");
}

fn print_node(doc: &Document, prefix: &str, id: ElementId) {
    let rect = doc.document_rect(id).unwrap_or(Rect::ZERO);
    println!(
        "{}{}  rect=({:.0},{:.0})–({:.0},{:.0})",
        prefix,
        selector_for(doc, &id),
        rect.x0,
        rect.y0,
        rect.x1,
        rect.y1
    );
}
