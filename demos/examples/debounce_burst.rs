// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show how pointer bursts collapse into a single hit test.
//!
//! The subject follows every sample, but the drop-target search only runs once the pointer
//! has been still for the debounce period. Fast sweeps across several zones mark only the
//! zone under the final position.
//!
//! Run:
//! - `cargo run -p understory_drop_demos --example debounce_burst`

use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_drop::config::{DragConfig, MissPolicy};
use understory_drop::draggable::attach;
use understory_drop::selector::selector_for;
use understory_drop::timer::ManualScheduler;
use understory_drop::types::PointerEvent;
use understory_element_tree::{Document, Element};

fn main() {
    let mut doc = Document::new(Size::new(800.0, 200.0));
    let body = doc.body();
    let zones: Vec<_> = (0..4)
        .map(|i| {
            let x = 200.0 * f64::from(i);
            doc.insert(
                Some(body),
                Element::new("div", Rect::new(x, 100.0, x + 200.0, 200.0)).with_id(format!("zone{i}")),
            )
        })
        .collect();
    let token = doc.insert(Some(body), Element::new("span", Rect::new(10.0, 10.0, 30.0, 30.0)));

    let config = DragConfig::default().with_miss_policy(MissPolicy::ClearOnMiss);
    let mut timers = ManualScheduler::new();
    let mut drag = attach(&mut doc, Some(token), config).expect("token is live");
    let at = |x, y| PointerEvent::from_client(Point::new(x, y), Vec2::ZERO);

    drag.pointer_down(&mut doc, &token, &at(20.0, 20.0));

    // Sweep across every zone, one sample every 8 ms: faster than the 25 ms quiet period.
    let mut tests = 0;
    for step in 0..40 {
        let x = 10.0 + 19.0 * f64::from(step);
        drag.pointer_move(&mut doc, &mut timers, &at(x, 150.0));
        for timer in timers.advance(Duration::from_millis(8)) {
            tests += 1;
            drag.timer_fired(&mut doc, timer);
        }
    }
    println!("== Sweep ==\n  40 moves, {tests} hit tests, pending: {}", timers.pending_count());
    assert_eq!(tests, 0);

    // Pause: exactly one hit test runs, at the last position.
    for timer in timers.advance(config.debounce) {
        for ev in drag.timer_fired(&mut doc, timer) {
            println!("  {ev:?}");
        }
    }
    let candidate = drag.candidate().expect("pointer rests over a zone");
    println!("  candidate: {}", selector_for(&doc, &candidate));
    assert_eq!(candidate, zones[3]);

    // Past the edge of the document only the token itself is hit, which is not a target.
    // Under `ClearOnMiss` that miss clears the candidate.
    drag.pointer_move(&mut doc, &mut timers, &at(900.0, 50.0));
    for timer in timers.advance(config.debounce) {
        for ev in drag.timer_fired(&mut doc, timer) {
            println!("  {ev:?}");
        }
    }
    println!("  candidate off the document: {:?}", drag.candidate());
    assert_eq!(drag.candidate(), None);

    // No candidate, so the release does not reparent.
    let dropped = drag.pointer_up(&mut doc, &mut timers, &token);
    println!("\n== Release ==\n  {:?}", dropped.map(|n| n.target_selector));
    assert_eq!(doc.parent(token), Some(body));
}
