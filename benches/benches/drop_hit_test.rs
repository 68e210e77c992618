// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_drop::config::DragConfig;
use understory_drop::draggable::attach;
use understory_drop::hit::find_drop_target;
use understory_drop::timer::ManualScheduler;
use understory_drop::types::{PointerEvent, Position, StyleProperty, Styles};
use understory_element_tree::{Document, Element, ElementId};

const CELL: f64 = 20.0;

/// An `n`×`n` grid of rows, each holding `n` cells, plus a subject in the top-left cell.
fn gen_grid_document(n: usize) -> (Document, ElementId) {
    let side = n as f64 * CELL;
    let mut doc = Document::new(Size::new(side, side));
    let body = doc.body();
    for y in 0..n {
        let y0 = y as f64 * CELL;
        let row = doc.insert(
            Some(body),
            Element::new("div", Rect::new(0.0, y0, side, y0 + CELL)).with_class("row"),
        );
        for x in 0..n {
            let x0 = x as f64 * CELL;
            doc.insert(
                Some(row),
                Element::new("div", Rect::new(x0, 0.0, x0 + CELL, CELL)).with_class("cell"),
            );
        }
    }
    let subject = doc.insert(
        Some(body),
        Element::new("div", Rect::new(0.0, 0.0, CELL, CELL)).with_id("subject"),
    );
    (doc, subject)
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, side: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xD4A6_D40B_5EED_0001);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
        .collect()
}

fn bench_elements_from_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("elements_from_point");
    for &n in &[16usize, 32, 64] {
        let (doc, _) = gen_grid_document(n);
        let points = gen_points(64, n as f64 * CELL);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let hits: usize = points
                    .iter()
                    .map(|p| doc.elements_from_point(black_box(*p)).len())
                    .sum();
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_find_drop_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_drop_target");
    for &n in &[16usize, 32, 64] {
        let (mut doc, subject) = gen_grid_document(n);
        doc.set_style(&subject, StyleProperty::Position(Position::Absolute));
        doc.set_style(&subject, StyleProperty::ZIndex(Some(1000)));
        let points = gen_points(64, n as f64 * CELL);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("raised_subject_n{}", n), |b| {
            b.iter(|| {
                let mut found = 0_usize;
                for p in &points {
                    // Keep the subject under the pointer, as it is during a drag.
                    doc.set_style(&subject, StyleProperty::Offset(Some(*p - Vec2::new(5.0, 5.0))));
                    if find_drop_target(&doc, black_box(*p), &subject).is_some() {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
    }
    group.finish();
}

fn bench_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    let n = 32;
    let side = n as f64 * CELL;
    let path = gen_points(100, side);
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("press_sweep_release_n32", |b| {
        b.iter_batched(
            || gen_grid_document(n),
            |(mut doc, subject)| {
                let mut timers = ManualScheduler::new();
                let config = DragConfig::default();
                let Ok(mut drag) = attach(&mut doc, Some(subject), config) else {
                    return None;
                };
                let at = |p: Point| PointerEvent::from_client(p, Vec2::ZERO);
                drag.pointer_down(&mut doc, &subject, &at(Point::new(5.0, 5.0)));
                for p in &path {
                    drag.pointer_move(&mut doc, &mut timers, &at(*p));
                    // Settle after every sample so each move pays for a hit test.
                    for timer in timers.advance(config.debounce) {
                        let _ = drag.timer_fired(&mut doc, timer);
                    }
                }
                drag.pointer_up(&mut doc, &mut timers, &subject)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_elements_from_point,
    bench_find_drop_target,
    bench_gesture
);
criterion_main!(benches);
