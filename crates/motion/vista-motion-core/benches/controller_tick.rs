use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vista_motion_core::{
    ElementId, ElementSource, IntersectionEntry, MotionController, ObserverKind,
};

fn populated(n: u32) -> MotionController {
    let mut ctl = MotionController::default();
    for i in 0..n {
        let source = match i % 3 {
            0 => ElementSource::new([("animate", "fadeUp")]),
            1 => ElementSource::new([("counter", "")]).with_text(format!("{}+", i * 7)),
            _ => ElementSource::new([("parallax", "0.3")]),
        };
        ctl.register(ElementId(i), &source);
    }
    let entries: Vec<IntersectionEntry> = (0..n)
        .map(|i| IntersectionEntry {
            observer: if i % 3 == 1 {
                ObserverKind::Counter
            } else {
                ObserverKind::Reveal
            },
            element: ElementId(i),
            is_intersecting: true,
        })
        .collect();
    ctl.on_intersections(0.0, &entries);
    ctl
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_300_elements", |b| {
        b.iter_batched(
            || populated(300),
            |mut ctl| {
                let mut now = 0.0;
                for offset in 0..60 {
                    ctl.on_scroll(offset as f64 * 10.0);
                    now += 16.0;
                    black_box(ctl.tick(now));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
