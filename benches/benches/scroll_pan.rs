// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_scroll_pan::{
    LayoutProbe, PanConfig, PanTransform, Placement, TransformTarget, Trigger, UpdateDriver,
    ViewportMetrics, resolve_factors,
};
use understory_scroll_pan_host::PanDocument;

const DOCUMENT: &str = r#"{
    "imageURL": "harbour.jpg",
    "beginAt": { "x": 120, "y": 40 },
    "endAt": { "x": 0, "y": 360 },
    "naturalViewport": { "width": 1280, "height": 720 }
}"#;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform-ish value in `[lo, hi)`.
    fn gen_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * (f64::from(self.next_u32()) / f64::from(u32::MAX))
    }
}

struct Page {
    viewport: ViewportMetrics,
    bounds: Rect,
}

impl LayoutProbe for Page {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport
    }

    fn container_bounds(&self) -> Rect {
        self.bounds
    }
}

struct Sink(f64);

impl TransformTarget for Sink {
    fn set_transform(&mut self, transform: &PanTransform) {
        self.0 += transform.translate.x;
    }
}

fn config() -> PanConfig {
    PanConfig::new(
        Point::new(120.0, 40.0),
        Point::new(0.0, 360.0),
        Size::new(1280.0, 720.0),
    )
}

fn scroll_offsets(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..count).map(|_| rng.gen_f64(-6000.0, 1000.0)).collect()
}

fn active_driver() -> UpdateDriver {
    let mut driver = UpdateDriver::new(Placement::new(Some(25.0), Some(75.0)));
    driver.mark_attached();
    driver.mark_loaded(config());
    driver.start();
    driver
}

fn bench_scroll_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_scroll_pan");
    let viewport = ViewportMetrics::new(1440.0, 900.0).with_available_height(960.0);
    let offsets = scroll_offsets(1_024, 0x5C20_11A0_0000_0001);

    group.bench_function("resolve_factors", |b| {
        let config = config();
        b.iter(|| {
            black_box(resolve_factors(
                black_box(&config),
                Placement::default(),
                black_box(&viewport),
                black_box(6000.0),
            ))
        });
    });

    group.bench_function("transform_at(1024 offsets)", |b| {
        let factors = resolve_factors(&config(), Placement::default(), &viewport, 6000.0);
        b.iter(|| {
            let mut sum = 0.0;
            for &top in &offsets {
                sum += factors.transform_at(top).translate.y;
            }
            black_box(sum);
        });
    });

    for (name, trigger) in [("scroll", Trigger::Scroll), ("resize", Trigger::Resize)] {
        group.bench_function(format!("driver_{name}(1024 triggers)"), |b| {
            b.iter_batched(
                active_driver,
                |mut driver| {
                    let mut page = Page {
                        viewport,
                        bounds: Rect::new(0.0, 0.0, 1440.0, 6000.0),
                    };
                    let mut sink = Sink(0.0);
                    for &top in &offsets {
                        page.bounds = Rect::new(0.0, top, 1440.0, top + 6000.0);
                        black_box(driver.handle(trigger, &page, &mut sink));
                    }
                    black_box(sink.0);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("document_from_json", |b| {
        b.iter(|| black_box(PanDocument::from_json(black_box(DOCUMENT))));
    });

    group.finish();
}

criterion_group!(benches, bench_scroll_pan);
criterion_main!(benches);
