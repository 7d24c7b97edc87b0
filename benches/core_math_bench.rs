use axiskit::core::{LinearScale, ScaleOutputExtent};
use axiskit::layout::{
    Bounds, LayoutManager, LayoutPosition, LayoutView, ViewLayoutConfig, ViewMeasuredSizes,
};
use axiskit::ticks::{
    AxisOrientation, NoCollisionDrawStrategy, NumericTickFormatter, NumericTickProvider,
    TickLabelCache, TickProvider, TickRequest,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let mut scale = LinearScale::new();
    scale.add_domain_value(0.0).expect("finite");
    scale.add_domain_value(10_000.0).expect("finite");
    scale.set_range(ScaleOutputExtent::new(0.0, 1920.0).expect("finite range"));

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply(black_box(4_321.123));
            black_box(scale.reverse(px))
        })
    });
}

fn bench_numeric_tick_generation(c: &mut Criterion) {
    let formatter = NumericTickFormatter::default();
    let provider = NumericTickProvider::new();

    c.bench_function("numeric_tick_generation", |b| {
        b.iter(|| {
            let mut scale = LinearScale::new();
            scale.add_domain_value(black_box(0.0)).expect("finite");
            scale.add_domain_value(black_box(9_973.0)).expect("finite");
            scale.set_range(ScaleOutputExtent::new(0.0, 1920.0).expect("finite range"));
            let mut cache = TickLabelCache::new();
            let mut request = TickRequest {
                scale: &mut scale,
                formatter: &formatter,
                label_cache: &mut cache,
                draw_strategy: &NoCollisionDrawStrategy,
                orientation: AxisOrientation::Bottom,
                viewport_extension_enabled: true,
                hint: None,
            };
            black_box(provider.get_ticks(&mut request).expect("ticks"))
        })
    });
}

struct BenchView {
    config: ViewLayoutConfig,
    thickness: f64,
}

impl LayoutView for BenchView {
    fn layout_config(&self) -> ViewLayoutConfig {
        self.config
    }

    fn measure(&mut self, _max_width: f64, _max_height: f64) -> ViewMeasuredSizes {
        ViewMeasuredSizes {
            preferred_width: self.thickness,
            preferred_height: self.thickness,
            min_width: self.thickness / 2.0,
            min_height: self.thickness / 2.0,
        }
    }

    fn layout(&mut self, _bounds: Bounds, _draw_area: Bounds) {}
}

fn bench_layout_measure_cycle(c: &mut Criterion) {
    let mut manager = LayoutManager::default();
    for (position, thickness) in [
        (LayoutPosition::Left, 48.0),
        (LayoutPosition::Right, 64.0),
        (LayoutPosition::Top, 24.0),
        (LayoutPosition::Bottom, 32.0),
    ] {
        manager.add_view(Box::new(BenchView {
            config: ViewLayoutConfig::new(position),
            thickness,
        }));
    }

    c.bench_function("layout_measure_cycle", |b| {
        b.iter(|| {
            manager.invalidate();
            manager
                .layout(black_box(1920.0), black_box(1080.0))
                .expect("layout");
            black_box(manager.draw_area_bounds())
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_numeric_tick_generation,
    bench_layout_measure_cycle
);
criterion_main!(benches);
