use layer_grammar::api::{ChartContext, Layer, LayerComposer};
use layer_grammar::core::{Aesthetic, DataTable, Geometry};
use layer_grammar::interaction::{NullPresenter, ToggleBoard};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_compose_256_layers(c: &mut Criterion) {
    let rows: i32 = 10_000;
    let data = DataTable::new()
        .with_column("x", (0..rows).map(f64::from).collect::<Vec<_>>())
        .and_then(|t| {
            t.with_column(
                "y",
                (0..rows).map(|i| f64::from(i) * 0.5).collect::<Vec<_>>(),
            )
        })
        .and_then(|t| {
            t.with_column(
                "group",
                (0..rows).map(|i| format!("g{}", i % 7)).collect::<Vec<_>>(),
            )
        })
        .expect("valid generated table");

    let context = ChartContext::new()
        .with_data(data)
        .with_field(Aesthetic::X, "x")
        .with_field(Aesthetic::Y, "y");
    let layers: Vec<Layer> = (0..256)
        .map(|i| {
            let layer = if i % 2 == 0 {
                Layer::new(Geometry::point()).with_field(Aesthetic::Color, "group")
            } else {
                Layer::new(Geometry::line()).suppress(Aesthetic::Color)
            };
            layer.with_parameter("size", f64::from(i % 5))
        })
        .collect();
    let composer = LayerComposer::default();

    c.bench_function("compose_256_layers", |b| {
        b.iter(|| {
            let _ = composer
                .compose(black_box(&context), black_box(&layers))
                .expect("compose should succeed");
        })
    });
}

fn bench_toggle_activation(c: &mut Criterion) {
    let mut board = ToggleBoard::new(NullPresenter::default());
    for i in 0..64 {
        board
            .register(&format!("solution{i}"))
            .expect("register element");
    }

    c.bench_function("toggle_activation", |b| {
        b.iter(|| {
            let _ = board
                .activate(black_box("solution42"))
                .expect("activation should succeed");
        })
    });
}

criterion_group!(benches, bench_compose_256_layers, bench_toggle_activation);
criterion_main!(benches);
