use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use joints::{analyze, Config, Graph};

fn path(n: usize) -> Graph {
    Graph::from_edges((1..n).map(|i| (i - 1, i)))
}

fn complete(n: usize) -> Graph {
    Graph::from_edges((0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
}

pub fn bench_joints(c: &mut Criterion) {
    let config = Config::default();

    let cases: [(&str, fn(usize) -> Graph, usize); 2] =
        [("P_{size}", path, 10_000), ("K_{size}", complete, 200)];

    let mut group = c.benchmark_group("joints");
    for (label, graph, size) in cases.iter() {
        let label = label.replace("{size}", &size.to_string());
        let graph = graph(*size);

        group.bench_with_input(BenchmarkId::new("analyze", &label), &graph, |b, graph| {
            b.iter(|| analyze(graph, &config).map(|analysis| analysis.joints.len()))
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(2))
        .sample_size(20)
        .configure_from_args();
    targets = bench_joints
}
criterion_main!(benches);
