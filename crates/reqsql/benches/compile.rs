use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use reqsql::{Dialect, Grammar, Request, Where};

/// A request with `n` compare tags and an IN list of `n` values.
fn flat_request(n: usize) -> Request {
    let mut tree = Where::new();
    for i in 0..n {
        tree = tree.eq(&format!("col{i}"), i as i64);
    }
    tree = tree.in_list("id", (0..n as i64).collect::<Vec<_>>());
    Request::new("t").filter(tree).order_by_desc("id").limit(10)
}

/// `depth` requests nested through EXISTS, each with one parameter.
fn nested_request(depth: usize) -> Request {
    let mut request = Request::new("leaf").filter(Where::new().eq("v", 0));
    for i in 0..depth {
        request = Request::new(format!("t{i}"))
            .filter(Where::new().eq("v", i as i64 + 1).exists(request));
    }
    request
}

fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/flat");
    let grammar = Grammar::default();

    for n in [1, 10, 50, 200] {
        let request = flat_request(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &request, |b, request| {
            b.iter(|| black_box(grammar.compile(request)));
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/nested");
    let grammar = Grammar::new(Dialect::postgres());

    for depth in [1, 4, 16] {
        let request = nested_request(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &request, |b, request| {
            b.iter(|| black_box(grammar.compile(request)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flat, bench_nested);
criterion_main!(benches);
