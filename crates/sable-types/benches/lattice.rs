use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sable_types::{standard_types, IntType, StructType, TupleType, TypeId};

fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern");

    group.bench_function("int_constant_hit", |b| {
        IntType::con(42);
        b.iter(|| IntType::con(black_box(42)));
    });

    group.bench_function("struct_hit", |b| {
        b.iter(|| {
            StructType::make(
                black_box([("x", TypeId::INT64), ("y", TypeId::STR), ("z", TypeId::FLT64)]),
                false,
            )
        });
    });

    group.finish();
}

fn bench_meet(c: &mut Criterion) {
    let mut group = c.benchmark_group("meet");

    let pairs = [
        ("same", TypeId::INT64, TypeId::INT64),
        ("ints", TypeId::INT8, TypeId::XINT64),
        ("pointer_int", TypeId::OOP, TypeId::INT64),
        (
            "tuples",
            TupleType::make(vec![TypeId::INT8, TypeId::STR], false),
            TupleType::make(vec![TypeId::INT32, TypeId::XSTR], false),
        ),
    ];
    for (name, a, b) in pairs {
        group.bench_with_input(BenchmarkId::new("pair", name), &(a, b), |bench, &(a, b)| {
            bench.iter(|| black_box(a).meet(black_box(b)).unwrap());
        });
    }

    group.finish();
}

fn bench_join(c: &mut Criterion) {
    c.bench_function("join_ints", |b| {
        b.iter(|| black_box(TypeId::INT8).join(black_box(TypeId::INT32)).unwrap());
    });
}

fn bench_all_pairs(c: &mut Criterion) {
    let samples = standard_types();

    c.bench_function("meet_all_standard_pairs", |b| {
        b.iter(|| {
            let mut ok = 0usize;
            for &x in &samples {
                for &y in &samples {
                    if x.meet(y).is_ok() {
                        ok += 1;
                    }
                }
            }
            ok
        });
    });
}

criterion_group!(benches, bench_intern, bench_meet, bench_join, bench_all_pairs);
criterion_main!(benches);
