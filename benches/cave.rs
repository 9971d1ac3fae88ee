use criterion::{criterion_group, criterion_main, Criterion};
use mazes::cave::Cave;
use mazes::random::RngSource;
use mazes::units::{ColumnsCount, RowsCount};

fn seeded_cave() -> Cave {
    let mut cave = Cave::new(RowsCount(1), ColumnsCount(1)).expect("valid dimensions");
    cave.generate_random(45, &mut RngSource::from_seed(45)).expect("valid fill chance");
    cave
}

fn bench_cave_step_25(c: &mut Criterion) {
    let cave = seeded_cave();
    c.bench_function("cave_step_25", move |b| {
        b.iter(|| {
            let mut stepped = cave.clone();
            stepped.next()
        })
    });
}

fn bench_cave_step_200(c: &mut Criterion) {
    let mut cave = seeded_cave();
    cave.set_rows(RowsCount(200)).expect("valid dimensions");
    cave.set_cols(ColumnsCount(200)).expect("valid dimensions");
    c.bench_function("cave_step_200", move |b| {
        b.iter(|| {
            let mut stepped = cave.clone();
            stepped.next()
        })
    });
}

fn bench_cave_generate_random(c: &mut Criterion) {
    let mut cave = seeded_cave();
    let mut rng = RngSource::from_seed(7);
    c.bench_function("cave_generate_random", move |b| {
        b.iter(|| cave.generate_random(45, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_cave_step_25,
    bench_cave_step_200,
    bench_cave_generate_random
);
criterion_main!(benches);
