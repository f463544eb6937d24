use criterion::{black_box, criterion_group, criterion_main, Criterion};

use epistat_core::distribution::{chi_square_p_value, t_p_value, z_critical, NORMAL_APPROX_DF};

fn bench_chi_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("chi_square_p_value");

    group.bench_function("series", |b| {
        b.iter(|| chi_square_p_value(black_box(0.4464), black_box(1.0)))
    });

    group.bench_function("continued_fraction", |b| {
        b.iter(|| chi_square_p_value(black_box(10.83), black_box(1.0)))
    });

    group.finish();
}

fn bench_t_and_z(c: &mut Criterion) {
    let mut group = c.benchmark_group("t_and_z");

    group.bench_function("t_p_value/df=1000", |b| {
        b.iter(|| t_p_value(black_box(1.96), black_box(NORMAL_APPROX_DF)))
    });

    group.bench_function("t_p_value/df=10", |b| {
        b.iter(|| t_p_value(black_box(2.0), black_box(10.0)))
    });

    group.bench_function("z_critical/95", |b| {
        b.iter(|| z_critical(black_box(95.0)))
    });

    group.finish();
}

criterion_group!(benches, bench_chi_square, bench_t_and_z);
criterion_main!(benches);
