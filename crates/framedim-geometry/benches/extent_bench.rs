use criterion::{black_box, criterion_group, criterion_main, Criterion};
use framedim_geometry::{BoundingExtentEstimator, JacobiSolver, NalgebraSolver, PointCloud};

fn lattice(n: i32) -> PointCloud {
    let mut cloud = PointCloud::default();
    for i in -n..=n {
        for j in -n..=n {
            for k in -n..=n {
                cloud.push([i as f64 * 4.1, j as f64 * 5.3 + 0.2 * i as f64, k as f64 * 6.7]);
            }
        }
    }
    cloud
}

fn bench_estimate_jacobi_9k(c: &mut Criterion) {
    let cloud = lattice(10);
    let est = BoundingExtentEstimator::new(JacobiSolver::default());
    c.bench_function("estimate_jacobi_9k", |b| b.iter(|| est.estimate(black_box(&cloud))));
}

fn bench_estimate_nalgebra_9k(c: &mut Criterion) {
    let cloud = lattice(10);
    let est = BoundingExtentEstimator::new(NalgebraSolver::default());
    c.bench_function("estimate_nalgebra_9k", |b| b.iter(|| est.estimate(black_box(&cloud))));
}

fn bench_estimate_jacobi_250(c: &mut Criterion) {
    let cloud = lattice(3);
    let est = BoundingExtentEstimator::new(JacobiSolver::default());
    c.bench_function("estimate_jacobi_250", |b| b.iter(|| est.estimate(black_box(&cloud))));
}

criterion_group!(
    benches,
    bench_estimate_jacobi_9k,
    bench_estimate_nalgebra_9k,
    bench_estimate_jacobi_250,
);
criterion_main!(benches);
