use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use galaxy_sim::{
    dynamics::integrate_partition, Body, DVec2, GalaxyConfig, GalaxyGenerator, PhysicsParams,
    SimConfig, Simulation,
};
use std::hint::black_box;

fn prepare_bodies(body_count: usize) -> Vec<Body> {
    let config = GalaxyConfig {
        min_stars: body_count,
        max_stars: body_count + 1,
        ..GalaxyConfig::default()
    };
    GalaxyGenerator::seeded(config, 17)
        .expect("galaxy config")
        .generate(DVec2::new(400.0, 300.0))
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");
    for &count in &[128usize, 512, 2048] {
        let bodies = prepare_bodies(count);
        for &workers in &[1usize, 4, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("{workers}_workers"), count),
                &bodies,
                |b, bodies| {
                    let config = SimConfig::default().with_workers(workers);
                    let mut sim =
                        Simulation::with_bodies(config, bodies.clone()).expect("simulation");
                    b.iter(|| black_box(sim.step().expect("step")))
                },
            );
        }
    }
    group.finish();
}

fn bench_integrate_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrate_partition");
    let params = PhysicsParams::from(&SimConfig::default());
    for &count in &[128usize, 512, 2048] {
        let bodies = prepare_bodies(count);
        group.bench_with_input(BenchmarkId::new("single", count), &bodies, |b, bodies| {
            let mut out = Vec::with_capacity(bodies.len());
            b.iter(|| {
                integrate_partition(black_box(bodies), 0, 1, params, &mut out);
                black_box(out.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simulation_step, bench_integrate_partition);
criterion_main!(benches);
