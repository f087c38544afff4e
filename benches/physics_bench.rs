//! Pipeline benchmarks: narrow-phase pair costs and whole-world stepping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use impulse_physics::narrow_phase::collide;
use impulse_physics::prelude::*;

fn collider_at(mut collider: Collider, position: Vec3, rotation: Quat) -> Collider {
    collider.update_world_data(position, rotation, Vec3::ZERO);
    collider
}

fn bench_narrow_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_phase");

    let sphere_a = collider_at(Collider::sphere(1.0), Vec3::ZERO, Quat::IDENTITY);
    let sphere_b = collider_at(
        Collider::sphere(1.0),
        Vec3::new(1.5, 0.0, 0.0),
        Quat::IDENTITY,
    );
    group.bench_function("sphere_sphere", |b| {
        b.iter(|| {
            black_box(collide(
                black_box(&sphere_a),
                black_box(&sphere_b),
                Vec3::ZERO,
                Vec3::new(1.5, 0.0, 0.0),
            ))
        })
    });

    let box_a = collider_at(
        Collider::cuboid(Vec3::new(0.5, 0.5, 0.5)),
        Vec3::ZERO,
        Quat::IDENTITY,
    );
    let box_b = collider_at(
        Collider::cuboid(Vec3::new(0.5, 0.5, 0.5)),
        Vec3::new(0.3, 0.8, 0.1),
        Quat::from_axis_angle(Vec3::UNIT_Y, 0.4),
    );
    group.bench_function("box_box_clipped", |b| {
        b.iter(|| {
            black_box(collide(
                black_box(&box_a),
                black_box(&box_b),
                Vec3::ZERO,
                Vec3::new(0.3, 0.8, 0.1),
            ))
        })
    });

    group.finish();
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    for &count in &[16usize, 64, 128] {
        group.bench_function(format!("falling_spheres_{count}"), |b| {
            let mut sim = Simulation::default();
            sim.add_body(
                RigidBody::new(Vec3::ZERO, InertiaShape::static_shape())
                    .with_collider(Collider::plane(Vec3::UNIT_Y)),
            );
            for i in 0..count {
                let x = (i % 8) as f64 * 1.2;
                let z = (i / 8) as f64 * 1.2;
                sim.add_body(
                    RigidBody::new(
                        Vec3::new(x, 2.0 + (i as f64) * 0.05, z),
                        InertiaShape::sphere(1.0, 0.5),
                    )
                    .with_collider(Collider::sphere(0.5)),
                );
            }
            b.iter(|| sim.step());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_narrow_phase, bench_simulation_step);
criterion_main!(benches);
