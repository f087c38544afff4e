//! Drops a mixed pile of spheres and boxes onto a ground plane and prints
//! their poses once a second of simulated time.
//!
//! Run with `cargo run --example falling_bodies`.

use impulse_physics::prelude::*;

fn main() -> Result<(), PhysicsError> {
    let mut sim = Simulation::default();

    sim.add_body(
        RigidBody::new(Vec3::ZERO, InertiaShape::static_shape())
            .with_collider(Collider::plane(Vec3::UNIT_Y)),
    );

    let mut handles = Vec::new();
    for i in 0..6 {
        let x = (i as f64 - 2.5) * 0.4;
        let y = 3.0 + i as f64 * 1.5;
        let handle = if i % 2 == 0 {
            sim.add_body(
                RigidBody::new(Vec3::new(x, y, 0.0), InertiaShape::sphere(1.0, 0.5))
                    .with_collider(Collider::sphere(0.5))
                    .with_material(Material::rubber()),
            )
        } else {
            sim.add_body(
                RigidBody::new(Vec3::new(x, y, 0.1), InertiaShape::cube(2.0, 1.0))
                    .with_collider(Collider::cuboid(Vec3::new(0.5, 0.5, 0.5)))
                    .with_material(Material::wood()),
            )
        };
        handles.push(handle);
    }

    let dt = 1.0 / 60.0;
    for second in 1..=8 {
        let mut contacts = 0;
        for _ in 0..60 {
            contacts += sim.update_staggered(dt).len();
        }
        println!("t = {second}s ({contacts} contacts this second)");
        for (i, &handle) in handles.iter().enumerate() {
            let (position, _) = sim.pose(handle)?;
            println!(
                "  body {i}: ({:+.3}, {:+.3}, {:+.3})",
                position.x, position.y, position.z
            );
        }
    }

    Ok(())
}
