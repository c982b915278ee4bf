use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use holdfast_scene::{Collider, LayerMask, Ray, RigidBody, Scene, SceneObject};

fn populated_scene(side: usize) -> Scene {
    let mut scene = Scene::default();
    for x in 0..side {
        for z in 0..side {
            let position = Vec3::new(x as f32 * 2.0 - side as f32, 0.5, -(z as f32) * 2.0 - 2.0);
            scene.spawn(
                SceneObject::at(position)
                    .with_collider(Collider::cuboid(Vec3::splat(0.5)))
                    .with_layer(if (x + z) % 3 == 0 {
                        LayerMask::ENVIRONMENT
                    } else {
                        LayerMask::INTERACTABLE
                    })
                    .with_body(RigidBody::default()),
            );
        }
    }
    scene
}

fn bench_raycast_interaction_range(c: &mut Criterion) {
    // A warehouse-sized grid; the scanner casts once per tick at short range
    let scene = populated_scene(16);
    let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z);

    c.bench_function("raycast_interaction_range", |b| {
        b.iter(|| black_box(scene.raycast(black_box(&ray), 3.0, LayerMask::INTERACTABLE)))
    });
}

fn bench_raycast_long_miss(c: &mut Criterion) {
    let scene = populated_scene(16);
    let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Z);

    c.bench_function("raycast_long_miss", |b| {
        b.iter(|| black_box(scene.raycast(black_box(&ray), 100.0, LayerMask::all())))
    });
}

fn bench_step_and_sync(c: &mut Criterion) {
    let mut scene = populated_scene(16);

    c.bench_function("step_and_sync", |b| {
        b.iter(|| {
            scene.step(black_box(1.0 / 60.0));
            scene.sync_attachments();
        })
    });
}

criterion_group!(benches, bench_raycast_interaction_range, bench_raycast_long_miss, bench_step_and_sync);
criterion_main!(benches);
