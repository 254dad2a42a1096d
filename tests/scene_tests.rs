use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use approx::assert_abs_diff_eq;
use projectile_tracer::*;

#[test]
fn miss_returns_ray_terminal_point() {
    let scene = Scene::new();
    let hit = scene.cast(Vec3::ONE, Vec3::new(0.0, 0.0, 7.0), &IgnoreSet::new());
    assert!(!hit.is_hit());
    assert_eq!(hit.point, Vec3::new(1.0, 1.0, 8.0));
    assert_eq!(hit.normal, Vec3::ZERO);
}

#[test]
fn nearest_unignored_object_wins() {
    let mut scene = Scene::new();
    let far = scene.insert(SceneObject::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0));
    let near = scene.insert(SceneObject::sphere(Vec3::new(0.0, 0.0, 5.0), 1.0));
    let direction = Vec3::new(0.0, 0.0, 20.0);

    let hit = scene.cast(Vec3::ZERO, direction, &IgnoreSet::new());
    assert_eq!(hit.object, Some(near));
    assert_abs_diff_eq!(hit.point.z, 4.0, epsilon = 1e-5);
    assert_abs_diff_eq!(hit.normal.z, -1.0, epsilon = 1e-5);

    let ignore: IgnoreSet = [near].into_iter().collect();
    let hit = scene.cast(Vec3::ZERO, direction, &ignore);
    assert_eq!(hit.object, Some(far));
    assert_abs_diff_eq!(hit.point.z, 9.0, epsilon = 1e-5);
}

#[test]
fn query_length_limits_hits() {
    let mut scene = Scene::new();
    scene.insert(SceneObject::cuboid(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(1.0)));

    let short = scene.cast(Vec3::ZERO, Vec3::new(0.0, 0.0, 8.0), &IgnoreSet::new());
    assert!(!short.is_hit());

    let long = scene.cast(Vec3::ZERO, Vec3::new(0.0, 0.0, 9.5), &IgnoreSet::new());
    assert!(long.is_hit());
    assert_abs_diff_eq!(long.point.z, 9.0, epsilon = 1e-5);
}

#[test]
fn rays_starting_inside_or_on_a_surface_do_not_hit_it() {
    let mut scene = Scene::new();
    scene.insert(SceneObject::sphere(Vec3::ZERO, 2.0));
    scene.insert(SceneObject::cuboid(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(1.0)));
    let ignore = IgnoreSet::new();

    assert!(!scene.cast(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), &ignore).is_hit());
    assert!(!scene.cast(Vec3::new(10.0, 0.0, 0.0), Vec3::X * 5.0, &ignore).is_hit());
    assert!(!scene.cast(Vec3::new(9.0, 0.0, 0.0), Vec3::X * 0.5, &ignore).is_hit());
}

#[test]
fn box_hit_reports_face_normal() {
    let mut scene = Scene::new();
    let block = scene.insert(SceneObject::cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)));
    let ignore = IgnoreSet::new();

    let from_above = scene.cast(Vec3::new(0.5, 10.0, 0.5), Vec3::new(0.0, -20.0, 0.0), &ignore);
    assert_eq!(from_above.object, Some(block));
    assert_eq!(from_above.normal, Vec3::Y);
    assert_abs_diff_eq!(from_above.point.y, 2.0, epsilon = 1e-5);

    let from_left = scene.cast(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0), &ignore);
    assert_eq!(from_left.normal, Vec3::NEG_X);
    assert_abs_diff_eq!(from_left.point.x, -1.0, epsilon = 1e-5);
}

#[test]
fn extent_is_bounding_box_diagonal() {
    let mut scene = Scene::new();
    let block = scene.insert(SceneObject::cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 2.0)));
    let ball = scene.insert(SceneObject::sphere(Vec3::ZERO, 1.0));

    assert_abs_diff_eq!(scene.extent(block).unwrap(), 6.0, epsilon = 1e-5);
    assert_abs_diff_eq!(scene.extent(ball).unwrap(), 2.0 * 3f32.sqrt(), epsilon = 1e-5);

    scene.remove(block);
    assert!(scene.extent(block).is_none());
}

#[test]
fn detach_watchers_fire_exactly_once() {
    let mut scene = Scene::new();
    let object = scene.insert(SceneObject::sphere(Vec3::ZERO, 1.0));
    let fired = Arc::new(AtomicUsize::new(0));

    let counter = fired.clone();
    scene.on_detach(
        object,
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert!(scene.remove(object).is_some());
    assert!(scene.remove(object).is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Subscribing after the fact delivers the notification straight away.
    let counter = fired.clone();
    scene.on_detach(
        object,
        Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}
