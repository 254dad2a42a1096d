use approx::assert_abs_diff_eq;
use projectile_tracer::*;

#[test]
fn line_appears_from_the_second_step() {
    let mut world = ProjectileWorld::new();
    let scene = Scene::new();
    world
        .spawn(
            ProjectileConfig::builder(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO)
                .can_collide(false)
                .build(),
        )
        .unwrap();

    world.step(0.1, &scene);
    assert!(world.lines().visible_segments().is_empty());

    world.step(0.1, &scene);
    let segments = world.lines().visible_segments();
    assert_eq!(segments.len(), 1);
    let line = segments[0];
    assert_abs_diff_eq!(line.origin.x, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(line.length, 1.0, epsilon = 1e-5);
    assert_eq!(line.direction, Vec3::X);
    assert_eq!(line.color, Color::WHITE);
    assert_abs_diff_eq!(line.center().x, 1.5, epsilon = 1e-5);
    assert_abs_diff_eq!(line.end().x, 2.0, epsilon = 1e-5);

    let forward = line.orientation() * Vec3::NEG_Z;
    assert_abs_diff_eq!(forward.x, 1.0, epsilon = 1e-5);
}

#[test]
fn retired_projectiles_recycle_their_lines() {
    let mut world = ProjectileWorld::new();
    let scene = Scene::new();
    let config = || ProjectileConfig::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

    let first = world.spawn(config()).unwrap();
    let second = world.spawn(config()).unwrap();
    for _ in 0..3 {
        world.step(0.1, &scene);
    }
    assert_eq!(world.lines().visible_segments().len(), 2);

    world.remove(first, false);
    world.remove(second, false);
    world.step(0.1, &scene);
    assert!(world.lines().visible_segments().is_empty());
    assert_eq!(world.lines().available(), 2);

    world.spawn(config()).unwrap();
    assert_eq!(world.lines().allocated(), 2);
    assert_eq!(world.lines().available(), 1);
}

#[test]
fn custom_line_renderer_uses_its_own_pool() {
    let pool = LinePool::new();
    let mut world = ProjectileWorld::new();
    let scene = Scene::new();
    world
        .spawn(
            ProjectileConfig::builder(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO)
                .renderer(LineRenderer::with_radius(&pool, Color::YELLOW, 0.2))
                .build(),
        )
        .unwrap();

    world.step(0.1, &scene);
    world.step(0.1, &scene);

    assert_eq!(world.lines().allocated(), 0);
    let segments = pool.visible_segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].color, Color::YELLOW);
    assert_eq!(segments[0].radius, 0.2);
}

#[test]
fn part_renderer_follows_projectile_and_is_never_struck() {
    let scene = Scene::new().into_shared();
    // The template sits on the flight path.
    let template = SceneObject::sphere(Vec3::new(0.0, 0.0, -5.0), 0.2);
    let renderer = PartRenderer::new(&scene, &template, Transform::default());
    let part = renderer.part();
    assert!(scene.read().contains(part));

    let mut world = ProjectileWorld::new();
    let id = world
        .spawn(
            ProjectileConfig::builder(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO)
                .renderer(renderer)
                .build(),
        )
        .unwrap();
    assert!(world.projectile(id).unwrap().ignore_set().contains(part));

    world.step(0.1, &*scene);

    let projectile = world.projectile(id).unwrap();
    assert!(projectile.removal().is_none());
    assert_abs_diff_eq!(projectile.position().z, -10.0, epsilon = 1e-4);

    let placed = scene.read().get(part).unwrap().transform;
    assert_eq!(placed.position, Vec3::ZERO);
    let forward = placed.rotation * Vec3::NEG_Z;
    assert_abs_diff_eq!(forward.z, -1.0, epsilon = 1e-5);

    world.remove(id, true);
    assert!(!scene.read().contains(part));
}

#[test]
fn part_renderer_offset_is_applied_in_local_frame() {
    let scene = Scene::new().into_shared();
    let template = SceneObject::cuboid(Vec3::ZERO, Vec3::new(0.1, 0.1, 1.0));
    let offset = Transform::from_position(Vec3::new(0.0, 0.0, -1.0));
    let mut world = ProjectileWorld::new();
    let renderer = PartRenderer::new(&scene, &template, offset);
    let part = renderer.part();

    world
        .spawn(
            ProjectileConfig::builder(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO)
                .renderer(renderer)
                .build(),
        )
        .unwrap();
    world.step(0.1, &*scene);

    // One stud ahead of the segment start, along +X.
    let placed = scene.read().get(part).unwrap().transform;
    assert_abs_diff_eq!(placed.position.x, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(placed.position.y, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(placed.position.z, 0.0, epsilon = 1e-5);
}
