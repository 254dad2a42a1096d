use projectile_tracer::{config::DEFAULT_TIME_STEP, *};

fn main() {
    env_logger::init();

    let mut scene = Scene::new();
    let floor = scene.insert(SceneObject::cuboid(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(200.0, 1.0, 200.0),
    ));
    let plate = scene.insert(SceneObject::cuboid(
        Vec3::new(0.0, 2.0, 40.0),
        Vec3::new(5.0, 3.0, 0.25),
    ));
    let scene = scene.into_shared();

    let mut world = ProjectileWorld::new();
    let tracer = PartRenderer::new(
        &scene,
        &SceneObject::cuboid(Vec3::ZERO, Vec3::new(0.05, 0.05, 0.5)),
        Transform::default(),
    );

    world
        .spawn(
            ProjectileConfig::builder(
                Vec3::new(0.0, 1.5, 0.0),
                Vec3::new(0.0, -5.0, 400.0),
                Vec3::new(0.0, -9.8, 0.0),
            )
            .penetration(true)
            .bounce(true)
            .resistance(0.5)
            .renderer(tracer)
            .on_touch(move |touch| {
                let surface = if touch.object == floor {
                    "floor"
                } else if touch.object == plate {
                    "plate"
                } else {
                    "object"
                };
                println!("hit {surface} at {:?}, heading {:?}", touch.point, touch.direction);
                false
            })
            .build(),
        )
        .expect("valid projectile");

    while !world.is_empty() {
        world.step(DEFAULT_TIME_STEP, &*scene);
    }
    println!("all projectiles retired at t = {:.3} s", world.elapsed());
}
