use projectile_tracer::{config::DEFAULT_TIME_STEP, *};

fn main() {
    env_logger::init();

    let mut engine = ProjectileEngine::new(Scene::new());
    let id = engine
        .spawn(
            ProjectileConfig::builder(
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(0.0, 0.0, 50.0),
                Vec3::new(0.0, -9.8, 0.0),
            )
            .can_collide(false)
            .build(),
        )
        .expect("valid projectile");

    let mut frame = 0;
    while engine.world().contains(id) {
        engine.tick(DEFAULT_TIME_STEP);
        frame += 1;
        if let Some(projectile) = engine.world().projectile(id) {
            if frame % 30 == 0 {
                println!("frame {frame}: position {:?}", projectile.position());
            }
        }
    }
    println!(
        "projectile expired after {frame} frames ({:.3} s)",
        engine.world().elapsed()
    );
}
