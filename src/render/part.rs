use glam::Vec3;

use crate::{
    collision::scene::{SceneObject, SharedScene},
    core::types::Transform,
    render::TrajectoryRenderer,
    utils::allocator::EntityId,
};

/// Renders a clone of a template object that follows the projectile.
///
/// The clone lives in the scene, so it is also the renderer's ignore set.
/// Any [`crate::collision::scene::Shape`] works as a template, mesh-like
/// visuals included.
pub struct PartRenderer {
    scene: SharedScene,
    part: [EntityId; 1],
    offset: Transform,
}

impl PartRenderer {
    /// Clones `template` into `scene`. `offset` is applied on top of the
    /// look-along transform every frame.
    pub fn new(scene: &SharedScene, template: &SceneObject, offset: Transform) -> Self {
        let part = scene.write().insert(template.clone());
        Self {
            scene: scene.clone(),
            part: [part],
            offset,
        }
    }

    pub fn part(&self) -> EntityId {
        self.part[0]
    }
}

impl TrajectoryRenderer for PartRenderer {
    fn render(&mut self, origin: Vec3, direction: Vec3) {
        let transform = Transform::looking_along(origin, direction).combine(&self.offset);
        self.scene.write().set_transform(self.part(), transform);
    }

    fn destroy(self: Box<Self>) {
        self.scene.write().remove(self.part());
    }

    fn ignore_set(&self) -> &[EntityId] {
        &self.part
    }
}
