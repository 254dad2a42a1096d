//! Collision plumbing: the scene query contract and a reference scene.

pub mod queries;
pub mod scene;

pub use queries::{DetachCallback, DetachNotifier, IgnoreSet, RayHit, SceneQuery};
pub use scene::{Scene, SceneObject, Shape, SharedScene};
