// Scene side: the in-memory world the tower is spawned into, and block inspection.

pub mod inspector;
pub mod world;

pub use inspector::BlockInspector;
pub use world::{SceneObject, World};
