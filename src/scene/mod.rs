//! Scene layer: authoritative showcase state, the named-mesh registry, and
//! the declarative compositions the render backend consumes.

pub mod assets;
pub mod composition;
pub mod state;

pub use assets::{MeshData, MeshLibrary};
pub use composition::{
    diamonds_scene, golden_ring_scene, MaterialDescriptor, MeshInstance,
    SceneDescription,
};
pub use state::{SceneState, VisualizationMode};
