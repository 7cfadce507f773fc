//! The rendering seam.
//!
//! This crate never rasterizes. Each frame it produces a [`RenderFrame`]
//! — the camera uniform, the current declarative [`SceneDescription`], and
//! the animated gem transforms — and hands it to a [`RenderBackend`]
//! supplied by the embedder.

use glam::Vec3;

use crate::camera::CameraUniform;
use crate::gem::GemId;
use crate::scene::SceneDescription;

/// Per-frame animated transform for one interactive gem.
///
/// The backend applies these to the description instances tagged with the
/// matching [`GemId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GemTransform {
    /// Which gem this transform animates.
    pub id: GemId,
    /// Current world-space position.
    pub position: Vec3,
    /// Current Euler rotation.
    pub rotation: Vec3,
    /// Uniform render scale.
    pub scale: f32,
}

/// Everything the backend needs to draw one frame.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Camera uniform, ready for upload.
    pub camera: CameraUniform,
    /// Declarative composition for the active visualization mode.
    pub description: &'a SceneDescription,
    /// Animated transforms for the interactive gems. Empty while the ring
    /// assembly is shown.
    pub gems: Vec<GemTransform>,
}

/// A renderer that rasterizes [`RenderFrame`]s.
///
/// Implementations own the GPU surface and all pipeline state; failures
/// are theirs to report and recover.
pub trait RenderBackend {
    /// The drawable surface changed size.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn submit(&mut self, frame: &RenderFrame<'_>);
}
