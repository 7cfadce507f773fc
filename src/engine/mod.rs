//! The showcase engine: state, controllers, choreography, and the
//! per-frame update that ties them together.

pub mod command;

pub use command::ShowcaseCommand;

use std::time::Instant;

use glam::Vec3;

use crate::camera::{
    Camera, CameraChoreographer, CameraDrive, CameraUniform, OrbitControls,
};
use crate::gem::{FrameCue, GemController, GemId, GemProfile};
use crate::options::Options;
use crate::picking::{pick_gem, PickTarget};
use crate::render::{GemTransform, RenderFrame};
use crate::scene::{
    diamonds_scene, golden_ring_scene, MeshLibrary, SceneDescription,
    SceneState, VisualizationMode,
};

/// Owns the whole interactive showcase.
///
/// Commands go in through [`execute`](Self::execute); once per rendered
/// frame [`update`](Self::update) advances every animated quantity, and
/// [`frame`](Self::frame) produces the data the render backend draws.
///
/// Within a frame the gem controllers always update before the shared
/// camera: pose capture and focus targeting read gem state settled for
/// this frame, never last frame's.
pub struct ShowcaseEngine {
    options: Options,
    state: SceneState,
    gems: Vec<GemController>,
    camera: Camera,
    uniform: CameraUniform,
    choreographer: CameraChoreographer,
    orbit: OrbitControls,
    library: MeshLibrary,
    description: SceneDescription,
    viewport: (u32, u32),
    previous_drive: CameraDrive,
}

impl ShowcaseEngine {
    /// Create an engine over a populated mesh library.
    #[must_use]
    pub fn new(library: MeshLibrary, options: Options, viewport: (u32, u32)) -> Self {
        let aspect = viewport.0.max(1) as f32 / viewport.1.max(1) as f32;
        let mut camera = Camera::new(
            Vec3::from(options.showcase.camera_start),
            options.camera.fovy,
            aspect,
            options.camera.znear,
            options.camera.zfar,
        );
        camera.look_at(Vec3::ZERO);

        let choreographer = CameraChoreographer::new(&camera);
        let orbit = OrbitControls::new(&camera, Vec3::ZERO);
        let state = SceneState::new(
            options.showcase.diamond.clone(),
            options.showcase.radiant.clone(),
        );
        let gems: Vec<GemController> = GemProfile::showcase()
            .into_iter()
            .map(GemController::new)
            .collect();

        let mut engine = Self {
            options,
            state,
            gems,
            camera,
            uniform: CameraUniform::new(),
            choreographer,
            orbit,
            library,
            description: SceneDescription::empty(),
            viewport,
            previous_drive: CameraDrive::Idle,
        };
        engine.rebuild_description();
        engine.uniform.update_view_proj(&engine.camera);
        engine
    }

    /// The showcase state (selection, properties, mode).
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// The shared camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The runtime options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The declarative composition for the active mode.
    pub fn scene_description(&self) -> &SceneDescription {
        &self.description
    }

    /// The controller driving a gem.
    pub fn gem(&self, id: GemId) -> Option<&GemController> {
        self.gems.iter().find(|gem| gem.id() == id)
    }

    /// Saved free-camera pose, if one is currently valid.
    pub fn saved_camera_pose(
        &self,
    ) -> Option<&crate::camera::SavedCameraPose> {
        self.choreographer.saved_pose()
    }

    /// Perform one interactive operation.
    pub fn execute(&mut self, command: ShowcaseCommand) {
        match command {
            ShowcaseCommand::Click { x, y } => self.click(x, y),
            ShowcaseCommand::SelectGem(id) => self.select_gem(id),
            ShowcaseCommand::ClearSelection => self.clear_selection(),
            ShowcaseCommand::ToggleVisualization => self.toggle_visualization(),
            ShowcaseCommand::SetProperties { id, properties } => {
                if self.state.update_properties(id, properties) {
                    // Committed edits feed the material descriptors.
                    self.rebuild_description();
                }
            }
            ShowcaseCommand::RotateCamera { delta } => {
                if self.state.selection().is_none() {
                    self.orbit.handle_rotate(delta, &self.options.camera);
                }
            }
            ShowcaseCommand::Zoom { delta } => {
                if self.state.selection().is_none() {
                    self.orbit.handle_zoom(delta, &self.options.camera);
                }
            }
            ShowcaseCommand::ToggleAutoRotate => {
                let on = self.orbit.toggle_auto_rotate();
                log::info!("auto-rotate {}", if on { "on" } else { "off" });
            }
            ShowcaseCommand::Resize { width, height } => {
                self.viewport = (width, height);
                self.camera.aspect =
                    width.max(1) as f32 / height.max(1) as f32;
            }
        }
    }

    /// Advance the showcase by one frame.
    pub fn update(&mut self, now: Instant, dt: f32) {
        // Gems strictly before the shared camera.
        if self.state.mode() == VisualizationMode::Diamonds {
            let mut capture = false;
            for gem in &mut self.gems {
                let selected = self.state.is_selected(gem.id());
                let cue =
                    gem.update(now, dt, selected, &self.options.animation);
                capture |= cue == FrameCue::CaptureCameraPose;
            }
            // Captured before the focus drive moves the camera this frame.
            if capture {
                self.choreographer.capture_pose(&self.camera);
            }
        }

        let focus = self
            .state
            .selection()
            .and_then(|id| self.gem(id).map(|gem| gem.profile().base_position));
        let drive = self.choreographer.update(
            now,
            dt,
            focus,
            &mut self.camera,
            &self.options.animation,
        );

        if drive == CameraDrive::Idle {
            if self.previous_drive != CameraDrive::Idle {
                // The choreographer just handed the camera back; pick up
                // the rig from wherever it left the camera.
                self.orbit.sync_from_camera(&self.camera);
            }
            self.orbit.update(dt, &mut self.camera, &self.options.camera);
        }
        self.previous_drive = drive;

        self.uniform.update_view_proj(&self.camera);
    }

    /// Produce the data the backend draws this frame.
    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        let gems = if self.state.mode() == VisualizationMode::Diamonds {
            self.gems
                .iter()
                .map(|gem| GemTransform {
                    id: gem.id(),
                    position: gem.position(),
                    rotation: gem.rotation(),
                    scale: gem.profile().render_scale,
                })
                .collect()
        } else {
            Vec::new()
        };
        RenderFrame {
            camera: self.uniform,
            description: &self.description,
            gems,
        }
    }

    fn click(&mut self, x: f32, y: f32) {
        if self.state.mode() != VisualizationMode::Diamonds {
            return;
        }
        let targets: Vec<PickTarget> = self
            .gems
            .iter()
            .map(|gem| PickTarget {
                id: gem.id(),
                center: gem.position(),
                radius: gem.profile().pick_radius,
            })
            .collect();
        if let Some(id) =
            pick_gem(&self.camera, x, y, self.viewport, &targets)
        {
            self.select_gem(id);
        }
    }

    fn select_gem(&mut self, id: GemId) {
        let before = self.state.selection();
        let after = self.state.select(id);
        if before.is_some() && after.is_none() {
            self.choreographer.begin_return(&self.options.animation);
        }
    }

    fn clear_selection(&mut self) {
        if self.state.selection().is_some() {
            self.state.clear_selection();
            self.choreographer.begin_return(&self.options.animation);
        }
    }

    fn toggle_visualization(&mut self) {
        let _ = self.state.toggle_visualization();
        // The departed mode's context is gone: selection, saved camera
        // pose, and in-flight animations do not survive the switch.
        for gem in &mut self.gems {
            gem.reset();
        }
        self.choreographer.invalidate();
        self.orbit.sync_from_camera(&self.camera);
        self.rebuild_description();
    }

    fn rebuild_description(&mut self) {
        self.description = match self.state.mode() {
            VisualizationMode::Diamonds => diamonds_scene(
                &self.library,
                &self.state,
                &GemProfile::showcase(),
            ),
            VisualizationMode::GoldenRing => golden_ring_scene(&self.library),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::gem::OpticalProperties;
    use crate::scene::assets::test_support::triangle;

    const DT: f32 = 1.0 / 60.0;
    const VIEWPORT: (u32, u32) = (800, 600);

    fn full_library() -> MeshLibrary {
        let mut lib = MeshLibrary::new();
        for name in ["Diamond_1_0", "Cylinder_009", "ring", "crown"] {
            lib.insert(triangle(name));
        }
        lib
    }

    fn engine() -> ShowcaseEngine {
        ShowcaseEngine::new(full_library(), Options::default(), VIEWPORT)
    }

    fn run(engine: &mut ShowcaseEngine, start: Instant, frames: u32) -> Instant {
        let mut now = start;
        for _ in 0..frames {
            now += Duration::from_secs_f32(DT);
            engine.update(now, DT);
        }
        now
    }

    #[test]
    fn test_select_drives_gem_and_camera() {
        let mut engine = engine();
        let now = Instant::now();

        engine.execute(ShowcaseCommand::SelectGem(GemId::Diamond));
        assert!(engine.state().is_selected(GemId::Diamond));

        let end = run(&mut engine, now, 600);
        let gem = engine.gem(GemId::Diamond).unwrap();
        let raised = gem.profile().base_position.y
            + engine.options().animation.max_lift;
        assert!((gem.position().y - raised).abs() < 1e-3);

        // The camera has settled at the viewing offset beside the gem.
        let expected = gem.profile().base_position
            + Vec3::new(-4.5, engine.options().animation.max_lift, 5.0);
        assert!((engine.camera().position - expected).length() < 0.05);

        let _ = end;
    }

    #[test]
    fn test_deselect_returns_camera_to_captured_pose() {
        let mut engine = engine();
        let mut now = Instant::now();

        // One free frame so the orbit rig settles, then select.
        now += Duration::from_secs_f32(DT);
        engine.update(now, DT);
        let free_pose = engine.camera().position;

        engine.execute(ShowcaseCommand::SelectGem(GemId::Radiant));
        now = run(&mut engine, now, 1);
        let captured = engine.saved_camera_pose().unwrap().position;
        // The pose was captured before the camera started chasing the gem.
        assert!((captured - free_pose).length() < 1e-4);

        now = run(&mut engine, now, 300);
        assert!((engine.camera().position - captured).length() > 1.0);

        // Deselect by re-selecting the same gem: the camera replays the
        // return onto the captured pose exactly.
        engine.execute(ShowcaseCommand::SelectGem(GemId::Radiant));
        assert_eq!(engine.state().selection(), None);
        let mut steps = 0;
        while steps < 200 {
            now += Duration::from_secs_f32(DT);
            engine.update(now, DT);
            steps += 1;
            if (engine.camera().position - captured).length() < 1e-6 {
                break;
            }
        }
        assert!((engine.camera().position - captured).length() < 1e-6);
    }

    #[test]
    fn test_click_center_selects_diamond() {
        let mut engine = engine();
        engine.execute(ShowcaseCommand::Click { x: 400.0, y: 300.0 });
        assert_eq!(engine.state().selection(), Some(GemId::Diamond));

        // Clicking it again clears the selection.
        engine.execute(ShowcaseCommand::Click { x: 400.0, y: 300.0 });
        assert_eq!(engine.state().selection(), None);
    }

    #[test]
    fn test_toggle_visualization_tears_down_cleanly() {
        let mut engine = engine();
        let now = Instant::now();

        engine.execute(ShowcaseCommand::SelectGem(GemId::Diamond));
        let mid = run(&mut engine, now, 30);
        let lifted = engine.gem(GemId::Diamond).unwrap().position();
        assert!(lifted.y > GemProfile::diamond().base_position.y);

        engine.execute(ShowcaseCommand::ToggleVisualization);
        assert_eq!(engine.state().selection(), None);
        assert!(engine.saved_camera_pose().is_none());

        // Torn-down gems are back at rest and no stale animation keeps
        // mutating them.
        let gem = engine.gem(GemId::Diamond).unwrap();
        assert_eq!(gem.position(), GemProfile::diamond().base_position);
        assert_eq!(gem.rotation_target(), None);

        let _ = run(&mut engine, mid, 10);
        let gem = engine.gem(GemId::Diamond).unwrap();
        assert_eq!(gem.position(), GemProfile::diamond().base_position);
        assert_eq!(
            gem.rotation(),
            GemProfile::diamond().resting_rotation
        );

        // The ring composition is on screen, with no per-frame gem
        // transforms.
        assert_eq!(engine.frame().gems.len(), 0);
        assert_eq!(engine.scene_description().instances.len(), 11);

        // Switching back restores the loose stones at rest.
        engine.execute(ShowcaseCommand::ToggleVisualization);
        assert_eq!(engine.scene_description().instances.len(), 2);
        assert_eq!(engine.frame().gems.len(), 2);
    }

    #[test]
    fn test_selecting_other_gem_switches_focus_instantly() {
        let mut engine = engine();
        let now = Instant::now();

        engine.execute(ShowcaseCommand::SelectGem(GemId::Diamond));
        let mid = run(&mut engine, now, 60);

        engine.execute(ShowcaseCommand::SelectGem(GemId::Radiant));
        assert!(engine.state().is_selected(GemId::Radiant));
        assert!(!engine.state().is_selected(GemId::Diamond));

        // No return transition runs between two focus targets.
        let _ = run(&mut engine, mid, 60);
        let toward = GemProfile::radiant().base_position
            + Vec3::new(-4.5, engine.options().animation.max_lift, 5.0);
        let distance = (engine.camera().position - toward).length();
        assert!(distance < 7.0, "camera should be chasing the radiant");
    }

    #[test]
    fn test_property_edits_only_commit_while_selected() {
        let mut engine = engine();
        let edited = OpticalProperties {
            index_of_refraction: 1.33,
            ..Default::default()
        };

        engine.execute(ShowcaseCommand::SetProperties {
            id: GemId::Diamond,
            properties: edited.clone(),
        });
        assert!(
            (engine.state().properties(GemId::Diamond).index_of_refraction
                - 2.75)
                .abs()
                < 1e-6
        );

        engine.execute(ShowcaseCommand::SelectGem(GemId::Diamond));
        engine.execute(ShowcaseCommand::SetProperties {
            id: GemId::Diamond,
            properties: edited,
        });
        assert!(
            (engine.state().properties(GemId::Diamond).index_of_refraction
                - 1.33)
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn test_orbit_input_ignored_while_focused() {
        let mut engine = engine();
        let now = Instant::now();
        engine.execute(ShowcaseCommand::SelectGem(GemId::Diamond));
        let settled = run(&mut engine, now, 600);
        let before = engine.camera().position;

        engine.execute(ShowcaseCommand::RotateCamera {
            delta: glam::Vec2::new(500.0, 0.0),
        });
        let _ = run(&mut engine, settled, 5);
        // Focus mode still holds the camera on its target.
        assert!((engine.camera().position - before).length() < 0.05);
    }

    #[test]
    fn test_missing_geometry_renders_nothing() {
        let mut lib = MeshLibrary::new();
        lib.insert(triangle("Diamond_1_0"));
        let engine =
            ShowcaseEngine::new(lib, Options::default(), VIEWPORT);
        assert!(!engine.scene_description().is_renderable());
    }
}
