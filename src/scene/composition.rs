//! Declarative scene composition.
//!
//! Builds a [`SceneDescription`] — lights, environment, post-processing,
//! and mesh instances with material descriptors — for whichever
//! visualization mode is active. The description is pure data; the render
//! backend rasterizes it. Per-frame gem transforms are delivered separately
//! so the description only changes when the mode or a material does.

use glam::Vec3;

use super::assets::MeshLibrary;
use super::state::SceneState;
use crate::gem::{GemId, GemProfile, OpticalProperties};

/// Environment map used for refraction and image-based lighting.
pub const ENVIRONMENT_MAP: &str = "assets/env/aerodynamics_workshop_1k.hdr";

/// Asset file holding the ring band and crown geometry.
pub const RING_ASSET: &str = "assets/models/golden_ring.obj";

/// Directional key light position shared by the spot light, the caustics
/// projector, and the shadow rig.
const KEY_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, -10.0);

/// Ambient light term.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    /// Scalar intensity.
    pub intensity: f32,
}

/// Spot light with soft edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    /// World-space position.
    pub position: Vec3,
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Soft-edge fraction (0 = hard edge, 1 = fully feathered).
    pub penumbra: f32,
}

/// Omnidirectional point light.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
}

/// The showcase light rig.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    /// Ambient fill.
    pub ambient: AmbientLight,
    /// Key spot light.
    pub spot: SpotLight,
    /// Back point light.
    pub point: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                intensity: 0.5 * std::f32::consts::PI,
            },
            spot: SpotLight {
                position: KEY_LIGHT_POSITION,
                angle: 0.15,
                penumbra: 1.0,
            },
            point: PointLight {
                position: Vec3::new(-10.0, -10.0, -10.0),
            },
        }
    }
}

/// Accumulated soft-shadow catcher plane under the stones.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCatcher {
    /// Accumulate over multiple frames with light jitter.
    pub temporal: bool,
    /// Number of accumulation frames.
    pub frames: u32,
    /// Shadow tint.
    pub color: [f32; 3],
    /// Color blend exponent.
    pub color_blend: f32,
    /// Alpha-test threshold for the accumulated map.
    pub alpha_test: f32,
    /// Overall shadow opacity.
    pub opacity: f32,
    /// Plane scale.
    pub scale: f32,
    /// Plane position.
    pub position: Vec3,
}

impl Default for ShadowCatcher {
    fn default() -> Self {
        Self {
            temporal: true,
            frames: 100,
            color: [1.0, 1.0, 1.0],
            color_blend: 2.0,
            alpha_test: 0.7,
            opacity: 1.0,
            scale: 12.0,
            position: Vec3::new(0.0, -0.5, 0.0),
        }
    }
}

/// Bloom post-processing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomSettings {
    /// Minimum luminance that blooms.
    pub luminance_threshold: f32,
    /// Bloom intensity.
    pub intensity: f32,
    /// Number of mip levels blurred.
    pub levels: u32,
    /// Use mip-chain blur instead of separable gaussian.
    pub mipmap_blur: bool,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            luminance_threshold: 1.0,
            intensity: 2.0,
            levels: 9,
            mipmap_blur: true,
        }
    }
}

/// Caustics projection cast by a refractive stone onto the ground.
#[derive(Debug, Clone, PartialEq)]
pub struct CausticsDescriptor {
    /// Tint of the caustic light.
    pub color: [f32; 3],
    /// Ground-plane anchor.
    pub position: Vec3,
    /// Light source the caustics are traced from.
    pub light_source: Vec3,
    /// World radius of the projection.
    pub world_radius: f32,
    /// Index of refraction for front faces.
    pub ior: f32,
    /// Index of refraction for back faces.
    pub backface_ior: f32,
    /// Projection intensity.
    pub intensity: f32,
    /// Trace back faces too.
    pub backfaces: bool,
}

impl CausticsDescriptor {
    /// Caustics rig for a gem profile with the given material color and
    /// refraction index.
    #[must_use]
    pub fn for_gem(profile: &GemProfile, properties: &OpticalProperties) -> Self {
        Self {
            color: properties.color,
            position: Vec3::new(0.0, -0.5, 0.0),
            light_source: KEY_LIGHT_POSITION,
            world_radius: profile.caustic_radius,
            ior: properties.index_of_refraction,
            backface_ior: 1.1,
            intensity: 0.1,
            backfaces: true,
        }
    }
}

/// Refractive gem material fed by the environment map.
#[derive(Debug, Clone, PartialEq)]
pub struct RefractionMaterial {
    /// Optical parameters.
    pub properties: OpticalProperties,
    /// Environment map sampled by the refraction shader.
    pub env_map: &'static str,
    /// Tone mapping applied after shading; off so highlights can bloom.
    pub tone_mapped: bool,
}

impl RefractionMaterial {
    /// Material with the given optical parameters over the showcase
    /// environment map.
    #[must_use]
    pub fn new(properties: OpticalProperties) -> Self {
        Self {
            properties,
            env_map: ENVIRONMENT_MAP,
            tone_mapped: false,
        }
    }
}

/// Metallic-roughness material for the ring band and crown.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    /// Base color.
    pub color: [f32; 3],
    /// Metalness factor.
    pub metalness: f32,
    /// Roughness factor.
    pub roughness: f32,
}

impl StandardMaterial {
    /// Polished gold.
    #[must_use]
    pub fn gold() -> Self {
        Self {
            color: [1.0, 0.84, 0.0],
            metalness: 1.0,
            roughness: 0.0,
        }
    }
}

/// How an instance is shaded.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDescriptor {
    /// Refractive gem material.
    Refraction(RefractionMaterial),
    /// Standard metallic-roughness material.
    Standard(StandardMaterial),
}

/// One placed mesh in the composition.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInstance {
    /// Node name resolved through the mesh library.
    pub mesh: String,
    /// Placement position (within the composition's group space).
    pub position: Vec3,
    /// Euler rotation.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Material descriptor.
    pub material: MaterialDescriptor,
    /// Caustics projection, for refractive stones on the ground plane.
    pub caustics: Option<CausticsDescriptor>,
    /// Whether the instance casts into the shadow catcher.
    pub cast_shadow: bool,
    /// Interactive gem this instance renders, if any. The backend applies
    /// the per-frame animated transform delivered with each frame to
    /// instances carrying a gem tag.
    pub gem: Option<GemId>,
}

/// Complete declarative description of one visualization mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    /// Clear color.
    pub background: [f32; 3],
    /// Light rig.
    pub lights: LightRig,
    /// Environment map path.
    pub environment: &'static str,
    /// Shadow catcher, when the composition wants one.
    pub shadow_catcher: Option<ShadowCatcher>,
    /// Bloom pass, when the composition wants one.
    pub bloom: Option<BloomSettings>,
    /// Uniform scale applied to the whole instance group.
    pub group_scale: f32,
    /// Placed meshes.
    pub instances: Vec<MeshInstance>,
}

impl SceneDescription {
    /// A description that renders nothing (used when required geometry is
    /// missing).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            background: [0.94, 0.94, 0.94],
            lights: LightRig::default(),
            environment: ENVIRONMENT_MAP,
            shadow_catcher: None,
            bloom: None,
            group_scale: 1.0,
            instances: Vec::new(),
        }
    }

    /// Whether the description draws anything.
    pub fn is_renderable(&self) -> bool {
        !self.instances.is_empty()
    }
}

/// Accent-stone placements on the ring crown: (position, z-rotation).
const RING_ACCENT_STONES: [(Vec3, f32); 8] = [
    (Vec3::new(2.3, 7.3, 0.0), -0.375),
    (Vec3::new(-2.3, 7.3, 0.0), 0.375),
    (Vec3::new(-3.5, 6.8, 0.0), 0.45),
    (Vec3::new(3.5, 6.8, 0.0), -0.45),
    (Vec3::new(-4.7, 6.1, 0.0), 0.55),
    (Vec3::new(4.7, 6.1, 0.0), -0.55),
    (Vec3::new(-5.6, 5.2, 0.0), 0.9),
    (Vec3::new(5.6, 5.2, 0.0), -0.9),
];

/// Build the loose-stones composition.
///
/// Requires each gem's mesh node to be present in the library; when one is
/// missing the composition renders nothing and the failure is reported
/// through the log rather than thrown.
#[must_use]
pub fn diamonds_scene(
    library: &MeshLibrary,
    state: &SceneState,
    profiles: &[GemProfile],
) -> SceneDescription {
    for profile in profiles {
        if !library.contains(profile.mesh_node) {
            log::error!(
                "missing gem geometry '{}' from {}; rendering nothing",
                profile.mesh_node,
                profile.asset_path
            );
            return SceneDescription::empty();
        }
    }

    let instances = profiles
        .iter()
        .map(|profile| {
            let properties = state.properties(profile.id).clone();
            MeshInstance {
                mesh: profile.mesh_node.to_owned(),
                position: profile.base_position,
                rotation: profile.resting_rotation,
                scale: profile.render_scale,
                caustics: Some(CausticsDescriptor::for_gem(profile, &properties)),
                material: MaterialDescriptor::Refraction(
                    RefractionMaterial::new(properties),
                ),
                cast_shadow: true,
                gem: Some(profile.id),
            }
        })
        .collect();

    SceneDescription {
        background: [0.94, 0.94, 0.94],
        lights: LightRig::default(),
        environment: ENVIRONMENT_MAP,
        shadow_catcher: Some(ShadowCatcher::default()),
        bloom: Some(BloomSettings::default()),
        group_scale: 1.0,
        instances,
    }
}

/// Build the golden-ring composition: band, crown, one center diamond and
/// eight radiant accent stones.
///
/// The band and crown nodes are required; if either is absent the
/// composition renders nothing and the failure is logged.
#[must_use]
pub fn golden_ring_scene(library: &MeshLibrary) -> SceneDescription {
    for node in ["ring", "crown"] {
        if !library.contains(node) {
            log::error!(
                "missing ring geometry '{node}' from {RING_ASSET}; rendering nothing"
            );
            return SceneDescription::empty();
        }
    }
    let diamond = GemProfile::diamond();
    let radiant = GemProfile::radiant();
    for profile in [&diamond, &radiant] {
        if !library.contains(profile.mesh_node) {
            log::error!(
                "missing gem geometry '{}' for the ring assembly; rendering nothing",
                profile.mesh_node
            );
            return SceneDescription::empty();
        }
    }

    let white = OpticalProperties::default();
    let mut instances = vec![
        MeshInstance {
            mesh: "ring".to_owned(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 800.0,
            material: MaterialDescriptor::Standard(StandardMaterial::gold()),
            caustics: None,
            cast_shadow: false,
            gem: None,
        },
        MeshInstance {
            mesh: "crown".to_owned(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            material: MaterialDescriptor::Standard(StandardMaterial::gold()),
            caustics: None,
            cast_shadow: false,
            gem: None,
        },
        MeshInstance {
            mesh: diamond.mesh_node.to_owned(),
            position: Vec3::new(0.0, 12.5, 0.0),
            rotation: Vec3::ZERO,
            scale: 5.0,
            material: MaterialDescriptor::Refraction(RefractionMaterial::new(
                white.clone(),
            )),
            caustics: None,
            cast_shadow: true,
            gem: None,
        },
    ];
    for (position, z_rotation) in RING_ACCENT_STONES {
        instances.push(MeshInstance {
            mesh: radiant.mesh_node.to_owned(),
            position,
            rotation: Vec3::new(0.0, 0.0, z_rotation),
            scale: 0.5,
            material: MaterialDescriptor::Refraction(RefractionMaterial::new(
                white.clone(),
            )),
            caustics: None,
            cast_shadow: true,
            gem: None,
        });
    }

    SceneDescription {
        background: [0.94, 0.94, 0.94],
        lights: LightRig::default(),
        environment: ENVIRONMENT_MAP,
        shadow_catcher: Some(ShadowCatcher::default()),
        bloom: None,
        group_scale: 0.15,
        instances,
    }
}

#[cfg(test)]
mod tests {
    use super::super::assets::test_support::triangle;
    use super::*;

    fn gem_library() -> MeshLibrary {
        let mut lib = MeshLibrary::new();
        lib.insert(triangle("Diamond_1_0"));
        lib.insert(triangle("Cylinder_009"));
        lib
    }

    fn full_library() -> MeshLibrary {
        let mut lib = gem_library();
        lib.insert(triangle("ring"));
        lib.insert(triangle("crown"));
        lib
    }

    #[test]
    fn test_diamonds_scene_places_both_gems() {
        let scene = diamonds_scene(
            &gem_library(),
            &SceneState::default(),
            &GemProfile::showcase(),
        );
        assert!(scene.is_renderable());
        assert_eq!(scene.instances.len(), 2);
        assert!(scene.bloom.is_some());
        assert!(scene.shadow_catcher.is_some());

        let diamond = &scene.instances[0];
        assert_eq!(diamond.gem, Some(GemId::Diamond));
        assert!(diamond.caustics.is_some());
        assert!(matches!(
            diamond.material,
            MaterialDescriptor::Refraction(_)
        ));
    }

    #[test]
    fn test_diamonds_scene_missing_geometry_renders_nothing() {
        let mut lib = MeshLibrary::new();
        lib.insert(triangle("Diamond_1_0")); // radiant mesh absent
        let scene = diamonds_scene(
            &lib,
            &SceneState::default(),
            &GemProfile::showcase(),
        );
        assert!(!scene.is_renderable());
    }

    #[test]
    fn test_diamonds_scene_uses_stored_properties() {
        let mut state = SceneState::default();
        let _ = state.select(GemId::Diamond);
        let _ = state.update_properties(
            GemId::Diamond,
            crate::gem::OpticalProperties {
                index_of_refraction: 1.9,
                ..Default::default()
            },
        );

        let scene =
            diamonds_scene(&gem_library(), &state, &GemProfile::showcase());
        let MaterialDescriptor::Refraction(material) =
            &scene.instances[0].material
        else {
            panic!("diamond must use the refraction material");
        };
        assert!((material.properties.index_of_refraction - 1.9).abs() < 1e-6);
        // Caustics trace with the same refraction index.
        let caustics = scene.instances[0].caustics.as_ref().unwrap();
        assert!((caustics.ior - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_ring_scene_layout() {
        let scene = golden_ring_scene(&full_library());
        assert!(scene.is_renderable());
        // Band + crown + center diamond + eight accent stones.
        assert_eq!(scene.instances.len(), 11);
        assert!((scene.group_scale - 0.15).abs() < 1e-6);

        // Nothing in the assembly is selectable.
        assert!(scene.instances.iter().all(|i| i.gem.is_none()));

        // Accent stones sit mirrored across the crown.
        let accents: Vec<_> = scene.instances[3..].iter().collect();
        assert_eq!(accents.len(), 8);
        let sum_x: f32 = accents.iter().map(|i| i.position.x).sum();
        assert!(sum_x.abs() < 1e-4);
    }

    #[test]
    fn test_ring_scene_missing_band_renders_nothing() {
        let mut lib = gem_library();
        lib.insert(triangle("crown")); // band absent
        assert!(!golden_ring_scene(&lib).is_renderable());
    }

    #[test]
    fn test_caustic_radii_follow_profiles() {
        let scene = diamonds_scene(
            &gem_library(),
            &SceneState::default(),
            &GemProfile::showcase(),
        );
        let radii: Vec<f32> = scene
            .instances
            .iter()
            .filter_map(|i| i.caustics.as_ref().map(|c| c.world_radius))
            .collect();
        assert_eq!(radii, vec![0.1, 0.7]);
    }
}
