//! Interactive gems: identities, static profiles, optical properties, and
//! the per-gem animation controller.

pub mod controller;
pub mod properties;

pub use controller::{FrameCue, GemController};
pub use properties::OpticalProperties;

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier for an interactive gem in the showcase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GemId {
    /// The brilliant-cut diamond.
    Diamond,
    /// The radiant-cut stone.
    Radiant,
}

impl GemId {
    /// Both gem identifiers, in display order.
    pub const ALL: [Self; 2] = [Self::Diamond, Self::Radiant];
}

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diamond => write!(f, "diamond"),
            Self::Radiant => write!(f, "radiant"),
        }
    }
}

/// Static, non-animated data for one gem: which mesh it renders, where it
/// rests, and how it is picked.
#[derive(Debug, Clone)]
pub struct GemProfile {
    /// Which gem this profile describes.
    pub id: GemId,
    /// Asset file the gem's geometry comes from.
    pub asset_path: &'static str,
    /// Named geometry node within the asset.
    pub mesh_node: &'static str,
    /// World-space position the gem occupies while resting.
    pub base_position: Vec3,
    /// Euler rotation the gem returns to when deselected.
    pub resting_rotation: Vec3,
    /// World radius of the caustics projection under the gem.
    pub caustic_radius: f32,
    /// Uniform render scale applied to the mesh.
    pub render_scale: f32,
    /// Bounding-sphere radius used for click picking.
    pub pick_radius: f32,
}

impl GemProfile {
    /// Profile for the brilliant-cut diamond.
    #[must_use]
    pub fn diamond() -> Self {
        Self {
            id: GemId::Diamond,
            asset_path: "assets/models/dflat.obj",
            mesh_node: "Diamond_1_0",
            base_position: Vec3::new(0.0, 0.325, 0.0),
            resting_rotation: Vec3::new(0.0, 0.0, 0.715),
            caustic_radius: 0.1,
            render_scale: 1.0,
            pick_radius: 0.75,
        }
    }

    /// Profile for the radiant-cut stone.
    #[must_use]
    pub fn radiant() -> Self {
        Self {
            id: GemId::Radiant,
            asset_path: "assets/models/gem2.obj",
            mesh_node: "Cylinder_009",
            base_position: Vec3::new(0.0, 0.025, -3.5),
            resting_rotation: Vec3::new(0.0, 0.0, 0.8),
            caustic_radius: 0.7,
            render_scale: 0.9,
            pick_radius: 1.1,
        }
    }

    /// The built-in showcase profiles, in display order.
    #[must_use]
    pub fn showcase() -> [Self; 2] {
        [Self::diamond(), Self::radiant()]
    }
}
