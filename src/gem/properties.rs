//! Adjustable optical properties for a refractive gem material.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Refraction-material parameters for one gem, editable from a parameter
/// panel while the gem is selected.
///
/// Ranges are advertised through the schema for panel construction; the
/// core does not re-clamp values, that is the editing panel's contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gem Optics", inline)]
#[serde(default)]
pub struct OpticalProperties {
    /// Number of internal ray bounces traced by the refraction shader.
    #[schemars(title = "Bounces", range(min = 0, max = 8), extend("step" = 1))]
    pub bounce_count: u32,
    /// Chromatic dispersion strength.
    #[schemars(title = "Dispersion", range(min = 0.0, max = 0.1), extend("step" = 0.01))]
    pub dispersion_strength: f32,
    /// Index of refraction.
    #[schemars(title = "IOR", range(min = 0.0, max = 10.0))]
    pub index_of_refraction: f32,
    /// Fresnel reflectance factor.
    #[schemars(title = "Fresnel", range(min = 0.0, max = 1.0))]
    pub fresnel_factor: f32,
    /// RGB tint applied to the refracted light.
    #[schemars(title = "Color")]
    pub color: [f32; 3],
    /// Cheaper single-pass chromatic aberration approximation.
    #[schemars(title = "Fast Chroma")]
    pub fast_chroma: bool,
}

impl Default for OpticalProperties {
    fn default() -> Self {
        Self {
            bounce_count: 3,
            dispersion_strength: 0.01,
            index_of_refraction: 2.75,
            fresnel_factor: 1.0,
            color: [1.0, 1.0, 1.0],
            fast_chroma: true,
        }
    }
}
