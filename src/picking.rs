//! Gem picking via ray-sphere intersection.
//!
//! Uses each gem's current animated position as the center of a proxy
//! sphere sized by its profile. Click positions are unprojected through
//! the camera's inverse view-projection into a world ray.

use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::camera::Camera;
use crate::gem::GemId;

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Normalized direction.
    pub direction: Vec3,
}

/// One pickable gem: identity, proxy-sphere center, and radius.
#[derive(Debug, Clone, Copy)]
pub struct PickTarget {
    /// Which gem the sphere stands in for.
    pub id: GemId,
    /// Current world-space center.
    pub center: Vec3,
    /// Proxy-sphere radius.
    pub radius: f32,
}

/// Unproject a screen position (physical pixels) into a world ray.
#[must_use]
pub fn screen_ray(
    camera: &Camera,
    x: f32,
    y: f32,
    viewport: (u32, u32),
) -> Ray {
    let (width, height) = viewport;
    let ndc_x = 2.0 * x / width.max(1) as f32 - 1.0;
    let ndc_y = 1.0 - 2.0 * y / height.max(1) as f32;

    let inverse = camera.build_matrix().inverse();
    let near = inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let near = near.xyz() / near.w;
    let far = far.xyz() / far.w;

    Ray {
        origin: near,
        direction: (far - near).normalize(),
    }
}

/// Distance along the ray to the first intersection with a sphere, if any.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    // Nearest intersection in front of the origin.
    let t = -b - sqrt_d;
    if t >= 0.0 {
        return Some(t);
    }
    let t = -b + sqrt_d;
    (t >= 0.0).then_some(t)
}

/// Pick the nearest gem under a screen position.
#[must_use]
pub fn pick_gem(
    camera: &Camera,
    x: f32,
    y: f32,
    viewport: (u32, u32),
    targets: &[PickTarget],
) -> Option<GemId> {
    let ray = screen_ray(camera, x, y, viewport);
    targets
        .iter()
        .filter_map(|target| {
            ray_sphere(&ray, target.center, target.radius)
                .map(|t| (target.id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
