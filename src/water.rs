use crate::math::{Vec2, Vec3};
use crate::waves::{wave_height, ITERATIONS_NORMAL, ITERATIONS_RAYMARCH};

pub const WATER_DEPTH: f32 = 1.0;

const RAYMARCH_STEPS: u32 = 64;
const HIT_EPSILON: f32 = 0.01;
// Clamp bounds keep a parallel-ray division from leaking Inf/NaN downstream.
const PLANE_MISS_NEAR: f32 = -1.0;
const PLANE_MISS_FAR: f32 = 9991999.0;

pub fn intersect_plane(origin: Vec3, direction: Vec3, point: Vec3, normal: Vec3) -> f32 {
    ((point - origin).dot(normal) / direction.dot(normal)).clamp(PLANE_MISS_NEAR, PLANE_MISS_FAR)
}

/// Marches from the top water plane (y = 0) toward the bottom plane
/// (y = -depth) and returns the distance from `camera` to the surface hit.
/// The step size is the vertical mismatch between the ray and the wave
/// height, which converges quickly over near-flat water. If 64 steps are not
/// enough the top-plane distance is returned instead; at grazing distances
/// that reads better than a marching artifact.
pub fn raymarch_water(camera: Vec3, start: Vec3, end: Vec3, time: f32, depth: f32) -> f32 {
    let mut pos = start;
    let dir = (end - start).normalize();
    for _ in 0..RAYMARCH_STEPS {
        // Wave height rescaled into [-depth, 0].
        let height =
            (wave_height(Vec2::new(pos.x, pos.z), time, ITERATIONS_RAYMARCH) * depth) - depth;
        if height + HIT_EPSILON > pos.y {
            return (pos - camera).length();
        }
        pos = pos + (dir * (pos.y - height));
    }
    (start - camera).length()
}

/// Finite-difference normal from the high-iteration wave field: the height
/// at `position` and at two close neighbors span two tangents whose cross
/// product is the surface normal.
pub fn surface_normal(position: Vec2, epsilon: f32, time: f32, depth: f32) -> Vec3 {
    let height = wave_height(position, time, ITERATIONS_NORMAL) * depth;
    let center = Vec3::new(position.x, height, position.y);

    let offset_x = position - Vec2::new(epsilon, 0.0);
    let offset_z = position + Vec2::new(0.0, epsilon);
    let tangent_x = center
        - Vec3::new(
            position.x - epsilon,
            wave_height(offset_x, time, ITERATIONS_NORMAL) * depth,
            position.y,
        );
    let tangent_z = center
        - Vec3::new(
            position.x,
            wave_height(offset_z, time, ITERATIONS_NORMAL) * depth,
            position.y + epsilon,
        );

    tangent_x.cross(tangent_z).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_intersection_from_above() {
        let origin = Vec3::new(0.0, 1.5, 0.0);
        let direction = Vec3::new(0.0, -1.0, 0.0);
        let t = intersect_plane(origin, direction, Vec3::splat(0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!((t - 1.5).abs() < 1e-6);
    }

    #[test]
    fn parallel_ray_clamps_instead_of_propagating_infinity() {
        let origin = Vec3::new(0.0, 1.5, 0.0);
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let t = intersect_plane(origin, direction, Vec3::splat(0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(t.is_finite());
        assert_eq!(t, PLANE_MISS_NEAR);
    }

    #[test]
    fn raymarch_is_deterministic() {
        let camera = Vec3::new(0.0, 1.5, 1.0);
        let start = Vec3::new(0.4, 0.0, 4.0);
        let end = Vec3::new(0.6, -WATER_DEPTH, 6.0);
        let a = raymarch_water(camera, start, end, 3.0, WATER_DEPTH);
        let b = raymarch_water(camera, start, end, 3.0, WATER_DEPTH);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn raymarch_hit_lies_between_the_bounding_planes() {
        let camera = Vec3::new(0.0, 1.5, 1.0);
        let ray = Vec3::new(0.1, -0.35, 1.0).normalize();
        let top = intersect_plane(camera, ray, Vec3::splat(0.0), Vec3::new(0.0, 1.0, 0.0));
        let bottom = intersect_plane(
            camera,
            ray,
            Vec3::new(0.0, -WATER_DEPTH, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let start = camera + (ray * top);
        let end = camera + (ray * bottom);
        let dist = raymarch_water(camera, start, end, 0.0, WATER_DEPTH);
        assert!(
            dist >= top - 1e-3 && dist <= bottom + 1e-3,
            "hit distance {dist} outside [{top}, {bottom}]"
        );
    }

    #[test]
    fn surface_normal_is_unit_length() {
        for gx in -3..=3 {
            for gz in -3..=3 {
                let position = Vec2::new(gx as f32 * 2.9, gz as f32 * 3.7);
                let n = surface_normal(position, 0.01, 1.3, WATER_DEPTH);
                assert!(
                    (n.length() - 1.0).abs() < 1e-4,
                    "normal {n:?} not unit length"
                );
            }
        }
    }

    #[test]
    fn surface_normal_points_upward() {
        let n = surface_normal(Vec2::new(4.0, 9.0), 0.01, 2.0, WATER_DEPTH);
        assert!(n.y > 0.0, "water normal should face the sky, got {n:?}");
    }
}
