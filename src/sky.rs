use crate::math::{lerp, Vec3};

const RAYLEIGH_TINT: Vec3 = Vec3::new(5.5, 13.0, 22.4);
const SUN_ORBIT_SPEED: f32 = 0.1;
const SUN_GLARE_POWER: f32 = 720.0;
const SUN_GLARE_INTENSITY: f32 = 210.0;

/// The sun orbits slowly overhead; at t = 0 it sits at normalize(0, 1, 1).
pub fn sun_direction(time: f32) -> Vec3 {
    Vec3::new((time * SUN_ORBIT_SPEED).sin(), 1.0, (time * SUN_ORBIT_SPEED).cos()).normalize()
}

/// Cheap analytic atmosphere: a Rayleigh-like blue tint shaped by two
/// reciprocal falloffs (view elevation and sun elevation), a squared
/// forward-scattering term toward the sun, and horizon brightening.
/// Unbounded positive linear color; the tonemapper handles the range.
pub fn atmosphere(ray: Vec3, sun: Vec3) -> Vec3 {
    let sun_y = sun.y.max(-0.07);
    let view_falloff = 1.0 / (ray.y + 0.1);
    let sun_falloff = 1.0 / ((sun_y * 11.0) + 1.0);
    let forward_scatter = sun.dot(ray).abs().powf(2.0);

    let blue = RAYLEIGH_TINT / 22.4;
    let sun_color = lerp(
        Vec3::splat(1.0),
        (Vec3::splat(1.0) - blue).max(Vec3::splat(0.0)),
        sun_falloff,
    );
    let sky = blue * sun_color;
    let attenuated = (sky - (RAYLEIGH_TINT * (0.002 * (view_falloff - (6.0 * sun_y * sun_y)))))
        .max(Vec3::splat(0.0))
        * (view_falloff * (0.24 + (forward_scatter * 0.24)));

    attenuated * (1.0 + (1.0 - ray.y).powf(3.0))
}

pub fn sky_color(ray: Vec3, time: f32) -> Vec3 {
    atmosphere(ray, sun_direction(time)) * 0.5
}

/// Sun-disk glare along the view ray, a very tight highlight.
pub fn sun_glare(ray: Vec3, time: f32) -> f32 {
    ray.dot(sun_direction(time)).max(0.0).powf(SUN_GLARE_POWER) * SUN_GLARE_INTENSITY
}
