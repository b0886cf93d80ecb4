use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::config::RenderFrameConfig;
use crate::math::{lerp, reflect, schlick, Vec2, Vec3};
use crate::sky::{sky_color, sun_glare};
use crate::tonemap::{aces_tonemap, encode_rgba};
use crate::water::{intersect_plane, raymarch_water, surface_normal, WATER_DEPTH};

const CAMERA_HEIGHT: f32 = 1.5;
const CAMERA_DRIFT: f32 = 0.2;
const FOCAL_LENGTH: f32 = 1.5;
const FRESNEL_F0: f32 = 0.04;
const NORMAL_SAMPLE_EPSILON: f32 = 0.01;
const SCATTER_TINT: Vec3 = Vec3::new(0.0293, 0.0698, 0.1717);
const EXPOSURE: f32 = 2.0;

/// View ray for a pixel center, +y up, looking down +z.
pub fn camera_ray(pixel: Vec2, resolution: Vec2) -> Vec3 {
    let aspect = resolution.x / resolution.y;
    let u = (((pixel.x / resolution.x) * 2.0) - 1.0) * aspect;
    let v = ((pixel.y / resolution.y) * 2.0) - 1.0;
    Vec3::new(u, v, FOCAL_LENGTH).normalize()
}

/// The whole kernel for one pixel: pure in (pixel, resolution, time).
/// Rays at or above the horizon take the sky path; everything else must hit
/// the water slab.
pub fn shade_pixel(pixel: Vec2, resolution: Vec2, time: f32) -> Vec3 {
    let ray = camera_ray(pixel, resolution);
    if ray.y >= 0.0 {
        return sky_color(ray, time) + Vec3::splat(sun_glare(ray, time));
    }
    shade_water(ray, time)
}

fn shade_water(ray: Vec3, time: f32) -> Vec3 {
    let up = Vec3::new(0.0, 1.0, 0.0);
    let origin = Vec3::new(time * CAMERA_DRIFT, CAMERA_HEIGHT, 1.0);

    // Bound the march between the undisturbed surface and the wave floor.
    let top_hit = intersect_plane(origin, ray, Vec3::splat(0.0), up);
    let bottom_hit = intersect_plane(origin, ray, Vec3::new(0.0, -WATER_DEPTH, 0.0), up);
    let march_start = origin + (ray * top_hit);
    let march_end = origin + (ray * bottom_hit);

    let dist = raymarch_water(origin, march_start, march_end, time, WATER_DEPTH);
    let hit = origin + (ray * dist);

    let mut normal = surface_normal(
        Vec2::new(hit.x, hit.z),
        NORMAL_SAMPLE_EPSILON,
        time,
        WATER_DEPTH,
    );
    // Distant water flattens toward +y; high-frequency normal detail at
    // grazing angles only reads as noise.
    let smoothing = 0.8 * ((dist * 0.01).sqrt() * 1.1).min(1.0);
    normal = lerp(normal, up, smoothing);

    let fresnel = schlick((-normal).dot(ray).max(0.0), FRESNEL_F0);

    // Reflections never point back into the water; there is no recursion to
    // resolve what they would see there.
    let mut reflected = reflect(ray, normal).normalize();
    reflected.y = reflected.y.abs();

    let reflection = sky_color(reflected, time) + Vec3::splat(sun_glare(reflected, time));
    let scattering = SCATTER_TINT * (0.1 * (0.2 + ((hit.y + WATER_DEPTH) / WATER_DEPTH)));

    (reflection * fresnel) + scattering
}

/// Renders one frame, one independent kernel invocation per pixel.
pub fn render_frame(frame: &RenderFrameConfig) -> RgbaImage {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let resolution = Vec2::new(frame.width as f32, frame.height as f32);
    let mut packed = vec![0u32; width * height];

    // Minimal parallelism stage: split work by scanlines.
    packed
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            // The kernel keeps +y up; image rows run top-down.
            let pixel_y = (frame.height - 1 - y as u32) as f32;
            for (x, slot) in row.iter_mut().enumerate() {
                let color = shade_pixel(Vec2::new(x as f32, pixel_y), resolution, frame.time);
                *slot = encode_rgba(aces_tonemap(color * EXPOSURE));
            }
        });

    let mut image = RgbaImage::new(frame.width, frame.height);
    for y in 0..height {
        for x in 0..width {
            let bytes = packed[(y * width) + x].to_be_bytes();
            image.put_pixel(x as u32, y as u32, Rgba(bytes));
        }
    }

    image
}
