use crate::math::{Mat3, Vec3};

// ACES filmic fit: input/output color-space matrices around a rational curve.
const ACES_INPUT: Mat3 = Mat3::from_rows(
    Vec3::new(0.59719, 0.35458, 0.04823),
    Vec3::new(0.07600, 0.90834, 0.01566),
    Vec3::new(0.02840, 0.13383, 0.83777),
);

const ACES_OUTPUT: Mat3 = Mat3::from_rows(
    Vec3::new(1.60475, -0.53108, -0.07367),
    Vec3::new(-0.10208, 1.10813, -0.00605),
    Vec3::new(-0.00327, -0.07276, 1.07602),
);

const GAMMA: f32 = 2.2;

fn rational_curve(v: Vec3) -> Vec3 {
    let a = (v * (v + Vec3::splat(0.0245786))) - Vec3::splat(0.000090537);
    let b = (v * ((v * 0.983729) + Vec3::splat(0.4329510))) + Vec3::splat(0.238081);
    Vec3::new(a.x / b.x, a.y / b.y, a.z / b.z)
}

/// Compresses unbounded linear color into [0, 1] and applies gamma.
pub fn aces_tonemap(color: Vec3) -> Vec3 {
    let fitted = ACES_OUTPUT.mul_vec(rational_curve(ACES_INPUT.mul_vec(color)));
    let clamped = fitted.clamp01();
    Vec3::new(
        clamped.x.powf(1.0 / GAMMA),
        clamped.y.powf(1.0 / GAMMA),
        clamped.z.powf(1.0 / GAMMA),
    )
}

/// Packs a tonemapped color into a 32-bit word: R in the high byte, then G
/// and B, with a fixed 0xFF low byte. Big-endian bytes of the result are
/// the RGBA channels.
pub fn encode_rgba(color: Vec3) -> u32 {
    (((color.x * 255.0) as u32 & 0xFF) << 24)
        | (((color.y * 255.0) as u32 & 0xFF) << 16)
        | (((color.z * 255.0) as u32 & 0xFF) << 8)
        | 0xFF
}
