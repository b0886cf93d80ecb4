use crate::math::Vec2;

/// Wave octaves summed while marching toward the surface.
pub const ITERATIONS_RAYMARCH: u32 = 12;
/// Wave octaves summed for normal estimation, where aliasing shows first.
pub const ITERATIONS_NORMAL: u32 = 37;

// How strongly each octave drags the sample position along its own slope.
const DRAG_MULT: f32 = 0.38;
// Irrational-looking angle step so octave directions never line up.
const DIRECTION_STEP: f32 = 1232.399963;
const FREQUENCY_GROWTH: f32 = 1.18;
const TIME_GROWTH: f32 = 1.07;
const BASE_TIME_MULTIPLIER: f32 = 0.5;
const WEIGHT_DECAY: f32 = 0.8;

/// One directional octave: height value in (0, 1] plus its slope along the
/// wave direction. The slope feeds the position drag for the next octave.
#[derive(Clone, Copy, Debug)]
pub struct WaveSample {
    pub value: f32,
    pub derivative: f32,
}

pub fn wave_octave(position: Vec2, direction: Vec2, frequency: f32, time_shift: f32) -> WaveSample {
    let x = (direction.dot(position) * frequency) + time_shift;
    let value = (x.sin() - 1.0).exp();
    WaveSample {
        value,
        derivative: -value * x.cos(),
    }
}

/// Sums `iterations` octaves of progressively higher-frequency, faster,
/// lower-weight waves. Each octave displaces the sample position by its own
/// derivative, so the octaves interact instead of adding up flatly.
/// The result is a weighted mean, always in (0, 1].
pub fn wave_height(position: Vec2, time: f32, iterations: u32) -> f32 {
    // Decorrelates far-apart regions so octaves never share a phase globally.
    let phase_shift = position.length() * 0.1;

    let mut position = position;
    let mut angle: f32 = 0.0;
    let mut frequency: f32 = 1.0;
    let mut time_multiplier = BASE_TIME_MULTIPLIER;
    let mut weight: f32 = 1.0;
    let mut sum_of_values: f32 = 0.0;
    let mut sum_of_weights: f32 = 0.0;

    for _ in 0..iterations {
        let direction = Vec2::new(angle.sin(), angle.cos());
        let octave = wave_octave(
            position,
            direction,
            frequency,
            (time * time_multiplier) + phase_shift,
        );

        position = position + (direction * (octave.derivative * weight * DRAG_MULT));

        sum_of_values += octave.value * weight;
        sum_of_weights += weight;

        weight *= WEIGHT_DECAY;
        frequency *= FREQUENCY_GROWTH;
        time_multiplier *= TIME_GROWTH;
        angle += DIRECTION_STEP;
    }

    sum_of_values / sum_of_weights
}
