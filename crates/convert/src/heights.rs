//! Injection-height bounds from VEI and the model-layer clamp.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::ConvertError;

/// Emissions above this value are confined to the model's stratospheric layers.
pub const MODEL_LAYER_EMISSION_THRESHOLD: f32 = 3.5;

/// Highest injection height (km) the model layers accept for large emissions.
pub const MODEL_LAYER_TOP: f32 = 20.0;

/// Cap (km) on the lower bound when [`MODEL_LAYER_TOP`] is enforced.
pub const MODEL_LAYER_FLOOR: f32 = 18.0;

/// Scales `(max, min)` for events above VEI 3 and for the rest.
const HIGH_SEVERITY_SCALES: (f64, f64) = (80.0, 20.0);
const LOW_SEVERITY_SCALES: (f64, f64) = (10.0, 1.0);

/// Draws a `(min_heights, max_heights)` pair per VEI, in km.
///
/// Each bound is `|N(1, 2) * scale|` with a wider scale for `vei > 3`. The two
/// draws are ordered afterwards so that `min <= max` for every element.
pub fn vei_to_injection_heights(vei: &[i8], rng: &mut impl Rng) -> (Vec<f32>, Vec<f32>) {
    let mut min_heights = Vec::with_capacity(vei.len());
    let mut max_heights = Vec::with_capacity(vei.len());

    for &v in vei {
        let (scale_max, scale_min) = if v > 3 {
            HIGH_SEVERITY_SCALES
        } else {
            LOW_SEVERITY_SCALES
        };
        let upper = draw_height(scale_max, rng);
        let lower = draw_height(scale_min, rng);
        let (lo, hi) = order_pair(lower, upper);
        min_heights.push(lo);
        max_heights.push(hi);
    }

    (min_heights, max_heights)
}

/// Swaps every `(min, max)` pair that is out of order.
///
/// # Errors
///
/// Returns [`ConvertError::LengthMismatch`] if the slices differ in length.
pub fn order_heights(min: &mut [f32], max: &mut [f32]) -> Result<(), ConvertError> {
    if min.len() != max.len() {
        return Err(ConvertError::LengthMismatch {
            min_len: min.len(),
            max_len: max.len(),
            emission_len: min.len(),
        });
    }
    for (lo, hi) in min.iter_mut().zip(max.iter_mut()) {
        (*lo, *hi) = order_pair(*lo, *hi);
    }
    Ok(())
}

/// Confines large eruptions to the model's stratospheric layers.
///
/// For every event with emission above [`MODEL_LAYER_EMISSION_THRESHOLD`] and
/// a maximum height above [`MODEL_LAYER_TOP`], the maximum becomes
/// `MODEL_LAYER_TOP` and the minimum is capped at [`MODEL_LAYER_FLOOR`].
/// Returns the number of events adjusted.
///
/// # Errors
///
/// Returns [`ConvertError::LengthMismatch`] if the three slices differ in length.
pub fn clamp_to_model_layers(
    min: &mut [f32],
    max: &mut [f32],
    emission: &[f32],
) -> Result<usize, ConvertError> {
    if min.len() != max.len() || max.len() != emission.len() {
        return Err(ConvertError::LengthMismatch {
            min_len: min.len(),
            max_len: max.len(),
            emission_len: emission.len(),
        });
    }

    let mut adjusted = 0;
    for ((lo, hi), &e) in min.iter_mut().zip(max.iter_mut()).zip(emission) {
        if e > MODEL_LAYER_EMISSION_THRESHOLD && *hi > MODEL_LAYER_TOP {
            *hi = MODEL_LAYER_TOP;
            *lo = lo.min(MODEL_LAYER_FLOOR);
            adjusted += 1;
        }
    }
    Ok(adjusted)
}

fn draw_height(scale: f64, rng: &mut impl Rng) -> f32 {
    let z: f64 = rng.sample(StandardNormal);
    ((1.0 + 2.0 * z) * scale).abs() as f32
}

fn order_pair(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
