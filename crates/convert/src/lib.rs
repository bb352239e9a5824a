//! # ashfall-convert
//!
//! Conversions between an eruption's severity class (VEI), the total mass it
//! emits, and the altitude band that mass is injected into.
//!
//! ```text
//!              vei_to_total_emission (noisy)
//!   VEI (i8) ───────────────────────────────▶ total emission (f32)
//!      ▲                                             │
//!      └──────── total_emission_to_vei ◀─────────────┘
//!
//!   VEI (i8) ── vei_to_injection_heights ──▶ (min km, max km), min <= max
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use ashfall_convert::{total_emission_to_vei, vei_to_injection_heights, vei_to_total_emission};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let vei = [2i8, 4, 6];
//!
//! let emission = vei_to_total_emission(&vei, &mut rng).unwrap();
//! let back = total_emission_to_vei(&emission).unwrap();
//! assert!(back.iter().zip(&vei).all(|(b, v)| (b - v).abs() <= 1));
//!
//! let (min, max) = vei_to_injection_heights(&vei, &mut rng);
//! assert!(min.iter().zip(&max).all(|(lo, hi)| lo <= hi));
//! ```

mod emission;
mod error;
mod heights;

pub use emission::{EmissionLaw, VEI_MAX, narrow_vei, total_emission_to_vei, vei_to_total_emission};
pub use error::ConvertError;
pub use heights::{
    MODEL_LAYER_EMISSION_THRESHOLD, MODEL_LAYER_FLOOR, MODEL_LAYER_TOP, clamp_to_model_layers,
    order_heights, vei_to_injection_heights,
};
