//! Sparse-to-regular projection.

use tracing::{debug, info, warn};

use crate::axis::RegularAxis;
use crate::config::ResampleConfig;
use crate::error::ResampleError;
use crate::result::ResampleResult;

/// Projects a sorted sparse time series onto a regular axis.
///
/// Each time is assigned its nearest axis point. When several times share a
/// point, only the one closest to it is kept, the earliest winning ties.
/// The result never assigns two times to one point, and every retained time
/// is normally within half a period of its point; a larger offset, possible
/// with explicit year bounds that do not cover the data, is logged.
///
/// # Errors
///
/// - [`ResampleError::InvalidConfig`] if `config` fails validation.
/// - [`ResampleError::EmptyInput`] if `times` is empty.
/// - [`ResampleError::NonFiniteInput`] on NaN or infinite times.
/// - [`ResampleError::Unsorted`] if `times` decreases anywhere.
/// - [`ResampleError::EmptyGrid`] if trimming removes every axis point.
#[tracing::instrument(skip(times, config), fields(n = times.len()))]
pub fn sparse_to_regular(
    times: &[f64],
    config: &ResampleConfig,
) -> Result<ResampleResult, ResampleError> {
    config.validate()?;
    check_times(times)?;

    let (first, last) = match (times.first(), times.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return Err(ResampleError::EmptyInput),
    };
    let start_year = config.start_year().unwrap_or(first.floor() as i32);
    let end_year = config.end_year().unwrap_or(last.floor() as i32 + 1);
    if end_year <= start_year {
        return Err(ResampleError::InvalidConfig {
            reason: format!("end_year ({end_year}) must be after start_year ({start_year})"),
        });
    }

    let steps = config.steps_per_year();
    let points = (end_year - start_year) as usize * steps + 1;
    let len = points.saturating_sub(config.trim());
    if len == 0 {
        return Err(ResampleError::EmptyGrid {
            start_year,
            end_year,
            points,
            trim: config.trim(),
        });
    }
    let axis = RegularAxis::new(start_year, steps, len);
    debug!(start_year, end_year, len, "built regular axis");

    let assigned: Vec<usize> = times
        .iter()
        .map(|&t| axis.nearest(t).unwrap_or(0))
        .collect();

    let mut sparse_mask = Vec::new();
    let mut grid_mask = Vec::new();
    let mut max_offset = 0.0_f64;
    let mut run_start = 0;
    while run_start < times.len() {
        let grid_idx = assigned[run_start];
        let run_len = assigned[run_start..]
            .iter()
            .take_while(|&&g| g == grid_idx)
            .count();
        let target = axis.values()[grid_idx];
        let mut best = run_start;
        for i in run_start + 1..run_start + run_len {
            if (times[i] - target).abs() < (times[best] - target).abs() {
                best = i;
            }
        }
        max_offset = max_offset.max((times[best] - target).abs());
        sparse_mask.push(best);
        grid_mask.push(grid_idx);
        run_start += run_len;
    }

    let result = ResampleResult::new(axis, sparse_mask, grid_mask, times.len(), max_offset);
    if result.within_half_period() {
        info!(
            retained = result.len(),
            dropped = times.len() - result.len(),
            "all retained times within half a period of the axis"
        );
    } else {
        warn!(
            max_offset = result.max_offset(),
            "some retained times are more than half a period from the axis"
        );
    }
    Ok(result)
}

fn check_times(times: &[f64]) -> Result<(), ResampleError> {
    if times.is_empty() {
        return Err(ResampleError::EmptyInput);
    }
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(ResampleError::NonFiniteInput { index });
    }
    if let Some(w) = times.windows(2).position(|w| w[1] < w[0]) {
        return Err(ResampleError::Unsorted { index: w + 1 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_rejected() {
        assert_eq!(
            sparse_to_regular(&[], &ResampleConfig::new()),
            Err(ResampleError::EmptyInput)
        );
    }

    #[test]
    fn nan_rejected() {
        assert_eq!(
            sparse_to_regular(&[1.0, f64::NAN], &ResampleConfig::new()),
            Err(ResampleError::NonFiniteInput { index: 1 })
        );
    }

    #[test]
    fn unsorted_rejected() {
        assert_eq!(
            sparse_to_regular(&[1.0, 2.0, 1.5], &ResampleConfig::new()),
            Err(ResampleError::Unsorted { index: 2 })
        );
    }

    #[test]
    fn over_trimmed_grid_rejected() {
        let config = ResampleConfig::new().with_trim(13);
        assert!(matches!(
            sparse_to_regular(&[1.0, 1.5], &config),
            Err(ResampleError::EmptyGrid { points: 13, .. })
        ));
    }

    #[test]
    fn default_bounds_follow_data() {
        let r = sparse_to_regular(&[1850.2, 1852.7], &ResampleConfig::new()).unwrap();
        assert_eq!(r.axis().start_year(), 1850);
        // 1850..=1853 monthly, last point trimmed.
        assert_eq!(r.axis().len(), 36);
    }

    #[test]
    fn run_keeps_earliest_on_tie() {
        // Both sit exactly 1/16 from the 0.25 point.
        let t = [0.1875, 0.3125];
        let config = ResampleConfig::new().with_steps_per_year(4);
        let r = sparse_to_regular(&t, &config).unwrap();
        assert_eq!(r.sparse_mask(), &[0]);
        assert_eq!(r.grid_mask(), &[1]);
    }
}
