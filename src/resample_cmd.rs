//! Resample command: project a record set's eruption dates onto a monthly axis.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use ashfall_calendar::NoLeapDate;
use ashfall_io::{RecordSet, WriterConfig, linspace_path, read_record_set, write_linspace};
use ashfall_resample::{ResampleConfig, sparse_to_regular};

use crate::cli::ResampleArgs;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Run the resampling pipeline.
pub fn run(args: ResampleArgs) -> Result<()> {
    let _cmd = info_span!("resample").entered();

    let record_set = read_record_set(&args.file)
        .with_context(|| format!("failed to read record set: {}", args.file.display()))?;
    let times = decimal_years(&record_set)?;

    let mut config = ResampleConfig::new();
    if let Some(y) = args.start_year {
        config = config.with_start_year(y);
    }
    if let Some(y) = args.end_year {
        config = config.with_end_year(y);
    }
    if let Some(name) = args.last_month.as_deref() {
        match parse_month(name) {
            Some(month) => config = config.with_last_month(month),
            None => warn!(name, "unknown month name, ending the axis in December"),
        }
    }

    let result = sparse_to_regular(&times, &config).context("resampling failed")?;
    let values: Vec<f64> = record_set
        .total_emission()
        .iter()
        .map(|&e| f64::from(e))
        .collect();
    let grid = result.resample_values(&values)?;
    info!(
        events = times.len(),
        kept = result.len(),
        points = grid.len(),
        "resampled onto monthly axis"
    );

    let output = args.output.unwrap_or_else(|| linspace_path(&args.file));
    write_linspace(&output, result.axis().values(), &grid, &WriterConfig::default())
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    Ok(())
}

/// Converts each record's date to a decimal year on the no-leap calendar.
///
/// Days are not calendar-checked in a record set, so a day past the end of
/// its month counts as the month's last day.
fn decimal_years(record_set: &RecordSet) -> Result<Vec<f64>> {
    record_set
        .year()
        .iter()
        .zip(record_set.month())
        .zip(record_set.day())
        .enumerate()
        .map(|(i, ((&y, &m), &d))| {
            let month = u8::try_from(m).with_context(|| format!("record {i}: month {m}"))?;
            let day = u8::try_from(d).with_context(|| format!("record {i}: day {d}"))?;
            let date = NoLeapDate::new_saturating(i32::from(y), month, day)
                .with_context(|| format!("record {i}: invalid date {y}-{m}-{d}"))?;
            Ok(date.decimal_year())
        })
        .collect()
}

/// Parses a month name or its first three letters, case-insensitively.
fn parse_month(name: &str) -> Option<u8> {
    let name = name.trim().to_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|full| full.starts_with(&name))
        .and_then(|i| u8::try_from(i + 1).ok())
}
