//! Calendar dates for generated events.
//!
//! Two policies produce `(year, month, day)` triples:
//!
//! - [`random_walk_dates`]: years climb by independent 0/1 steps, months and
//!   days are uniform and sorted within each year.
//! - [`point_process_dates`]: dates are read off point-process arrival offsets,
//!   with the whole realization redrawn when two arrivals share a date.

use ashfall_calendar::{NoLeapDate, YEAR_LIMIT};
use ashfall_fpp::{FppError, PoissonForcingProcess};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::GenerateError;

/// Parallel year, month and day columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDates {
    pub(crate) years: Vec<i16>,
    pub(crate) months: Vec<i8>,
    pub(crate) days: Vec<i8>,
}

impl EventDates {
    /// Builds dates from already-ordered calendar dates.
    pub(crate) fn from_dates(dates: &[NoLeapDate]) -> Self {
        Self {
            years: dates.iter().map(|d| d.year() as i16).collect(),
            months: dates.iter().map(|d| d.month() as i8).collect(),
            days: dates.iter().map(|d| d.day() as i8).collect(),
        }
    }

    /// Returns the years.
    pub fn years(&self) -> &[i16] {
        &self.years
    }

    /// Returns the months (1..=12).
    pub fn months(&self) -> &[i8] {
        &self.months
    }

    /// Returns the days of month.
    pub fn days(&self) -> &[i8] {
        &self.days
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns `true` if there are no dates.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Random-walk date policy.
///
/// Year `i` is `init_year` plus the sum of `i + 1` independent draws from
/// `{0, 1}`. Months are uniform on `1..=12` and days on `1..=28`. Within
/// each run of equal years the months are sorted ascending and, separately,
/// the days are sorted ascending. Dates past year 9999 are dropped with a
/// warning.
pub fn random_walk_dates(size: usize, init_year: i32, rng: &mut impl Rng) -> EventDates {
    // About two dates fit per remaining year; the vectors grow past that if needed.
    let capacity = size.min(2 * (YEAR_LIMIT - init_year + 1).max(0) as usize);
    let mut year = init_year;
    let mut dates = EventDates {
        years: Vec::with_capacity(capacity),
        months: Vec::with_capacity(capacity),
        days: Vec::with_capacity(capacity),
    };

    for _ in 0..size {
        year += rng.random_range(0..=1);
        if year > YEAR_LIMIT {
            break;
        }
        dates.years.push(year as i16);
        dates.months.push(rng.random_range(1..=12));
        dates.days.push(rng.random_range(1..=28));
    }

    if dates.len() < size {
        warn!(
            requested = size,
            kept = dates.len(),
            "dates past year {YEAR_LIMIT} truncated; fewer events than requested"
        );
    }

    sort_within_years(&mut dates);
    dates
}

/// Sorts months and days independently inside every run of equal years.
fn sort_within_years(dates: &mut EventDates) {
    let mut start = 0;
    while start < dates.years.len() {
        let year = dates.years[start];
        let end = start
            + dates.years[start..]
                .iter()
                .take_while(|&&y| y == year)
                .count();
        dates.months[start..end].sort_unstable();
        dates.days[start..end].sort_unstable();
        start = end;
    }
}

/// Point-process date policy.
///
/// Draws realizations from `process` until one is non-empty and maps every
/// arrival offset to a distinct calendar date, giving up after
/// `max_attempts`. Returns the dates and the matching amplitudes.
///
/// # Errors
///
/// Returns [`GenerateError::DegenerateProcess`] when no realization is usable
/// within `max_attempts`, or propagates process and calendar failures.
pub fn point_process_dates(
    process: &PoissonForcingProcess,
    init_year: i32,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<(EventDates, Vec<f64>), GenerateError> {
    for attempt in 1..=max_attempts {
        let realization = match process.realize(init_year, rng) {
            Ok(r) => r,
            Err(FppError::EmptyRealization { drawn }) => {
                debug!(attempt, drawn, "empty realization, redrawing");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let dates = realization
            .arrival_times()
            .iter()
            .map(|&t| NoLeapDate::from_year_offset(init_year, t))
            .collect::<Result<Vec<_>, _>>()?;

        // Arrivals are sorted, so equal dates are adjacent.
        if let Some(i) = dates.windows(2).position(|w| w[0] == w[1]) {
            debug!(
                attempt,
                index = i,
                year = dates[i].year(),
                month = dates[i].month(),
                day = dates[i].day(),
                "date collision, redrawing"
            );
            continue;
        }

        debug!(attempt, events = dates.len(), "collision-free realization");
        let (_, amplitudes) = realization.into_parts();
        return Ok((EventDates::from_dates(&dates), amplitudes));
    }

    Err(GenerateError::DegenerateProcess {
        attempts: max_attempts,
    })
}

/// Returns `true` if, inside every run of equal years, months and days are
/// each non-decreasing.
pub fn is_ordered_within_years(years: &[i16], months: &[i8], days: &[i8]) -> bool {
    (1..years.len()).all(|i| {
        years[i] != years[i - 1] || (months[i] >= months[i - 1] && days[i] >= days[i - 1])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ashfall_fpp::FppConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_walk_shape_and_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let dates = random_walk_dates(500, 1850, &mut rng);
        assert_eq!(dates.len(), 500);
        assert!(dates.years().windows(2).all(|w| w[1] - w[0] <= 1 && w[1] >= w[0]));
        assert!((1850..=1851).contains(&dates.years()[0]));
        assert!(dates.months().iter().all(|m| (1..=12).contains(m)));
        assert!(dates.days().iter().all(|d| (1..=28).contains(d)));
    }

    #[test]
    fn random_walk_sorted_within_years() {
        let mut rng = StdRng::seed_from_u64(2);
        let dates = random_walk_dates(2000, 1, &mut rng);
        assert!(is_ordered_within_years(
            dates.years(),
            dates.months(),
            dates.days()
        ));
    }

    #[test]
    fn random_walk_truncates_at_year_limit() {
        let mut rng = StdRng::seed_from_u64(3);
        let dates = random_walk_dates(1000, 9900, &mut rng);
        assert!(dates.len() < 1000);
        assert!(dates.years().iter().all(|&y| i32::from(y) <= YEAR_LIMIT));
        assert_eq!(dates.months().len(), dates.len());
        assert_eq!(dates.days().len(), dates.len());
    }

    #[test]
    fn random_walk_huge_request_is_truncated() {
        let mut rng = StdRng::seed_from_u64(8);
        let dates = random_walk_dates(1 << 40, 1850, &mut rng);
        assert!(!dates.is_empty());
        assert!(dates.len() < 100_000);
        assert_eq!(i32::from(*dates.years().last().unwrap()), YEAR_LIMIT);
    }

    #[test]
    fn sort_within_years_leaves_year_boundaries() {
        let mut dates = EventDates {
            years: vec![2000, 2000, 2001, 2001, 2001],
            months: vec![5, 2, 9, 1, 4],
            days: vec![3, 20, 1, 7, 2],
        };
        sort_within_years(&mut dates);
        assert_eq!(dates.months, vec![2, 5, 1, 4, 9]);
        assert_eq!(dates.days, vec![3, 20, 1, 2, 7]);
    }

    #[test]
    fn point_process_dates_are_unique_and_sorted() {
        let process =
            PoissonForcingProcess::new(FppConfig::new().with_max_time(3000.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let (dates, amplitudes) = point_process_dates(&process, 1850, 100, &mut rng).unwrap();
        assert_eq!(dates.len(), amplitudes.len());
        let triples: Vec<_> = (0..dates.len())
            .map(|i| (dates.years()[i], dates.months()[i], dates.days()[i]))
            .collect();
        assert!(triples.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn point_process_gives_up_when_always_colliding() {
        // About 500 pulses squeezed into one year cannot avoid sharing a day.
        let process = PoissonForcingProcess::new(
            FppConfig::new().with_gamma(500.0).with_max_time(1.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            point_process_dates(&process, 1850, 10, &mut rng).unwrap_err(),
            GenerateError::DegenerateProcess { attempts: 10 }
        );
    }

    #[test]
    fn point_process_gives_up_when_always_empty() {
        let process = PoissonForcingProcess::new(
            FppConfig::new().with_gamma(1e-9).with_max_time(1.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(
            point_process_dates(&process, 1850, 7, &mut rng).unwrap_err(),
            GenerateError::DegenerateProcess { attempts: 7 }
        );
    }

    #[test]
    fn ordered_within_years_detects_violation() {
        assert!(is_ordered_within_years(&[1, 1, 2], &[3, 4, 1], &[5, 5, 1]));
        assert!(!is_ordered_within_years(&[1, 1], &[4, 3], &[1, 2]));
        assert!(!is_ordered_within_years(&[1, 1], &[3, 3], &[2, 1]));
    }
}
