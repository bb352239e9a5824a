//! Generator variants and the shared generation pipeline.

use ashfall_calendar::{Doy, YEAR_LIMIT};
use ashfall_convert::{total_emission_to_vei, vei_to_injection_heights, vei_to_total_emission};
use ashfall_fpp::{FppConfig, PoissonForcingProcess};
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{info, warn};

use crate::dates::{EventDates, point_process_dates, random_walk_dates};
use crate::error::GenerateError;
use crate::sequence::EventSequence;
use crate::table::EruptionTable;

/// Latitude given to every synthetic event.
pub const PLACEHOLDER_LATITUDE: f32 = 0.0;
/// Longitude given to every synthetic event.
pub const PLACEHOLDER_LONGITUDE: f32 = 1.0;

/// Parameters of the point-process generator.
///
/// The process window is sized at generation time so that the expected
/// number of pulses equals the requested event count.
#[derive(Debug, Clone)]
pub struct PointProcessParams {
    fpp: FppConfig,
    max_attempts: usize,
}

impl Default for PointProcessParams {
    fn default() -> Self {
        Self::new()
    }
}

impl PointProcessParams {
    /// Creates parameters with defaults: the default [`FppConfig`] and at most
    /// 100 realizations per run.
    pub fn new() -> Self {
        Self {
            fpp: FppConfig::new(),
            max_attempts: 100,
        }
    }

    /// Sets the process configuration. Its `max_time` is replaced at
    /// generation time.
    pub fn with_fpp(mut self, fpp: FppConfig) -> Self {
        self.fpp = fpp;
        self
    }

    /// Sets the number of realizations tried before giving up.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the process configuration.
    pub fn fpp(&self) -> &FppConfig {
        &self.fpp
    }

    /// Returns the number of realizations tried before giving up.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Validates these parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidArgument`] if `max_attempts` is zero, or
    /// propagates the process configuration's own validation error.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.max_attempts == 0 {
            return Err(GenerateError::InvalidArgument {
                reason: "max_attempts must be > 0".to_string(),
            });
        }
        self.fpp.validate()?;
        Ok(())
    }
}

/// Parameters of the regular-interval generator.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularIntervalsParams {
    year_step: u16,
    month: u8,
    day: u8,
    pattern: Vec<f32>,
}

impl Default for RegularIntervalsParams {
    fn default() -> Self {
        Self::new()
    }
}

impl RegularIntervalsParams {
    /// Creates parameters with defaults: an event every 2 years on March 15,
    /// emissions cycling through `[5, 1000, 40, 200]`.
    pub fn new() -> Self {
        Self {
            year_step: 2,
            month: 3,
            day: 15,
            pattern: vec![5.0, 1000.0, 40.0, 200.0],
        }
    }

    /// Sets the number of years between events.
    pub fn with_year_step(mut self, year_step: u16) -> Self {
        self.year_step = year_step;
        self
    }

    /// Sets the month and day every event falls on.
    pub fn with_date(mut self, month: u8, day: u8) -> Self {
        self.month = month;
        self.day = day;
        self
    }

    /// Sets the repeating emission pattern.
    pub fn with_pattern(mut self, pattern: Vec<f32>) -> Self {
        self.pattern = pattern;
        self
    }

    /// Returns the number of years between events.
    pub fn year_step(&self) -> u16 {
        self.year_step
    }

    /// Returns the `(month, day)` every event falls on.
    pub fn date(&self) -> (u8, u8) {
        (self.month, self.day)
    }

    /// Returns the repeating emission pattern.
    pub fn pattern(&self) -> &[f32] {
        &self.pattern
    }

    /// Validates these parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidArgument`] for a zero step or an empty
    /// or non-positive pattern, and [`GenerateError::Calendar`] for a date not
    /// in the no-leap calendar.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.year_step == 0 {
            return Err(GenerateError::InvalidArgument {
                reason: "year_step must be > 0".to_string(),
            });
        }
        Doy::from_month_day(self.month, self.day)?;
        if self.pattern.is_empty() {
            return Err(GenerateError::InvalidArgument {
                reason: "emission pattern must not be empty".to_string(),
            });
        }
        if let Some(e) = self.pattern.iter().find(|e| !e.is_finite() || **e <= 0.0) {
            return Err(GenerateError::InvalidArgument {
                reason: format!("emission pattern values must be finite and > 0, got {e}"),
            });
        }
        Ok(())
    }
}

/// Selector for a generator variant, indexed as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Random-walk dates, normally distributed VEI.
    RandomNormal,
    /// Dates and emissions from a filtered Poisson process.
    PointProcess,
    /// Three fixed events around the first year.
    SingleEvent,
    /// Evenly spaced events with a cycling emission pattern.
    RegularIntervals,
    /// Events read from an eruption table.
    FromRecord,
}

impl GeneratorKind {
    /// Every variant, in index order.
    pub const ALL: [Self; 5] = [
        Self::RandomNormal,
        Self::PointProcess,
        Self::SingleEvent,
        Self::RegularIntervals,
        Self::FromRecord,
    ];

    /// Looks up a variant by its index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns this variant's index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the variant's name.
    pub fn name(self) -> &'static str {
        match self {
            Self::RandomNormal => "RandomNormal",
            Self::PointProcess => "PointProcess",
            Self::SingleEvent => "SingleEvent",
            Self::RegularIntervals => "RegularIntervals",
            Self::FromRecord => "FromRecord",
        }
    }

    /// Describes how the variant makes its data. Stored as dataset notes.
    pub fn description(self) -> &'static str {
        match self {
            Self::RandomNormal => {
                "Dates from a random walk in years; VEI drawn from N(4, 1), rounded and \
                 clamped to 0..=6; emissions from a noisy power law in VEI."
            }
            Self::PointProcess => {
                "All emissions are created from a filtered Poisson process (FPP); \
                 VEI is derived from the emissions."
            }
            Self::SingleEvent => {
                "Three fixed eruptions around the first year, for smoke testing."
            }
            Self::RegularIntervals => {
                "Eruptions at a fixed year step with a repeating emission pattern."
            }
            Self::FromRecord => "Dates and emissions read from an eruption table.",
        }
    }
}

/// An event generator.
///
/// Every variant produces dates and a primary signal (VEI or emission), after
/// which group ids, coordinates and injection heights are filled in the same
/// way for all of them.
///
/// # Example
///
/// ```
/// use ashfall_generate::Generator;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let events = Generator::RandomNormal.generate(100, 1850, &mut rng).unwrap();
/// assert_eq!(events.len(), 100);
/// assert!(events.vei().iter().all(|v| (0..=6).contains(v)));
/// ```
#[derive(Debug, Clone)]
pub enum Generator {
    /// Random-walk dates, normally distributed VEI.
    RandomNormal,
    /// Dates and emissions from a filtered Poisson process.
    PointProcess(PointProcessParams),
    /// Three fixed events around the first year.
    SingleEvent,
    /// Evenly spaced events with a cycling emission pattern.
    RegularIntervals(RegularIntervalsParams),
    /// Events read from an eruption table.
    FromRecord(EruptionTable),
}

/// Dates and primary signal produced by a variant.
struct Primary {
    dates: EventDates,
    vei: Vec<i8>,
    total_emission: Vec<f32>,
    coordinates: Option<(Vec<f32>, Vec<f32>)>,
    heights: Option<(Vec<f32>, Vec<f32>)>,
}

impl Generator {
    /// Returns the variant selector.
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::RandomNormal => GeneratorKind::RandomNormal,
            Self::PointProcess(_) => GeneratorKind::PointProcess,
            Self::SingleEvent => GeneratorKind::SingleEvent,
            Self::RegularIntervals(_) => GeneratorKind::RegularIntervals,
            Self::FromRecord(_) => GeneratorKind::FromRecord,
        }
    }

    /// Describes how this generator makes its data.
    pub fn description(&self) -> &'static str {
        self.kind().description()
    }

    /// Generates an event sequence.
    ///
    /// `size` is a request: the point process draws a random count with that
    /// mean, dates past year 9999 are dropped, `SingleEvent` always yields
    /// three events and `FromRecord` yields the table's records.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidArgument`] if `size <= 0`, `init_year` is
    ///   outside `0..=9999`, or variant parameters are invalid.
    /// - [`GenerateError::NoEventsInRange`] if every date fell past 9999.
    /// - [`GenerateError::DegenerateProcess`] if the point process found no
    ///   collision-free realization.
    /// - Conversion errors from the magnitude laws.
    #[tracing::instrument(skip(self, rng), fields(kind = self.kind().name()))]
    pub fn generate(
        &self,
        size: i64,
        init_year: i64,
        rng: &mut impl Rng,
    ) -> Result<EventSequence, GenerateError> {
        let requested = check_size(size)?;
        let init_year = check_init_year(init_year)?;

        let primary = match self {
            Self::RandomNormal => random_normal(requested, init_year, rng)?,
            Self::PointProcess(params) => point_process(params, requested, init_year, rng)?,
            Self::SingleEvent => single_event(init_year)?,
            Self::RegularIntervals(params) => regular_intervals(params, requested, init_year)?,
            Self::FromRecord(table) => from_record(table)?,
        };

        let events = fill_auxiliary_fields(primary, requested, rng);
        if events.len() != requested {
            info!(
                requested,
                realized = events.len(),
                "realized size differs from request"
            );
        }
        Ok(events)
    }
}

fn check_size(size: i64) -> Result<usize, GenerateError> {
    if size <= 0 {
        return Err(GenerateError::InvalidArgument {
            reason: format!("size must be > 0, got {size}"),
        });
    }
    usize::try_from(size).map_err(|_| GenerateError::InvalidArgument {
        reason: format!("size {size} does not fit in memory"),
    })
}

fn check_init_year(init_year: i64) -> Result<i32, GenerateError> {
    if !(0..=i64::from(YEAR_LIMIT)).contains(&init_year) {
        return Err(GenerateError::InvalidArgument {
            reason: format!("init_year must be within 0..={YEAR_LIMIT}, got {init_year}"),
        });
    }
    Ok(init_year as i32)
}

fn random_normal(
    size: usize,
    init_year: i32,
    rng: &mut impl Rng,
) -> Result<Primary, GenerateError> {
    let dates = random_walk_dates(size, init_year, rng);
    if dates.is_empty() {
        return Err(GenerateError::NoEventsInRange { init_year });
    }
    let vei: Vec<i8> = (0..dates.len())
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            (4.0 + z).round().clamp(0.0, 6.0) as i8
        })
        .collect();
    let total_emission = vei_to_total_emission(&vei, rng)?;
    Ok(Primary {
        dates,
        vei,
        total_emission,
        coordinates: None,
        heights: None,
    })
}

fn point_process(
    params: &PointProcessParams,
    size: usize,
    init_year: i32,
    rng: &mut impl Rng,
) -> Result<Primary, GenerateError> {
    params.validate()?;
    let fpp = params
        .fpp()
        .clone()
        .with_max_time(size as f64 / params.fpp().gamma());
    let process = PoissonForcingProcess::new(fpp)?;
    let (dates, amplitudes) = point_process_dates(&process, init_year, params.max_attempts(), rng)?;
    let total_emission: Vec<f32> = amplitudes.iter().map(|&a| a as f32).collect();
    let vei = total_emission_to_vei(&total_emission)?;
    Ok(Primary {
        dates,
        vei,
        total_emission,
        coordinates: None,
        heights: None,
    })
}

fn single_event(init_year: i32) -> Result<Primary, GenerateError> {
    const OFFSETS: [i32; 3] = [-1, 2, 100];
    const EMISSIONS: [f32; 3] = [1.0, 400.0, 1.0];

    let first = init_year + OFFSETS[0];
    let last = init_year + OFFSETS[2];
    if first < 0 || last > YEAR_LIMIT {
        return Err(GenerateError::InvalidArgument {
            reason: format!(
                "single-event years {first}..={last} must lie within 0..={YEAR_LIMIT}"
            ),
        });
    }

    let dates = EventDates {
        years: OFFSETS.iter().map(|o| (init_year + o) as i16).collect(),
        months: vec![1; 3],
        days: vec![15; 3],
    };
    let total_emission = EMISSIONS.to_vec();
    let vei = total_emission_to_vei(&total_emission)?;
    Ok(Primary {
        dates,
        vei,
        total_emission,
        coordinates: None,
        heights: None,
    })
}

fn regular_intervals(
    params: &RegularIntervalsParams,
    size: usize,
    init_year: i32,
) -> Result<Primary, GenerateError> {
    params.validate()?;
    let step = i32::from(params.year_step());
    let (month, day) = params.date();

    let years: Vec<i16> = (0..size)
        .map_while(|i| {
            let year = i32::try_from(i).ok()?.checked_mul(step)? + init_year;
            (year <= YEAR_LIMIT).then_some(year as i16)
        })
        .collect();
    if years.len() < size {
        warn!(
            requested = size,
            kept = years.len(),
            "dates past year {YEAR_LIMIT} truncated; fewer events than requested"
        );
    }

    let n = years.len();
    let total_emission: Vec<f32> = params.pattern().iter().copied().cycle().take(n).collect();
    let vei = total_emission_to_vei(&total_emission)?;
    Ok(Primary {
        dates: EventDates {
            years,
            months: vec![month as i8; n],
            days: vec![day as i8; n],
        },
        vei,
        total_emission,
        coordinates: None,
        heights: None,
    })
}

fn from_record(table: &EruptionTable) -> Result<Primary, GenerateError> {
    let total_emission = table.emissions().to_vec();
    let vei = total_emission_to_vei(&total_emission)?;
    Ok(Primary {
        dates: EventDates {
            years: table.years().to_vec(),
            months: table.months().to_vec(),
            days: table.days().to_vec(),
        },
        vei,
        total_emission,
        coordinates: Some((table.latitudes().to_vec(), table.longitudes().to_vec())),
        heights: table
            .heights()
            .map(|(lo, hi)| (lo.to_vec(), hi.to_vec())),
    })
}

/// Adds group ids, coordinates and injection heights to a variant's output.
fn fill_auxiliary_fields(primary: Primary, requested: usize, rng: &mut impl Rng) -> EventSequence {
    let n = primary.dates.len();
    let group_id: Vec<i8> = (0..n).map(|_| rng.random_range(1..20)).collect();
    let (latitude, longitude) = primary
        .coordinates
        .unwrap_or_else(|| (vec![PLACEHOLDER_LATITUDE; n], vec![PLACEHOLDER_LONGITUDE; n]));
    let (min_injection_height, max_injection_height) = primary
        .heights
        .unwrap_or_else(|| vei_to_injection_heights(&primary.vei, rng));

    EventSequence {
        group_id,
        year: primary.dates.years,
        month: primary.dates.months,
        day: primary.dates.days,
        latitude,
        longitude,
        vei: primary.vei,
        total_emission: primary.total_emission,
        min_injection_height,
        max_injection_height,
        requested,
    }
}
