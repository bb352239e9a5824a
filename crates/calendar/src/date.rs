//! No-leap date with year context.

use crate::doy::{DAYS_PER_MONTH, DAYS_PER_YEAR, Doy};
use crate::error::CalendarError;

/// A date in the 365-day no-leap calendar with year context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoLeapDate {
    year: i32,
    month: u8,
    day: u8,
    doy: u16,
}

impl PartialOrd for NoLeapDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NoLeapDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.doy).cmp(&(other.year, other.doy))
    }
}

impl NoLeapDate {
    /// Creates a new `NoLeapDate` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month or day is invalid for the
    /// 365-day no-leap calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let doy = Doy::from_month_day(month, day)?;
        Ok(Self {
            year,
            month,
            day,
            doy: doy.get(),
        })
    }

    /// Like [`new`](Self::new), but a day past the end of its month (a
    /// February 29th, say) becomes the month's last day, and day 0 becomes
    /// day 1.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn new_saturating(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Self::new(year, month, day.clamp(1, DAYS_PER_MONTH[month as usize]))
    }

    /// Creates a `NoLeapDate` from a year and an already-validated [`Doy`].
    pub fn from_year_doy(year: i32, doy: Doy) -> Self {
        let (month, day) = doy.month_day();
        Self {
            year,
            month,
            day,
            doy: doy.get(),
        }
    }

    /// Converts a continuous year offset into a calendar date.
    ///
    /// The integer part of `offset` is added to `init_year`. The fractional
    /// part is scaled by 365 days and truncated to a whole day counted from
    /// January 1. There is no leap day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidOffset`] if `offset` is negative or
    /// not finite.
    pub fn from_year_offset(init_year: i32, offset: f64) -> Result<Self, CalendarError> {
        if !offset.is_finite() || offset < 0.0 {
            return Err(CalendarError::InvalidOffset { offset });
        }
        let whole = offset.floor();
        let day_index = ((offset - whole) * f64::from(DAYS_PER_YEAR)).floor() as u16;
        Ok(Self::from_year_doy(
            init_year + whole as i32,
            Doy::from_index_saturating(day_index),
        ))
    }

    /// Returns the date as a decimal year: `year + (doy - 1) / 365`.
    pub fn decimal_year(self) -> f64 {
        f64::from(self.year) + f64::from(self.doy - 1) / f64::from(DAYS_PER_YEAR)
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the day-of-year as a [`Doy`].
    pub fn doy(self) -> Doy {
        Doy::from_index_saturating(self.doy - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn new_valid() {
        let date = NoLeapDate::new(1850, 1, 1).unwrap();
        assert_eq!(date.year(), 1850);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert_eq!(date.doy().get(), 1);
    }

    #[test]
    fn new_invalid_day() {
        assert_eq!(
            NoLeapDate::new(1850, 2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn new_saturating_clamps_day() {
        assert_eq!(
            NoLeapDate::new_saturating(2000, 2, 29).unwrap(),
            NoLeapDate::new(2000, 2, 28).unwrap()
        );
        assert_eq!(
            NoLeapDate::new_saturating(1991, 4, 31).unwrap(),
            NoLeapDate::new(1991, 4, 30).unwrap()
        );
        assert_eq!(NoLeapDate::new_saturating(1991, 6, 0).unwrap().day(), 1);
        assert_eq!(
            NoLeapDate::new_saturating(1991, 13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn offset_zero_is_new_year() {
        let date = NoLeapDate::from_year_offset(1850, 0.0).unwrap();
        assert_eq!(date, NoLeapDate::new(1850, 1, 1).unwrap());
    }

    #[test]
    fn offset_whole_years() {
        let date = NoLeapDate::from_year_offset(1850, 12.0).unwrap();
        assert_eq!(date, NoLeapDate::new(1862, 1, 1).unwrap());
    }

    #[test]
    fn offset_fraction_maps_to_day() {
        // 59 / 365 of a year lands on March 1.
        let date = NoLeapDate::from_year_offset(2000, 3.0 + 59.0 / 365.0 + 1e-9).unwrap();
        assert_eq!(date, NoLeapDate::new(2003, 3, 1).unwrap());
    }

    #[test]
    fn offset_just_below_next_year() {
        let date = NoLeapDate::from_year_offset(1850, 0.999_999_9).unwrap();
        assert_eq!(date, NoLeapDate::new(1850, 12, 31).unwrap());
    }

    #[test]
    fn offset_rejects_negative_and_nan() {
        assert_eq!(
            NoLeapDate::from_year_offset(1850, -1.0).unwrap_err(),
            CalendarError::InvalidOffset { offset: -1.0 }
        );
        assert!(NoLeapDate::from_year_offset(1850, f64::NAN).is_err());
        assert!(NoLeapDate::from_year_offset(1850, f64::INFINITY).is_err());
    }

    #[test]
    fn decimal_year_values() {
        assert_abs_diff_eq!(
            NoLeapDate::new(1850, 1, 1).unwrap().decimal_year(),
            1850.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            NoLeapDate::new(1850, 12, 31).unwrap().decimal_year(),
            1850.0 + 364.0 / 365.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn ordering_follows_calendar() {
        let dec31 = NoLeapDate::new(1999, 12, 31).unwrap();
        let jan1 = NoLeapDate::new(2000, 1, 1).unwrap();
        let jun1 = NoLeapDate::new(2000, 6, 1).unwrap();
        assert!(dec31 < jan1);
        assert!(jan1 < jun1);
    }
}
