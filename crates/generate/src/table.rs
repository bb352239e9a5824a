//! File-driven eruption records.

use std::collections::BTreeMap;

use ashfall_calendar::YEAR_LIMIT;
use ashfall_convert::order_heights;
use tracing::warn;

use crate::error::GenerateError;

/// Key of the `YYYY-MM-DD` date section.
pub const DATES_KEY: &str = "dates";
/// Key of the total-emission section.
pub const EMISSIONS_KEY: &str = "emissions";
/// Key of the optional latitude section.
pub const LAT_KEY: &str = "lat";
/// Key of the optional longitude section.
pub const LON_KEY: &str = "lon";
/// Key of the optional minimum-injection-height section.
pub const MIN_HEIGHT_KEY: &str = "minimum injection height";
/// Key of the optional maximum-injection-height section.
pub const MAX_HEIGHT_KEY: &str = "maximum injection height";

const KNOWN_KEYS: [&str; 6] = [
    DATES_KEY,
    EMISSIONS_KEY,
    LAT_KEY,
    LON_KEY,
    MIN_HEIGHT_KEY,
    MAX_HEIGHT_KEY,
];

/// Typed eruption records parsed from a key-value table.
///
/// Required sections are `dates` and `emissions`. Coordinates default to
/// zero when absent. Injection heights come as a pair or not at all; when
/// absent they are derived from VEI at generation time. Records are sorted
/// chronologically.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use ashfall_generate::EruptionTable;
///
/// let mut map = BTreeMap::new();
/// map.insert("dates".to_string(), vec!["1991-06-15".to_string(), "1850-01-01".to_string()]);
/// map.insert("emissions".to_string(), vec!["20".to_string(), "1.5".to_string()]);
///
/// let table = EruptionTable::from_map(&map).unwrap();
/// assert_eq!(table.years(), &[1850, 1991]);
/// assert_eq!(table.latitudes(), &[0.0, 0.0]);
/// assert!(table.heights().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EruptionTable {
    years: Vec<i16>,
    months: Vec<i8>,
    days: Vec<i8>,
    emissions: Vec<f32>,
    latitudes: Vec<f32>,
    longitudes: Vec<f32>,
    heights: Option<(Vec<f32>, Vec<f32>)>,
}

/// A `(year, month, day)` triple. Days are range-checked, not calendar-checked.
type TableDate = (i16, i8, i8);

/// One parsed row, used while sorting.
struct Row {
    date: TableDate,
    emission: f32,
    lat: f32,
    lon: f32,
    heights: Option<(f32, f32)>,
}

impl EruptionTable {
    /// Parses a table whose sections are lists of strings.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::MissingKey`] if `dates` or `emissions` is absent,
    ///   or only one of the two height sections is present.
    /// - [`GenerateError::TableLengthMismatch`] if any section's length
    ///   differs from `dates`.
    /// - [`GenerateError::TypeMismatch`] if a value does not parse.
    /// - [`GenerateError::InvalidArgument`] if the table is empty, or a date
    ///   has a year outside `0..=9999`, a month outside `1..=12` or a day
    ///   outside `1..=31`.
    pub fn from_map(map: &BTreeMap<String, Vec<String>>) -> Result<Self, GenerateError> {
        let dates = required(map, DATES_KEY)?;
        let emissions = required(map, EMISSIONS_KEY)?;

        let n = dates.len();
        for (key, values) in map {
            if values.len() != n {
                return Err(GenerateError::TableLengthMismatch {
                    key: key.clone(),
                    expected: n,
                    got: values.len(),
                });
            }
            if !KNOWN_KEYS.contains(&key.as_str()) {
                warn!(key = key.as_str(), "ignoring unknown table section");
            }
        }
        if n == 0 {
            return Err(GenerateError::InvalidArgument {
                reason: "eruption table has no records".to_string(),
            });
        }

        let dates = dates
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<Vec<_>, _>>()?;
        let emissions = parse_floats(EMISSIONS_KEY, emissions)?;
        let lats = optional_floats(map, LAT_KEY)?.unwrap_or_else(|| vec![0.0; n]);
        let lons = optional_floats(map, LON_KEY)?.unwrap_or_else(|| vec![0.0; n]);
        let heights = match (
            optional_floats(map, MIN_HEIGHT_KEY)?,
            optional_floats(map, MAX_HEIGHT_KEY)?,
        ) {
            (Some(mut min), Some(mut max)) => {
                order_heights(&mut min, &mut max)?;
                Some((min, max))
            }
            (None, None) => None,
            (Some(_), None) => {
                return Err(GenerateError::MissingKey {
                    key: MAX_HEIGHT_KEY.to_string(),
                });
            }
            (None, Some(_)) => {
                return Err(GenerateError::MissingKey {
                    key: MIN_HEIGHT_KEY.to_string(),
                });
            }
        };

        let mut rows: Vec<Row> = (0..n)
            .map(|i| Row {
                date: dates[i],
                emission: emissions[i],
                lat: lats[i],
                lon: lons[i],
                heights: heights.as_ref().map(|(lo, hi)| (lo[i], hi[i])),
            })
            .collect();
        rows.sort_by_key(|r| r.date);

        Ok(Self::from_rows(&rows, heights.is_some()))
    }

    fn from_rows(rows: &[Row], has_heights: bool) -> Self {
        let heights = has_heights.then(|| {
            rows.iter()
                .filter_map(|r| r.heights)
                .unzip::<f32, f32, Vec<f32>, Vec<f32>>()
        });
        Self {
            years: rows.iter().map(|r| r.date.0).collect(),
            months: rows.iter().map(|r| r.date.1).collect(),
            days: rows.iter().map(|r| r.date.2).collect(),
            emissions: rows.iter().map(|r| r.emission).collect(),
            latitudes: rows.iter().map(|r| r.lat).collect(),
            longitudes: rows.iter().map(|r| r.lon).collect(),
            heights,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns `true` if there are no records. Never true for a parsed table.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Returns the years.
    pub fn years(&self) -> &[i16] {
        &self.years
    }

    /// Returns the months.
    pub fn months(&self) -> &[i8] {
        &self.months
    }

    /// Returns the days of month.
    pub fn days(&self) -> &[i8] {
        &self.days
    }

    /// Returns the total emissions.
    pub fn emissions(&self) -> &[f32] {
        &self.emissions
    }

    /// Returns the latitudes, zero where the table had none.
    pub fn latitudes(&self) -> &[f32] {
        &self.latitudes
    }

    /// Returns the longitudes, zero where the table had none.
    pub fn longitudes(&self) -> &[f32] {
        &self.longitudes
    }

    /// Returns `(min, max)` injection heights if the table supplied them.
    pub fn heights(&self) -> Option<(&[f32], &[f32])> {
        self.heights
            .as_ref()
            .map(|(lo, hi)| (lo.as_slice(), hi.as_slice()))
    }
}

fn required<'a>(
    map: &'a BTreeMap<String, Vec<String>>,
    key: &str,
) -> Result<&'a [String], GenerateError> {
    map.get(key)
        .map(Vec::as_slice)
        .ok_or_else(|| GenerateError::MissingKey {
            key: key.to_string(),
        })
}

/// Parses `YYYY-MM-DD` into plain integers.
fn parse_date(value: &str) -> Result<TableDate, GenerateError> {
    let mismatch = || GenerateError::TypeMismatch {
        field: DATES_KEY.to_string(),
        value: value.to_string(),
    };
    let mut parts = value.trim().split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(mismatch());
    };
    let year: i32 = year.parse().map_err(|_| mismatch())?;
    let month: u8 = month.parse().map_err(|_| mismatch())?;
    let day: u8 = day.parse().map_err(|_| mismatch())?;

    let out_of_range = |what: &str, range: &str| GenerateError::InvalidArgument {
        reason: format!("{what} of {value:?} must be within {range}"),
    };
    if !(0..=YEAR_LIMIT).contains(&year) {
        return Err(out_of_range("year", "0..=9999"));
    }
    if !(1..=12).contains(&month) {
        return Err(out_of_range("month", "1..=12"));
    }
    if !(1..=31).contains(&day) {
        return Err(out_of_range("day", "1..=31"));
    }
    Ok((year as i16, month as i8, day as i8))
}

fn parse_floats(key: &str, values: &[String]) -> Result<Vec<f32>, GenerateError> {
    values
        .iter()
        .map(|v| {
            v.trim()
                .parse::<f32>()
                .map_err(|_| GenerateError::TypeMismatch {
                    field: key.to_string(),
                    value: v.clone(),
                })
        })
        .collect()
}

fn optional_floats(
    map: &BTreeMap<String, Vec<String>>,
    key: &str,
) -> Result<Option<Vec<f32>>, GenerateError> {
    map.get(key).map(|v| parse_floats(key, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Vec<&str>)]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn minimal_table() {
        let map = table(&[
            ("dates", vec!["1850-01-15", "1852-03-15"]),
            ("emissions", vec!["5", "1000"]),
        ]);
        let t = EruptionTable::from_map(&map).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.years(), &[1850, 1852]);
        assert_eq!(t.months(), &[1, 3]);
        assert_eq!(t.days(), &[15, 15]);
        assert_eq!(t.emissions(), &[5.0, 1000.0]);
        assert_eq!(t.longitudes(), &[0.0, 0.0]);
        assert!(t.heights().is_none());
    }

    #[test]
    fn full_table_swaps_heights() {
        let map = table(&[
            ("dates", vec!["1850-01-15", "1851-01-15"]),
            ("emissions", vec!["1", "2"]),
            ("lat", vec!["-15.1", "10"]),
            ("lon", vec!["120.3", "30"]),
            ("minimum injection height", vec!["25", "27"]),
            ("maximum injection height", vec!["26", "26"]),
        ]);
        let t = EruptionTable::from_map(&map).unwrap();
        let (min, max) = t.heights().unwrap();
        assert_eq!(min, &[25.0, 26.0]);
        assert_eq!(max, &[26.0, 27.0]);
        assert_eq!(t.latitudes(), &[-15.1, 10.0]);
    }

    #[test]
    fn rows_are_sorted_with_their_fields() {
        let map = table(&[
            ("dates", vec!["1900-05-01", "1850-01-01", "1900-02-01"]),
            ("emissions", vec!["3", "1", "2"]),
            ("lat", vec!["30", "10", "20"]),
        ]);
        let t = EruptionTable::from_map(&map).unwrap();
        assert_eq!(t.years(), &[1850, 1900, 1900]);
        assert_eq!(t.months(), &[1, 2, 5]);
        assert_eq!(t.emissions(), &[1.0, 2.0, 3.0]);
        assert_eq!(t.latitudes(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn missing_required_keys() {
        let map = table(&[("emissions", vec!["1"])]);
        assert_eq!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::MissingKey {
                key: "dates".to_string(),
            }
        );
        let map = table(&[("dates", vec!["1850-01-01"])]);
        assert_eq!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::MissingKey {
                key: "emissions".to_string(),
            }
        );
    }

    #[test]
    fn single_height_section_is_missing_key() {
        let map = table(&[
            ("dates", vec!["1850-01-01"]),
            ("emissions", vec!["1"]),
            ("minimum injection height", vec!["10"]),
        ]);
        assert_eq!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::MissingKey {
                key: "maximum injection height".to_string(),
            }
        );
    }

    #[test]
    fn length_mismatch() {
        let map = table(&[
            ("dates", vec!["1850-01-01", "1851-01-01"]),
            ("emissions", vec!["1"]),
        ]);
        assert_eq!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::TableLengthMismatch {
                key: "emissions".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn unparseable_values() {
        let map = table(&[("dates", vec!["1850/01/01"]), ("emissions", vec!["1"])]);
        assert!(matches!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::TypeMismatch { field, .. } if field == "dates"
        ));
        let map = table(&[("dates", vec!["1850-01-01"]), ("emissions", vec!["a lot"])]);
        assert_eq!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::TypeMismatch {
                field: "emissions".to_string(),
                value: "a lot".to_string(),
            }
        );
    }

    #[test]
    fn dates_are_not_calendar_checked() {
        let map = table(&[
            ("dates", vec!["1991-02-30", "2000-02-29", "1850-04-31"]),
            ("emissions", vec!["2", "1", "3"]),
        ]);
        let t = EruptionTable::from_map(&map).unwrap();
        assert_eq!(t.years(), &[1850, 1991, 2000]);
        assert_eq!(t.months(), &[4, 2, 2]);
        assert_eq!(t.days(), &[31, 30, 29]);
    }

    #[test]
    fn out_of_range_date_parts() {
        for date in ["10000-01-01", "1991-13-01", "1991-00-10", "1991-02-32", "1991-02-00"] {
            let map = table(&[("dates", vec![date]), ("emissions", vec!["1"])]);
            assert!(
                matches!(
                    EruptionTable::from_map(&map).unwrap_err(),
                    GenerateError::InvalidArgument { .. }
                ),
                "{date}"
            );
        }
        for date in ["1991-02", "1991-02-03-04", "-5-01-01", "1991-Feb-03"] {
            let map = table(&[("dates", vec![date]), ("emissions", vec!["1"])]);
            assert!(
                matches!(
                    EruptionTable::from_map(&map).unwrap_err(),
                    GenerateError::TypeMismatch { .. }
                ),
                "{date}"
            );
        }
    }

    #[test]
    fn empty_table_is_invalid() {
        let map = table(&[("dates", vec![]), ("emissions", vec![])]);
        assert!(matches!(
            EruptionTable::from_map(&map).unwrap_err(),
            GenerateError::InvalidArgument { .. }
        ));
    }
}
