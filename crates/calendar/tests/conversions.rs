use ashfall_calendar::{DAYS_PER_YEAR, Doy, NoLeapDate, YEAR_LIMIT};

#[test]
fn offset_then_decimal_year_stays_within_a_day() {
    for i in 0..2000 {
        let offset = i as f64 * 0.0137;
        let date = NoLeapDate::from_year_offset(1850, offset).unwrap();
        let back = date.decimal_year() - 1850.0;
        assert!(back <= offset + 1e-9, "offset {offset} -> {back}");
        assert!(
            offset - back < 1.0 / DAYS_PER_YEAR as f64 + 1e-9,
            "offset {offset} -> {back}"
        );
    }
}

#[test]
fn every_day_of_year_is_reachable_from_an_offset() {
    for d in 1..=DAYS_PER_YEAR {
        let offset = (d as f64 - 0.5) / DAYS_PER_YEAR as f64;
        let date = NoLeapDate::from_year_offset(1900, offset).unwrap();
        assert_eq!(date.year(), 1900);
        assert_eq!(date.doy(), Doy::new(d).unwrap());
    }
}

#[test]
fn increasing_offsets_give_non_decreasing_dates() {
    let mut prev = NoLeapDate::from_year_offset(1850, 0.0).unwrap();
    for i in 1..5000 {
        let next = NoLeapDate::from_year_offset(1850, i as f64 * 0.003).unwrap();
        assert!(prev <= next);
        prev = next;
    }
}

#[test]
fn year_limit_is_four_digits() {
    assert_eq!(YEAR_LIMIT.to_string().len(), 4);
    let last = NoLeapDate::from_year_offset(YEAR_LIMIT - 1, 1.5).unwrap();
    assert_eq!(last.year(), YEAR_LIMIT);
}
