use std::collections::BTreeMap;

use ashfall_generate::{
    EruptionTable, EventSequence, GenerateError, Generator, PointProcessParams,
    RegularIntervalsParams,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_generators() -> Vec<Generator> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    map.insert(
        "dates".to_string(),
        vec!["1991-06-15", "1850-02-01", "1850-01-20", "1883-08-27"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    map.insert(
        "emissions".to_string(),
        vec!["20", "0.3", "1.2", "15"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    vec![
        Generator::RandomNormal,
        Generator::PointProcess(PointProcessParams::new()),
        Generator::SingleEvent,
        Generator::RegularIntervals(RegularIntervalsParams::new()),
        Generator::FromRecord(EruptionTable::from_map(&map).unwrap()),
    ]
}

fn assert_consistent(events: &EventSequence) {
    let n = events.len();
    assert!(n > 0);
    for len in [
        events.group_id().len(),
        events.month().len(),
        events.day().len(),
        events.latitude().len(),
        events.longitude().len(),
        events.vei().len(),
        events.total_emission().len(),
        events.min_injection_height().len(),
        events.max_injection_height().len(),
    ] {
        assert_eq!(len, n);
    }
    assert!(events.is_ordered_within_years());
    assert!(events.vei().iter().all(|v| (0..=6).contains(v)));
    assert!(
        events
            .min_injection_height()
            .iter()
            .zip(events.max_injection_height())
            .all(|(lo, hi)| lo <= hi)
    );
    assert!(events.year().iter().all(|y| (0..=9999).contains(y)));
    assert!(events.month().iter().all(|m| (1..=12).contains(m)));
    assert!(events.day().iter().all(|d| (1..=31).contains(d)));
    assert!(events.total_emission().iter().all(|&e| e > 0.0));
}

#[test]
fn every_generator_satisfies_the_sequence_invariants() {
    for (seed, generator) in all_generators().into_iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let events = generator.generate(400, 1850, &mut rng).unwrap();
        assert_consistent(&events);
    }
}

#[test]
fn point_process_dates_never_repeat() {
    let generator = Generator::PointProcess(PointProcessParams::new());
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let events = generator.generate(3000, 1850, &mut rng).unwrap();
        let mut triples: Vec<_> = (0..events.len())
            .map(|i| (events.year()[i], events.month()[i], events.day()[i]))
            .collect();
        let n = triples.len();
        triples.dedup();
        assert_eq!(triples.len(), n, "seed {seed} produced duplicate dates");
    }
}

#[test]
fn point_process_size_is_a_request() {
    let generator = Generator::PointProcess(PointProcessParams::new());
    let mut rng = StdRng::seed_from_u64(10);
    let events = generator.generate(1000, 0, &mut rng).unwrap();
    assert_eq!(events.requested(), 1000);
    // Poisson count with mean 1000; six standard deviations either side.
    assert!((810..=1190).contains(&events.len()), "{}", events.len());
}

#[test]
fn point_process_truncates_near_year_limit() {
    // 3000 expected pulses over 30000 years starting at 9000: most fall past 9999.
    let generator = Generator::PointProcess(PointProcessParams::new());
    let mut rng = StdRng::seed_from_u64(11);
    let events = generator.generate(3000, 9000, &mut rng).unwrap();
    assert!(events.len() < events.requested() / 2);
    assert!(events.year().iter().all(|&y| y <= 9999));
    assert_consistent(&events);
}

#[test]
fn same_seed_same_sequence() {
    for generator in all_generators() {
        let a = generator
            .generate(200, 1850, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = generator
            .generate(200, 1850, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn from_record_keeps_table_values() {
    let generators = all_generators();
    let mut rng = StdRng::seed_from_u64(1);
    let events = generators[4].generate(1, 1850, &mut rng).unwrap();
    assert_eq!(events.year(), &[1850, 1850, 1883, 1991]);
    assert_eq!(events.month(), &[1, 2, 8, 6]);
    assert_eq!(events.total_emission(), &[1.2, 0.3, 15.0, 20.0]);
    assert_eq!(events.latitude(), &[0.0; 4]);
}

#[test]
fn non_positive_size_is_rejected_by_every_generator() {
    for generator in all_generators() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generator.generate(0, 1850, &mut rng),
            Err(GenerateError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn clamp_to_model_layers_keeps_order() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut events = Generator::RandomNormal
        .generate(2000, 1850, &mut rng)
        .unwrap();
    let adjusted = events.clamp_to_model_layers().unwrap();
    assert!(adjusted > 0);
    assert_consistent(&events);
}

#[test]
fn huge_request_is_truncated_at_year_limit() {
    let huge = 1_i64 << 40;
    for generator in [
        Generator::RandomNormal,
        Generator::PointProcess(PointProcessParams::new()),
        Generator::RegularIntervals(RegularIntervalsParams::new()),
    ] {
        let mut rng = StdRng::seed_from_u64(21);
        let events = generator.generate(huge, 1850, &mut rng).unwrap();
        assert_eq!(events.requested(), 1 << 40);
        assert!(events.len() < events.requested());
        assert!(events.year().iter().all(|&y| y <= 9999));
        assert_consistent(&events);
    }
}
