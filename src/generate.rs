//! Generate command: build an eruption sequence and write it to Parquet.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use tracing::{info, info_span, warn};

use ashfall_generate::{EruptionTable, EventSequence, Generator, GeneratorKind};
use ashfall_io::{
    Field, IoError, RawFields, RecordSet, compact_path, write_compact, write_record_set,
};

use crate::cli::GenerateArgs;
use crate::config::AshfallConfig;
use crate::convert;

/// Prints every generator with its index.
pub fn list() {
    for kind in GeneratorKind::ALL {
        println!("{}: {}", kind.index(), kind.name());
        println!("   {}", kind.description());
    }
}

/// Run the generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();

    // 1. Load config and merge CLI overrides
    let mut config = AshfallConfig::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(g) = args.generator {
        config.generate.generator = g;
    }
    if let Some(n) = args.size {
        config.generate.size = n;
    }
    if let Some(y) = args.init_year {
        config.generate.init_year = y;
    }
    if args.input.is_some() {
        config.generate.input = args.input;
    }
    if let Some(o) = args.output {
        config.io.output = o;
    }

    // 2. Refuse to touch existing output before doing any work
    let output = config.io.output.clone();
    let compact = compact_path(&output);
    for path in [&output, &compact] {
        if path.exists() {
            return Err(IoError::AlreadyExists { path: path.clone() }.into());
        }
    }

    // 3. Build generator and writer configs
    let generator = build_generator(&config)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    // 4. Create seeded RNG
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // 5. Generate
    info!(
        generator = generator.kind().name(),
        size = config.generate.size,
        init_year = config.generate.init_year,
        "generating eruptions"
    );
    let mut events = generator
        .generate(config.generate.size, config.generate.init_year, &mut rng)
        .with_context(|| format!("{} generator failed", generator.kind().name()))?;
    if config.heights.clamp_to_model_layers {
        let adjusted = events
            .clamp_to_model_layers()
            .context("failed to clamp injection heights")?;
        info!(adjusted, "clamped injection heights to model layers");
    }

    // 6. Validate, then write
    let metadata = convert::build_metadata(&config.metadata, generator.description());
    let record_set = RecordSet::new(to_raw_fields(&events), metadata)
        .context("generated events failed validation")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    write_record_set(&output, &record_set, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;
    write_compact(&compact, &record_set, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", compact.display()))?;
    info!(path = %output.display(), events = record_set.len(), "generation complete");

    Ok(())
}

/// Builds the generator selected in `config`.
fn build_generator(config: &AshfallConfig) -> Result<Generator> {
    let index = config.generate.generator;
    let Some(kind) = GeneratorKind::from_index(index) else {
        bail!(
            "unknown generator index {index}: expected 0..={}, see `ashfall list`",
            GeneratorKind::ALL.len() - 1
        );
    };
    Ok(match kind {
        GeneratorKind::RandomNormal => Generator::RandomNormal,
        GeneratorKind::PointProcess => {
            Generator::PointProcess(convert::build_point_process_params(&config.point_process)?)
        }
        GeneratorKind::SingleEvent => Generator::SingleEvent,
        GeneratorKind::RegularIntervals => Generator::RegularIntervals(
            convert::build_regular_intervals_params(&config.regular_intervals)?,
        ),
        GeneratorKind::FromRecord => {
            let Some(path) = config.generate.input.as_deref() else {
                bail!("the FromRecord generator needs an eruption table: use --input");
            };
            Generator::FromRecord(load_table(path)?)
        }
    })
}

/// Reads a JSON eruption table: an object of equally long arrays keyed by
/// section name. Numbers are accepted where strings are expected.
fn load_table(path: &Path) -> Result<EruptionTable> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read eruption table: {}", path.display()))?;
    let sections: BTreeMap<String, Vec<Value>> = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse eruption table: {}", path.display()))?;

    let mut map = BTreeMap::new();
    for (key, values) in sections {
        let strings = values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => bail!("section '{key}' holds {other}, expected strings or numbers"),
            })
            .collect::<Result<Vec<_>>>()?;
        map.insert(key, strings);
    }
    if map.contains_key("date") && !map.contains_key(ashfall_generate::DATES_KEY) {
        warn!("eruption table has a 'date' section; did you mean 'dates'?");
    }
    EruptionTable::from_map(&map)
        .with_context(|| format!("invalid eruption table: {}", path.display()))
}

/// Copies the ten event columns into unchecked record-set fields.
fn to_raw_fields(events: &EventSequence) -> RawFields {
    RawFields::new()
        .with(Field::GroupId, events.group_id().to_vec())
        .with(Field::Vei, events.vei().to_vec())
        .with(Field::Year, events.year().to_vec())
        .with(Field::Month, events.month().to_vec())
        .with(Field::Day, events.day().to_vec())
        .with(Field::Latitude, events.latitude().to_vec())
        .with(Field::Longitude, events.longitude().to_vec())
        .with(Field::TotalEmission, events.total_emission().to_vec())
        .with(
            Field::MaxInjectionHeight,
            events.max_injection_height().to_vec(),
        )
        .with(
            Field::MinInjectionHeight,
            events.min_injection_height().to_vec(),
        )
}
