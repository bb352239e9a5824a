//! Pure conversion functions: TOML config structs -> crate API config types.

use std::sync::Arc;

use anyhow::{Result, bail};

use ashfall_fpp::{AmplitudeDistribution, Exponential, FppConfig, Lomax};
use ashfall_generate::{PointProcessParams, RegularIntervalsParams};
use ashfall_io::{Compression, Metadata, WriterConfig};

use crate::config::*;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds the pulse amplitude distribution named in the point-process config.
pub fn parse_amplitude(pp: &PointProcessToml) -> Result<Arc<dyn AmplitudeDistribution>> {
    match pp.amplitude.to_lowercase().as_str() {
        "lomax" => Ok(Arc::new(Lomax::new(pp.lomax_shape))),
        "exponential" => Ok(Arc::new(Exponential::new(pp.exponential_scale))),
        other => bail!("unknown amplitude distribution: {other:?}"),
    }
}

/// Builds [`PointProcessParams`] from the TOML point-process configuration.
pub fn build_point_process_params(pp: &PointProcessToml) -> Result<PointProcessParams> {
    let fpp = FppConfig::new()
        .with_gamma(pp.gamma)
        .with_amplitude(parse_amplitude(pp)?);
    let params = PointProcessParams::new()
        .with_fpp(fpp)
        .with_max_attempts(pp.max_attempts);
    params.validate()?;
    Ok(params)
}

/// Builds [`RegularIntervalsParams`] from the TOML regular-intervals configuration.
pub fn build_regular_intervals_params(ri: &RegularIntervalsToml) -> Result<RegularIntervalsParams> {
    let params = RegularIntervalsParams::new()
        .with_year_step(ri.year_step)
        .with_date(ri.month, ri.day)
        .with_pattern(ri.pattern.clone());
    params.validate()?;
    Ok(params)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}

/// Builds record-set [`Metadata`] with the given generation notes.
pub fn build_metadata(meta: &MetadataToml, notes: &str) -> Metadata {
    Metadata::new(notes)
        .with_creator(&meta.creator)
        .with_doi(&meta.doi)
        .with_citation(&meta.citation)
}
