use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "ashfall.toml";

/// Top-level Ashfall configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AshfallConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Generator selection and request.
    #[serde(default)]
    pub generate: GenerateToml,

    /// Point-process settings.
    #[serde(default)]
    pub point_process: PointProcessToml,

    /// Regular-intervals settings.
    #[serde(default)]
    pub regular_intervals: RegularIntervalsToml,

    /// Injection-height post-processing.
    #[serde(default)]
    pub heights: HeightsToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Global attributes written with the record set.
    #[serde(default)]
    pub metadata: MetadataToml,
}

impl AshfallConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `ashfall.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::parse(&toml_str).with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Parses configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateToml {
    #[serde(default)]
    pub generator: usize,
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_init_year")]
    pub init_year: i64,
    #[serde(default)]
    pub input: Option<PathBuf>,
}

impl Default for GenerateToml {
    fn default() -> Self {
        Self {
            generator: 0,
            size: default_size(),
            init_year: default_init_year(),
            input: None,
        }
    }
}

fn default_size() -> i64 {
    3000
}
fn default_init_year() -> i64 {
    1850
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointProcessToml {
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_amplitude")]
    pub amplitude: String,
    #[serde(default = "default_lomax_shape")]
    pub lomax_shape: f64,
    #[serde(default = "default_exponential_scale")]
    pub exponential_scale: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for PointProcessToml {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
            amplitude: default_amplitude(),
            lomax_shape: default_lomax_shape(),
            exponential_scale: default_exponential_scale(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_gamma() -> f64 {
    0.1
}
fn default_amplitude() -> String {
    "lomax".to_string()
}
fn default_lomax_shape() -> f64 {
    1.8
}
fn default_exponential_scale() -> f64 {
    1.0
}
fn default_max_attempts() -> usize {
    100
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegularIntervalsToml {
    #[serde(default = "default_year_step")]
    pub year_step: u16,
    #[serde(default = "default_month")]
    pub month: u8,
    #[serde(default = "default_day")]
    pub day: u8,
    #[serde(default = "default_pattern")]
    pub pattern: Vec<f32>,
}

impl Default for RegularIntervalsToml {
    fn default() -> Self {
        Self {
            year_step: default_year_step(),
            month: default_month(),
            day: default_day(),
            pattern: default_pattern(),
        }
    }
}

fn default_year_step() -> u16 {
    2
}
fn default_month() -> u8 {
    3
}
fn default_day() -> u8 {
    15
}
fn default_pattern() -> Vec<f32> {
    vec![5.0, 1000.0, 40.0, 200.0]
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeightsToml {
    #[serde(default)]
    pub clamp_to_model_layers: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            output: default_output(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("data/output/synthetic_volcanoes.parquet")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataToml {
    #[serde(default = "default_creator")]
    pub creator: String,
    #[serde(default = "default_placeholder")]
    pub doi: String,
    #[serde(default = "default_placeholder")]
    pub citation: String,
}

impl Default for MetadataToml {
    fn default() -> Self {
        Self {
            creator: default_creator(),
            doi: default_placeholder(),
            citation: default_placeholder(),
        }
    }
}

fn default_creator() -> String {
    "ashfall".to_string()
}
fn default_placeholder() -> String {
    ashfall_io::PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AshfallConfig::parse("").unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.generate.size, 3000);
        assert_eq!(cfg.generate.init_year, 1850);
        assert_eq!(cfg.point_process.amplitude, "lomax");
        assert_eq!(cfg.regular_intervals.pattern, vec![5.0, 1000.0, 40.0, 200.0]);
        assert!(!cfg.heights.clamp_to_model_layers);
        assert_eq!(cfg.metadata.doi, "#####");
    }

    #[test]
    fn partial_sections() {
        let cfg = AshfallConfig::parse(
            r#"
            seed = 7

            [generate]
            generator = 1
            size = 500

            [point_process]
            gamma = 0.5
            amplitude = "exponential"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.generate.generator, 1);
        assert_eq!(cfg.generate.size, 500);
        assert_eq!(cfg.generate.init_year, 1850);
        assert_eq!(cfg.point_process.gamma, 0.5);
        assert_eq!(cfg.point_process.max_attempts, 100);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(AshfallConfig::parse("[generate]\nsizes = 3").is_err());
        assert!(AshfallConfig::parse("[volcano]\nsize = 3").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AshfallConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ashfall.toml");
        std::fs::write(&path, "[heights]\nclamp_to_model_layers = true\n").unwrap();
        let cfg = AshfallConfig::load(Some(&path)).unwrap();
        assert!(cfg.heights.clamp_to_model_layers);
    }
}
