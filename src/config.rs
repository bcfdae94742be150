//! Runtime configuration: command line plus an optional JSON file.
//!
//! ```json
//! {
//!   "output": {
//!     "image": "out/sharpened.ppm",
//!     "histogram": "out/histogram.txt",
//!     "report_json": "out/report.json"
//!   },
//!   "parallel": true
//! }
//! ```
//!
//! Every field is optional; omitted ones fall back to [`PipelineConfig::default`].
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_OUTPUT: &str = "output.ppm";
pub const DEFAULT_HISTOGRAM_OUTPUT: &str = "output.txt";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Filtered image, P6.
    pub image: PathBuf,
    /// Histogram counts, one line.
    pub histogram: PathBuf,
    /// Optional JSON run report.
    pub report_json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from(DEFAULT_IMAGE_OUTPUT),
            histogram: PathBuf::from(DEFAULT_HISTOGRAM_OUTPUT),
            report_json: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub output: OutputConfig,
    /// Spread filtering and histogram passes over the rayon pool. Has no
    /// effect when built without the `parallel` feature.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            parallel: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    pub pipeline: PipelineConfig,
}

pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        PipelineError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        PipelineError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Parse `<input.ppm> [config.json]` from the arguments following the program name.
pub fn parse_cli<I>(program: &str, args: I) -> Result<RuntimeConfig>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let input_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| PipelineError::InvalidConfig(usage(program)))?;
    let pipeline = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => PipelineConfig::default(),
    };
    if args.next().is_some() {
        return Err(PipelineError::InvalidConfig(usage(program)));
    }
    Ok(RuntimeConfig {
        input_path,
        pipeline,
    })
}

fn usage(program: &str) -> String {
    format!("usage: {program} <input.ppm> [config.json]")
}
