#![allow(dead_code)]

pub mod synthetic_image;

use ppm_sharpen::config::{OutputConfig, PipelineConfig};
use std::path::Path;

/// Config whose outputs land in `dir` under their default names.
pub fn config_in(dir: &Path, parallel: bool) -> PipelineConfig {
    PipelineConfig {
        output: OutputConfig {
            image: dir.join("output.ppm"),
            histogram: dir.join("output.txt"),
            report_json: None,
        },
        parallel,
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
