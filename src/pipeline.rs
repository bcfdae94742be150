//! Decode → sharpen → {encode, histogram} orchestration.
//!
//! The run is a linear state machine:
//!
//! `Start → HeaderParsed → BufferAllocated → BufferFilled → Filtered →
//! Written → HistogramPersisted → Done`
//!
//! Any error moves it to `Failed`. The input file handle and every pixel
//! buffer are locals of the running stage function, so they are released on
//! every exit path without explicit teardown. At most two buffers are alive
//! at once: the decoded input and the filtered output, and only until the
//! input is dropped right after filtering.
//!
//! Nothing is written unless decoding and filtering succeed. The two outputs
//! are then written independently: a failure on one is logged and does not
//! skip the other, and the run reports the first failure.
use crate::config::PipelineConfig;
use crate::diagnostics::{
    elapsed_ms, InputDescriptor, OutputRecord, RunReport, Stage, TimingBreakdown,
};
use crate::error::{PipelineError, Result};
use crate::filter::sharpen;
use crate::histogram::LuminanceHistogram;
use crate::image::rgb::reserve_pixels;
use crate::image::RgbImage;
use crate::io::{save_histogram, write_json_file};
use crate::ppm::reader::warn_on_trailing_bytes;
use crate::ppm::{fill_pixels, parse_header, save_ppm};
use log::{debug, error, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PipelineStage {
    Start,
    HeaderParsed,
    BufferAllocated,
    BufferFilled,
    Filtered,
    Written,
    HistogramPersisted,
    Done,
    Failed,
}

/// Pure in-memory core: sharpen `image` and bucket the result.
pub fn process_image(
    image: &RgbImage,
    parallel: bool,
) -> Result<(RgbImage, LuminanceHistogram)> {
    let filtered = sharpen(image, parallel)?;
    let histogram = LuminanceHistogram::from_image(&filtered, parallel);
    Ok((filtered, histogram))
}

/// Run the whole pipeline once with `config`.
pub fn run(input: &Path, config: &PipelineConfig) -> Result<RunReport> {
    Pipeline::new(config.clone()).run(input)
}

pub struct Pipeline {
    config: PipelineConfig,
    stage: PipelineStage,
    timings: TimingBreakdown,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            stage: PipelineStage::Start,
            timings: TimingBreakdown::default(),
        }
    }

    /// Last stage reached; `Failed` after an error.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn timings(&self) -> &TimingBreakdown {
        &self.timings
    }

    pub fn run(&mut self, input: &Path) -> Result<RunReport> {
        let t0 = Instant::now();
        self.stage = PipelineStage::Start;
        self.timings = TimingBreakdown::default();

        let result = self.run_stages(input);
        self.timings.total_ms = elapsed_ms(t0);
        match result {
            Ok(mut report) => {
                report.timings = self.timings.clone();
                self.write_report(&report);
                info!(
                    "processed {} ({}x{}) histogram=[{}] in {:.3} ms",
                    input.display(),
                    report.input.width,
                    report.input.height,
                    report.histogram,
                    self.timings.total_ms
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "pipeline failed after {:?} ({}): {err}",
                    self.stage,
                    err.kind()
                );
                self.stage = PipelineStage::Failed;
                Err(err)
            }
        }
    }

    fn advance(&mut self, next: PipelineStage) {
        debug!("pipeline: {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    fn run_stages(&mut self, input: &Path) -> Result<RunReport> {
        let decode_start = Instant::now();
        let file = File::open(input).map_err(|source| PipelineError::InputUnavailable {
            path: input.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let header = parse_header(&mut reader)?;
        self.advance(PipelineStage::HeaderParsed);

        let storage = reserve_pixels(header.width, header.height)?;
        self.advance(PipelineStage::BufferAllocated);

        let raw = fill_pixels(&mut reader, &header, storage)?;
        self.advance(PipelineStage::BufferFilled);
        warn_on_trailing_bytes(&mut reader);
        drop(reader);
        self.timings.record_since(Stage::Decode, decode_start);

        let filter_start = Instant::now();
        let filtered = sharpen(&raw, self.config.parallel)?;
        drop(raw);
        self.timings.record_since(Stage::Filter, filter_start);
        self.advance(PipelineStage::Filtered);

        let hist_start = Instant::now();
        let histogram = LuminanceHistogram::from_image(&filtered, self.config.parallel);
        self.timings.record_since(Stage::Histogram, hist_start);

        let outputs = self.config.output.clone();
        let encode_start = Instant::now();
        let image_result = save_ppm(&filtered, &outputs.image);
        drop(filtered);
        self.timings.record_since(Stage::Encode, encode_start);
        if image_result.is_ok() {
            self.advance(PipelineStage::Written);
        }

        let persist_start = Instant::now();
        let histogram_result = save_histogram(&histogram, &outputs.histogram);
        self.timings.record_since(Stage::PersistHistogram, persist_start);
        if image_result.is_ok() && histogram_result.is_ok() {
            self.advance(PipelineStage::HistogramPersisted);
        }

        let image_output = output_record(&outputs.image, &image_result);
        let histogram_output = output_record(&outputs.histogram, &histogram_result);
        image_result?;
        histogram_result?;

        self.advance(PipelineStage::Done);
        Ok(RunReport {
            input: InputDescriptor {
                path: input.to_path_buf(),
                width: header.width,
                height: header.height,
            },
            histogram,
            image_output,
            histogram_output,
            timings: TimingBreakdown::default(),
        })
    }

    /// The JSON report is auxiliary; failing to write it only logs.
    fn write_report(&self, report: &RunReport) {
        if let Some(path) = &self.config.output.report_json {
            match write_json_file(path, report) {
                Ok(()) => debug!("report written to {}", path.display()),
                Err(err) => error!("{err}"),
            }
        }
    }
}

fn output_record(path: &Path, result: &Result<()>) -> OutputRecord {
    if let Err(err) = result {
        error!("{err}");
    }
    OutputRecord {
        path: path.to_path_buf(),
        written: result.is_ok(),
        error: result.as_ref().err().map(|e| e.to_string()),
    }
}
