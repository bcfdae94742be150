mod common;

use common::synthetic_image::{checkerboard_rgb, noise_rgb, ppm_bytes};
use common::{config_in, init_logging};
use ppm_sharpen::image::ImageView;
use ppm_sharpen::ppm::{decode_ppm, encode_ppm, load_ppm};
use ppm_sharpen::diagnostics::RunReport;
use ppm_sharpen::{Pipeline, PipelineError, PipelineStage, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn run_on(dir: &Path, input_bytes: &[u8]) -> (Pipeline, Result<RunReport, PipelineError>) {
    let input = dir.join("input.ppm");
    fs::write(&input, input_bytes).unwrap();
    let mut pipeline = Pipeline::new(config_in(dir, true));
    let result = pipeline.run(&input);
    (pipeline, result)
}

fn assert_no_outputs(dir: &Path) {
    assert!(!dir.join("output.ppm").exists(), "output.ppm must not exist");
    assert!(!dir.join("output.txt").exists(), "output.txt must not exist");
}

#[test]
fn checkerboard_round_trip_keeps_border_and_counts_every_pixel() {
    init_logging();
    let (w, h) = (48usize, 32usize);
    let pixels = checkerboard_rgb(w, h, 8);
    let dir = tempdir().unwrap();
    let (pipeline, result) = run_on(dir.path(), &ppm_bytes(w, h, &pixels));
    let report = result.unwrap();
    assert_eq!(pipeline.stage(), PipelineStage::Done);

    let input = RgbImage::from_raw(w, h, pixels).unwrap();
    let output = load_ppm(&dir.path().join("output.ppm")).unwrap();
    assert_eq!((output.width(), output.height()), (w, h));
    for y in 0..h {
        for x in 0..w {
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                assert_eq!(output.get(x, y), input.get(x, y), "border ({x}, {y})");
            }
        }
    }

    let text = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert!(!text.ends_with('\n'));
    let counts: Vec<u64> = text.split(' ').map(|t| t.parse().unwrap()).collect();
    assert_eq!(counts.len(), 5);
    assert_eq!(counts.iter().sum::<u64>(), (w * h) as u64);
    assert_eq!(counts.as_slice(), report.histogram.counts());
}

#[test]
fn sequential_and_parallel_runs_produce_identical_files() {
    let (w, h) = (37usize, 23usize);
    let input = ppm_bytes(w, h, &noise_rgb(w, h, 7));
    let seq_dir = tempdir().unwrap();
    let par_dir = tempdir().unwrap();
    for (dir, parallel) in [(seq_dir.path(), false), (par_dir.path(), true)] {
        let path = dir.join("input.ppm");
        fs::write(&path, &input).unwrap();
        Pipeline::new(config_in(dir, parallel)).run(&path).unwrap();
    }
    for name in ["output.ppm", "output.txt"] {
        assert_eq!(
            fs::read(seq_dir.path().join(name)).unwrap(),
            fs::read(par_dir.path().join(name)).unwrap(),
            "{name} differs"
        );
    }
}

#[test]
fn degenerate_images_are_copied_through() {
    for (w, h) in [(1usize, 1usize), (2, 2)] {
        let pixels = noise_rgb(w, h, 99);
        let dir = tempdir().unwrap();
        let (_, result) = run_on(dir.path(), &ppm_bytes(w, h, &pixels));
        let report = result.unwrap();
        let written = fs::read(dir.path().join("output.ppm")).unwrap();
        assert_eq!(written, ppm_bytes(w, h, &pixels), "{w}x{h}");
        assert_eq!(report.histogram.total(), (w * h) as u64);
    }
}

#[test]
fn truncated_pixel_data_produces_no_outputs() {
    let dir = tempdir().unwrap();
    let (pipeline, result) = run_on(dir.path(), &ppm_bytes(10, 10, &[0x55; 50]));
    assert!(matches!(
        result,
        Err(PipelineError::TruncatedPixelData {
            expected: 300,
            actual: 50
        })
    ));
    assert_eq!(pipeline.stage(), PipelineStage::Failed);
    assert_no_outputs(dir.path());
}

#[test]
fn unsupported_headers_are_rejected_without_outputs() {
    let cases: [&[u8]; 4] = [
        b"P5\n2 2\n255\n",
        b"P6\n2 2\n1\n",
        b"P6\n0 2\n255\n",
        b"P6\n2\n",
    ];
    for header in cases {
        let dir = tempdir().unwrap();
        let mut bytes = header.to_vec();
        bytes.extend_from_slice(&[0u8; 12]);
        let (_, result) = run_on(dir.path(), &bytes);
        assert!(
            matches!(result, Err(PipelineError::HeaderInvalid(_))),
            "header {:?} gave {result:?}",
            String::from_utf8_lossy(header)
        );
        assert_no_outputs(dir.path());
    }
}

#[test]
fn missing_input_is_input_unavailable() {
    let dir = tempdir().unwrap();
    let mut pipeline = Pipeline::new(config_in(dir.path(), false));
    let err = pipeline.run(&dir.path().join("absent.ppm")).unwrap_err();
    assert!(matches!(err, PipelineError::InputUnavailable { .. }));
    assert_no_outputs(dir.path());
}

#[test]
fn writer_output_reads_back_identically() {
    let (w, h) = (9usize, 4usize);
    let img = RgbImage::from_raw(w, h, noise_rgb(w, h, 3)).unwrap();
    let mut bytes = Vec::new();
    encode_ppm(&mut bytes, &img).unwrap();
    let back = decode_ppm(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(back, img);
}

#[test]
fn writer_output_is_readable_by_an_independent_decoder() {
    let (w, h) = (16usize, 12usize);
    let img = RgbImage::from_raw(w, h, checkerboard_rgb(w, h, 4)).unwrap();
    let mut bytes = Vec::new();
    encode_ppm(&mut bytes, &img).unwrap();
    let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Pnm)
        .unwrap()
        .into_rgb8();
    assert_eq!(decoded.dimensions(), (w as u32, h as u32));
    assert_eq!(decoded.as_raw().as_slice(), img.as_slice().unwrap());
}
