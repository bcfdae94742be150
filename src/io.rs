//! File persistence helpers.
//!
//! - `write_atomic`: stream bytes into a sibling temp file, then rename it into place.
//! - `save_histogram`: write the five bucket counts as one space-separated line.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{PipelineError, Result};
use crate::histogram::LuminanceHistogram;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write `path` through `write`, so that either the complete file exists
/// afterwards or nothing new does.
///
/// Parent directories are created on demand. Any failure (create, write,
/// flush, rename) maps to [`PipelineError::OutputUnavailable`] and removes the
/// temporary file.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let unavailable = |source| PipelineError::OutputUnavailable {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path).map_err(unavailable)?;

    let tmp = temp_path(path);
    let result = File::create(&tmp).and_then(|file| {
        let mut out = BufWriter::new(file);
        write(&mut out)?;
        out.flush()?;
        out.get_ref().sync_all()?;
        drop(out);
        fs::rename(&tmp, path)
    });
    if let Err(err) = result {
        let _ = fs::remove_file(&tmp);
        return Err(unavailable(err));
    }
    Ok(())
}

/// Write `histogram` as `"c0 c1 c2 c3 c4"` with no trailing newline.
pub fn save_histogram(histogram: &LuminanceHistogram, path: &Path) -> Result<()> {
    write_atomic(path, |w| write!(w, "{histogram}"))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, |w| {
        serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::from)?;
        w.write_all(b"\n")
    })
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.partial", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn histogram_file_has_no_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("output.txt");
        let hist = LuminanceHistogram::from_counts([120, 340, 900, 1200, 440]);
        save_histogram(&hist, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "120 340 900 1200 440");
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let err = write_atomic(&path, |w| {
            w.write_all(b"half")?;
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), "output-unavailable");
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unwritable_target_is_output_unavailable() {
        let dir = tempdir().unwrap();
        // A directory where the file should go cannot be replaced by rename.
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();
        let err = write_atomic(&path, |w| w.write_all(b"data")).unwrap_err();
        assert!(matches!(err, PipelineError::OutputUnavailable { .. }));
    }

    #[test]
    fn json_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_file(&path, &serde_json::json!({ "width": 3 })).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"width\": 3"));
    }
}
