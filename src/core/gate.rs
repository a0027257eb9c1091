//! Pre-flight checks run before any recording is opened by the codec.
//!
//! Every check is stateless and fails on the first violated condition. The
//! only side effect is in [`validate_output_path`], which creates an empty
//! placeholder file so permission problems surface before bulk writing.
//!
//! Validating the same output path from several callers at once is not
//! atomic: the existence check and the placeholder creation may interleave.
//! Callers must serialize access to a given output path themselves.

use crate::core::error::{GateError, Result};
use crate::core::format::{ChunkSize, Encoding, FilePath, RawValue};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Parse an encoding name, case-insensitively, into its canonical tag.
pub fn normalize_encoding(raw: impl Into<RawValue>) -> Result<Encoding> {
    let text = raw.into().into_text("encoding")?;
    let encoding: Encoding = text.parse()?;
    debug!(input = %text, %encoding, "encoding normalized");
    Ok(encoding)
}

/// Check that `path` carries the suffix `encoding` requires. Does not touch
/// the filesystem.
pub fn check_extension(path: impl AsRef<Path>, encoding: Encoding) -> Result<()> {
    let path = path.as_ref();
    let expected = encoding.extension();
    if path.to_string_lossy().ends_with(expected) {
        Ok(())
    } else {
        Err(GateError::ExtensionMismatch {
            path: path.to_path_buf(),
            encoding,
            expected,
        })
    }
}

/// Resolve an existing recording for reading.
pub fn validate_input_path(raw: impl Into<RawValue>, encoding: Encoding) -> Result<FilePath> {
    let path = make_absolute(&raw.into().into_path("input path")?);

    let resolved = match fs::canonicalize(&path) {
        Ok(p) if p.is_file() => p,
        Ok(p) => return Err(GateError::NotFound(p)),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "input path did not resolve");
            return Err(GateError::NotFound(path));
        }
    };
    check_extension(&resolved, encoding)?;

    info!(path = %resolved.display(), %encoding, "input file validated");
    Ok(FilePath::new(resolved))
}

/// Resolve a destination for writing and leave an empty placeholder there.
pub fn validate_output_path(raw: impl Into<RawValue>, encoding: Encoding) -> Result<FilePath> {
    let path = make_absolute(&raw.into().into_path("output path")?);

    let parent = path
        .parent()
        .ok_or_else(|| GateError::DirectoryMissing(path.clone()))?;
    let parent = fs::canonicalize(parent)
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| GateError::DirectoryMissing(parent.to_path_buf()))?;

    let resolved = match path.file_name() {
        Some(name) => {
            let joined = parent.join(name);
            fs::canonicalize(&joined).unwrap_or(joined)
        }
        None => path.clone(),
    };
    check_extension(&resolved, encoding)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&resolved)
        .map_err(|e| GateError::CreateFailed {
            path: resolved.clone(),
            source: Some(e),
        })?;
    if let Ok(meta) = file.metadata() {
        if meta.len() > 0 {
            warn!(path = %resolved.display(), bytes = meta.len(), "output file already holds data");
        }
    }
    drop(file);

    // Re-resolve: the placeholder may be a symlink target elsewhere.
    let confirmed = fs::canonicalize(&resolved).map_err(|e| GateError::CreateFailed {
        path: resolved.clone(),
        source: Some(e),
    })?;
    if !confirmed.is_file() {
        return Err(GateError::CreateFailed {
            path: confirmed,
            source: None,
        });
    }
    check_extension(&confirmed, encoding)?;

    info!(path = %confirmed.display(), %encoding, "output file validated");
    Ok(FilePath::new(confirmed))
}

/// Check a chunk size against the minimum unit of `encoding`.
pub fn validate_chunk_size(value: impl Into<RawValue>, encoding: Encoding) -> Result<ChunkSize> {
    let what = match encoding {
        Encoding::Evt3 => "EVT3 chunk size",
        Encoding::Dat | Encoding::Evt2 => "chunk size",
    };
    let value = value.into().into_integer(what)?;
    let min = encoding.min_chunk_size() as i128;

    let size = usize::try_from(value)
        .ok()
        .filter(|_| value >= min)
        .ok_or(GateError::Range { what, value, min })?;

    debug!(chunk_size = size, %encoding, "chunk size validated");
    Ok(ChunkSize::new(size))
}

/// Size of the intermediate buffer the codec copies events through. Any
/// positive integer is accepted, whatever the encoding.
pub fn validate_buff_size(value: impl Into<RawValue>) -> Result<ChunkSize> {
    let value = value.into().into_integer("buffer size")?;
    let size = usize::try_from(value)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(GateError::Range {
            what: "buffer size",
            value,
            min: 1,
        })?;

    debug!(buff_size = size, "buffer size validated");
    Ok(ChunkSize::new(size))
}

/// Chunk size to use when the caller may not have given one.
pub fn resolve_chunk_size(value: Option<RawValue>, encoding: Encoding) -> Result<ChunkSize> {
    match value {
        Some(v) => validate_chunk_size(v, encoding),
        None => Ok(ChunkSize::default()),
    }
}

/// Width of the windows a recording is read in, in milliseconds.
pub fn validate_time_window(raw: impl Into<RawValue>) -> Result<Duration> {
    positive_millis(raw.into(), "time window")
}

/// Duration, in milliseconds, of the recording produced by a cut.
pub fn validate_cut_duration(raw: impl Into<RawValue>) -> Result<Duration> {
    positive_millis(raw.into(), "cut duration")
}

fn positive_millis(raw: RawValue, what: &'static str) -> Result<Duration> {
    let value = raw.into_integer(what)?;
    let millis = u64::try_from(value)
        .ok()
        .filter(|&ms| ms > 0)
        .ok_or(GateError::Range {
            what,
            value,
            min: 1,
        })?;
    Ok(Duration::from_millis(millis))
}

fn make_absolute(path: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    // Rebuild from components: drops `.` segments and any trailing slash.
    absolute.components().collect()
}
