// Per-recording session holding validated codec settings

use crate::core::error::{GateError, Result};
use crate::core::format::{ChunkSize, Encoding, FilePath, RawValue};
use crate::core::gate::*;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Settings for one recording, each validated when set. A failing setter
/// leaves the session unchanged.
#[derive(Debug, Clone)]
pub struct Session {
    encoding: Encoding,
    input: Option<FilePath>,
    chunk_size: ChunkSize,
    buff_size: ChunkSize,
    time_window: Option<Duration>,
}

/// Validated arguments for re-slicing the session input into a shorter file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutPlan {
    pub encoding: Encoding,
    pub input: FilePath,
    pub output: FilePath,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    pub chunk_size: ChunkSize,
    pub buff_size: ChunkSize,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl Session {
    pub fn new(encoding: impl Into<RawValue>) -> Result<Self> {
        Ok(Self {
            encoding: normalize_encoding(encoding)?,
            input: None,
            chunk_size: ChunkSize::default(),
            buff_size: ChunkSize::default(),
            time_window: None,
        })
    }

    pub fn with_buff_size(
        encoding: impl Into<RawValue>,
        buff_size: impl Into<RawValue>,
    ) -> Result<Self> {
        let mut session = Self::new(encoding)?;
        session.set_buff_size(buff_size)?;
        Ok(session)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn input(&self) -> Option<&FilePath> {
        self.input.as_ref()
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.chunk_size
    }

    pub fn buff_size(&self) -> ChunkSize {
        self.buff_size
    }

    pub fn time_window(&self) -> Option<Duration> {
        self.time_window
    }

    /// Switch encoding. The current input and chunk size must satisfy the
    /// new encoding's rules.
    pub fn set_encoding(&mut self, raw: impl Into<RawValue>) -> Result<Encoding> {
        let encoding = normalize_encoding(raw)?;
        if let Some(input) = &self.input {
            check_extension(input, encoding)?;
        }
        let chunk_size = validate_chunk_size(self.chunk_size.get(), encoding)?;

        if encoding != self.encoding {
            info!(from = %self.encoding, to = %encoding, "session encoding changed");
        }
        self.encoding = encoding;
        self.chunk_size = chunk_size;
        Ok(encoding)
    }

    pub fn set_file(&mut self, raw: impl Into<RawValue>) -> Result<&FilePath> {
        let path = validate_input_path(raw, self.encoding)?;
        Ok(&*self.input.insert(path))
    }

    pub fn set_chunk_size(&mut self, raw: impl Into<RawValue>) -> Result<ChunkSize> {
        self.chunk_size = validate_chunk_size(raw, self.encoding)?;
        Ok(self.chunk_size)
    }

    pub fn set_buff_size(&mut self, raw: impl Into<RawValue>) -> Result<ChunkSize> {
        self.buff_size = validate_buff_size(raw)?;
        Ok(self.buff_size)
    }

    pub fn set_time_window(&mut self, raw: impl Into<RawValue>) -> Result<Duration> {
        let window = validate_time_window(raw)?;
        self.time_window = Some(window);
        Ok(window)
    }

    pub fn require_input(&self) -> Result<&FilePath> {
        self.input.as_ref().ok_or(GateError::Unset("input file"))
    }

    pub fn prepare_output(&self, raw: impl Into<RawValue>) -> Result<FilePath> {
        validate_output_path(raw, self.encoding)
    }

    /// Validate a cut request. `input` overrides the session file for this
    /// call only. The output placeholder is only created once every other
    /// argument has passed.
    pub fn plan_cut(
        &self,
        input: Option<RawValue>,
        output: impl Into<RawValue>,
        duration: impl Into<RawValue>,
    ) -> Result<CutPlan> {
        let input = match input {
            Some(raw) => validate_input_path(raw, self.encoding)?,
            None => self.require_input()?.clone(),
        };
        let duration = validate_cut_duration(duration)?;
        let output = self.prepare_output(output)?;

        Ok(CutPlan {
            encoding: self.encoding,
            input,
            output,
            duration,
            chunk_size: self.chunk_size,
            buff_size: self.buff_size,
        })
    }
}
