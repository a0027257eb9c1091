use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::Level;

use crate::core::error::{GateError, Result};
use crate::core::format::{ChunkSize, Encoding, FilePath};
use crate::core::session::{CutPlan, Session};

/// Preflight request as read from a JSON document. Values stay untyped so
/// the gate reports type problems with its own error kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub encoding: Value,
    #[serde(default, deserialize_with = "present")]
    pub input: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub output: Option<Value>,
    #[serde(default)]
    pub chunk_size: Option<Value>,
    #[serde(default)]
    pub buff_size: Option<Value>,
    #[serde(default)]
    pub time_window_ms: Option<Value>,
    #[serde(default)]
    pub cut_duration_ms: Option<Value>,
    #[serde(default)]
    pub log_level: Option<String>,
}

// Absent stays `None`; an explicit `null` is kept so the gate rejects it.
fn present<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    pub encoding: Encoding,
    pub input: Option<FilePath>,
    pub output: Option<FilePath>,
    pub chunk_size: ChunkSize,
    pub buff_size: ChunkSize,
    pub time_window_ms: Option<u64>,
    pub cut: Option<CutPlan>,
}

impl GateConfig {
    pub fn max_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|s| Level::from_str(s).ok())
            .unwrap_or(Level::INFO)
    }

    /// Run every configured check and collect the validated values.
    pub fn apply(&self) -> Result<PreflightReport> {
        let mut session = Session::new(&self.encoding)?;

        if let Some(size) = &self.chunk_size {
            session.set_chunk_size(size)?;
        }
        if let Some(size) = &self.buff_size {
            session.set_buff_size(size)?;
        }
        if let Some(window) = &self.time_window_ms {
            session.set_time_window(window)?;
        }
        if let Some(input) = &self.input {
            session.set_file(input)?;
        }

        let (output, cut) = match (&self.output, &self.cut_duration_ms) {
            (Some(out), Some(duration)) => {
                let plan = session.plan_cut(None, out, duration)?;
                (Some(plan.output.clone()), Some(plan))
            }
            (Some(out), None) => (Some(session.prepare_output(out)?), None),
            (None, Some(_)) => return Err(GateError::Unset("output file")),
            (None, None) => (None, None),
        };

        Ok(PreflightReport {
            encoding: session.encoding(),
            input: session.input().cloned(),
            output,
            chunk_size: session.chunk_size(),
            buff_size: session.buff_size(),
            time_window_ms: session.time_window().map(|d| d.as_millis() as u64),
            cut,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GateErrorKind;
    use serde_json::json;

    fn config(value: Value) -> GateConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_config() {
        let report = config(json!({ "encoding": "evt3" })).apply().unwrap();
        assert_eq!(report.encoding, Encoding::Evt3);
        assert_eq!(report.chunk_size.get(), 8192);
        assert!(report.input.is_none() && report.output.is_none() && report.cut.is_none());
    }

    #[test]
    fn test_null_chunk_size_uses_default() {
        let report = config(json!({ "encoding": "dat", "chunk_size": null }))
            .apply()
            .unwrap();
        assert_eq!(report.chunk_size.get(), 8192);
    }

    #[test]
    fn test_type_errors_surface_as_gate_kinds() {
        let err = config(json!({ "encoding": 3 })).apply().unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);

        let err = config(json!({ "encoding": "evt3", "chunk_size": "big" }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);

        let err = config(json!({ "encoding": "evt3", "chunk_size": 8 }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Range);
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.dat");
        std::fs::write(&input, b"x").unwrap();
        let output = dir.path().join("out.dat");

        let report = config(json!({
            "encoding": "Dat",
            "input": input,
            "output": output,
            "chunk_size": 1024,
            "time_window_ms": 20,
            "cut_duration_ms": 15000,
        }))
        .apply()
        .unwrap();

        assert_eq!(report.chunk_size.get(), 1024);
        assert_eq!(report.time_window_ms, Some(20));
        assert!(report.output.as_ref().unwrap().as_path().is_file());
        let cut = report.cut.unwrap();
        assert_eq!(cut.duration.as_millis(), 15000);
        assert_eq!(Some(&cut.output), report.output.as_ref());
    }

    #[test]
    fn test_null_paths_are_type_errors() {
        let err = config(json!({ "encoding": "dat", "input": null }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);

        let err = config(json!({ "encoding": "dat", "input": null, "output": null }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);

        let err = config(json!({ "encoding": "evt2", "output": null }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);
    }

    #[test]
    fn test_buff_size() {
        let report = config(json!({ "encoding": "evt3", "buff_size": 4 }))
            .apply()
            .unwrap();
        assert_eq!(report.buff_size.get(), 4);
        assert_eq!(report.chunk_size.get(), 8192);

        let report = config(json!({ "encoding": "evt3" })).apply().unwrap();
        assert_eq!(report.buff_size.get(), 8192);

        let err = config(json!({ "encoding": "dat", "buff_size": -1 }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Range);
        let err = config(json!({ "encoding": "dat", "buff_size": 1.21 }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Type);
    }

    #[test]
    fn test_cut_without_output() {
        let err = config(json!({ "encoding": "evt2", "cut_duration_ms": 100 }))
            .apply()
            .unwrap_err();
        assert_eq!(err.kind(), GateErrorKind::Unset);
    }

    #[test]
    fn test_max_level() {
        assert_eq!(config(json!({ "encoding": "dat" })).max_level(), Level::INFO);
        assert_eq!(
            config(json!({ "encoding": "dat", "log_level": "debug" })).max_level(),
            Level::DEBUG
        );
        assert_eq!(
            config(json!({ "encoding": "dat", "log_level": "loud" })).max_level(),
            Level::INFO
        );
    }
}
