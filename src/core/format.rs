// Data structures for the validation gate

use crate::core::constants::*;
use crate::core::error::{GateError, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Wire encoding of an event-camera recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    Dat,
    Evt2,
    Evt3,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Dat, Encoding::Evt2, Encoding::Evt3];

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Dat => "DAT",
            Encoding::Evt2 => "EVT2",
            Encoding::Evt3 => "EVT3",
        }
    }

    /// File suffix every path of this encoding must end with.
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Dat => DAT_EXTENSION,
            Encoding::Evt2 | Encoding::Evt3 => RAW_EXTENSION,
        }
    }

    pub fn min_chunk_size(self) -> usize {
        match self {
            Encoding::Evt3 => EVT3_MIN_CHUNK_SIZE,
            Encoding::Dat | Encoding::Evt2 => MIN_CHUNK_SIZE,
        }
    }
}

impl FromStr for Encoding {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DAT" => Ok(Encoding::Dat),
            "EVT2" => Ok(Encoding::Evt2),
            "EVT3" => Ok(Encoding::Evt3),
            _ => Err(GateError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = GateError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Encoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Loosely typed value handed to the gate by a caller surface (API call,
/// config document, CLI flag). Only the variants an operation expects pass
/// its type check.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Path(PathBuf),
    Integer(i128),
    Other(&'static str),
}

impl RawValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Text(_) => "string",
            RawValue::Path(_) => "path",
            RawValue::Integer(_) => "integer",
            RawValue::Other(name) => name,
        }
    }

    pub(crate) fn into_text(self, what: &'static str) -> Result<String> {
        match self {
            RawValue::Text(s) => Ok(s),
            other => Err(other.mismatch(what, "string")),
        }
    }

    pub(crate) fn into_path(self, what: &'static str) -> Result<PathBuf> {
        match self {
            RawValue::Text(s) => Ok(PathBuf::from(s)),
            RawValue::Path(p) => Ok(p),
            other => Err(other.mismatch(what, "string or path")),
        }
    }

    pub(crate) fn into_integer(self, what: &'static str) -> Result<i128> {
        match self {
            RawValue::Integer(n) => Ok(n),
            other => Err(other.mismatch(what, "integer")),
        }
    }

    fn mismatch(&self, what: &'static str, expected: &'static str) -> GateError {
        GateError::Type {
            what,
            expected,
            got: self.type_name(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<&String> for RawValue {
    fn from(s: &String) -> Self {
        RawValue::Text(s.clone())
    }
}

impl From<&Path> for RawValue {
    fn from(p: &Path) -> Self {
        RawValue::Path(p.to_path_buf())
    }
}

impl From<PathBuf> for RawValue {
    fn from(p: PathBuf) -> Self {
        RawValue::Path(p)
    }
}

impl From<&PathBuf> for RawValue {
    fn from(p: &PathBuf) -> Self {
        RawValue::Path(p.clone())
    }
}

impl From<&FilePath> for RawValue {
    fn from(p: &FilePath) -> Self {
        RawValue::Path(p.0.clone())
    }
}

macro_rules! raw_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for RawValue {
            fn from(n: $t) -> Self {
                RawValue::Integer(n as i128)
            }
        })*
    };
}

raw_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for RawValue {
    fn from(_: f64) -> Self {
        RawValue::Other("float")
    }
}

impl From<bool> for RawValue {
    fn from(_: bool) -> Self {
        RawValue::Other("boolean")
    }
}

impl From<&Value> for RawValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::String(s) => RawValue::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    RawValue::Integer(u as i128)
                } else {
                    RawValue::Other("float")
                }
            }
            Value::Null => RawValue::Other("null"),
            Value::Bool(_) => RawValue::Other("boolean"),
            Value::Array(_) => RawValue::Other("array"),
            Value::Object(_) => RawValue::Other("object"),
        }
    }
}

impl From<Value> for RawValue {
    fn from(v: Value) -> Self {
        RawValue::from(&v)
    }
}

/// Absolute path that has passed the gate for a given encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilePath(PathBuf);

impl FilePath {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Bytes handed to the codec per buffered read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(DEFAULT_BUFF_SIZE)
    }
}

/// Canonical decoded event produced by every encoding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventRecord {
    pub t: i64,
    pub x: i16,
    pub y: i16,
    pub p: u8,
}

impl EventRecord {
    pub const PACKED_SIZE: usize = EVENT_RECORD_PACKED_SIZE;
}
