// Event-stream input gate
// Main library entry point

pub mod core;
pub mod models;
pub mod utils;

// Re-export main types
pub use crate::core::error::{GateError, GateErrorKind, Result};
pub use crate::core::format::{ChunkSize, Encoding, EventRecord, FilePath, RawValue};
pub use crate::core::gate::{
    check_extension, normalize_encoding, resolve_chunk_size, validate_buff_size,
    validate_chunk_size, validate_cut_duration, validate_input_path, validate_output_path,
    validate_time_window,
};
pub use crate::core::session::{CutPlan, Session};
pub use models::gate_model::{GateConfig, PreflightReport};
