// Format constants for the event-stream encodings

pub const SUPPORTED_ENCODINGS: [&str; 3] = ["DAT", "EVT2", "EVT3"];

// Required file suffixes
pub const DAT_EXTENSION: &str = ".dat";
pub const RAW_EXTENSION: &str = ".raw";

// Smallest chunk holding one decodable EVT3 unit
pub const EVT3_MIN_CHUNK_SIZE: usize = 12;
pub const MIN_CHUNK_SIZE: usize = 1;

// Fallback chunk size when the caller gives none
pub const DEFAULT_BUFF_SIZE: usize = 8192;

// Decoded event: t(i64) x(i16) y(i16) p(u8)
pub const EVENT_RECORD_PACKED_SIZE: usize = 8 + 2 + 2 + 1; // 13 bytes

const _: () = assert!(DEFAULT_BUFF_SIZE >= EVT3_MIN_CHUNK_SIZE);
const _: () = assert!(DEFAULT_BUFF_SIZE >= MIN_CHUNK_SIZE);
