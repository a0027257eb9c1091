pub mod constants;
pub mod error;
pub mod format;
pub mod gate;
pub mod session;
