//! # Export module
//!
//! Turns a path into controller source code, and reads and writes the `.auton` save files.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod code;
mod save;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use code::*;
pub use save::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot export a path with {0} waypoint(s), at least 2 are needed")]
    EmptyPath(usize),

    #[error("Malformed save file at line {line}: {reason}")]
    MalformedSave { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
