//! # Studio interface crate.
//!
//! Provides the command set through which an editor front end (GUI, script or
//! command line) drives the path model.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Path editing commands
pub mod edit;
