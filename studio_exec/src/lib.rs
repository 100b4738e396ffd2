//! # Studio library.
//!
//! This library holds the path authoring and playback core of the studio: everything a front end
//! needs to edit a path, simulate it and export it, without any dependency on a GUI toolkit.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Coordinate mapping - converts between canvas pixels and field inches
pub mod coord;

/// Kinematics - per-frame translation and rotation of the rigid robot body
pub mod kinematics;

/// Path model - the waypoints, velocities and turns being edited
pub mod path;

/// Simulation player - replays a path as a sequence of robot poses
pub mod sim;

/// Export - controller source generation and save files
pub mod export;

/// Edit processor - applies edit commands to the path model
pub mod edit_processor;

/// Parameters for the studio executable
pub mod params;
