//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `info` - Summarize a polygon scene (points, centroid, bounds, edges)
//! - `closest` - Nearest vertex or edge to a position
//! - `segment` - Edge a position lies on, within a tolerance
//! - `near` - Tolerance-box hits for vertices and the centroid
//! - `transform` - Move, rotate, recenter or re-unit a polygon

pub mod common;
pub mod scene;
pub mod info;
pub mod closest;
pub mod segment;
pub mod near;
pub mod transform;

pub use common::CliError;
pub use info::cmd_info;
pub use closest::cmd_closest;
pub use segment::cmd_segment;
pub use near::cmd_near;
pub use transform::cmd_transform;
