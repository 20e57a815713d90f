//! # poly-transform
//!
//! Polygon geometry and rigid transforms for a 2D game engine: an ordered,
//! mutable vertex list with closest-point/closest-edge queries, tolerance
//! searches, and rotations/translations that keep the cumulative angle in
//! step.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```
//! use poly_transform::{Movable, Polygon, UnitContext, UnitVector};
//!
//! let mut square = Polygon::from_positions(
//!     [
//!         UnitVector::world(0.0, 0.0),
//!         UnitVector::world(10.0, 0.0),
//!         UnitVector::world(10.0, 10.0),
//!         UnitVector::world(0.0, 10.0),
//!     ],
//!     UnitContext::default(),
//! )?;
//! square.move_by(UnitVector::world(5.0, 0.0))?;
//! assert_eq!(square.centroid()?, UnitVector::world(10.0, 5.0));
//! # Ok::<(), poly_transform::GeometryError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod movable;
pub mod point;
pub mod polygon;
pub mod unit_based;
pub mod units;

// Re-export common types at crate root for convenience.
pub use error::{GeometryError, Result};
pub use geometry::Segment;
pub use movable::Movable;
pub use point::{PointMut, PointRef, PolygonPoint, RelativePositionFrom, VertexMut};
pub use polygon::{DEFAULT_SEGMENT_TOLERANCE, Polygon, PolygonSegment};
pub use unit_based::UnitBasedObject;
pub use units::{UnitContext, UnitVector, Units};
