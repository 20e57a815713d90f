//! The polygon: an ordered, owned vertex list plus a cumulative angle.
//!
//! Edge `i` connects vertex `i` to vertex `(i + 1) % n`, so insertion order
//! is the outline. Every position argument may come in any unit; it is
//! converted into the polygon's working unit first.
//!
//! ## Rust Lesson #5: impl blocks
//!
//! Data (the struct) and behavior (the impl) are separate. Capabilities
//! shared with other types (`Movable`, `UnitBasedObject`) are traits the
//! polygon implements, not base classes it inherits from.

use std::ops::Index;

use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::{
    Segment, bounding_box_of_points, centroid_of_points, point_in_polygon,
    signed_area_of_points,
};
use crate::movable::Movable;
use crate::point::{PointMut, PointRef, PolygonPoint, VertexMut};
use crate::unit_based::UnitBasedObject;
use crate::units::{UnitContext, UnitVector, Units};

/// Default tolerance for [`Polygon::segment_containing_point`].
pub const DEFAULT_SEGMENT_TOLERANCE: f64 = 0.01;

/// One edge of a polygon: the vertex it starts at and the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonSegment<'a> {
    pub first: PointRef<'a>,
    pub second: PointRef<'a>,
}

impl PolygonSegment<'_> {
    /// Edge index (same as the first vertex's index).
    #[inline]
    pub fn index(&self) -> usize {
        self.first.index()
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.first.position(), self.second.position())
    }

    pub fn length(&self) -> f64 {
        self.segment().length()
    }

    /// Degrees clockwise from up, in [0, 360).
    pub fn angle(&self) -> f64 {
        self.segment().angle()
    }
}

/// A mutable polygon.
///
/// The cumulative angle is the sum of every `rotate` / `set_rotation`
/// applied. It is *not* derived from the vertices: moving single vertices
/// leaves it untouched, so it can drift away from the actual shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<PolygonPoint>,
    angle: f64,
    unit: Units,
    context: UnitContext,
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    /// Empty polygon in world units with the default unit context.
    pub fn new() -> Self {
        Self::with_unit(Units::World, UnitContext::default())
    }

    pub fn with_unit(unit: Units, context: UnitContext) -> Self {
        Self {
            points: Vec::new(),
            angle: 0.0,
            unit,
            context,
        }
    }

    /// Build a polygon by appending `positions` in order.
    ///
    /// The working unit is taken from the first position.
    pub fn from_positions<I>(positions: I, context: UnitContext) -> Result<Self>
    where
        I: IntoIterator<Item = UnitVector>,
    {
        let mut positions = positions.into_iter().peekable();
        let unit = positions.peek().map(|p| p.unit).unwrap_or_default();
        let mut polygon = Self::with_unit(unit, context);
        for position in positions {
            polygon.add_point(position, None)?;
        }
        Ok(polygon)
    }

    pub fn context(&self) -> &UnitContext {
        &self.context
    }

    /// Convert `v` into the working unit.
    pub(crate) fn to_local(&self, v: UnitVector) -> Result<UnitVector> {
        v.to(self.unit, &self.context)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(GeometryError::OutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }

    /// Caller guarantees `index` is in range.
    pub(crate) fn point_slot(&mut self, index: usize) -> &mut PolygonPoint {
        &mut self.points[index]
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, point) in self.points.iter_mut().enumerate().skip(start) {
            point.set_index(i);
        }
    }

    fn positions(&self) -> Vec<UnitVector> {
        self.points.iter().map(PolygonPoint::position).collect()
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Insert a vertex at `index` (`None` appends, closing the outline back
    /// to vertex 0). Vertices at or after `index` shift up one.
    ///
    /// Returns the new vertex's index.
    pub fn add_point(&mut self, position: UnitVector, index: Option<usize>) -> Result<usize> {
        let position = self.to_local(position)?;
        let len = self.points.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(GeometryError::OutOfRange { index, len });
        }

        self.points.insert(index, PolygonPoint::new(index, position));
        self.reindex_from(index + 1);
        debug!(index, x = position.x, y = position.y, count = len + 1, "point added");
        Ok(index)
    }

    /// Remove the vertex at `index` and renumber the ones after it.
    ///
    /// Removing the last remaining vertex is refused with `InvalidOperation`:
    /// a polygon that had points never becomes empty again.
    pub fn remove_point(&mut self, index: usize) -> Result<PolygonPoint> {
        self.check_index(index)?;
        if self.points.len() == 1 {
            return Err(GeometryError::InvalidOperation(
                "cannot remove the last point of a polygon".to_string(),
            ));
        }

        let removed = self.points.remove(index);
        self.reindex_from(index);
        debug!(index, count = self.points.len(), "point removed");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Bounds-checked read handle to vertex `index`.
    pub fn get(&self, index: usize) -> Result<PointRef<'_>> {
        self.check_index(index)?;
        Ok(PointRef::new(self, index))
    }

    /// Bounds-checked write handle to vertex `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<PointMut<'_>> {
        self.check_index(index)?;
        Ok(PointMut::new(self, index))
    }

    /// All vertices in outline order.
    pub fn points(&self) -> &[PolygonPoint] {
        &self.points
    }

    /// Alias of [`Polygon::points`].
    pub fn get_all_points(&self) -> &[PolygonPoint] {
        self.points()
    }

    /// Movable views of every vertex, in order. Membership and order can
    /// only change through `add_point` / `remove_point`.
    pub fn points_mut(&mut self) -> impl Iterator<Item = VertexMut<'_>> {
        let context = &self.context;
        self.points
            .iter_mut()
            .map(move |point| VertexMut::new(point, context))
    }

    pub fn points_amount(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// Edge `index`: vertex `index` and vertex `(index + 1) % n`.
    pub fn line(&self, index: usize) -> Result<PolygonSegment<'_>> {
        self.check_index(index)?;
        let next = (index + 1) % self.points.len();
        Ok(PolygonSegment {
            first: PointRef::new(self, index),
            second: PointRef::new(self, next),
        })
    }

    /// Every edge in index order.
    pub fn segments(&self) -> impl Iterator<Item = PolygonSegment<'_>> {
        let n = self.points.len();
        (0..n).map(move |i| PolygonSegment {
            first: PointRef::new(self, i),
            second: PointRef::new(self, (i + 1) % n),
        })
    }

    /// Degrees clockwise from up of the vector vertex `segment` -> next.
    pub fn segment_angle(&self, segment: usize) -> Result<f64> {
        Ok(self.line(segment)?.angle())
    }

    pub fn segment_length(&self, segment: usize) -> Result<f64> {
        Ok(self.line(segment)?.length())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Edge with the smallest distance to `position` (perpendicular, clamped
    /// to the segment). Lowest index wins exact ties.
    pub fn find_closest_line(&self, position: UnitVector) -> Result<PolygonSegment<'_>> {
        let position = self.to_local(position)?;
        let mut best: Option<(PolygonSegment<'_>, f64)> = None;
        for segment in self.segments() {
            let distance = segment.segment().distance_to(position);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((segment, distance));
            }
        }
        best.map(|(segment, _)| segment)
            .ok_or_else(|| GeometryError::NotFound("polygon has no edges".to_string()))
    }

    /// Nearest vertex to `position` whose index is not in `excluded`.
    /// Lowest index wins exact ties.
    ///
    /// With `neighbor`, returns whichever of that vertex's two cyclic
    /// neighbours is closer to `position` instead (lowest index on ties).
    /// The neighbour step does not look at `excluded`.
    pub fn find_closest_point(
        &self,
        position: UnitVector,
        neighbor: bool,
        excluded: &[usize],
    ) -> Result<PointRef<'_>> {
        let position = self.to_local(position)?;
        let distance = |i: usize| (self.points[i].position() - position).length();

        let mut best: Option<(usize, f64)> = None;
        for i in (0..self.points.len()).filter(|i| !excluded.contains(i)) {
            let d = distance(i);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        let (closest, _) = best.ok_or_else(|| {
            GeometryError::NotFound("every point of the polygon is excluded".to_string())
        })?;

        if !neighbor {
            return Ok(PointRef::new(self, closest));
        }

        let n = self.points.len();
        let previous = (closest + n - 1) % n;
        let next = (closest + 1) % n;
        let (d_previous, d_next) = (distance(previous), distance(next));
        let chosen = if d_previous < d_next {
            previous
        } else if d_next < d_previous {
            next
        } else {
            previous.min(next)
        };
        Ok(PointRef::new(self, chosen))
    }

    /// First edge (index order) within `tolerance` of `position`, or `None`.
    pub fn segment_containing_point(
        &self,
        position: UnitVector,
        tolerance: f64,
    ) -> Result<Option<PolygonSegment<'_>>> {
        let position = self.to_local(position)?;
        Ok(self
            .segments()
            .find(|segment| segment.segment().distance_to(position) <= tolerance))
    }

    /// Arithmetic mean of all vertices.
    pub fn centroid(&self) -> Result<UnitVector> {
        centroid_of_points(&self.positions()).ok_or_else(|| {
            GeometryError::InvalidOperation("centroid of a polygon with no points".to_string())
        })
    }

    /// Is the centroid inside the box `position ± tolerance` (inclusive)?
    pub fn is_centroid_around_position(
        &self,
        position: UnitVector,
        tolerance: UnitVector,
    ) -> Result<bool> {
        let position = self.to_local(position)?;
        let tolerance = self.to_local(tolerance)?;
        Ok(self.centroid()?.is_within(position, tolerance))
    }

    /// First vertex (index order) inside the box `position ± tolerance`.
    pub fn point_around_position(
        &self,
        position: UnitVector,
        tolerance: UnitVector,
    ) -> Result<Option<PointRef<'_>>> {
        let position = self.to_local(position)?;
        let tolerance = self.to_local(tolerance)?;
        Ok(self
            .points
            .iter()
            .find(|p| p.position().is_within(position, tolerance))
            .map(|p| PointRef::new(self, p.index())))
    }

    /// Bounding box as (min, max) corners, `None` when empty.
    pub fn bounding_box(&self) -> Option<(UnitVector, UnitVector)> {
        bounding_box_of_points(&self.positions())
    }

    /// Shoelace area. Positive for counter-clockwise winding in y-up terms.
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.positions())
    }

    /// Check if the outline has clockwise winding (y-up terms). On screen
    /// (y-down) such a polygon appears counter-clockwise.
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Ray-casting containment test. Always false below three vertices.
    pub fn contains(&self, position: UnitVector) -> Result<bool> {
        let position = self.to_local(position)?;
        Ok(point_in_polygon(position, &self.positions()))
    }

    // ------------------------------------------------------------------
    // Rigid transforms
    // ------------------------------------------------------------------

    /// Cumulative angle applied through `rotate` / `set_rotation`.
    pub fn rotation(&self) -> f64 {
        self.angle
    }

    /// Rotate every vertex by `angle` degrees around `origin` (positive =
    /// clockwise on screen) and add `angle` to the cumulative angle.
    pub fn rotate(&mut self, angle: f64, origin: UnitVector) -> Result<()> {
        let origin = self.to_local(origin)?;
        self.rotate_vertices(angle, origin);
        self.angle += angle;
        trace!(angle, total = self.angle, "polygon rotated");
        Ok(())
    }

    /// Rotate so that the cumulative angle becomes `angle`.
    pub fn set_rotation(&mut self, angle: f64, origin: UnitVector) -> Result<()> {
        let origin = self.to_local(origin)?;
        self.rotate_vertices(angle - self.angle, origin);
        self.angle = angle;
        trace!(angle, "polygon rotation set");
        Ok(())
    }

    fn rotate_vertices(&mut self, angle: f64, origin: UnitVector) {
        for point in &mut self.points {
            let position = point.position_mut();
            *position = position.rotate_about(angle, origin);
        }
    }

    /// Translate the whole polygon so its centroid lands on `position`.
    pub fn set_position_from_centroid(&mut self, position: UnitVector) -> Result<()> {
        let position = self.to_local(position)?;
        let offset = position - self.centroid()?;
        self.move_by(offset)
    }
}

impl Movable for Polygon {
    /// Rigid translation of every vertex. The cumulative angle is unchanged.
    fn move_by(&mut self, offset: UnitVector) -> Result<()> {
        let offset = self.to_local(offset)?;
        for point in &mut self.points {
            *point.position_mut() += offset;
        }
        trace!(dx = offset.x, dy = offset.y, "polygon moved");
        Ok(())
    }

    /// Move vertex 0 to `position`. Only vertex 0 moves; see `move_by` for
    /// translating the whole polygon.
    fn set_position(&mut self, position: UnitVector) -> Result<()> {
        self.get_mut(0)?.set_position(position)
    }

    /// Position of vertex 0.
    fn position(&self) -> Result<UnitVector> {
        Ok(self.get(0)?.position())
    }
}

impl UnitBasedObject for Polygon {
    fn unit(&self) -> Units {
        self.unit
    }

    fn store_unit(&mut self, unit: Units) {
        self.unit = unit;
    }

    /// Convert every vertex into `unit`. All-or-nothing: on failure no
    /// vertex changes.
    fn reset_unit(&mut self, unit: Units) -> Result<()> {
        let converted = self
            .points
            .iter()
            .map(|p| p.position().to(unit, &self.context))
            .collect::<Result<Vec<_>>>()?;
        for (point, position) in self.points.iter_mut().zip(converted) {
            *point.position_mut() = position;
        }
        Ok(())
    }
}

impl Index<usize> for Polygon {
    type Output = PolygonPoint;

    /// Panics when `index` is out of range, like slice indexing. Use
    /// [`Polygon::get`] for a checked lookup.
    fn index(&self, index: usize) -> &PolygonPoint {
        &self.points[index]
    }
}
