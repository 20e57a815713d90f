//! Polygon vertices and the handles that reach them through their owner.
//!
//! ## Rust Lesson #4: Ownership & Borrowing
//!
//! A vertex never owns its polygon and never outlives it. Instead of a
//! stored back-pointer, a vertex is reached through a *handle* that
//! borrows the polygon:
//!
//! - [`PointRef`] = `&Polygon` + index (read-only queries)
//! - [`PointMut`] = `&mut Polygon` + index (moves, removal)
//!
//! While a `PointMut` is alive nobody else can touch the polygon, and
//! `PointMut::remove` consumes the handle - so "using a point after it was
//! removed" simply doesn't compile.

use crate::error::{GeometryError, Result};
use crate::movable::Movable;
use crate::polygon::Polygon;
use crate::units::{UnitContext, UnitVector};

/// A vertex as stored inside its polygon.
///
/// `index` always equals the vertex's slot in the polygon's point list;
/// the polygon renumbers on every insertion and removal.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPoint {
    index: usize,
    position: UnitVector,
}

impl PolygonPoint {
    pub(crate) fn new(index: usize, position: UnitVector) -> Self {
        Self { index, position }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Absolute position, in the owning polygon's unit.
    #[inline]
    pub fn position(&self) -> UnitVector {
        self.position
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn position_mut(&mut self) -> &mut UnitVector {
        &mut self.position
    }
}

/// Reference used by relative position get/set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelativePositionFrom {
    /// Relative to vertex 0.
    #[default]
    Point0,
    /// Relative to the polygon's centroid.
    Centroid,
}

fn reference_position(polygon: &Polygon, from: RelativePositionFrom) -> Result<UnitVector> {
    match from {
        RelativePositionFrom::Point0 => Ok(polygon.get(0)?.position()),
        RelativePositionFrom::Centroid => polygon.centroid(),
    }
}

/// Read-only view of one vertex, borrowing its polygon.
#[derive(Debug, Clone, Copy)]
pub struct PointRef<'a> {
    polygon: &'a Polygon,
    index: usize,
}

impl<'a> PointRef<'a> {
    /// Caller guarantees `index < polygon.points_amount()`.
    pub(crate) fn new(polygon: &'a Polygon, index: usize) -> Self {
        Self { polygon, index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stored vertex.
    pub fn point(&self) -> &'a PolygonPoint {
        &self.polygon.points()[self.index]
    }

    #[inline]
    pub fn position(&self) -> UnitVector {
        self.point().position()
    }

    /// Euclidean distance to `position`, in the polygon's unit.
    pub fn distance(&self, position: UnitVector) -> Result<f64> {
        self.position().distance(position, self.polygon.context())
    }

    /// This vertex's position minus the selected reference position.
    pub fn relative_position(&self, from: RelativePositionFrom) -> Result<UnitVector> {
        Ok(self.position() - reference_position(self.polygon, from)?)
    }
}

impl PartialEq for PointRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.polygon, other.polygon) && self.index == other.index
    }
}

/// Mutable view of one vertex, holding the polygon's unique borrow.
#[derive(Debug)]
pub struct PointMut<'a> {
    polygon: &'a mut Polygon,
    index: usize,
}

impl<'a> PointMut<'a> {
    /// Caller guarantees `index < polygon.points_amount()`.
    pub(crate) fn new(polygon: &'a mut Polygon, index: usize) -> Self {
        Self { polygon, index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Reborrow as a read-only handle.
    pub fn reborrow(&self) -> PointRef<'_> {
        PointRef::new(&*self.polygon, self.index)
    }

    pub fn distance(&self, position: UnitVector) -> Result<f64> {
        self.reborrow().distance(position)
    }

    pub fn relative_position(&self, from: RelativePositionFrom) -> Result<UnitVector> {
        self.reborrow().relative_position(from)
    }

    /// Place this vertex so that, afterwards, `relative_position(from)`
    /// equals `position`.
    ///
    /// The centroid moves with the vertex (by 1/n of the move), so the
    /// target is solved against the centroid *after* the move:
    /// `p' = (n·(r + c) − p) / (n − 1)`.
    ///
    /// A vertex that is its own reference (vertex 0 with `Point0`, or the
    /// only vertex with `Centroid`) always has offset zero: any other
    /// `position` fails with `InvalidOperation`.
    pub fn set_relative_position(
        &mut self,
        from: RelativePositionFrom,
        position: UnitVector,
    ) -> Result<()> {
        let offset = self.polygon.to_local(position)?;
        let n = self.polygon.points_amount();
        let self_referenced = match from {
            RelativePositionFrom::Point0 => self.index == 0,
            RelativePositionFrom::Centroid => n == 1,
        };
        if self_referenced {
            if offset.x == 0.0 && offset.y == 0.0 {
                return Ok(());
            }
            return Err(GeometryError::InvalidOperation(format!(
                "point {} is its own reference; only a zero offset is reachable",
                self.index
            )));
        }

        let target = match from {
            RelativePositionFrom::Point0 => reference_position(&*self.polygon, from)? + offset,
            RelativePositionFrom::Centroid => {
                let centroid = self.polygon.centroid()?;
                let current = self.reborrow().position();
                let n = n as f64;
                ((offset + centroid) * n - current) / (n - 1.0)
            }
        };
        *self.position_mut() = target;
        Ok(())
    }

    /// Remove this vertex from its polygon. Vertices after it shift down one
    /// index. Fails with `InvalidOperation` on the last remaining vertex.
    pub fn remove(self) -> Result<PolygonPoint> {
        self.polygon.remove_point(self.index)
    }

    fn position_mut(&mut self) -> &mut UnitVector {
        self.polygon.point_slot(self.index).position_mut()
    }
}

impl Movable for PointMut<'_> {
    /// Moves this vertex only. The polygon's cumulative angle is not touched.
    fn move_by(&mut self, offset: UnitVector) -> Result<()> {
        let offset = self.polygon.to_local(offset)?;
        *self.position_mut() += offset;
        Ok(())
    }

    fn set_position(&mut self, position: UnitVector) -> Result<()> {
        let position = self.polygon.to_local(position)?;
        *self.position_mut() = position;
        Ok(())
    }

    fn position(&self) -> Result<UnitVector> {
        Ok(self.reborrow().position())
    }
}

/// Mutable view of a vertex position yielded by `Polygon::points_mut`.
///
/// It can move the vertex but cannot reorder, replace, or remove it.
#[derive(Debug)]
pub struct VertexMut<'a> {
    index: usize,
    position: &'a mut UnitVector,
    context: &'a UnitContext,
}

impl<'a> VertexMut<'a> {
    pub(crate) fn new(point: &'a mut PolygonPoint, context: &'a UnitContext) -> Self {
        Self {
            index: point.index,
            position: &mut point.position,
            context,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Movable for VertexMut<'_> {
    fn move_by(&mut self, offset: UnitVector) -> Result<()> {
        let offset = offset.to(self.position.unit, self.context)?;
        *self.position += offset;
        Ok(())
    }

    fn set_position(&mut self, position: UnitVector) -> Result<()> {
        *self.position = position.to(self.position.unit, self.context)?;
        Ok(())
    }

    fn position(&self) -> Result<UnitVector> {
        Ok(*self.position)
    }
}
