//! Coordinates that know which unit they are measured in.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `UnitVector` is a small `Copy` value: passing it around copies 24 bytes,
//! there is nothing to borrow or free. Every operation returns a new vector;
//! only the `*Assign` operators mutate in place.
//!
//! Coordinates are y-down (screen convention, like SVG): +x is right,
//! +y is down.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Measurement unit of a [`UnitVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Scene/world units.
    #[default]
    World,
    /// Screen pixels.
    Pixels,
    /// Fraction of the reference size (1.0 spans the full width/height).
    Percentage,
}

impl Units {
    pub fn name(&self) -> &'static str {
        match self {
            Units::World => "world",
            Units::Pixels => "pixels",
            Units::Percentage => "percentage",
        }
    }

    /// Parse a unit from string.
    pub fn from_name(name: &str) -> Option<Units> {
        match name.to_lowercase().as_str() {
            "world" | "units" | "scene" => Some(Units::World),
            "pixels" | "px" => Some(Units::Pixels),
            "percentage" | "percent" | "%" => Some(Units::Percentage),
            _ => None,
        }
    }

    pub fn all() -> &'static [Units] {
        &[Units::World, Units::Pixels, Units::Percentage]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference frame used to convert between [`Units`].
///
/// Pixels are the pivot: world units scale by `pixels_per_unit`, percentages
/// scale by `reference_size`. A context without a reference size can still
/// convert between world units and pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitContext {
    /// How many pixels one world unit covers.
    pub pixels_per_unit: f64,
    /// Reference (screen) size in pixels, as (width, height).
    pub reference_size: Option<(f64, f64)>,
}

impl Default for UnitContext {
    fn default() -> Self {
        Self {
            pixels_per_unit: 1.0,
            reference_size: None,
        }
    }
}

impl UnitContext {
    pub fn with_reference_size(width: f64, height: f64) -> Self {
        Self {
            reference_size: Some((width, height)),
            ..Self::default()
        }
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f64) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    fn scale(&self, unit: Units, target: Units) -> Result<(f64, f64)> {
        let fail = |reason: &str| GeometryError::ConversionError {
            from: unit,
            to: target,
            reason: reason.to_string(),
        };
        match unit {
            Units::Pixels => Ok((1.0, 1.0)),
            Units::World => {
                let ppu = self.pixels_per_unit;
                if !ppu.is_finite() || ppu <= 0.0 {
                    return Err(fail("pixels_per_unit must be finite and positive"));
                }
                Ok((ppu, ppu))
            }
            Units::Percentage => match self.reference_size {
                Some((w, h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => Ok((w, h)),
                Some(_) => Err(fail("reference size must be finite and positive")),
                None => Err(fail("no reference size")),
            },
        }
    }

    /// Convert raw coordinates from one unit to another.
    pub fn convert(&self, x: f64, y: f64, from: Units, to: Units) -> Result<(f64, f64)> {
        if from == to {
            return Ok((x, y));
        }
        // pixels per `from` unit, then pixels per `to` unit
        let (fx, fy) = self.scale(from, to)?;
        let (tx, ty) = self.scale(to, from).map_err(|e| match e {
            GeometryError::ConversionError { reason, .. } => GeometryError::ConversionError {
                from,
                to,
                reason,
            },
            other => other,
        })?;
        Ok((x * fx / tx, y * fy / ty))
    }
}

/// A 2D coordinate tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitVector {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub unit: Units,
}

impl UnitVector {
    pub const ZERO: UnitVector = UnitVector {
        x: 0.0,
        y: 0.0,
        unit: Units::World,
    };

    #[inline]
    pub fn new(x: f64, y: f64, unit: Units) -> Self {
        Self { x, y, unit }
    }

    /// Shorthand for a vector in world units.
    #[inline]
    pub fn world(x: f64, y: f64) -> Self {
        Self::new(x, y, Units::World)
    }

    #[inline]
    pub fn pixels(x: f64, y: f64) -> Self {
        Self::new(x, y, Units::Pixels)
    }

    /// Same real-world position expressed in `unit`.
    pub fn to(self, unit: Units, ctx: &UnitContext) -> Result<UnitVector> {
        let (x, y) = ctx.convert(self.x, self.y, self.unit, unit)?;
        Ok(UnitVector::new(x, y, unit))
    }

    /// `self + rhs`, converting `rhs` into `self`'s unit first.
    pub fn checked_add(self, rhs: UnitVector, ctx: &UnitContext) -> Result<UnitVector> {
        Ok(self + rhs.to(self.unit, ctx)?)
    }

    /// `self - rhs`, converting `rhs` into `self`'s unit first.
    pub fn checked_sub(self, rhs: UnitVector, ctx: &UnitContext) -> Result<UnitVector> {
        Ok(self - rhs.to(self.unit, ctx)?)
    }

    /// Euclidean distance, in `self`'s unit.
    pub fn distance(self, other: UnitVector, ctx: &UnitContext) -> Result<f64> {
        Ok(self.checked_sub(other, ctx)?.length())
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Rotate around `origin` by `angle` degrees. Positive angles turn
    /// clockwise on screen (y-down).
    pub fn rotate_about(self, angle: f64, origin: UnitVector) -> UnitVector {
        let (sin, cos) = angle.to_radians().sin_cos();
        let d = self - origin;
        UnitVector::new(
            origin.x + d.x * cos - d.y * sin,
            origin.y + d.x * sin + d.y * cos,
            self.unit,
        )
    }

    /// Inclusive axis-aligned box test: `|self - center| <= tolerance` per axis.
    pub fn is_within(self, center: UnitVector, tolerance: UnitVector) -> bool {
        (self.x - center.x).abs() <= tolerance.x.abs()
            && (self.y - center.y).abs() <= tolerance.y.abs()
    }

    #[inline]
    fn assert_same_unit(self, rhs: UnitVector, op: &str) {
        assert!(
            self.unit == rhs.unit,
            "cannot {} {} vector and {} vector without a UnitContext (use checked_{})",
            op,
            self.unit,
            rhs.unit,
            op
        );
    }
}

impl fmt::Display for UnitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.unit)
    }
}

// Plain operators only accept matching units. Mixed units are a
// programmer error; the `checked_*` methods handle conversion.

impl Add for UnitVector {
    type Output = UnitVector;

    fn add(self, rhs: UnitVector) -> UnitVector {
        self.assert_same_unit(rhs, "add");
        UnitVector::new(self.x + rhs.x, self.y + rhs.y, self.unit)
    }
}

impl Sub for UnitVector {
    type Output = UnitVector;

    fn sub(self, rhs: UnitVector) -> UnitVector {
        self.assert_same_unit(rhs, "sub");
        UnitVector::new(self.x - rhs.x, self.y - rhs.y, self.unit)
    }
}

impl AddAssign for UnitVector {
    fn add_assign(&mut self, rhs: UnitVector) {
        *self = *self + rhs;
    }
}

impl SubAssign for UnitVector {
    fn sub_assign(&mut self, rhs: UnitVector) {
        *self = *self - rhs;
    }
}

impl Neg for UnitVector {
    type Output = UnitVector;

    fn neg(self) -> UnitVector {
        UnitVector::new(-self.x, -self.y, self.unit)
    }
}

impl Mul<f64> for UnitVector {
    type Output = UnitVector;

    fn mul(self, rhs: f64) -> UnitVector {
        UnitVector::new(self.x * rhs, self.y * rhs, self.unit)
    }
}

impl Div<f64> for UnitVector {
    type Output = UnitVector;

    fn div(self, rhs: f64) -> UnitVector {
        UnitVector::new(self.x / rhs, self.y / rhs, self.unit)
    }
}
