//! Translatable entities.

use crate::error::Result;
use crate::units::UnitVector;

/// Something with a position that can be moved.
///
/// Positions may be given in any unit; implementors convert them into
/// their own working unit and fail with `ConversionError` if they can't.
pub trait Movable {
    /// Translate by `offset` (a delta, not an absolute position).
    fn move_by(&mut self, offset: UnitVector) -> Result<()>;

    /// Move to the absolute `position`.
    fn set_position(&mut self, position: UnitVector) -> Result<()>;

    fn position(&self) -> Result<UnitVector>;
}
