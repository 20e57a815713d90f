//! Objects with a working unit.
//!
//! ## Rust Lesson #11: Traits with Default Methods
//!
//! A trait can ship a provided method (`set_unit`) that calls a required
//! one (`reset_unit`). Implementors only write the hook; the ordering
//! (convert first, commit the new unit after) lives in one place.

use tracing::debug;

use crate::error::Result;
use crate::units::Units;

pub trait UnitBasedObject {
    /// Current working unit.
    fn unit(&self) -> Units;

    /// Store `unit` as the working unit without converting anything.
    fn store_unit(&mut self, unit: Units);

    /// Conversion hook, called with the new unit before it is stored.
    /// An error aborts the unit change.
    fn reset_unit(&mut self, unit: Units) -> Result<()>;

    /// Change the working unit, converting existing state through the hook.
    fn set_unit(&mut self, unit: Units) -> Result<()> {
        let previous = self.unit();
        if previous == unit {
            return Ok(());
        }
        self.reset_unit(unit)?;
        self.store_unit(unit);
        debug!(from = %previous, to = %unit, "working unit changed");
        Ok(())
    }
}
