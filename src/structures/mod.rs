//! Base building.
//!
//! Buildings the survivor can place on open floor:
//! - **Wall**: cheap barrier that blocks movement
//! - **Farm**: one food per day
//! - **Raincatcher**: one water per day
//! - **Turret**: defense rating, reserved for future threats

mod base;
mod catalog;
mod types;

pub use base::Base;
pub use catalog::{affordable, catalog, CatalogEntry, Effect};
pub use types::{BuildingKind, PlacedBuilding, Rotation};
