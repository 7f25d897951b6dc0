pub mod coordinate;
pub mod event;
pub mod status;
pub mod zone;

pub use coordinate::Coordinate;
pub use event::{EventError, LocationEvent};
pub use status::VehicleStatus;
pub use zone::{Zone, ZoneError, ZoneSet};
