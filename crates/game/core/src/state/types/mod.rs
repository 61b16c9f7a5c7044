pub mod common;
pub mod side;
pub mod site;
pub mod unit;

pub use common::{CardinalDirection, Position, ResourceMeter, UnitId};
pub use side::{Faction, GoldLedger, Side};
pub use site::ResourceSite;
pub use unit::{FortifyBuff, Unit, UnitClass, UnitFlags};
