//! KNX addressing.
//!
//! Three kinds of addresses show up in an installation plan:
//! - Physical addresses identify devices on the bus (Area.Line.Device)
//! - Group addresses identify communication objects (Main/Middle/Sub)
//! - Room addresses tie outputs and HVAC zones to a room (Floor.Room)

pub mod group;
pub mod physical;
pub mod room;

pub use group::GroupAddress;
pub use physical::PhysicalAddress;
pub use room::RoomAddress;
