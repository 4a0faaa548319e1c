#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! ## Modules
//!
//! - [`allocator`] - physical address cleaning, validation and proposal
//! - [`channel`] - manufacturer channel labels and the DA label sequence
//! - [`pattern`] - teach-by-example group address patterns
//! - [`conflict`] - duplicate physical and room address checks
//! - [`registry`] - device registry snapshot with the commit gates
//! - [`config`] - template configuration as stored
//! - [`persist`] - debounced saving of committed state

extern crate alloc;

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;
#[macro_use]
pub mod macros;

pub mod addressing;
pub mod allocator;
pub mod category;
pub mod channel;
pub mod config;
pub mod conflict;
pub mod dpt;
pub mod error;
pub mod pattern;
pub mod persist;
pub mod registry;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{GroupAddress, PhysicalAddress, RoomAddress};
#[doc(inline)]
pub use category::{CategoryParams, DeviceCategory};
#[doc(inline)]
pub use channel::{ChannelLabel, DaFormat, Manufacturer};
#[doc(inline)]
pub use config::{CategoryConfig, TeachByExampleConfig};
#[doc(inline)]
pub use dpt::DatapointType;
#[doc(inline)]
pub use error::{Field, PlanError, Result};
#[doc(inline)]
pub use pattern::{DeviceObjectTemplate, ExampleAddress, GroupPattern};
#[doc(inline)]
pub use persist::SaveDebouncer;
#[doc(inline)]
pub use registry::{ActuatorDevice, DeviceRegistry, HvacDevice, HvacZone, Output};
