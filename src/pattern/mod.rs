//! Teach-by-example group address patterns.
//!
//! An installer configures one example device: every communication object
//! gets a group address plus a rule for how that address moves from one
//! device to the next. [`infer_pattern`] condenses the examples into a
//! [`GroupPattern`] stored with the template, and [`expand`] turns pattern
//! and examples back into concrete group addresses for device `k`.
//!
//! ```
//! use knx_planner::pattern::{expand, infer_pattern, ExampleAddress, SubIncrement, UnitIncrement};
//!
//! let examples = [
//!     ExampleAddress::new("on/off", 1, 1, 1)
//!         .with_increments(UnitIncrement::None, UnitIncrement::None, SubIncrement::One),
//!     ExampleAddress::new("status", 1, 2, 1)
//!         .with_increments(UnitIncrement::None, UnitIncrement::None, SubIncrement::One),
//! ];
//! let pattern = infer_pattern(&examples).unwrap();
//! let third = expand(&pattern, &examples, 2).unwrap();
//! assert_eq!(third[0].group_address().unwrap().to_string(), "1/1/3");
//! assert_eq!(third[1].group_address().unwrap().to_string(), "1/2/3");
//! ```

pub mod example;
pub mod expand;
pub mod infer;
pub mod template;
pub mod zones;

pub use example::{ExampleAddress, InvalidIncrement, SubIncrement, UnitIncrement};
pub use expand::{expand, expand_object};
pub use infer::{infer_pattern, GroupPattern, MainMiddle, MiddleGroupPattern, SubGroupPattern};
pub use template::{remove_object, sort_for_display, DeviceObjectTemplate};
pub use zones::{check_zone_addition, max_zones, middle_slot, zone_capacity, zone_slot, ZoneSpan};
