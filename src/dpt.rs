//! KNX Datapoint Type identifiers.
//!
//! Only the identifier is modelled here (e.g. `1.001` for a switch); the
//! payload encoding belongs to whatever talks to the bus. The identifier is
//! what an installer types into the template and what ends up next to each
//! group address in the exported plan.
//!
//! Accepted spellings: `1.001`, `1.1`, `DPT 1.001`, `DPT-1.001`,
//! `DPST-1-1`, and main-type only (`1`, `DPT-1`).

use crate::error::{PlanError, Result};
use core::fmt;

/// Datapoint type id: main number plus optional subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DatapointType {
    main: u16,
    sub: Option<u16>,
}

impl DatapointType {
    /// DPT 1.001 - Switch (on/off)
    pub const SWITCH: Self = Self::new(1, 1);
    /// DPT 1.002 - Boolean (status feedback)
    pub const BOOL: Self = Self::new(1, 2);
    /// DPT 1.007 - Step
    pub const STEP: Self = Self::new(1, 7);
    /// DPT 1.008 - Up/Down
    pub const UP_DOWN: Self = Self::new(1, 8);
    /// DPT 1.010 - Start/Stop
    pub const START_STOP: Self = Self::new(1, 10);
    /// DPT 1.011 - State
    pub const STATE: Self = Self::new(1, 11);
    /// DPT 3.007 - Dimming control
    pub const DIMMING_CONTROL: Self = Self::new(3, 7);
    /// DPT 5.001 - Percentage (0..100%)
    pub const SCALING: Self = Self::new(5, 1);
    /// DPT 6.001 - Percent V8 (setpoint shift)
    pub const PERCENT_V8: Self = Self::new(6, 1);
    /// DPT 9.001 - Temperature (°C)
    pub const TEMPERATURE: Self = Self::new(9, 1);
    /// DPT 20.102 - HVAC mode
    pub const HVAC_MODE: Self = Self::new(20, 102);

    pub const fn new(main: u16, sub: u16) -> Self {
        Self { main, sub: Some(sub) }
    }

    pub const fn main_only(main: u16) -> Self {
        Self { main, sub: None }
    }

    pub const fn main(self) -> u16 {
        self.main
    }

    pub const fn sub(self) -> Option<u16> {
        self.sub
    }
}

impl fmt::Display for DatapointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            Some(sub) => write!(f, "{}.{:03}", self.main, sub),
            None => write!(f, "{}", self.main),
        }
    }
}

impl core::str::FromStr for DatapointType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        // DPST ids always name a subtype
        let (body, separator, subtype_required) = if let Some(rest) = strip_prefix_ignore_case(s, "DPST-") {
            (rest, '-', true)
        } else if let Some(rest) = strip_prefix_ignore_case(s, "DPT") {
            (rest.trim_start_matches([' ', '-']), '.', false)
        } else {
            (s, '.', false)
        };

        let number = |p: &str| -> Result<u16> {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(PlanError::invalid_datapoint_type());
            }
            p.parse().map_err(|_err| PlanError::invalid_datapoint_type())
        };

        match body.split_once(separator) {
            Some((main, sub)) => Ok(Self::new(number(main)?, number(sub)?)),
            None if subtype_required => Err(PlanError::invalid_datapoint_type()),
            None => Ok(Self::main_only(number(body)?)),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(feature = "serde")]
impl serde::Serialize for DatapointType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DatapointType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
