//! Example addresses recorded during "teach by example".

use crate::dpt::DatapointType;
use alloc::string::String;

/// Per-device step of the main or middle group: stay, or move up by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum UnitIncrement {
    #[default]
    None,
    One,
}

/// Per-device step of the sub group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum SubIncrement {
    #[default]
    None,
    One,
    Ten,
    Hundred,
}

impl UnitIncrement {
    pub const fn value(self) -> u32 {
        match self {
            Self::None => 0,
            Self::One => 1,
        }
    }
}

impl SubIncrement {
    pub const fn value(self) -> u32 {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Ten => 10,
            Self::Hundred => 100,
        }
    }
}

/// Rejected increment value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIncrement(pub u8);

impl core::fmt::Display for InvalidIncrement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unsupported increment {}", self.0)
    }
}

impl TryFrom<u8> for UnitIncrement {
    type Error = InvalidIncrement;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::One),
            other => Err(InvalidIncrement(other)),
        }
    }
}

impl From<UnitIncrement> for u8 {
    fn from(inc: UnitIncrement) -> u8 {
        inc.value() as u8
    }
}

impl TryFrom<u8> for SubIncrement {
    type Error = InvalidIncrement;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::One),
            10 => Ok(Self::Ten),
            100 => Ok(Self::Hundred),
            other => Err(InvalidIncrement(other)),
        }
    }
}

impl From<SubIncrement> for u8 {
    fn from(inc: SubIncrement) -> u8 {
        inc.value() as u8
    }
}

/// One logical object of the example device, with its group address and the
/// rule for how that address moves from one device to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExampleAddress {
    pub object_name: String,
    pub main: u8,
    pub middle: u8,
    pub sub: u8,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dpt: Option<DatapointType>,
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub main_increment: UnitIncrement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub middle_increment: UnitIncrement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sub_increment: SubIncrement,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl ExampleAddress {
    /// Enabled object with fixed main/middle/sub and no increments.
    pub fn new(object_name: &str, main: u8, middle: u8, sub: u8) -> Self {
        Self {
            object_name: String::from(object_name),
            main,
            middle,
            sub,
            dpt: None,
            enabled: true,
            main_increment: UnitIncrement::None,
            middle_increment: UnitIncrement::None,
            sub_increment: SubIncrement::None,
        }
    }

    #[must_use]
    pub fn with_dpt(mut self, dpt: DatapointType) -> Self {
        self.dpt = Some(dpt);
        self
    }

    #[must_use]
    pub fn with_increments(mut self, main: UnitIncrement, middle: UnitIncrement, sub: SubIncrement) -> Self {
        self.main_increment = main;
        self.middle_increment = middle;
        self.sub_increment = sub;
        self
    }

    /// Whether any part of the address moves between devices.
    pub fn has_increment(&self) -> bool {
        self.main_increment != UnitIncrement::None
            || self.middle_increment != UnitIncrement::None
            || self.sub_increment != SubIncrement::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_conversions() {
        assert_eq!(SubIncrement::try_from(10), Ok(SubIncrement::Ten));
        assert_eq!(SubIncrement::try_from(5), Err(InvalidIncrement(5)));
        assert_eq!(UnitIncrement::try_from(2), Err(InvalidIncrement(2)));
        assert_eq!(u8::from(SubIncrement::Hundred), 100);
    }

    #[test]
    fn test_has_increment() {
        let fixed = ExampleAddress::new("On/Off", 1, 0, 1);
        assert!(!fixed.has_increment());
        let moving = fixed.with_increments(UnitIncrement::None, UnitIncrement::None, SubIncrement::One);
        assert!(moving.has_increment());
    }
}
