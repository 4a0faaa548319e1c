//! KNX 3-level group address (Main/Middle/Sub).
//!
//! Internally stored as 16 bits:
//! - Main: 5 bits (0-31)
//! - Middle: 3 bits (0-7)
//! - Sub: 8 bits (0-255)

use crate::error::{PlanError, Result};
use core::fmt;

/// KNX group address.
///
/// # Examples
///
/// ```
/// use knx_planner::GroupAddress;
///
/// let addr = GroupAddress::new(1, 2, 3).unwrap();
/// assert_eq!(addr.to_string(), "1/2/3");
///
/// let addr: GroupAddress = "1/2/3".parse().unwrap();
/// assert_eq!(u16::from(addr), 0x0A03);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupAddress {
    raw: u16,
}

impl GroupAddress {
    /// Maximum main group value (5 bits)
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group value (3 bits)
    pub const MAX_MIDDLE: u8 = 7;
    /// Maximum sub group value (8 bits)
    pub const MAX_SUB: u8 = 255;
    /// Number of middle groups inside one main group.
    pub const MIDDLE_GROUPS: u8 = Self::MAX_MIDDLE + 1;

    /// Create a new group address.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range addressing error if main > 31 or middle > 7.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        if main > Self::MAX_MAIN || middle > Self::MAX_MIDDLE {
            return Err(PlanError::address_out_of_range());
        }
        let raw = (u16::from(main) << 11) | (u16::from(middle) << 8) | u16::from(sub);
        Ok(Self { raw })
    }

    /// Build from wide components, as produced by pattern arithmetic.
    ///
    /// Returns `None` when any component falls outside the KNX ranges.
    pub fn checked(main: u32, middle: u32, sub: u32) -> Option<Self> {
        let main = u8::try_from(main).ok()?;
        let middle = u8::try_from(middle).ok()?;
        let sub = u8::try_from(sub).ok()?;
        Self::new(main, middle, sub).ok()
    }

    /// Get the raw u16 representation of the address.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Get the main group component (0-31).
    #[inline]
    pub const fn main(self) -> u8 {
        ((self.raw >> 11) & 0x1F) as u8
    }

    /// Get the middle group component (0-7).
    #[inline]
    pub const fn middle(self) -> u8 {
        ((self.raw >> 8) & 0x07) as u8
    }

    /// Get the sub group component (0-255).
    #[inline]
    pub const fn sub(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// Format into a fixed-capacity string ("31/7/255" is the longest form).
    pub fn to_heapless(self) -> heapless::String<12> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        let _ = write!(s, "{self}");
        s
    }
}

impl From<u16> for GroupAddress {
    #[inline]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<GroupAddress> for u16 {
    #[inline]
    fn from(addr: GroupAddress) -> u16 {
        addr.raw
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

impl core::str::FromStr for GroupAddress {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('/');
        let mut next = || -> Result<u8> {
            parts
                .next()
                .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|p| p.parse::<u8>().ok())
                .ok_or_else(PlanError::invalid_group_address)
        };

        let main = next()?;
        let middle = next()?;
        let sub = next()?;

        if parts.next().is_some() {
            return Err(PlanError::invalid_group_address());
        }

        Self::new(main, middle, sub)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GroupAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GroupAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_new_valid() {
        let addr = GroupAddress::new(1, 2, 3).unwrap();
        assert_eq!((addr.main(), addr.middle(), addr.sub()), (1, 2, 3));
        assert_eq!(u16::from(addr), 0x0A03);
    }

    #[test]
    fn test_new_invalid() {
        assert!(GroupAddress::new(32, 0, 0).is_err());
        assert!(GroupAddress::new(0, 8, 0).is_err());
    }

    #[test]
    fn test_checked_rejects_wide_values() {
        assert!(GroupAddress::checked(1, 2, 256).is_none());
        assert!(GroupAddress::checked(1, 8, 0).is_none());
        assert!(GroupAddress::checked(32, 0, 0).is_none());
        assert_eq!(GroupAddress::checked(31, 7, 255), GroupAddress::new(31, 7, 255).ok());
    }

    #[test]
    fn test_ordering_is_main_middle_sub() {
        let a = GroupAddress::new(1, 7, 255).unwrap();
        let b = GroupAddress::new(2, 0, 0).unwrap();
        let c = GroupAddress::new(2, 0, 1).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_display_and_parse() {
        let addr: GroupAddress = "3/1/10".parse().unwrap();
        assert_eq!(format!("{addr}"), "3/1/10");
        assert_eq!(addr.to_heapless().as_str(), "3/1/10");
    }

    #[test]
    fn test_from_str_invalid() {
        for input in ["1", "1/2", "32/0/0", "1/8/0", "1/2/3/4", "a/b/c", "", "1/2/256"] {
            assert!(input.parse::<GroupAddress>().is_err(), "accepted {input:?}");
        }
    }
}
