//! KNX physical (individual) address.
//!
//! Physical addresses identify devices on the bus.
//! Format: Area.Line.Device (e.g., 1.1.5)
//! - Area: 0-15 (4 bits)
//! - Line: 0-15 (4 bits)
//! - Device: 0-255 (8 bits)

use crate::error::{PlanError, Result};
use core::fmt;

/// KNX physical address (Area.Line.Device)
///
/// Ordering follows the address components: area first, then line, then
/// device, which is also the order of the raw 16-bit encoding.
///
/// # Examples
///
/// ```
/// use knx_planner::PhysicalAddress;
///
/// let addr = PhysicalAddress::new(1, 1, 5).unwrap();
/// assert_eq!(addr.to_string(), "1.1.5");
///
/// let addr: PhysicalAddress = "1.2.3".parse().unwrap();
/// assert_eq!(u16::from(addr), 0x1203);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalAddress {
    raw: u16,
}

impl PhysicalAddress {
    /// Maximum area value (4 bits)
    pub const MAX_AREA: u8 = 15;
    /// Maximum line value (4 bits)
    pub const MAX_LINE: u8 = 15;
    /// Maximum device value (8 bits)
    pub const MAX_DEVICE: u8 = 255;

    /// Address handed out when nothing is allocated yet, and where the
    /// allocator restarts after exhausting the space.
    pub const FIRST: Self = Self { raw: 0x1101 };

    /// Create a new physical address from components.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range addressing error if area or line exceed 15.
    pub fn new(area: u8, line: u8, device: u8) -> Result<Self> {
        if area > Self::MAX_AREA || line > Self::MAX_LINE {
            return Err(PlanError::address_out_of_range());
        }
        Ok(Self::from_parts(area, line, device))
    }

    const fn from_parts(area: u8, line: u8, device: u8) -> Self {
        Self {
            raw: ((area as u16) << 12) | ((line as u16) << 8) | device as u16,
        }
    }

    /// Get the raw u16 representation of the address.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Get the area component (0-15).
    #[inline]
    pub const fn area(self) -> u8 {
        ((self.raw >> 12) & 0x0F) as u8
    }

    /// Get the line component (0-15).
    #[inline]
    pub const fn line(self) -> u8 {
        ((self.raw >> 8) & 0x0F) as u8
    }

    /// Get the device component (0-255).
    #[inline]
    pub const fn device(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// Next address in allocation order.
    ///
    /// Works like an odometer over (area, line, device): the device number
    /// increments; past 255 it restarts at 1 on the next line, past line 15
    /// it restarts at line 1 in the next area. Past area 15 the whole space
    /// is exhausted and the result wraps to [`Self::FIRST`]; the returned
    /// flag reports that wrap.
    pub const fn successor(self) -> (Self, bool) {
        let (mut area, mut line, device) = (self.area(), self.line(), self.device());
        if device < Self::MAX_DEVICE {
            return (Self::from_parts(area, line, device + 1), false);
        }
        line += 1;
        if line > Self::MAX_LINE {
            line = 1;
            area += 1;
            if area > Self::MAX_AREA {
                return (Self::FIRST, true);
            }
        }
        (Self::from_parts(area, line, 1), false)
    }

    /// Format into a fixed-capacity string ("15.15.255" is the longest form).
    pub fn to_heapless(self) -> heapless::String<12> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        let _ = write!(s, "{self}");
        s
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.area(), self.line(), self.device())
    }
}

impl From<u16> for PhysicalAddress {
    #[inline]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<PhysicalAddress> for u16 {
    #[inline]
    fn from(addr: PhysicalAddress) -> u16 {
        addr.raw
    }
}

impl core::str::FromStr for PhysicalAddress {
    type Err = PlanError;

    /// Strict parse: exactly three decimal parts, no sign, no whitespace
    /// inside the parts.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('.');
        let mut next = |max: u16| -> Result<u8> {
            parts
                .next()
                .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|p| p.parse::<u16>().ok())
                .filter(|n| *n <= max)
                .map(|n| n as u8)
                .ok_or_else(PlanError::invalid_physical_address)
        };

        let area = next(u16::from(Self::MAX_AREA))?;
        let line = next(u16::from(Self::MAX_LINE))?;
        let device = next(u16::from(Self::MAX_DEVICE))?;

        if parts.next().is_some() {
            return Err(PlanError::invalid_physical_address());
        }

        Ok(Self::from_parts(area, line, device))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PhysicalAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PhysicalAddress {
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
        let addr = PhysicalAddress::new(1, 2, 3).unwrap();
        assert_eq!(addr.area(), 1);
        assert_eq!(addr.line(), 2);
        assert_eq!(addr.device(), 3);
        assert_eq!(u16::from(addr), 0x1203);
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(PhysicalAddress::new(16, 0, 0).is_err());
        assert!(PhysicalAddress::new(0, 16, 0).is_err());
    }

    #[test]
    fn test_ordering_follows_components() {
        let a = PhysicalAddress::new(1, 1, 255).unwrap();
        let b = PhysicalAddress::new(1, 2, 1).unwrap();
        let c = PhysicalAddress::new(2, 0, 0).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_successor_steps_device() {
        let (next, wrapped) = PhysicalAddress::new(1, 2, 1).unwrap().successor();
        assert_eq!(format!("{next}"), "1.2.2");
        assert!(!wrapped);
    }

    #[test]
    fn test_successor_carries_into_line_and_area() {
        let (next, _) = PhysicalAddress::new(1, 1, 255).unwrap().successor();
        assert_eq!(format!("{next}"), "1.2.1");

        let (next, _) = PhysicalAddress::new(3, 15, 255).unwrap().successor();
        assert_eq!(format!("{next}"), "4.1.1");
    }

    #[test]
    fn test_successor_wraps_when_exhausted() {
        let (next, wrapped) = PhysicalAddress::new(15, 15, 255).unwrap().successor();
        assert_eq!(next, PhysicalAddress::FIRST);
        assert!(wrapped);
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        for input in ["1.2", "16.0.0", "1.1.256", "1.2.3.4", "a.b.c", "", "1..3", "-1.1.1", "+1.1.1"] {
            assert!(input.parse::<PhysicalAddress>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_to_heapless_longest_form() {
        let addr = PhysicalAddress::new(15, 15, 255).unwrap();
        assert_eq!(addr.to_heapless().as_str(), "15.15.255");
    }
}
