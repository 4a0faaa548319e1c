//! Room address: `floor.room`, e.g. `0.1`, `-1.2`, `3.14`.
//!
//! The floor may be negative (basements); the room number may not. Room
//! addresses are stored as the text the installer typed and re-validated on
//! every edit, so the helpers here work on strings as well as on the typed
//! form.

use crate::error::{PlanError, Result};
use alloc::string::String;
use core::fmt;

/// Parsed room address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoomAddress {
    floor: i16,
    room: u16,
}

impl RoomAddress {
    pub const fn new(floor: i16, room: u16) -> Self {
        Self { floor, room }
    }

    #[inline]
    pub const fn floor(self) -> i16 {
        self.floor
    }

    #[inline]
    pub const fn room(self) -> u16 {
        self.room
    }

    /// Clean a room address while it is being typed.
    ///
    /// Keeps a single leading `-`, drops every character that is not a digit
    /// or a dot, and keeps at most two dot-separated parts. Empty parts are
    /// preserved so `"-1."` stays as typed.
    ///
    /// ```
    /// use knx_planner::RoomAddress;
    ///
    /// assert_eq!(RoomAddress::clean_partial("-1.2a"), "-1.2");
    /// assert_eq!(RoomAddress::clean_partial("1-.2.3"), "1.2");
    /// ```
    pub fn clean_partial(raw: &str) -> String {
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let mut out = String::with_capacity(raw.len());
        if negative {
            out.push('-');
        }
        let mut dots = 0;
        for c in rest.chars() {
            match c {
                '0'..='9' => out.push(c),
                '.' if dots == 0 => {
                    dots += 1;
                    out.push('.');
                }
                '.' => break,
                _ => {}
            }
        }
        out
    }

    /// True iff `value` (trimmed) is a complete `floor.room` address.
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for RoomAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.floor, self.room)
    }
}

impl core::str::FromStr for RoomAddress {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        let (floor, room) = s
            .trim()
            .split_once('.')
            .ok_or_else(PlanError::invalid_room_address)?;

        let floor_digits = floor.strip_prefix('-').unwrap_or(floor);
        let is_number = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !is_number(floor_digits) || !is_number(room) {
            return Err(PlanError::invalid_room_address());
        }

        Ok(Self {
            floor: floor.parse().map_err(|_err| PlanError::invalid_room_address())?,
            room: room.parse().map_err(|_err| PlanError::invalid_room_address())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_clean_partial_keeps_leading_minus_only() {
        assert_eq!(RoomAddress::clean_partial("-1.2"), "-1.2");
        assert_eq!(RoomAddress::clean_partial("1-2"), "12");
        assert_eq!(RoomAddress::clean_partial("--1"), "-1");
        assert_eq!(RoomAddress::clean_partial("abc"), "");
    }

    #[test]
    fn test_clean_partial_preserves_in_progress_parts() {
        assert_eq!(RoomAddress::clean_partial("0."), "0.");
        assert_eq!(RoomAddress::clean_partial("-"), "-");
        assert_eq!(RoomAddress::clean_partial("1.2.3"), "1.2");
    }

    #[test]
    fn test_parse_valid() {
        let addr: RoomAddress = "-1.4".parse().unwrap();
        assert_eq!(addr.floor(), -1);
        assert_eq!(addr.room(), 4);
        assert_eq!(addr.to_string(), "-1.4");
        assert!(RoomAddress::is_valid(" 0.1 "));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "1", "1.", ".1", "1.-2", "a.1", "1.2.3", "-.1"] {
            assert!(!RoomAddress::is_valid(input), "accepted {input:?}");
        }
    }
}
