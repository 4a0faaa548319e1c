//! Duplicate detection across all configured devices.
//!
//! Both checks take a snapshot of the other devices' addresses rather than
//! reading any shared state. Build the snapshot with
//! [`DeviceRegistry::others`](crate::registry::DeviceRegistry::others) and
//! [`DeviceRegistry::zone_room_addresses`](crate::registry::DeviceRegistry::zone_room_addresses).

use crate::channel::Manufacturer;
use crate::registry::ZoneId;

/// Whether `candidate` is already used by one of `others`.
///
/// `others` are the physical addresses of every other actuator, across all
/// categories. Theben actuators may share an address, so the check always
/// passes for them. An empty candidate never collides.
///
/// ```
/// use knx_planner::conflict::is_duplicate_physical_address;
///
/// let others = ["1.1.1", "1.1.2"];
/// assert!(is_duplicate_physical_address("1.1.1", "gira", others));
/// assert!(!is_duplicate_physical_address("1.1.1", "Theben", others));
/// assert!(!is_duplicate_physical_address("1.1.3", "gira", others));
/// ```
pub fn is_duplicate_physical_address<'a, I>(candidate: &str, manufacturer: &str, others: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if Manufacturer::parse(manufacturer).allows_shared_physical_address() {
        return false;
    }
    let candidate = candidate.trim();
    !candidate.is_empty() && others.into_iter().any(|addr| addr.trim() == candidate)
}

/// Whether another HVAC zone already uses room address `candidate`.
///
/// `zones` yields `(zone id, room address)` for every zone; the zone with id
/// `exclude` is the one being edited and is skipped.
pub fn is_duplicate_room_address<'a, I>(candidate: &str, exclude: Option<ZoneId>, zones: I) -> bool
where
    I: IntoIterator<Item = (ZoneId, &'a str)>,
{
    let candidate = candidate.trim();
    !candidate.is_empty()
        && zones
            .into_iter()
            .any(|(id, room)| Some(id) != exclude && room.trim() == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theben_exemption() {
        let others = ["1.1.1"];
        assert!(!is_duplicate_physical_address("1.1.1", "theben", others));
        for manufacturer in ["gira", "jung", "mdt", "abb", "hager", "unknown", ""] {
            assert!(is_duplicate_physical_address("1.1.1", manufacturer, others), "{manufacturer}");
        }
    }

    #[test]
    fn test_physical_address_is_trimmed() {
        assert!(is_duplicate_physical_address(" 1.1.5", "gira", ["1.1.5 "]));
        assert!(!is_duplicate_physical_address("  ", "gira", [""]));
        assert!(!is_duplicate_physical_address("1.1.5", "gira", []));
    }

    #[test]
    fn test_room_address_excludes_self() {
        let zones = [(1, "0.1"), (2, "0.2"), (3, "-1.4")];
        assert!(!is_duplicate_room_address("0.1", Some(1), zones));
        assert!(is_duplicate_room_address("0.1", Some(2), zones));
        assert!(is_duplicate_room_address(" -1.4 ", None, zones));
        assert!(!is_duplicate_room_address("", None, [(1, "")]));
    }
}
