//! Physical address allocation.
//!
//! Stateless helpers: callers pass a snapshot of the addresses already in use
//! and get back a proposal. Nothing here remembers previous proposals, so two
//! calls on the same snapshot return the same address; re-read the registry
//! between allocating and committing.

use crate::addressing::PhysicalAddress;
use alloc::string::String;
use alloc::vec::Vec;

/// Upper bound per part: area, line, device.
const PART_MAX: [u32; 3] = [
    PhysicalAddress::MAX_AREA as u32,
    PhysicalAddress::MAX_LINE as u32,
    PhysicalAddress::MAX_DEVICE as u32,
];

/// Clean a physical address while it is being typed.
///
/// Drops everything but digits and dots (a leading `-` included), keeps at
/// most three parts and clamps each typed part to its range. Parts the user
/// has not typed yet stay empty, so `"1."` remains `"1."`.
///
/// ```
/// use knx_planner::allocator::clean_partial;
///
/// assert_eq!(clean_partial("3.4.200"), "3.4.200");
/// assert_eq!(clean_partial("20.1.999"), "15.1.255");
/// assert_eq!(clean_partial("-1.x2"), "1.2");
/// ```
pub fn clean_partial(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    let mut out = String::with_capacity(digits.len());
    for (i, part) in digits.split('.').take(3).enumerate() {
        if i > 0 {
            out.push('.');
        }
        if part.is_empty() {
            continue;
        }
        // Only digits remain, so a failed parse means the value overflowed.
        let value = part.parse::<u32>().unwrap_or(u32::MAX).min(PART_MAX[i]);
        push_number(&mut out, value);
    }
    out
}

fn push_number(out: &mut String, value: u32) {
    use core::fmt::Write;
    let _ = write!(out, "{value}");
}

/// True iff `addr` has exactly three non-empty numeric parts within
/// 0-15 . 0-15 . 0-255.
///
/// ```
/// use knx_planner::allocator::is_valid;
///
/// assert!(is_valid("15.15.255"));
/// assert!(!is_valid("16.0.0"));
/// assert!(!is_valid("1.1"));
/// ```
pub fn is_valid(addr: &str) -> bool {
    addr.parse::<PhysicalAddress>().is_ok()
}

/// Propose the next physical address.
///
/// Takes the greatest valid address in `used` (area, then line, then device)
/// and returns its [`successor`](PhysicalAddress::successor). Invalid entries
/// are ignored. Returns `1.1.1` when nothing valid is in use, and wraps to
/// `1.1.1` once `15.15.255` is taken; that last case may collide with an
/// existing device and is left to the duplicate check at commit time.
///
/// ```
/// use knx_planner::allocator::next_address;
///
/// assert_eq!(next_address(["1.1.1", "1.2.1"]).to_string(), "1.2.2");
/// assert_eq!(next_address(Vec::<String>::new()).to_string(), "1.1.1");
/// ```
pub fn next_address<I, S>(used: I) -> PhysicalAddress
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let highest = used
        .into_iter()
        .filter_map(|addr| addr.as_ref().parse::<PhysicalAddress>().ok())
        .max();

    let Some(highest) = highest else {
        return PhysicalAddress::FIRST;
    };

    let (next, wrapped) = highest.successor();
    if wrapped {
        plan_log!(warn, "physical address space exhausted, wrapping to 1.1.1");
    } else {
        plan_log!(
            debug,
            "next physical address {}.{}.{}",
            next.area(),
            next.line(),
            next.device()
        );
    }
    next
}

/// Sort items by their physical address; items without a valid address go
/// last, keeping their relative order.
pub fn sort_by_physical_address<T, F>(items: &mut [T], address_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| {
        address_of(item)
            .parse::<PhysicalAddress>()
            .map_or((1, 0), |addr| (0, addr.raw()))
    });
}

/// Collect the trimmed, non-empty physical addresses of a set of devices.
pub fn used_addresses<'a, I>(addresses: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    addresses
        .into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}
