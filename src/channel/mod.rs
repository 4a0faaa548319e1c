//! Channel label generation.
//!
//! Labels follow the manufacturer's own numbering so installers can match
//! them to the print on the actuator:
//!
//! | Manufacturer                         | Labels                     |
//! |--------------------------------------|----------------------------|
//! | Gira, Jung                           | `A1`, `A2`, ...            |
//! | Jung (blind actuators)               | `A1-2`, `A3-4`, ...        |
//! | MDT, ABB                             | `A`, `B`, ...              |
//! | Theben, Hager, Zennio, Berker        | `C1`, `C2`, ...            |
//! | anything else                        | `K1`, `K2`, ...            |
//!
//! Devices in the extended format use DA labels instead, see [`da`].

pub mod da;
pub mod manufacturer;

pub use da::{DaFormat, DaLabel, DaPropagation};
pub use manufacturer::{LabelStyle, Manufacturer};

use crate::category::{CategoryParams, DeviceCategory};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use core::fmt::Write;

/// A generated channel label. The longest label produced is a paired Jung
/// label for the last u16 channel (`A131069-131070`).
pub type ChannelLabel = heapless::String<24>;

/// Letters available to letter-style manufacturers.
const LETTERS: u16 = 26;

/// Generate the label for channel `index` (1-based) of a device.
///
/// In the extended format the label continues an existing DA sequence in
/// `existing` when there is one, and is derived from `index` otherwise.
///
/// ```
/// use knx_planner::channel::generate;
/// use knx_planner::{CategoryParams, DeviceCategory};
///
/// let switch = CategoryParams::for_device(DeviceCategory::Switch, 4);
/// let blind = CategoryParams::for_device(DeviceCategory::Blind, 4);
/// assert_eq!(generate("gira", 3, &switch, &[] as &[&str]), "A3");
/// assert_eq!(generate("jung", 2, &blind, &[] as &[&str]), "A3-4");
/// assert_eq!(generate("mdt", 2, &switch, &[] as &[&str]), "B");
/// assert_eq!(generate("unknown", 4, &switch, &[] as &[&str]), "K4");
/// ```
pub fn generate<S: AsRef<str>>(
    manufacturer: &str,
    index: u16,
    params: &CategoryParams,
    existing: &[S],
) -> ChannelLabel {
    let index = index.max(1);

    if let Some(format) = params.extended {
        let has_sequence = existing.iter().any(|l| DaLabel::parse(l.as_ref().trim()).is_some());
        return if has_sequence {
            format.continue_from(existing)
        } else {
            format.format(format.nth(index))
        };
    }

    let blind = params.category == DeviceCategory::Blind;
    styled(Manufacturer::parse(manufacturer).label_style(blind), index)
}

fn styled(style: LabelStyle, index: u16) -> ChannelLabel {
    let mut s = ChannelLabel::new();
    match style {
        LabelStyle::Numbered(prefix) => {
            let _ = write!(s, "{prefix}{index}");
        }
        LabelStyle::Letter if index <= LETTERS => {
            let _ = s.push(char::from(b'A' + (index - 1) as u8));
        }
        // Past `Z` there is no letter left; fall back to the default style.
        LabelStyle::Letter => return styled(LabelStyle::Numbered('K'), index),
        LabelStyle::Paired(prefix) => {
            let first = 2 * (u32::from(index) - 1) + 1;
            let _ = write!(s, "{prefix}{first}-{}", first + 1);
        }
    }
    s
}

/// First run of digits in a label, or 0 when there is none
/// (`"K12"` → 12, `"A3-4"` → 3, `"da2.7"` → 2).
///
/// Used to order outputs and zones by channel.
pub fn channel_number(label: &str) -> u32 {
    let digits = label
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    digits.parse().unwrap_or(0)
}

/// Resolve a label the installer typed for the channel at `position`.
///
/// Labels clash when they carry the same channel number (see
/// [`channel_number`]; a lone letter counts as its position in the
/// alphabet). Labels without a number only clash with identical text, and
/// DA labels are compared as text. A free label is returned trimmed and
/// otherwise unchanged. On a clash the number is incremented until no other
/// channel of the device (`labels`, indexed by position) uses it, and the
/// result is `K{n}`.
///
/// ```
/// use knx_planner::channel::resolve_manual_label;
///
/// assert_eq!(resolve_manual_label(2, "A1", &["A1", "A2", "A3"]), "K3");
/// assert_eq!(resolve_manual_label(2, "Hallway", &["A1", "A2", "A3"]), "Hallway");
/// ```
pub fn resolve_manual_label<S: AsRef<str>>(position: usize, label: &str, labels: &[S]) -> String {
    let label = label.trim();
    let others = || {
        labels
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != position)
            .map(|(_, l)| l.as_ref().trim())
    };
    let used: BTreeSet<u32> = others().filter_map(label_number).collect();

    let start = match label_number(label) {
        Some(n) if !used.contains(&n) => return String::from(label),
        Some(n) => n,
        None if !others().any(|l| l == label) => return String::from(label),
        None => u32::try_from(position).map_or(u32::MAX, |p| p.saturating_add(1)),
    };

    // Ends within `used.len() + 1` steps.
    let free = (start..=u32::MAX)
        .find(|n| !used.contains(n))
        .or_else(|| (1..start).find(|n| !used.contains(n)))
        .unwrap_or(start);
    plan_log!(debug, "channel label collision at position {}, using K{}", position, free);
    format!("K{free}")
}

/// Number a label is compared by when resolving manual edits.
fn label_number(label: &str) -> Option<u32> {
    if DaLabel::parse(label).is_some() {
        return None;
    }
    if label.bytes().any(|b| b.is_ascii_digit()) {
        let number = channel_number(label);
        return (number != 0).then_some(number);
    }
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some(u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn switch() -> CategoryParams {
        CategoryParams::for_device(DeviceCategory::Switch, 8)
    }

    #[test]
    fn test_manufacturer_table() {
        assert_eq!(generate("gira", 3, &switch(), NONE), "A3");
        assert_eq!(generate("Jung", 3, &switch(), NONE), "A3");
        assert_eq!(generate("abb", 1, &switch(), NONE), "A");
        assert_eq!(generate("mdt", 2, &switch(), NONE), "B");
        assert_eq!(generate(" Hager ", 5, &switch(), NONE), "C5");
        assert_eq!(generate("theben", 1, &switch(), NONE), "C1");
        assert_eq!(generate("", 4, &switch(), NONE), "K4");
        assert_eq!(generate("unknown", 4, &switch(), NONE), "K4");
    }

    #[test]
    fn test_jung_blind_pairs() {
        let blind = CategoryParams::for_device(DeviceCategory::Blind, 4);
        assert_eq!(generate("jung", 1, &blind, NONE), "A1-2");
        assert_eq!(generate("jung", 2, &blind, NONE), "A3-4");
        assert_eq!(generate("gira", 2, &blind, NONE), "A2");
    }

    #[test]
    fn test_letters_run_out_after_z() {
        assert_eq!(generate("mdt", 26, &switch(), NONE), "Z");
        assert_eq!(generate("mdt", 27, &switch(), NONE), "K27");
    }

    #[test]
    fn test_extended_format_from_index() {
        let dimmer = CategoryParams::for_device(DeviceCategory::Dimmer, 12);
        assert_eq!(generate("gira", 1, &dimmer, NONE), "da1.1");
        assert_eq!(generate("gira", 12, &dimmer, NONE), "da1.12");
    }

    #[test]
    fn test_extended_format_continues_manual_sequence() {
        let dimmer = CategoryParams::for_device(DeviceCategory::Dimmer, 12);
        assert_eq!(generate("gira", 3, &dimmer, &["da1.17", "da1.18"]), "da1.19");
    }

    #[test]
    fn test_forced_blind_extended_format() {
        let blind = CategoryParams::for_device(DeviceCategory::Blind, 20)
            .with_extended_format(DeviceCategory::Blind.da_format());
        assert_eq!(generate("jung", 17, &blind, NONE), "Da2.1");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let dimmer = CategoryParams::for_device(DeviceCategory::Dimmer, 12);
        let existing = ["da1.2", "da1.9", "da1.4"];
        let first = generate("gira", 4, &dimmer, &existing);
        let reordered = ["da1.9", "da1.4", "da1.2"];
        assert_eq!(generate("gira", 4, &dimmer, &reordered), first);
        assert_eq!(first, "da1.10");
    }

    #[test]
    fn test_channel_number() {
        assert_eq!(channel_number("K12"), 12);
        assert_eq!(channel_number("A3-4"), 3);
        assert_eq!(channel_number("da2.7"), 2);
        assert_eq!(channel_number("B"), 0);
        assert_eq!(channel_number(""), 0);
    }

    #[test]
    fn test_resolve_manual_label_keeps_free_label() {
        assert_eq!(resolve_manual_label(1, " A7 ", &["A1", "A2", "A3"]), "A7");
        // Re-typing the channel's own label is not a collision
        assert_eq!(resolve_manual_label(1, "A2", &["A1", "A2", "A3"]), "A2");
    }

    #[test]
    fn test_resolve_manual_label_increments_on_collision() {
        assert_eq!(resolve_manual_label(2, "A1", &["A1", "A2", "A3"]), "K3");
        assert_eq!(resolve_manual_label(0, "C2", &["C1", "C2", "K3"]), "K4");
        assert_eq!(resolve_manual_label(2, "B", &["A", "B", "C"]), "K3");
    }

    #[test]
    fn test_resolve_manual_label_compares_channel_numbers() {
        // Same number under another prefix is still channel 2
        assert_eq!(resolve_manual_label(0, "K2", &["A1", "A2", "A3"]), "K4");
        assert_eq!(resolve_manual_label(0, "C1", &["A1", "A2", "A3"]), "C1");
        // Letters count by their position
        assert_eq!(resolve_manual_label(0, "K3", &["A", "B", "C"]), "K4");
    }

    #[test]
    fn test_resolve_manual_label_free_text() {
        let labels = ["A1", "Kitchen ceiling light west", "A3"];
        assert_eq!(
            resolve_manual_label(0, "Kitchen ceiling light east", &labels),
            "Kitchen ceiling light east"
        );
        assert_eq!(resolve_manual_label(2, "Kitchen ceiling light west", &labels), "K3");
    }

    #[test]
    fn test_resolve_manual_label_at_number_limit() {
        assert_eq!(resolve_manual_label(1, "K4294967295", &["K4294967295", "K1"]), "K1");
        assert_eq!(resolve_manual_label(2, "K4294967295", &["K4294967295", "K1", "K3"]), "K2");
    }
}
