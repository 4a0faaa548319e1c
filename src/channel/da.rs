//! Extended (DA) channel labels: `da{group}.{channel}`.
//!
//! Used once an actuator has more channels than its manufacturer's simple
//! numbering covers. Each category fixes how many channels fit in a group and
//! how many groups exist; labels never leave that range. Continuing past the
//! last slot sticks at the last slot, and editing a label in the middle of a
//! device renumbers everything after it, dropping channels that no longer fit.

use super::ChannelLabel;
use alloc::vec::Vec;
use core::fmt::Write;

/// Group/channel pair of a DA label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaLabel {
    pub group: u16,
    pub channel: u16,
}

impl DaLabel {
    pub const fn new(group: u16, channel: u16) -> Self {
        Self { group, channel }
    }

    /// Parse `da{G}.{C}`, ignoring the case of the prefix.
    ///
    /// ```
    /// use knx_planner::channel::da::DaLabel;
    ///
    /// assert_eq!(DaLabel::parse("Da2.1"), Some(DaLabel::new(2, 1)));
    /// assert_eq!(DaLabel::parse("da2"), None);
    /// ```
    pub fn parse(label: &str) -> Option<Self> {
        let prefix = label.get(..2)?;
        if !prefix.eq_ignore_ascii_case("da") {
            return None;
        }
        let (group, channel) = label[2..].split_once('.')?;
        Some(Self {
            group: parse_digits(group)?,
            channel: parse_digits(channel)?,
        })
    }
}

fn parse_digits(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Shape of the DA label space for one category.
///
/// Both dimensions are at least 1; use [`DaFormat::new`] to build a custom
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaFormat {
    channels_per_group: u16,
    max_groups: u16,
    prefix: &'static str,
}

/// Result of renumbering the channels after a manually edited DA label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaPropagation {
    /// The edited label, normalized to the format's prefix
    pub edited: ChannelLabel,
    /// New labels for the channels after the edited one
    pub following: Vec<ChannelLabel>,
    /// Channel count of the device after the edit
    pub channel_count: usize,
    /// Previous channel count when channels had to be dropped
    pub truncated_from: Option<usize>,
}

impl DaFormat {
    /// Dimmer actuators: 2 groups of 32 channels, lowercase prefix.
    pub const DIMMER: Self = Self {
        channels_per_group: 32,
        max_groups: 2,
        prefix: "da",
    };

    /// Blind actuators: 4 groups of 16 channels, capitalized prefix.
    pub const BLIND: Self = Self {
        channels_per_group: 16,
        max_groups: 4,
        prefix: "Da",
    };

    pub const FIRST: DaLabel = DaLabel::new(1, 1);

    /// Custom label space, or `None` when either dimension is zero.
    ///
    /// ```
    /// use knx_planner::channel::da::DaFormat;
    ///
    /// let format = DaFormat::new(8, 3, "da").unwrap();
    /// assert_eq!(format.capacity(), 24);
    /// assert!(DaFormat::new(0, 3, "da").is_none());
    /// ```
    pub const fn new(channels_per_group: u16, max_groups: u16, prefix: &'static str) -> Option<Self> {
        if channels_per_group == 0 || max_groups == 0 {
            return None;
        }
        Some(Self {
            channels_per_group,
            max_groups,
            prefix,
        })
    }

    /// Channels per group (`C_max`).
    pub const fn channels_per_group(&self) -> u16 {
        self.channels_per_group
    }

    /// Number of groups (`G_max`).
    pub const fn max_groups(&self) -> u16 {
        self.max_groups
    }

    /// Label prefix, `da` or `Da` depending on the category.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Last label of the format.
    pub const fn last(&self) -> DaLabel {
        DaLabel::new(self.max_groups, self.channels_per_group)
    }

    /// Whether `label` lies within `[1, G_max] x [1, C_max]`.
    pub const fn contains(&self, label: DaLabel) -> bool {
        label.group >= 1
            && label.group <= self.max_groups
            && label.channel >= 1
            && label.channel <= self.channels_per_group
    }

    /// Render a label with this format's prefix.
    pub fn format(&self, label: DaLabel) -> ChannelLabel {
        let mut s = ChannelLabel::new();
        let _ = write!(s, "{}{}.{}", self.prefix, label.group, label.channel);
        s
    }

    /// Label following `label`.
    ///
    /// The channel increments; past `C_max` it restarts at 1 in the next
    /// group. At the last slot of the last group the label stays put.
    pub fn next(&self, label: DaLabel) -> DaLabel {
        let group = label.group.clamp(1, self.max_groups);
        let channel = label.channel.saturating_add(1);
        if channel <= self.channels_per_group {
            DaLabel::new(group, channel)
        } else if group < self.max_groups {
            DaLabel::new(group + 1, 1)
        } else {
            self.last()
        }
    }

    /// String form of [`next`](Self::next); unparseable input restarts at
    /// `da1.1`.
    pub fn next_label(&self, label: &str) -> ChannelLabel {
        match DaLabel::parse(label.trim()) {
            Some(parsed) => self.format(self.next(parsed)),
            None => self.format(Self::FIRST),
        }
    }

    /// Label for the `index`-th channel (1-based) of a freshly created device.
    /// Indices beyond the format's capacity stick at the last slot.
    pub fn nth(&self, index: u16) -> DaLabel {
        let zero_based = index.max(1) - 1;
        let group = zero_based / self.channels_per_group + 1;
        if group > self.max_groups {
            return self.last();
        }
        DaLabel::new(group, zero_based % self.channels_per_group + 1)
    }

    /// Clean a DA label while it is being typed.
    ///
    /// Accepts `1.18` as well as `da1.18`, keeps only digits and dots, and
    /// clamps the group to `[1, G_max]` and the channel to `[1, C_max]`.
    /// Returns `da{g}.` while the channel part is still empty and an empty
    /// string when nothing usable was typed.
    ///
    /// ```
    /// use knx_planner::channel::da::DaFormat;
    ///
    /// assert_eq!(DaFormat::DIMMER.validate_typed_input("1.18"), "da1.18");
    /// assert_eq!(DaFormat::DIMMER.validate_typed_input("da7.99"), "da2.32");
    /// assert_eq!(DaFormat::DIMMER.validate_typed_input("2"), "da2.");
    /// assert_eq!(DaFormat::DIMMER.validate_typed_input("x"), "");
    /// ```
    pub fn validate_typed_input(&self, raw: &str) -> ChannelLabel {
        let raw = match raw.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("da") => &raw[2..],
            _ => raw,
        };

        let mut parts = [None::<u16>; 2];
        let mut part = 0;
        let mut digits: u32 = 0;
        let mut seen_digit = false;
        for c in raw.chars() {
            if c == '.' {
                parts[part] = seen_digit.then_some(digits.min(u32::from(u16::MAX)) as u16);
                part += 1;
                if part == 2 {
                    break;
                }
                digits = 0;
                seen_digit = false;
            } else if let Some(d) = c.to_digit(10) {
                digits = digits.saturating_mul(10).saturating_add(d);
                seen_digit = true;
            }
        }
        if part < 2 {
            parts[part] = seen_digit.then_some(digits.min(u32::from(u16::MAX)) as u16);
        }

        let mut out = ChannelLabel::new();
        match parts {
            [Some(group), Some(channel)] => {
                let label = DaLabel::new(
                    group.clamp(1, self.max_groups),
                    channel.clamp(1, self.channels_per_group),
                );
                out = self.format(label);
            }
            [Some(group), None] => {
                let _ = write!(out, "{}{}.", self.prefix, group.clamp(1, self.max_groups));
            }
            _ => {}
        }
        out
    }

    /// Next label after the highest in-range DA label among `existing`, or
    /// `da1.1` when there is none. Out-of-range labels are ignored.
    pub fn continue_from<I, S>(&self, existing: I) -> ChannelLabel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let highest = existing
            .into_iter()
            .filter_map(|label| DaLabel::parse(label.as_ref().trim()))
            .filter(|label| self.contains(*label))
            .max();

        match highest {
            Some(label) => self.format(self.next(label)),
            None => self.format(Self::FIRST),
        }
    }

    /// Total number of labels in the format.
    pub const fn capacity(&self) -> usize {
        self.channels_per_group as usize * self.max_groups as usize
    }

    /// How many labels still fit after `label`.
    pub fn remaining_after(&self, label: DaLabel) -> usize {
        let per_group = usize::from(self.channels_per_group);
        let in_group = per_group.saturating_sub(usize::from(label.channel));
        let later_groups = usize::from(self.max_groups.saturating_sub(label.group));
        in_group + per_group * later_groups
    }

    /// Renumber the channels after a manual edit.
    ///
    /// `index` is the 0-based position of the edited channel in a device with
    /// `channel_count` channels. Returns `None` when `new_label` is not an
    /// in-range DA label. When more channels follow than labels remain, the
    /// surplus channels are dropped and `truncated_from` records the old
    /// count; this is a normal outcome, not an error.
    pub fn propagate(&self, index: usize, new_label: &str, channel_count: usize) -> Option<DaPropagation> {
        let edited = DaLabel::parse(new_label.trim()).filter(|label| self.contains(*label))?;

        let channel_count = channel_count.max(index + 1);
        let wanted = channel_count - (index + 1);
        let available = self.remaining_after(edited);

        let (kept, truncated_from) = if wanted > available {
            plan_log!(
                warn,
                "DA capacity exceeded, reducing channel count from {} to {}",
                channel_count,
                index + 1 + available
            );
            (available, Some(channel_count))
        } else {
            (wanted, None)
        };

        let mut current = edited;
        let following = (0..kept)
            .map(|_| {
                current = self.next(current);
                self.format(current)
            })
            .collect();

        Some(DaPropagation {
            edited: self.format(edited),
            following,
            channel_count: index + 1 + kept,
            truncated_from,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const DIMMER: DaFormat = DaFormat::DIMMER;

    #[test]
    fn test_parse() {
        assert_eq!(DaLabel::parse("da1.17"), Some(DaLabel::new(1, 17)));
        assert_eq!(DaLabel::parse("DA2.3"), Some(DaLabel::new(2, 3)));
        for input in ["da", "da1", "da1.", "da.1", "d1.1", "da1.1.1", "da-1.1", "K1", "da1.x"] {
            assert_eq!(DaLabel::parse(input), None, "parsed {input:?}");
        }
    }

    #[test]
    fn test_next_rolls_into_next_group() {
        assert_eq!(DIMMER.next(DaLabel::new(1, 31)), DaLabel::new(1, 32));
        assert_eq!(DIMMER.next(DaLabel::new(1, 32)), DaLabel::new(2, 1));
    }

    #[test]
    fn test_next_sticks_at_last_slot() {
        assert_eq!(DIMMER.next(DaLabel::new(2, 32)), DaLabel::new(2, 32));
        assert_eq!(DaFormat::BLIND.next(DaLabel::new(4, 16)), DaLabel::new(4, 16));
    }

    #[test]
    fn test_next_label_strings() {
        assert_eq!(DIMMER.next_label("da2.1"), "da2.2");
        assert_eq!(DIMMER.next_label("Da1.32"), "da2.1");
        assert_eq!(DIMMER.next_label("K4"), "da1.1");
        assert_eq!(DaFormat::BLIND.next_label("Da1.16"), "Da2.1");
    }

    #[test]
    fn test_nth() {
        assert_eq!(DIMMER.nth(1), DaLabel::new(1, 1));
        assert_eq!(DIMMER.nth(33), DaLabel::new(2, 1));
        assert_eq!(DIMMER.nth(64), DaLabel::new(2, 32));
        assert_eq!(DIMMER.nth(65), DaLabel::new(2, 32));
        assert_eq!(DaFormat::BLIND.nth(17), DaLabel::new(2, 1));
    }

    #[test]
    fn test_custom_format_rejects_empty_dimensions() {
        assert!(DaFormat::new(0, 2, "da").is_none());
        assert!(DaFormat::new(4, 0, "da").is_none());

        let small = DaFormat::new(4, 2, "da").unwrap();
        assert_eq!(small.nth(5), DaLabel::new(2, 1));
        assert_eq!(small.nth(100), DaLabel::new(2, 4));
        assert_eq!(small.format(small.next(DaLabel::new(1, 4))), "da2.1");
    }

    #[test]
    fn test_validate_typed_input() {
        assert_eq!(DIMMER.validate_typed_input("da1.18"), "da1.18");
        assert_eq!(DIMMER.validate_typed_input("DA0.0"), "da1.1");
        assert_eq!(DIMMER.validate_typed_input("2.1.5"), "da2.1");
        assert_eq!(DIMMER.validate_typed_input("1."), "da1.");
        assert_eq!(DIMMER.validate_typed_input(".5"), "");
        assert_eq!(DIMMER.validate_typed_input(""), "");
        assert_eq!(DaFormat::BLIND.validate_typed_input("9.40"), "Da4.16");
    }

    #[test]
    fn test_continue_from() {
        assert_eq!(DIMMER.continue_from(Vec::<&str>::new()), "da1.1");
        assert_eq!(DIMMER.continue_from(["da1.17", "da1.3"]), "da1.18");
        assert_eq!(DIMMER.continue_from(["da1.32", "Da1.5"]), "da2.1");
        assert_eq!(DIMMER.continue_from(["da2.32"]), "da2.32");
        // da3.1 is outside the dimmer range and does not count
        assert_eq!(DIMMER.continue_from(["da1.4", "da3.1", "K1"]), "da1.5");
    }

    #[test]
    fn test_remaining_after() {
        assert_eq!(DIMMER.remaining_after(DaLabel::new(1, 1)), 31 + 32);
        assert_eq!(DIMMER.remaining_after(DaLabel::new(2, 30)), 2);
        assert_eq!(DIMMER.remaining_after(DaLabel::new(2, 32)), 0);
        assert_eq!(DaFormat::BLIND.remaining_after(DaLabel::new(3, 16)), 16);
    }

    #[test]
    fn test_propagate_without_truncation() {
        let result = DIMMER.propagate(1, "DA1.31", 5).unwrap();
        assert_eq!(result.edited, "da1.31");
        assert_eq!(result.following, vec!["da1.32", "da2.1", "da2.2"]);
        assert_eq!(result.channel_count, 5);
        assert_eq!(result.truncated_from, None);
    }

    #[test]
    fn test_propagate_truncates_when_capacity_runs_out() {
        // Channel 3 (index 2) becomes da2.30 with five channels after it:
        // only da2.31 and da2.32 remain.
        let result = DIMMER.propagate(2, "da2.30", 8).unwrap();
        assert_eq!(result.following, vec!["da2.31", "da2.32"]);
        assert_eq!(result.channel_count, 2 + 1 + 2);
        assert_eq!(result.truncated_from, Some(8));
    }

    #[test]
    fn test_propagate_rejects_non_da_or_out_of_range() {
        assert!(DIMMER.propagate(0, "K1", 4).is_none());
        assert!(DIMMER.propagate(0, "da3.1", 4).is_none());
        assert!(DIMMER.propagate(0, "da1.33", 4).is_none());
    }
}
