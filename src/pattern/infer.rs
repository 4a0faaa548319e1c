//! Pattern inference from one example device.

use super::example::ExampleAddress;
use crate::addressing::GroupAddress;
use crate::error::{PlanError, Result};
use alloc::vec::Vec;

/// How the objects of one device spread over middle groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MiddleGroupPattern {
    /// Each object keeps its own constant middle group.
    PerType,
    /// All objects share one middle group and differ by sub group.
    #[default]
    Same,
}

/// How sub groups advance between the objects of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SubGroupPattern {
    /// Consecutive subs: 1, 2, 3
    #[default]
    Increment,
    /// Constant gap larger than one: 1, 11, 21
    Offset,
    /// Anything else, stored verbatim.
    Sequence,
}

/// Overflow main/middle pair used once the primary middle range is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainMiddle {
    pub main: u8,
    pub middle: u8,
}

impl MainMiddle {
    pub const fn new(main: u8, middle: u8) -> Self {
        Self { main, middle }
    }

    /// Middle groups from `middle` up to 7, or none when out of range.
    pub fn slots(&self) -> usize {
        usize::from(GroupAddress::MIDDLE_GROUPS).saturating_sub(usize::from(self.middle))
    }
}

/// Generation rule inferred from an example device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GroupPattern {
    pub fixed_main: u8,
    pub middle_group_pattern: MiddleGroupPattern,
    pub sub_group_pattern: SubGroupPattern,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub offset_value: Option<u8>,
    pub objects_per_device: usize,
    /// Middle group of each object, in example order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub middle_groups: Vec<u8>,
    pub start_sub: u8,
    /// Sub group of each object, in example order. Only kept for
    /// [`SubGroupPattern::Sequence`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub sequence: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_main_groups: Vec<MainMiddle>,
}

impl GroupPattern {
    /// Middle group of the first object.
    pub fn start_middle(&self) -> u8 {
        self.middle_groups.first().copied().unwrap_or(0)
    }

    /// Sub-group distance between two consecutive devices when the examples
    /// carry no increments of their own.
    ///
    /// Objects sharing a middle group with consecutive subs occupy a block of
    /// `objects_per_device` subs; a sequence occupies its whole span. Any
    /// other layout leaves room for the next device one sub further.
    pub fn device_stride(&self) -> u32 {
        match (self.middle_group_pattern, self.sub_group_pattern) {
            (MiddleGroupPattern::Same, SubGroupPattern::Increment) => self.objects_per_device.max(1) as u32,
            (_, SubGroupPattern::Sequence) => {
                let min = self.sequence.iter().min().copied().unwrap_or(0);
                let max = self.sequence.iter().max().copied().unwrap_or(0);
                u32::from(max - min) + 1
            }
            _ => 1,
        }
    }
}

/// Infer a [`GroupPattern`] from the objects of one example device.
///
/// All examples must share one main group and stay within the KNX group
/// ranges. The pattern starts with no extra main groups.
pub fn infer_pattern(examples: &[ExampleAddress]) -> Result<GroupPattern> {
    let first = examples.first().ok_or_else(PlanError::no_examples)?;

    for (i, example) in examples.iter().enumerate() {
        if example.main > GroupAddress::MAX_MAIN || example.middle > GroupAddress::MAX_MIDDLE {
            return Err(PlanError::example_out_of_range(i));
        }
    }

    if examples.iter().any(|e| e.main != first.main) {
        return Err(PlanError::mixed_main_groups());
    }

    let middle_groups: Vec<u8> = examples.iter().map(|e| e.middle).collect();
    let middle_group_pattern = if middle_groups.iter().all(|&m| m == first.middle) {
        MiddleGroupPattern::Same
    } else {
        MiddleGroupPattern::PerType
    };

    let mut subs: Vec<u8> = examples.iter().map(|e| e.sub).collect();
    subs.sort_unstable();
    let (sub_group_pattern, offset_value) = classify_subs(&subs);

    let sequence = if sub_group_pattern == SubGroupPattern::Sequence {
        examples.iter().map(|e| e.sub).collect()
    } else {
        Vec::new()
    };

    let pattern = GroupPattern {
        fixed_main: first.main,
        middle_group_pattern,
        sub_group_pattern,
        offset_value,
        objects_per_device: examples.len(),
        middle_groups,
        start_sub: subs[0],
        sequence,
        extra_main_groups: Vec::new(),
    };

    plan_log!(
        debug,
        "inferred pattern: main {}, {} objects, start sub {}",
        pattern.fixed_main,
        pattern.objects_per_device,
        pattern.start_sub
    );

    Ok(pattern)
}

fn classify_subs(sorted: &[u8]) -> (SubGroupPattern, Option<u8>) {
    let mut gaps = sorted.windows(2).map(|w| w[1] - w[0]);
    let Some(gap) = gaps.next() else {
        return (SubGroupPattern::Increment, None);
    };
    if !gaps.all(|g| g == gap) {
        return (SubGroupPattern::Sequence, None);
    }
    match gap {
        // Equal subs sit in distinct middle groups, one object each. Devices
        // step through them like an increment, never as a sequence.
        0 | 1 => (SubGroupPattern::Increment, None),
        d => (SubGroupPattern::Offset, Some(d)),
    }
}
