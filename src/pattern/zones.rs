//! Middle-group slots and the HVAC zone cap.
//!
//! A pattern whose middle group moves per device starts at `start_middle` in
//! its primary main group and walks up to middle 7. After that it continues
//! through `extra_main_groups` in order, each entry offering the middle groups
//! from its own `middle` up to 7.

use super::example::{ExampleAddress, UnitIncrement};
use super::infer::{GroupPattern, MainMiddle};
use crate::addressing::GroupAddress;
use crate::error::{PlanError, Result};

/// Main/middle pair for slot `step`, or `None` once every slot is used.
pub fn middle_slot(main: u8, start_middle: u8, extra: &[MainMiddle], step: usize) -> Option<MainMiddle> {
    ZoneSpan::single(start_middle).block(main, extra, step)
}

/// Number of middle-group slots from `start_middle` through all extra groups.
///
/// ```
/// use knx_planner::pattern::{zone_capacity, MainMiddle};
///
/// assert_eq!(zone_capacity(1, &[MainMiddle::new(2, 0)]), 15);
/// ```
pub fn zone_capacity(start_middle: u8, extra: &[MainMiddle]) -> usize {
    ZoneSpan::single(start_middle).capacity(extra)
}

/// Middle groups taken by one zone when the middle group moves per zone.
///
/// Objects whose middle group moves are placed in a block of `width`
/// consecutive middle groups, keeping their distance to the lowest of them.
/// Blocks never straddle two main groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZoneSpan {
    /// Lowest middle group among the moving objects
    pub start_middle: u8,
    /// Number of middle groups one zone covers, at least 1
    pub width: u8,
}

impl ZoneSpan {
    const fn single(start_middle: u8) -> Self {
        Self { start_middle, width: 1 }
    }

    /// Span of the examples whose middle group increments, or `None` when
    /// no example moves its middle group.
    ///
    /// ```
    /// use knx_planner::pattern::{ExampleAddress, SubIncrement, UnitIncrement, ZoneSpan};
    ///
    /// let moving = |middle| {
    ///     ExampleAddress::new("x", 4, middle, 0)
    ///         .with_increments(UnitIncrement::None, UnitIncrement::One, SubIncrement::None)
    /// };
    /// let span = ZoneSpan::of(&[moving(1), moving(2)]).unwrap();
    /// assert_eq!((span.start_middle, span.width), (1, 2));
    /// ```
    pub fn of(examples: &[ExampleAddress]) -> Option<Self> {
        let mut moving = examples
            .iter()
            .filter(|e| e.middle_increment == UnitIncrement::One)
            .map(|e| e.middle);
        let first = moving.next()?;
        let (low, high) = moving.fold((first, first), |(low, high), m| (low.min(m), high.max(m)));
        Some(Self {
            start_middle: low,
            width: high - low + 1,
        })
    }

    fn blocks_in(&self, group: &MainMiddle) -> usize {
        group.slots() / usize::from(self.width.max(1))
    }

    /// First main/middle pair of block `step`, walking from `main` through
    /// `extra`, or `None` once every block is used.
    pub fn block(&self, main: u8, extra: &[MainMiddle], step: usize) -> Option<MainMiddle> {
        let primary = MainMiddle::new(main, self.start_middle);
        let width = usize::from(self.width.max(1));
        let mut rest = step;
        for group in core::iter::once(&primary).chain(extra) {
            let blocks = self.blocks_in(group);
            if rest < blocks {
                // rest * width < slots <= 8, fits in u8
                return Some(MainMiddle::new(group.main, group.middle + (rest * width) as u8));
            }
            rest -= blocks;
        }
        None
    }

    /// Number of blocks from `start_middle` through all extra groups.
    pub fn capacity(&self, extra: &[MainMiddle]) -> usize {
        let primary = usize::from(GroupAddress::MIDDLE_GROUPS).saturating_sub(usize::from(self.start_middle))
            / usize::from(self.width.max(1));
        primary + extra.iter().map(|group| self.blocks_in(group)).sum::<usize>()
    }
}

/// Maximum number of zones a pattern can address.
///
/// Only patterns whose first object moves its middle group per zone have a
/// cap; `None` means the pattern does not limit the zone count. When several
/// objects move, one zone takes as many middle groups as they span.
pub fn max_zones(pattern: &GroupPattern, examples: &[ExampleAddress]) -> Option<usize> {
    let first = examples.first()?;
    if first.middle_increment != UnitIncrement::One {
        return None;
    }
    ZoneSpan::of(examples).map(|span| span.capacity(&pattern.extra_main_groups))
}

/// Main/middle pair where zone `ordinal` starts.
pub fn zone_slot(pattern: &GroupPattern, examples: &[ExampleAddress], ordinal: usize) -> Option<MainMiddle> {
    let span = ZoneSpan::of(examples)?;
    span.block(pattern.fixed_main, &pattern.extra_main_groups, ordinal)
}

/// Gate adding one more zone when `current` zones already exist.
///
/// # Errors
///
/// Returns a zone-limit capacity error naming the maximum when `current`
/// has reached `max`.
pub fn check_zone_addition(current: usize, max: Option<usize>) -> Result<()> {
    match max {
        Some(max) if current >= max => {
            plan_log!(debug, "zone addition rejected: {} of {} zones in use", current, max);
            Err(PlanError::zone_limit_reached(max))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{infer_pattern, SubIncrement};
    use alloc::vec;

    #[test]
    fn test_zone_capacity_with_overflow() {
        assert_eq!(zone_capacity(1, &[MainMiddle::new(2, 0)]), 15);
        assert_eq!(zone_capacity(0, &[]), 8);
        assert_eq!(zone_capacity(7, &[MainMiddle::new(5, 6), MainMiddle::new(6, 7)]), 1 + 2 + 1);
    }

    #[test]
    fn test_middle_slot_walks_extra_groups() {
        let extra = [MainMiddle::new(2, 0)];
        assert_eq!(middle_slot(4, 1, &extra, 0), Some(MainMiddle::new(4, 1)));
        assert_eq!(middle_slot(4, 1, &extra, 6), Some(MainMiddle::new(4, 7)));
        assert_eq!(middle_slot(4, 1, &extra, 7), Some(MainMiddle::new(2, 0)));
        assert_eq!(middle_slot(4, 1, &extra, 14), Some(MainMiddle::new(2, 7)));
        assert_eq!(middle_slot(4, 1, &extra, 15), None);
    }

    #[test]
    fn test_max_zones_requires_middle_increment() {
        let zone = ExampleAddress::new("Setpoint", 4, 1, 0).with_increments(
            UnitIncrement::None,
            UnitIncrement::One,
            SubIncrement::None,
        );
        let mut pattern = infer_pattern(&[zone.clone()]).unwrap();
        pattern.extra_main_groups = vec![MainMiddle::new(2, 0)];
        assert_eq!(max_zones(&pattern, &[zone.clone()]), Some(15));

        let fixed = ExampleAddress::new("Setpoint", 4, 1, 0);
        assert_eq!(max_zones(&pattern, &[fixed]), None);
        assert_eq!(zone_slot(&pattern, &[zone], 8), Some(MainMiddle::new(2, 1)));
    }

    #[test]
    fn test_zones_spanning_several_middle_groups() {
        let moving = |name: &str, middle: u8| {
            ExampleAddress::new(name, 4, middle, 0).with_increments(
                UnitIncrement::None,
                UnitIncrement::One,
                SubIncrement::None,
            )
        };
        let examples = [moving("Setpoint", 1), moving("Actual", 2)];
        let mut pattern = infer_pattern(&examples).unwrap();
        pattern.extra_main_groups = vec![MainMiddle::new(2, 0)];

        // 4/1-2, 4/3-4, 4/5-6, then 2/0-1 .. 2/6-7
        assert_eq!(max_zones(&pattern, &examples), Some(3 + 4));
        assert_eq!(zone_slot(&pattern, &examples, 2), Some(MainMiddle::new(4, 5)));
        assert_eq!(zone_slot(&pattern, &examples, 3), Some(MainMiddle::new(2, 0)));
        assert_eq!(zone_slot(&pattern, &examples, 6), Some(MainMiddle::new(2, 6)));
        assert_eq!(zone_slot(&pattern, &examples, 7), None);
    }

    #[test]
    fn test_check_zone_addition() {
        assert!(check_zone_addition(14, Some(15)).is_ok());
        assert!(check_zone_addition(100, None).is_ok());
        let err = check_zone_addition(15, Some(15)).unwrap_err();
        assert!(matches!(err, PlanError::Capacity(ref e) if e.zone_limit() == Some(15)));
    }
}
