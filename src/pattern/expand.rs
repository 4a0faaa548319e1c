//! Expansion of a pattern to the objects of device `k`.

use super::example::{ExampleAddress, SubIncrement, UnitIncrement};
use super::infer::GroupPattern;
use super::template::DeviceObjectTemplate;
use super::zones::ZoneSpan;
use crate::addressing::GroupAddress;
use crate::error::{PlanError, Result};
use alloc::vec::Vec;

/// Group address of one example object for device `ordinal` (0-based).
///
/// - main: `base.main + k * main_increment`
/// - middle: `base.middle + k * middle_increment`, continuing into the
///   pattern's extra main groups once middle 7 is passed
/// - sub: `base.sub + k * sub_increment`
///
/// An example without any increment advances its sub by the pattern's
/// [`device_stride`](GroupPattern::device_stride) instead, so devices never
/// share addresses. Use [`expand`] for several objects whose middle groups
/// move together.
///
/// # Errors
///
/// Returns an address-space capacity error when the result leaves the KNX
/// group ranges or runs out of extra main groups.
pub fn expand_object(pattern: &GroupPattern, example: &ExampleAddress, ordinal: usize) -> Result<GroupAddress> {
    let span = ZoneSpan::of(core::slice::from_ref(example));
    place(pattern, example, span, ordinal)
}

fn place(pattern: &GroupPattern, example: &ExampleAddress, span: Option<ZoneSpan>, ordinal: usize) -> Result<GroupAddress> {
    let k = u32::try_from(ordinal).map_err(|_err| PlanError::address_space_exhausted())?;
    let main = advance(example.main, k, example.main_increment.value())?;

    let (main, middle) = match span {
        Some(span) if example.middle_increment == UnitIncrement::One => {
            let main = u8::try_from(main).map_err(|_err| PlanError::address_space_exhausted())?;
            let block = span
                .block(main, &pattern.extra_main_groups, ordinal)
                .ok_or_else(PlanError::address_space_exhausted)?;
            let offset = example.middle.saturating_sub(span.start_middle);
            (u32::from(block.main), u32::from(block.middle) + u32::from(offset))
        }
        _ => (main, u32::from(example.middle)),
    };

    let step = if example.sub_increment != SubIncrement::None {
        example.sub_increment.value()
    } else if example.has_increment() {
        0
    } else {
        pattern.device_stride()
    };
    let sub = advance(example.sub, k, step)?;

    GroupAddress::checked(main, middle, sub).ok_or_else(PlanError::address_space_exhausted)
}

fn advance(base: u8, k: u32, step: u32) -> Result<u32> {
    k.checked_mul(step)
        .and_then(|offset| offset.checked_add(u32::from(base)))
        .ok_or_else(PlanError::address_space_exhausted)
}

/// Objects of device `ordinal`, one per example, in example order.
///
/// Objects whose middle group moves share one zone block (see
/// [`ZoneSpan`]), so a zone is never split across main groups.
///
/// # Errors
///
/// Fails as [`expand_object`] does for the first object that does not fit.
pub fn expand(pattern: &GroupPattern, examples: &[ExampleAddress], ordinal: usize) -> Result<Vec<DeviceObjectTemplate>> {
    let span = ZoneSpan::of(examples);
    examples
        .iter()
        .map(|example| {
            let address = place(pattern, example, span, ordinal)?;
            Ok(DeviceObjectTemplate {
                name: example.object_name.clone(),
                dpt: example.dpt,
                main: address.main(),
                middle: address.middle(),
                start_sub: address.sub(),
                enabled: example.enabled,
                is_default: false,
            })
        })
        .collect()
}
