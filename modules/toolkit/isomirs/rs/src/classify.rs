use std::cmp::Ordering;

use log::debug;
use mirbit_core_rs::MatureArm;

use crate::config::Config;
use crate::isomir::Isomir;
use crate::variation::Variation;

/// Compare the placement boundaries with the mature arm and annotate the placement on success.
///
/// `start` is the 0-based placement start on the precursor, arm coordinates are 1-based.
/// The non-templated tail of the placement is excluded from the 3' end. The placement is
/// rejected when any end deviates from the arm by more than the configured shift or when
/// the variation can't be extracted from the read or the precursor. Rejected placements are
/// left untouched.
pub fn classify(
    sequence: &str,
    start: usize,
    arm: &MatureArm,
    precursor: &str,
    isomir: &mut Isomir,
    config: &Config,
) -> bool {
    match boundaries(sequence, start, isomir.tail().len(), arm, precursor, config) {
        Some((t5, t3)) => {
            isomir.annotate(arm.name().clone(), t5, t3);
            true
        }
        None => false,
    }
}

fn boundaries(
    sequence: &str,
    start: usize,
    tail: usize,
    arm: &MatureArm,
    precursor: &str,
    config: &Config,
) -> Option<(Variation, Variation)> {
    let (arm_start, arm_end) = (*arm.start(), *arm.end());

    let start = start + 1;
    let dif5 = start.abs_diff(arm_start);
    if dif5 > config.max_5p_shift {
        debug!(
            "5' end at {start} is too far from the {} start {arm_start}",
            arm.name()
        );
        return None;
    }
    let t5 = match start.cmp(&arm_start) {
        Ordering::Less => Variation::Extension(sequence.get(..dif5)?.to_owned()),
        Ordering::Greater => {
            Variation::Trimming(precursor.get(arm_start - 1..arm_start - 1 + dif5)?.to_owned())
        }
        Ordering::Equal => Variation::None,
    };

    let templated = sequence.len().checked_sub(tail)?;
    let trimmed = sequence.get(..templated)?;
    let end = start + templated - 1;
    let dif3 = end.abs_diff(arm_end);
    if dif3 > config.max_3p_shift {
        debug!(
            "3' end at {end} is too far from the {} end {arm_end}",
            arm.name()
        );
        return None;
    }
    let t3 = match end.cmp(&arm_end) {
        Ordering::Greater => {
            // The read may start past the arm end, leaving fewer templated bases than the shift
            let from = templated.checked_sub(dif3)?;
            Variation::Extension(trimmed.get(from..)?.to_owned())
        }
        Ordering::Less => {
            Variation::Trimming(precursor.get(arm_end.checked_sub(dif3)?..arm_end)?.to_owned())
        }
        Ordering::Equal => Variation::None,
    };

    Some((t5, t3))
}
