use log::debug;
use mirbit_core_rs::{Matures, Precursors};

use crate::aggregate::ReadAggregate;
use crate::classify::classify;
use crate::config::Config;

/// Assign mature arms to all placements of the read. Arms of each precursor are tried in the
/// order of the annotation and the first accepted arm wins.
/// Returns the number of annotated placements.
pub fn annotate(
    read: &mut ReadAggregate,
    precursors: &Precursors,
    matures: &Matures,
    config: &Config,
) -> usize {
    let (sequence, placements) = read.split_mut();

    let mut annotated = 0;
    for isomir in placements.iter_mut() {
        let Some(precursor) = precursors.get(isomir.precursor()) else {
            continue;
        };
        let start = *isomir.start();
        for arm in matures.arms(isomir.precursor()) {
            if classify(sequence, start, arm, precursor, isomir, config) {
                annotated += 1;
                break;
            }
        }
        if !isomir.is_annotated() {
            debug!(
                "Placement on {} at {start} doesn't match any mature arm",
                isomir.precursor()
            );
        }
    }
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isomir::Isomir;
    use mirbit_core_rs::MatureArm;

    #[test]
    fn test_first_arm_wins() -> eyre::Result<()> {
        let mut precursors = Precursors::new();
        precursors.insert("mir-1", "AAAATTTTCCCCGGGG")?;
        precursors.insert("mir-2", "GGGGGGGGGGGGGGGG")?;

        let mut matures = Matures::new();
        matures.add("mir-1", MatureArm::new("miR-1-b", 4, 12)?)?;
        matures.add("mir-1", MatureArm::new("miR-1-a", 5, 12)?)?;
        matures.add("mir-2", MatureArm::new("miR-2", 1, 8)?)?;

        let mut read = ReadAggregate::new("read_x1", "TTTTCCCC")?;
        read.set_placement(Isomir::new("mir-1", 4, vec![], ""));
        // No arm within the tolerance
        read.set_placement(Isomir::new("mir-2", 9, vec![], ""));

        assert_eq!(annotate(&mut read, &precursors, &matures, &Config::default()), 1);

        let isomir = read
            .placement("mir-1")
            .ok_or_else(|| eyre::eyre!("missing placement"))?;
        assert_eq!(isomir.mature(), Some("miR-1-b"));
        assert_eq!(isomir.t5().to_string(), "a");
        assert!(!read.placement("mir-2").is_some_and(|x| x.is_annotated()));
        Ok(())
    }
}
