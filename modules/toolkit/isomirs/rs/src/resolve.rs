use log::debug;

use crate::aggregate::ReadAggregate;
use crate::scoring::Scoring;

/// Keep only the best-scoring placements of the read. Ties are kept.
/// Returns the number of dropped placements.
pub fn resolve<S: Scoring + ?Sized>(read: &mut ReadAggregate, scoring: &S) -> usize {
    let length = read.sequence().len();
    let (_, placements) = read.split_mut();
    if placements.len() < 2 {
        return 0;
    }

    let scores: Vec<f64> = placements
        .iter()
        .map(|x| scoring.score(x, length))
        .collect();
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let before = placements.len();
    *placements = std::mem::take(placements)
        .into_iter()
        .zip(scores)
        .filter_map(|(isomir, score)| {
            if score == best {
                Some(isomir)
            } else {
                debug!(
                    "Dropping placement on {} at {} (score {score} < {best})",
                    isomir.precursor(),
                    isomir.start()
                );
                None
            }
        })
        .collect();
    before - placements.len()
}
