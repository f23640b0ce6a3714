use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::aggregate::ReadAggregate;

#[derive(Clone, PartialEq, Debug, Default, Getters)]
pub struct Stats {
    // Input hits, including the dropped ones
    pub(crate) hits: usize,
    // Hits that don't fit into their precursor
    pub(crate) out_of_range: usize,
    // Hits that replaced an earlier placement of the same read on the same precursor
    pub(crate) replaced: usize,
    // Distinct reads with at least one placement
    pub(crate) reads: usize,
    // Placements dropped in favor of better-scoring ones
    pub(crate) dominated: usize,
    // Placements assigned to a mature arm
    pub(crate) annotated: usize,
    pub(crate) time_s: f64,
}

#[derive(Clone, PartialEq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Annotated {
    reads: Vec<ReadAggregate>,
    stats: Stats,
}
