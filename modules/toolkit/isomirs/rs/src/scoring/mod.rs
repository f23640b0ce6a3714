mod seqbuster;

use dyn_clone::DynClone;
use impl_tools::autoimpl;

use crate::isomir::Isomir;
pub use seqbuster::SeqbusterScore;

/// Quality of a read placement. Scores must not increase with the number of substitutions
/// or with the tail length for a fixed read length.
#[autoimpl(for <M: trait + ?Sized> Box<M> where Box<M>: Clone)]
pub trait Scoring: DynClone + Send + Sync {
    fn score(&self, isomir: &Isomir, length: usize) -> f64;
}

dyn_clone::clone_trait_object!(Scoring);
