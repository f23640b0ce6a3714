#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// A coarse placement of a read on a precursor produced by an upstream aligner.
/// The start is a 0-based offset into the precursor sequence.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Constructor, Dissolve, Getters)]
pub struct Hit {
    read: String,
    sequence: String,
    precursor: String,
    start: usize,
}
