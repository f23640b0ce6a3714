use std::fmt::{Display, Formatter};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use itertools::Itertools;

use crate::variation::Variation;

/// Mismatch between the read and the precursor. The position is a 0-based offset in the read.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Constructor, Getters)]
pub struct Substitution {
    position: usize,
    base: char,
}

impl Display for Substitution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.position, self.base)
    }
}

/// Placement of a single read on a single precursor.
///
/// The realigner fills in the substitutions and the non-templated tail, the boundary
/// classifier assigns the mature arm together with the 5'/3' variations.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct Isomir {
    precursor: String,
    start: usize,
    substitutions: Vec<Substitution>,
    tail: String,
    #[getter(skip)]
    mature: Option<String>,
    t5: Variation,
    t3: Variation,
}

impl Isomir {
    /// Unannotated placement with the given realignment results.
    pub fn new(
        precursor: impl Into<String>,
        start: usize,
        substitutions: Vec<Substitution>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            precursor: precursor.into(),
            start,
            substitutions,
            tail: tail.into(),
            mature: None,
            t5: Variation::None,
            t3: Variation::None,
        }
    }

    /// Name of the assigned mature arm, if any.
    pub fn mature(&self) -> Option<&str> {
        self.mature.as_deref()
    }

    pub fn is_annotated(&self) -> bool {
        self.mature.is_some()
    }

    pub(crate) fn annotate(&mut self, mature: String, t5: Variation, t3: Variation) {
        self.mature = Some(mature);
        self.t5 = t5;
        self.t3 = t3;
    }

    /// Substitutions in the `<position><base>` notation, `0` if there are none.
    pub fn substitutions_tag(&self) -> String {
        if self.substitutions.is_empty() {
            "0".to_string()
        } else {
            self.substitutions.iter().join("")
        }
    }

    /// Non-templated tail, `0` if there is none.
    pub fn tail_tag(&self) -> &str {
        if self.tail.is_empty() {
            "0"
        } else {
            &self.tail
        }
    }

    /// Variation signature: substitutions, tail, t5, and t3 joined by the separator.
    pub fn signature(&self, sep: &str) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.substitutions_tag(),
            self.tail_tag(),
            self.t5,
            self.t3
        )
    }
}
