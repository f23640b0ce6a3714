use std::fmt::{Display, Formatter};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// Difference between a read end and the matching end of the mature arm.
///
/// Textual representation follows the miRBase/seqbuster convention: `NA` when the ends
/// coincide, uppercase bases for extensions, and lowercase bases for trimmings.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Variation {
    /// The read end coincides with the mature arm end.
    #[default]
    None,
    /// Bases present in the read beyond the mature boundary.
    Extension(String),
    /// Mature bases absent from the read, taken from the precursor.
    Trimming(String),
}

impl Variation {
    pub fn is_none(&self) -> bool {
        matches!(self, Variation::None)
    }

    /// Number of bases by which the read end deviates from the mature arm end.
    pub fn shift(&self) -> usize {
        match self {
            Variation::None => 0,
            Variation::Extension(x) | Variation::Trimming(x) => x.len(),
        }
    }
}

impl Display for Variation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Variation::None => write!(f, "NA"),
            Variation::Extension(x) => write!(f, "{}", x.to_ascii_uppercase()),
            Variation::Trimming(x) => write!(f, "{}", x.to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_encoding() {
        for (variation, expected, shift) in [
            (Variation::None, "NA", 0),
            (Variation::Extension("ag".into()), "AG", 2),
            (Variation::Trimming("TTG".into()), "ttg", 3),
        ] {
            assert_eq!(variation.to_string(), expected);
            assert_eq!(variation.shift(), shift);
        }
        assert!(Variation::default().is_none());
    }
}
