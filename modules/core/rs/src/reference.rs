use ahash::AHashMap;
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use crate::{seq, Error};

/// Precursor (hairpin) sequences indexed by their identifiers.
/// Sequences are normalized on insertion, see [seq::normalize].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Precursors {
    sequences: AHashMap<String, String>,
}

impl Precursors {
    /// Number of `N` separators appended to each precursor loaded from a multi-record file.
    pub const PADDING: usize = 12;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, sequence: impl AsRef<[u8]>) -> Result<()> {
        let id = id.into();
        ensure!(!id.is_empty(), "Precursor ID cannot be empty");
        ensure!(
            !self.sequences.contains_key(&id),
            "Duplicated precursor ID: {id}"
        );

        let sequence = seq::normalize(sequence.as_ref())?;
        self.sequences.insert(id, sequence);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.sequences.get(id).map(|x| x.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sequences.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sequences.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Mature arm annotated on a precursor. Coordinates are 1-based and inclusive.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Dissolve, Getters)]
pub struct MatureArm {
    name: String,
    start: usize,
    end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl MatureArm {
    pub fn new(name: impl Into<String>, start: usize, end: usize) -> Result<Self> {
        let name = name.into();
        ensure!(!name.is_empty(), "Mature arm name cannot be empty");
        ensure!(
            start >= 1 && start <= end,
            "Invalid 1-based coordinates of the mature arm {name}: {start}-{end}"
        );
        Ok(Self { name, start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Mature arms per precursor. Arms of each precursor keep the order in which they were added,
/// which is the order used to assign reads to arms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matures {
    arms: AHashMap<String, Vec<MatureArm>>,
}

impl Matures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, precursor: impl Into<String>, arm: MatureArm) -> Result<()> {
        let precursor = precursor.into();
        let arms = self.arms.entry(precursor).or_default();
        ensure!(
            arms.iter().all(|x| x.name != arm.name),
            "Mature arm {} is annotated twice on the same precursor",
            arm.name
        );
        arms.push(arm);
        Ok(())
    }

    /// Arms of the precursor in the insertion order. Unknown precursors have no arms.
    pub fn arms(&self, precursor: &str) -> &[MatureArm] {
        self.arms.get(precursor).map(|x| x.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.arms.values().map(|x| x.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.values().all(|x| x.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatureArm])> {
        self.arms.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Check that every arm fits into its precursor. Arms of precursors that are absent from
    /// the table are returned to the caller as they are harmless for the annotation itself.
    pub fn validate(&self, precursors: &Precursors) -> Result<Vec<&str>> {
        let mut orphans = Vec::new();
        for (precursor, arms) in self.iter() {
            let Some(sequence) = precursors.get(precursor) else {
                orphans.push(precursor);
                continue;
            };
            for arm in arms {
                if arm.end > sequence.len() {
                    return Err(Error::invalid_mature(
                        precursor,
                        &arm.name,
                        format!(
                            "arm ends at {} while the precursor length is {}",
                            arm.end,
                            sequence.len()
                        ),
                    )
                    .into());
                }
            }
        }
        orphans.sort_unstable();
        Ok(orphans)
    }
}
