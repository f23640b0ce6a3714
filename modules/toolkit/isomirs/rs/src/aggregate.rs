use ahash::AHashMap;
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use mirbit_core_rs::{seq, Error, Hit, Precursors};

use crate::isomir::Isomir;
use crate::realign::realign;

/// All placements of a single read, at most one per precursor.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, PartialEq, Eq, Dissolve, Getters)]
pub struct ReadAggregate {
    name: String,
    sequence: String,
    placements: Vec<Isomir>,
}

impl ReadAggregate {
    pub fn new(name: impl Into<String>, sequence: impl AsRef<[u8]>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_record(name, "empty read name"));
        }
        let sequence = seq::normalize(sequence.as_ref())
            .map_err(|err| Error::invalid_record(name.clone(), err.to_string()))?;

        Ok(Self {
            name,
            sequence,
            placements: Vec::new(),
        })
    }

    /// Store the placement, replacing and returning the previous one on the same precursor.
    pub fn set_placement(&mut self, isomir: Isomir) -> Option<Isomir> {
        match self
            .placements
            .iter_mut()
            .find(|x| x.precursor() == isomir.precursor())
        {
            Some(existing) => Some(std::mem::replace(existing, isomir)),
            None => {
                self.placements.push(isomir);
                None
            }
        }
    }

    pub fn remove_placement(&mut self, precursor: &str) -> Option<Isomir> {
        let ind = self
            .placements
            .iter()
            .position(|x| x.precursor() == precursor)?;
        Some(self.placements.remove(ind))
    }

    pub fn placement(&self, precursor: &str) -> Option<&Isomir> {
        self.placements.iter().find(|x| x.precursor() == precursor)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub(crate) fn split_mut(&mut self) -> (&str, &mut Vec<Isomir>) {
        (&self.sequence, &mut self.placements)
    }
}

/// Read aggregates in the order in which reads were first seen.
#[derive(Debug, Clone, Default)]
pub struct Reads {
    aggregates: Vec<ReadAggregate>,
    index: AHashMap<String, usize>,
}

impl Reads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Realign the hit and attach it to its read.
    ///
    /// The read is registered on its first hit, later hits reuse the stored sequence. Returns
    /// the placement replaced by this hit, if any. A hit that doesn't fit into the precursor
    /// results in [Error::OutOfRange], the read itself stays registered.
    pub fn push(&mut self, hit: Hit, precursors: &Precursors) -> Result<Option<Isomir>, Error> {
        let (read, sequence, precursor, start) = hit.dissolve();
        let Some(reference) = precursors.get(&precursor) else {
            return Err(Error::invalid_record(
                read,
                format!("unknown precursor {precursor}"),
            ));
        };

        let ind = match self.index.get(&read) {
            Some(ind) => *ind,
            None => {
                let aggregate = ReadAggregate::new(read.clone(), &sequence)?;
                self.aggregates.push(aggregate);
                self.index.insert(read, self.aggregates.len() - 1);
                self.aggregates.len() - 1
            }
        };
        let aggregate = &mut self.aggregates[ind];

        let (substitutions, tail) = realign(&aggregate.sequence, reference, start)?;
        Ok(aggregate.set_placement(Isomir::new(precursor, start, substitutions, tail)))
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    pub fn get(&self, read: &str) -> Option<&ReadAggregate> {
        self.index.get(read).map(|ind| &self.aggregates[*ind])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadAggregate> {
        self.aggregates.iter()
    }

    pub fn into_vec(self) -> Vec<ReadAggregate> {
        self.aggregates
    }
}
