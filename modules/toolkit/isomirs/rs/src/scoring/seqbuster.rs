use derive_getters::Getters;
use derive_more::Constructor;

use super::Scoring;
use crate::isomir::Isomir;

/// Read length minus fixed penalties for every substitution and every tail base.
/// A/T additions are cheaper than C/G ones.
#[derive(Clone, Copy, Debug, PartialEq, Constructor, Getters)]
pub struct SeqbusterScore {
    substitution: f64,
    weak_tail: f64,
    strong_tail: f64,
}

impl Default for SeqbusterScore {
    fn default() -> Self {
        Self {
            substitution: 1.0,
            weak_tail: 0.25,
            strong_tail: 0.75,
        }
    }
}

impl Scoring for SeqbusterScore {
    fn score(&self, isomir: &Isomir, length: usize) -> f64 {
        let tail: f64 = isomir
            .tail()
            .bytes()
            .map(|x| match x {
                b'A' | b'T' => self.weak_tail,
                _ => self.strong_tail,
            })
            .sum();
        length as f64 - self.substitution * isomir.substitutions().len() as f64 - tail
    }
}
