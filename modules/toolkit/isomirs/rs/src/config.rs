use derive_getters::Dissolve;
use derive_more::Constructor;

/// Tolerances of the isomiR annotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor, Dissolve)]
pub struct Config {
    /// Maximum distance between the read start and the mature arm start.
    pub max_5p_shift: usize,
    /// Maximum distance between the templated read end and the mature arm end.
    pub max_3p_shift: usize,
    /// Annotated placements with more substitutions are not reported.
    pub max_substitutions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_5p_shift: 4,
            max_3p_shift: 4,
            max_substitutions: 3,
        }
    }
}
