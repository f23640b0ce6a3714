use eyre::{OptionExt, Result};
use itertools::Itertools;
use mirbit_core_rs::{Matures, Precursors};
use rayon::ThreadPool;

use crate::config::Config;
use crate::engine::Engine;
use crate::scoring::{Scoring, SeqbusterScore};

pub struct EngineBuilder {
    precursors: Option<Precursors>,
    matures: Matures,
    config: Config,
    scoring: Box<dyn Scoring>,
    thread_pool: Option<ThreadPool>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            precursors: None,
            matures: Matures::default(),
            config: Config::default(),
            scoring: Box::new(SeqbusterScore::default()),
            thread_pool: None,
        }
    }
}

impl EngineBuilder {
    pub fn with_precursors(mut self, precursors: Precursors) -> Self {
        self.precursors = Some(precursors);
        self
    }

    pub fn with_matures(mut self, matures: Matures) -> Self {
        self.matures = matures;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_scoring(mut self, scoring: impl Scoring + 'static) -> Self {
        self.scoring = Box::new(scoring);
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    pub fn build(self) -> Result<Engine> {
        let precursors = self
            .precursors
            .ok_or_eyre("Precursor sequences must be provided to build the engine")?;

        let orphans = self.matures.validate(&precursors)?;
        if !orphans.is_empty() {
            log::warn!(
                "Mature arms of the following precursors (N={}) will never be used, precursor sequences are missing: {}",
                orphans.len(),
                orphans.iter().join(", ")
            );
        }
        if self.matures.is_empty() {
            log::warn!("No mature arms were provided, reads will not be annotated");
        }

        Ok(Engine::new(
            self.thread_pool,
            precursors,
            self.matures,
            self.config,
            self.scoring,
        ))
    }
}
