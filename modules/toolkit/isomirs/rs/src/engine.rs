use std::time::Instant;

use derive_more::Constructor;
use eyre::Result;
use log::warn;
use mirbit_core_rs::{Error, Hit, Matures, Precursors};
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::aggregate::{ReadAggregate, Reads};
use crate::annotate::annotate;
use crate::builder::EngineBuilder;
use crate::config::Config;
use crate::resolve::resolve;
use crate::result::{Annotated, Stats};
use crate::scoring::Scoring;

#[derive(Constructor)]
pub struct Engine {
    thread_pool: Option<ThreadPool>,
    precursors: Precursors,
    matures: Matures,
    config: Config,
    scoring: Box<dyn Scoring>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn precursors(&self) -> &Precursors {
        &self.precursors
    }

    pub fn matures(&self) -> &Matures {
        &self.matures
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Group hits by read and realign them against their precursors.
    ///
    /// Hits that don't fit into the precursor are dropped with a warning. Any other invalid
    /// hit aborts the collection.
    pub fn collect(&self, hits: impl IntoIterator<Item = Result<Hit>>) -> Result<(Reads, Stats)> {
        let timer = Instant::now();
        let mut stats = Stats::default();
        let mut reads = Reads::new();

        for hit in hits {
            let hit = hit?;
            stats.hits += 1;

            let (read, precursor) = (hit.read().clone(), hit.precursor().clone());
            match reads.push(hit, &self.precursors) {
                Ok(None) => {}
                Ok(Some(_)) => stats.replaced += 1,
                Err(err @ Error::OutOfRange { .. }) => {
                    warn!("Dropping the hit of {read} on {precursor}: {err}");
                    stats.out_of_range += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        stats.time_s = timer.elapsed().as_secs_f64();
        Ok((reads, stats))
    }

    /// Resolve and annotate every read in parallel. Reads without placements are skipped.
    pub fn annotate(&self, reads: Reads, stats: Stats) -> Annotated {
        match &self.thread_pool {
            Some(pool) => pool.install(|| self._annotate(reads, stats)),
            None => self._annotate(reads, stats),
        }
    }

    fn _annotate(&self, reads: Reads, mut stats: Stats) -> Annotated {
        let timer = Instant::now();

        let processed: Vec<(ReadAggregate, usize, usize)> = reads
            .into_vec()
            .into_par_iter()
            .filter(|read| !read.is_empty())
            .map(|mut read| {
                let dominated = resolve(&mut read, self.scoring.as_ref());
                let annotated = annotate(&mut read, &self.precursors, &self.matures, &self.config);
                (read, dominated, annotated)
            })
            .collect();

        let mut result = Vec::with_capacity(processed.len());
        for (read, dominated, annotated) in processed {
            stats.dominated += dominated;
            stats.annotated += annotated;
            result.push(read);
        }
        stats.reads = result.len();
        stats.time_s += timer.elapsed().as_secs_f64();

        Annotated::new(result, stats)
    }

    pub fn run(&self, hits: impl IntoIterator<Item = Result<Hit>>) -> Result<Annotated> {
        let (reads, stats) = self.collect(hits)?;
        Ok(self.annotate(reads, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::OptionExt;
    use mirbit_core_rs::MatureArm;

    fn engine() -> Result<Engine> {
        let mut precursors = Precursors::new();
        precursors.insert("mir-1", "AAAATTTTCCCCGGGG")?;
        let mut matures = Matures::new();
        matures.add("mir-1", MatureArm::new("miR-1", 5, 12)?)?;
        matures.add("mir-9", MatureArm::new("miR-9", 1, 20)?)?;

        Engine::builder()
            .with_precursors(precursors)
            .with_matures(matures)
            .set_thread_pool(mirbit_core_rs::parallelism::pool(2)?)
            .build()
    }

    #[test]
    fn test_builder_requires_precursors() {
        assert!(Engine::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_arms_outside_precursor() -> Result<()> {
        let mut precursors = Precursors::new();
        precursors.insert("mir-1", "ACGT")?;
        let mut matures = Matures::new();
        matures.add("mir-1", MatureArm::new("miR-1", 1, 5)?)?;

        let err = Engine::builder()
            .with_precursors(precursors)
            .with_matures(matures)
            .build()
            .err()
            .ok_or_eyre("the engine must not be built")?;
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidMature { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_run() -> Result<()> {
        let engine = engine()?;
        let hits = [
            Hit::new("r1_x4".into(), "ATTTTCCCCG".into(), "mir-1".into(), 3),
            Hit::new("r2_x1".into(), "GGGGG".into(), "mir-1".into(), 14),
            Hit::new("r1_x4".into(), "ATTTTCCCCG".into(), "mir-1".into(), 3),
        ];
        let (reads, stats) = engine.run(hits.into_iter().map(Ok))?.dissolve();

        assert_eq!(*stats.hits(), 3);
        assert_eq!(*stats.out_of_range(), 1);
        assert_eq!(*stats.replaced(), 1);
        assert_eq!(*stats.reads(), 1);
        assert_eq!(*stats.annotated(), 1);

        assert_eq!(reads.len(), 1);
        let isomir = &reads[0].placements()[0];
        assert_eq!(isomir.mature(), Some("miR-1"));
        assert_eq!(isomir.signature(":"), "0:0:A:G");
        Ok(())
    }

    #[test]
    fn test_unknown_precursor_is_fatal() -> Result<()> {
        let engine = engine()?;
        let hits = [Ok(Hit::new("r1".into(), "ACGT".into(), "mir-2".into(), 0))];
        let err = engine.collect(hits).err().ok_or_eyre("collection must fail")?;
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidRecord { .. })
        ));
        Ok(())
    }
}
