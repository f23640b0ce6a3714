use std::path::Path;

use ahash::AHashMap;
use derive_getters::{Dissolve, Getters};
use eyre::{Result, WrapErr};
use itertools::Itertools;
use mirbit_core_rs::Error;
use mirbit_io_rs::isomirs::{Record, Summary, Writer};
use mirbit_io_rs::WriteRecord;

use crate::aggregate::ReadAggregate;
use crate::config::Config;

/// Read count encoded in the read name as `<name>_x<count>`, 0 if absent.
///
/// Only the field between the first and the second `_x` is parsed: `seq_x1_x7` counts as 1.
pub fn read_count(name: &str) -> u64 {
    name.split("_x")
        .nth(1)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0)
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Dissolve, Getters)]
pub struct Table {
    records: Vec<Record>,
    summary: Vec<Summary>,
}

impl Table {
    /// Write the isomiR table and the per-sample summary to separate files.
    pub fn save(&self, records: impl AsRef<Path>, summary: impl AsRef<Path>) -> Result<()> {
        let path = records.as_ref();
        let mut writer = Writer::from_path::<Record>(path)?;
        writer
            .write_records(&self.records)
            .and_then(|_| writer.flush())
            .wrap_err_with(|| format!("Failed to write isomiRs to {}", path.display()))?;

        let path = summary.as_ref();
        let mut writer = Writer::from_path::<Summary>(path)?;
        writer
            .write_records(&self.summary)
            .and_then(|_| writer.flush())
            .wrap_err_with(|| format!("Failed to write the summary to {}", path.display()))?;
        Ok(())
    }
}

/// Collect annotated placements into the isomiR table of the sample.
///
/// Each (read, mature) pair is reported once. Placements with too many substitutions are
/// skipped. Two different reads resolving to the same isomiR fail the tabulation with
/// [Error::DuplicateIsomir].
pub fn tabulate(sample: &str, reads: &[ReadAggregate], config: &Config) -> Result<Table> {
    let mut table = Table::default();
    let mut seen: AHashMap<String, &str> = AHashMap::new();

    for read in reads {
        let hits = read
            .placements()
            .iter()
            .filter_map(|x| x.mature())
            .unique()
            .count();
        let count = read_count(read.name());

        let mut reported = Vec::new();
        for isomir in read.placements() {
            let Some(mature) = isomir.mature() else {
                continue;
            };
            if isomir.substitutions().len() > config.max_substitutions || reported.contains(&mature)
            {
                continue;
            }
            reported.push(mature);

            let key = format!("{mature}:{}", isomir.signature(":"));
            if let Some(first) = seen.get(&key) {
                return Err(Error::DuplicateIsomir {
                    key,
                    first: first.to_string(),
                    second: read.name().clone(),
                }
                .into());
            }

            table.records.push(Record::new(
                read.name().clone(),
                read.sequence().clone(),
                count,
                mature.to_owned(),
                isomir.substitutions_tag(),
                isomir.tail_tag().to_owned(),
                isomir.t5().to_string(),
                isomir.t3().to_string(),
                isomir.precursor().clone(),
                hits,
            ));
            table.summary.push(Summary::new(
                key.clone(),
                mature.to_owned(),
                count,
                sample.to_owned(),
                hits,
            ));
            seen.insert(key, read.name().as_str());
        }
    }
    Ok(table)
}
