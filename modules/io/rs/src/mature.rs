//! Reader for miRBase `miRNA.str` files. Only header lines are used:
//!
//! ```text
//! >hsa-let-7a-1 (-42.40)   [hsa-let-7a-5p:6-27] [hsa-let-7a-3p:57-77]
//! ```
//!
//! The first token is the precursor ID, bracketed tokens are mature arms with 1-based
//! inclusive coordinates on the precursor. Structure lines between headers are skipped.

use std::io::BufRead;
use std::path::Path;

use derive_getters::{Dissolve, Getters};
use eyre::{bail, ensure, eyre, OptionExt, Result, WrapErr};
use mirbit_core_rs::{MatureArm, Matures};

use crate::compression;
use crate::traits::ReadRecord;

/// Mature arms of a single precursor in the order they appear in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Dissolve, Getters)]
pub struct Record {
    precursor: String,
    arms: Vec<MatureArm>,
}

pub mod parse {
    use super::*;

    pub fn arm(token: &str) -> Result<MatureArm> {
        let inner = token
            .strip_prefix('[')
            .and_then(|x| x.strip_suffix(']'))
            .ok_or_else(|| eyre!("Mature arm must be enclosed in brackets: {token}"))?;
        let (name, coords) = inner
            .rsplit_once(':')
            .ok_or_eyre("Missing ':' between the mature name and its coordinates")?;
        let (start, end) = coords
            .split_once('-')
            .ok_or_eyre("Missing '-' between the mature start and end")?;

        let start = start
            .parse::<usize>()
            .wrap_err_with(|| format!("Invalid mature start: {start}"))?;
        let end = end
            .parse::<usize>()
            .wrap_err_with(|| format!("Invalid mature end: {end}"))?;
        MatureArm::new(name, start, end)
    }

    pub fn header(line: &str) -> Result<Record> {
        let Some(line) = line.strip_prefix('>') else {
            bail!("Header line must start with '>'")
        };
        let mut tokens = line.split_whitespace();
        let precursor = tokens.next().ok_or_eyre("Missing precursor ID")?;

        let arms = tokens
            .filter(|x| x.starts_with('['))
            .map(arm)
            .collect::<Result<Vec<_>>>()?;
        Ok(Record {
            precursor: precursor.to_string(),
            arms,
        })
    }
}

/// Streams [Record]s from headers that contain the species tag (e.g. `hsa`).
/// An empty species tag keeps all headers.
pub struct Reader<R> {
    reader: R,
    species: String,
    line: String,
    lineno: usize,
}

impl Reader<()> {
    pub fn from_path(
        path: impl AsRef<Path>,
        species: impl Into<String>,
    ) -> Result<Reader<Box<dyn BufRead + Send>>> {
        let stream = compression::read_file(path)?.boxed();
        Ok(Reader::new(stream, species))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R, species: impl Into<String>) -> Self {
        Self {
            reader,
            species: species.into(),
            line: String::new(),
            lineno: 0,
        }
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
            self.lineno += 1;

            let line = self.line.trim_end();
            if !line.starts_with('>') || !line.contains(self.species.as_str()) {
                continue;
            }
            *into = parse::header(line)
                .wrap_err_with(|| format!("Invalid miRNA.str header at line {}", self.lineno))?;
            return Ok(true);
        }
    }
}

/// Collect mature arms of all selected precursors into a single table.
pub fn read_matures(reader: impl BufRead, species: &str) -> Result<Matures> {
    collect(Reader::new(reader, species))
}

/// Load mature arms from a plain or gzip-compressed `miRNA.str` file.
pub fn load_matures(path: impl AsRef<Path>, species: &str) -> Result<Matures> {
    let path = path.as_ref();
    collect(Reader::from_path(path, species)?)
        .wrap_err_with(|| format!("Failed to load mature arms from {}", path.display()))
}

fn collect<R: BufRead>(mut reader: Reader<R>) -> Result<Matures> {
    let mut matures = Matures::new();

    let mut record = Record::default();
    while reader.read_record(&mut record)? {
        let (precursor, arms) = std::mem::take(&mut record).dissolve();
        ensure!(
            matures.arms(&precursor).is_empty(),
            "Precursor {precursor} is described more than once"
        );
        for arm in arms {
            matures.add(precursor.clone(), arm)?;
        }
    }
    log::debug!(
        "Loaded {} mature arms for species {:?}",
        matures.len(),
        reader.species
    );
    Ok(matures)
}
