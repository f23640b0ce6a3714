//! Reader for pre-computed alignment hits stored as whitespace-separated text:
//!
//! ```text
//! read_x12    TGAGGTAGTAGGTTGTATAGTT    hsa-let-7a-1    5    27    0    0
//! ```
//!
//! Columns are read name, read sequence, precursor ID, and the 0-based start of the hit on
//! the precursor. Any extra columns are ignored. Empty lines and lines starting with `#`
//! are skipped.

use std::io::BufRead;
use std::path::Path;

use eyre::{OptionExt, Result, WrapErr};
use mirbit_core_rs::Hit;

use crate::compression;
use crate::traits::ReadRecord;

pub mod parse {
    use super::*;

    pub fn hit(line: &str) -> Result<Hit> {
        let mut columns = line.split_whitespace();
        let read = columns.next().ok_or_eyre("Missing read name")?;
        let sequence = columns.next().ok_or_eyre("Missing read sequence")?;
        let precursor = columns.next().ok_or_eyre("Missing precursor ID")?;
        let start = columns.next().ok_or_eyre("Missing hit start")?;
        let start = start
            .parse::<usize>()
            .wrap_err_with(|| format!("Invalid hit start: {start}"))?;

        Ok(Hit::new(
            read.to_string(),
            sequence.to_string(),
            precursor.to_string(),
            start,
        ))
    }
}

pub struct Reader<R> {
    reader: R,
    line: String,
    lineno: usize,
}

impl Reader<()> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Reader<Box<dyn BufRead + Send>>> {
        let stream = compression::read_file(path)?.boxed();
        Ok(Reader::new(stream))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            lineno: 0,
        }
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Hit;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
            self.lineno += 1;

            let line = self.line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            *into = parse::hit(line)
                .wrap_err_with(|| format!("Invalid alignment hit at line {}", self.lineno))?;
            return Ok(true);
        }
    }
}

/// Iterator over all hits of a reader. Stops after the first error.
pub struct Hits<R> {
    reader: Reader<R>,
    failed: bool,
}

impl<R: BufRead> Iterator for Hits<R> {
    type Item = Result<Hit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut hit = Hit::default();
        match self.reader.read_record(&mut hit) {
            Ok(true) => Some(Ok(hit)),
            Ok(false) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> IntoIterator for Reader<R> {
    type Item = Result<Hit>;
    type IntoIter = Hits<R>;

    fn into_iter(self) -> Self::IntoIter {
        Hits {
            reader: self,
            failed: false,
        }
    }
}
