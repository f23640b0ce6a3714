//! Tab-separated isomiR tables. Variation fields are expected to be case-encoded already
//! (`NA`, uppercase extension, lowercase trimming); `NA` is written as `0` in the isomiR
//! table for compatibility with miraligner outputs.

use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::Result;
use itertools::Itertools;

use crate::compression;
use crate::traits::WriteRecord;

/// A single annotated read in the isomiR table.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Constructor, Dissolve, Getters)]
pub struct Record {
    name: String,
    seq: String,
    freq: u64,
    mature: String,
    substitutions: String,
    tail: String,
    t5: String,
    t3: String,
    precursor: String,
    hits: usize,
}

/// Per-sample isomiR count keyed by the full isomiR identity.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Constructor, Dissolve, Getters)]
pub struct Summary {
    isomir: String,
    mature: String,
    counts: u64,
    sample: String,
    hits: usize,
}

pub struct Writer<W, T> {
    writer: W,
    _phantom: PhantomData<T>,
}

impl Writer<(), ()> {
    /// Create a writer for the given path, gzip-compressed if the extension is `gz`.
    pub fn from_path<T>(path: impl AsRef<Path>) -> Result<Writer<Box<dyn Write + Send>, T>>
    where
        Writer<Box<dyn Write + Send>, T>: WriteRecord<Record = T>,
        T: Columns,
    {
        Writer::new(compression::write_file(path)?)
    }
}

/// Column names of a tabular record.
pub trait Columns {
    const COLUMNS: &'static [&'static str];
}

impl Columns for Record {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "seq",
        "freq",
        "mir",
        "start",
        "end",
        "mism",
        "add",
        "t5",
        "t3",
        "s5",
        "s3",
        "DB",
        "precursor",
        "hits",
    ];
}

impl Columns for Summary {
    const COLUMNS: &'static [&'static str] = &["isomir", "mir", "counts", "sample", "hits"];
}

impl<W: Write, T: Columns> Writer<W, T> {
    /// Wrap the writer and emit the header line.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", T::COLUMNS.iter().join("\t"))?;
        Ok(Self {
            writer,
            _phantom: PhantomData,
        })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn or_zero(value: &str) -> &str {
    if value == "NA" {
        "0"
    } else {
        value
    }
}

impl<W: Write> WriteRecord for Writer<W, Record> {
    type Record = Record;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\tNA\tNA\t{}\t{}\t{}\t{}\tNA\tNA\tmiRNA\t{}\t{}",
            record.name,
            record.seq,
            record.freq,
            record.mature,
            or_zero(&record.substitutions),
            or_zero(&record.tail),
            or_zero(&record.t5),
            or_zero(&record.t3),
            record.precursor,
            record.hits
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> WriteRecord for Writer<W, Summary> {
    type Record = Summary;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}",
            record.isomir, record.mature, record.counts, record.sample, record.hits
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_isomirs() -> Result<()> {
        let record = Record::new(
            "read_x12".into(),
            "TGAGGTAGTAGGTTGTATAGTTTT".into(),
            12,
            "hsa-let-7a-5p".into(),
            "0".into(),
            "TT".into(),
            "NA".into(),
            "ttg".into(),
            "hsa-let-7a-1".into(),
            1,
        );

        let mut writer = Writer::<_, Record>::new(Vec::new())?;
        writer.write_records(&[record])?;
        writer.flush()?;

        let content = String::from_utf8(writer.into_inner())?;
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            [
                "name\tseq\tfreq\tmir\tstart\tend\tmism\tadd\tt5\tt3\ts5\ts3\tDB\tprecursor\thits",
                "read_x12\tTGAGGTAGTAGGTTGTATAGTTTT\t12\thsa-let-7a-5p\tNA\tNA\t0\tTT\t0\tttg\tNA\tNA\tmiRNA\thsa-let-7a-1\t1",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_write_summary() -> Result<()> {
        let mut writer = Writer::<_, Summary>::new(Vec::new())?;
        writer.write_record(&Summary::new(
            "hsa-let-7a-5p:0:TT:NA:ttg".into(),
            "hsa-let-7a-5p".into(),
            12,
            "sample-1".into(),
            1,
        ))?;

        let content = String::from_utf8(writer.into_inner())?;
        assert_eq!(
            content,
            "isomir\tmir\tcounts\tsample\thits\nhsa-let-7a-5p:0:TT:NA:ttg\thsa-let-7a-5p\t12\tsample-1\t1\n"
        );
        Ok(())
    }
}
