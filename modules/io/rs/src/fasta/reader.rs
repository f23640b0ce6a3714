use super::record::Record;
use crate::compression;
use crate::traits::ReadRecord;
use derive_getters::Dissolve;
use eyre::{ensure, Result, WrapErr};
use std::io::BufRead;
use std::path::Path;

/// A strict FASTA reader that parses a single record at a time. Ignores:
/// - Carriage return characters at the end of all lines (to support Windows line endings)
/// - Empty lines inside the sequence
///
/// Returns an error if there are:
/// - Errors while reading from the underlying reader
/// - Extra characters before the first record
/// - Non-nucleotide characters inside the sequence
/// - Empty ID or sequence fields in any record
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Reader<R> {
    reader: R,
}

impl Reader<()> {
    /// Open a plain or gzip-compressed FASTA file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Reader<Box<dyn BufRead + Send>>> {
        let path = path.as_ref();
        let stream = compression::read_file(path)?.boxed();
        Reader::new(stream).wrap_err_with(|| format!("Invalid FASTA file: {}", path.display()))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let buffer = reader.fill_buf()?;
        ensure!(
            buffer.first().map(|x| *x == b'>').unwrap_or(true),
            "Expected '>' at the start of the FASTA file"
        );
        Ok(Self { reader })
    }

    fn read_parts(&mut self, record: &mut Record) -> Result<bool> {
        let buffer = self.reader.fill_buf()?;
        if buffer.is_empty() {
            return Ok(false);
        }
        ensure!(
            buffer[0] == b'>',
            "Expected '>' at the start of the FASTA record"
        );
        self.reader.consume(1);

        let mut header = String::new();
        let read = self.reader.read_line(&mut header)?;
        ensure!(read > 0, "Unexpected EOF after '>'");
        ensure!(
            header.ends_with('\n'),
            "FASTA header is not terminated with a newline: {header}"
        );

        let mut seq = Vec::new();
        loop {
            let buffer = self.reader.fill_buf()?;
            if buffer.is_empty() || buffer[0] == b'>' {
                break;
            }

            let (line, consume) = match memchr::memchr(b'\n', buffer) {
                Some(pos) => (&buffer[..pos], pos + 1),
                None => (buffer, buffer.len()),
            };
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            seq.extend_from_slice(line);
            self.reader.consume(consume);
        }

        *record = Record::from_header(&header, seq)?;
        Ok(true)
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    /// Parse the next FASTA record into the given [Record] buffer.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        self.read_parts(into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Report;

    fn read_all(content: &str) -> Result<Vec<(String, String)>> {
        let mut reader = Reader::new(std::io::Cursor::new(content))?;
        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;
        Ok(records
            .into_iter()
            .map(|x| {
                let (id, _, seq) = x.dissolve();
                (id, String::from_utf8(seq).unwrap())
            })
            .collect())
    }

    #[test]
    fn test_empty_fasta_reader() -> Result<()> {
        assert!(read_all("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_fasta() {
        for content in [
            " ",
            ">",
            ">id",
            ">id\nAC GT\n",
            ">id\nACGT\n>ID\n",
            ">\nACGT\n",
            "ACGT\n>id\nACGT\n",
        ] {
            let result = read_all(content);
            assert!(result.is_err(), "Content: {:?}", content);
        }
    }

    #[test]
    fn test_valid_fasta() -> Result<()> {
        for (content, expected) in [
            (">id\nACGT\n", vec![("id", "ACGT")]),
            (">id\n\nACGT\n\n", vec![("id", "ACGT")]),
            (
                ">hsa-let-7a-1 MI0000060 Homo sapiens let-7a-1 stem-loop\nUGGGAUGAGG\nUAGUAGGUUG\n>hsa-mir-21 MI0000077\nUGUCGGGUAG\n",
                vec![("hsa-let-7a-1", "UGGGAUGAGGUAGUAGGUUG"), ("hsa-mir-21", "UGUCGGGUAG")],
            ),
            (
                ">id1\r\nAC\r\nGT\r\n>id2\r\nT\r\n",
                vec![("id1", "ACGT"), ("id2", "T")],
            ),
            (">id\nACGT", vec![("id", "ACGT")]),
        ] {
            let records = read_all(content)?;
            let expected: Vec<_> = expected
                .into_iter()
                .map(|(id, seq)| (id.to_string(), seq.to_string()))
                .collect();
            assert_eq!(records, expected, "Content: {:?}", content);
        }
        Ok(())
    }

    #[test]
    fn test_record_by_record() -> Result<()> {
        let mut reader = Reader::new(">a\nAC\n>b\nGT\n".as_bytes())?;
        let mut record = Record::default();
        assert!(reader.read_record(&mut record)?);
        assert_eq!(record.id(), "a");
        assert!(reader.read_record(&mut record)?);
        assert_eq!(record.id(), "b");
        assert!(!reader.read_record(&mut record)?);
        Ok::<(), Report>(())
    }
}
