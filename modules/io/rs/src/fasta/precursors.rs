use std::io::BufRead;
use std::path::Path;

use eyre::{Result, WrapErr};
use mirbit_core_rs::{seq, Precursors};

use super::{Reader, Record};
use crate::ReadRecord;

/// Load precursor sequences from FASTA records. Each sequence is normalized and followed by
/// `padding` separator `N` characters.
pub fn read_precursors(reader: impl BufRead, padding: usize) -> Result<Precursors> {
    collect(Reader::new(reader)?, padding)
}

/// Load precursors from a plain or gzip-compressed FASTA file (e.g. miRBase `hairpin.fa`).
pub fn load_precursors(path: impl AsRef<Path>, padding: usize) -> Result<Precursors> {
    let path = path.as_ref();
    collect(Reader::from_path(path)?, padding)
        .wrap_err_with(|| format!("Failed to load precursors from {}", path.display()))
}

fn collect<R: BufRead>(mut reader: Reader<R>, padding: usize) -> Result<Precursors> {
    let mut precursors = Precursors::new();
    let separator = seq::padding(padding);

    let mut record = Record::default();
    while reader.read_record(&mut record)? {
        let (id, _, mut sequence) = std::mem::take(&mut record).dissolve();
        sequence.extend_from_slice(separator.as_bytes());
        precursors
            .insert(id.clone(), &sequence)
            .wrap_err_with(|| format!("Invalid precursor {id}"))?;
    }
    log::debug!("Loaded {} precursors", precursors.len());
    Ok(precursors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_precursors() -> Result<()> {
        let content = ">mir-1 MI0000001 stem-loop\nacgu\nACGU\n>mir-2\nGGGG\n";
        let precursors = read_precursors(content.as_bytes(), 3)?;
        assert_eq!(precursors.len(), 2);
        assert_eq!(precursors.get("mir-1"), Some("ACGTACGTNNN"));
        assert_eq!(precursors.get("mir-2"), Some("GGGGNNN"));
        Ok(())
    }

    #[test]
    fn test_load_precursors() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("mirbit-fasta-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;

        for name in ["hairpin.fa", "hairpin.fa.gz"] {
            let path = dir.join(name);
            let mut writer = crate::compression::write_file(&path)?;
            writer.write_all(b">mir-1 MI0000001\naaaauuuu\nCCCCGGGG\n>mir-2\nACGU\n")?;
            writer.flush()?;
            drop(writer);

            let precursors = load_precursors(&path, 2)?;
            assert_eq!(precursors.get("mir-1"), Some("AAAATTTTCCCCGGGGNN"), "{name}");
            assert_eq!(precursors.get("mir-2"), Some("ACGTNN"), "{name}");
        }

        assert!(load_precursors(dir.join("missing.fa"), 2).is_err());
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_duplicated_precursors() {
        let content = ">mir-1\nACGU\n>mir-1\nACGU\n";
        assert!(read_precursors(content.as_bytes(), Precursors::PADDING).is_err());
    }
}
