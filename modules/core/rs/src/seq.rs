use eyre::{ensure, Result};

/// Nucleotides allowed in normalized precursor sequences.
pub const ALPHABET: &[u8] = b"ACGTN";

/// Normalize a nucleotide sequence: uppercase it and store `U` as `T`.
/// Fails on empty sequences and on anything outside of [ALPHABET] after normalization.
pub fn normalize(seq: &[u8]) -> Result<String> {
    ensure!(!seq.is_empty(), "Nucleotide sequence cannot be empty");

    let mut normalized = String::with_capacity(seq.len());
    for (i, &x) in seq.iter().enumerate() {
        let x = match x.to_ascii_uppercase() {
            b'U' => b'T',
            x => x,
        };
        ensure!(
            ALPHABET.contains(&x),
            "Unexpected nucleotide at index {i} = {:?}",
            x as char
        );
        normalized.push(x as char);
    }
    Ok(normalized)
}

/// Padding appended after each precursor loaded from a multi-record source.
pub fn padding(n: usize) -> String {
    "N".repeat(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() -> Result<()> {
        assert_eq!(normalize(b"acgu")?, "ACGT");
        assert_eq!(normalize(b"UGAGGUAGUAGGUUGUAUAGUU")?, "TGAGGTAGTAGGTTGTATAGTT");
        assert_eq!(normalize(b"NNNN")?, "NNNN");

        for invalid in [&b""[..], b"ACGT ", b"AC-GT", b"ACGR"] {
            assert!(normalize(invalid).is_err(), "{:?}", invalid);
        }
        Ok(())
    }

    #[test]
    fn test_padding() {
        assert_eq!(padding(0), "");
        assert_eq!(padding(3), "NNN");
    }
}
