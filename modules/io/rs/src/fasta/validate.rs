//! Checks applied to every FASTA record before it reaches the precursor table.

use eyre::{bail, ensure, Result};
use mirbit_core_rs::seq::ALPHABET;

/// The ID is used verbatim to match alignment hits and `miRNA.str` headers, so it must be a
/// single non-empty token.
pub fn id(id: &str) -> Result<()> {
    ensure!(!id.is_empty(), "FASTA ID cannot be empty");
    ensure!(
        !id.contains(char::is_whitespace),
        "Whitespace characters are not allowed in the FASTA ID: {id:?}"
    );
    Ok(())
}

/// DNA or RNA nucleotides in any case, `N` included.
pub fn seq(seq: &[u8]) -> Result<()> {
    ensure!(!seq.is_empty(), "FASTA sequence cannot be empty");
    for (i, &x) in seq.iter().enumerate() {
        let upper = x.to_ascii_uppercase();
        if upper != b'U' && !ALPHABET.contains(&upper) {
            bail!("Unexpected nucleotide at index {i} = {:?}", x as char);
        }
    }
    Ok(())
}
