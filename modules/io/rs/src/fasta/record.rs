#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use eyre::Result;

use super::validate;

/// A single FASTA record:
/// - The ID is the first whitespace-delimited token of the header line and is never empty.
/// - The description is the rest of the header line without surrounding whitespace.
/// - The sequence is non-empty and contains only DNA/RNA nucleotides or `N`.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters)]
pub struct Record {
    id: String,
    description: String,
    seq: Vec<u8>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: "Default ID".to_string(),
            description: String::new(),
            seq: b"ACGT".to_vec(),
        }
    }
}

impl Record {
    pub fn new(id: String, description: String, seq: Vec<u8>) -> Result<Self> {
        validate::id(&id)?;
        validate::seq(&seq)?;
        Ok(Self {
            id,
            description,
            seq,
        })
    }

    /// Split the header line (without the leading '>') into the ID and the description.
    pub fn from_header(header: &str, seq: Vec<u8>) -> Result<Self> {
        let header = header.trim();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, description)) => (id, description.trim()),
            None => (header, ""),
        };
        Self::new(id.to_string(), description.to_string(), seq)
    }
}
