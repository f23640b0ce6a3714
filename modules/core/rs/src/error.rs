/// Errors with a meaning for the isomiR annotation pipeline. Everything else is reported as
/// a plain `eyre::Report`; these variants are wrapped into reports as well and can be
/// recovered with `Report::downcast_ref::<Error>()`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// The read placed at `start` doesn't fit into the precursor.
    #[display("read of length {length} placed at {start} exceeds the precursor length {precursor_length}")]
    OutOfRange {
        start: usize,
        length: usize,
        precursor_length: usize,
    },
    /// Malformed input record, e.g. an empty sequence or a reference to an unknown precursor.
    #[display("invalid record for read {read}: {reason}")]
    InvalidRecord { read: String, reason: String },
    /// Mature arm that can't be placed on its precursor.
    #[display("invalid mature arm {arm} on precursor {precursor}: {reason}")]
    InvalidMature {
        precursor: String,
        arm: String,
        reason: String,
    },
    /// Two different reads collapsed into the same isomiR identity.
    #[display("isomiR {key} is produced by different reads: {first} and {second}")]
    DuplicateIsomir {
        key: String,
        first: String,
        second: String,
    },
}

impl Error {
    pub fn invalid_record(read: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            read: read.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_mature(
        precursor: impl Into<String>,
        arm: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidMature {
            precursor: precursor.into(),
            arm: arm.into(),
            reason: reason.into(),
        }
    }
}
