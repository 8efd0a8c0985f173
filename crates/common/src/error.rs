//! Error taxonomy shared by every decode stage.

use crate::layout::SIGNATURE_SIZE;
use crate::Stage;

/// Errors raised while decoding or validating an IFC file.
///
/// Every variant is terminal: the first failure halts the pipeline and is
/// reported as-is. Re-decoding the same buffer yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum IfcError {
    /// The buffer is shorter than a structure that must be present.
    #[error("truncated file: need at least {required} bytes, found {actual}")]
    TruncatedFile { required: u64, actual: u64 },

    /// The first four bytes are not the IFC signature.
    #[error("not an IFC file: bad signature {}", hex::encode(.found))]
    InvalidSignature { found: [u8; 4] },

    /// The stored SHA-256 digest disagrees with the file contents.
    #[error(
        "corrupted file: checksum mismatch (stored {}, computed {})",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    ChecksumMismatch { expected: [u8; 32], actual: [u8; 32] },

    /// The size recomputed from header and table of contents disagrees with the file length.
    #[error("size mismatch: layout describes {expected} bytes, file has {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// Summing the declared region sizes overflowed 64 bits.
    #[error("size overflow while summing declared regions")]
    SizeOverflow,

    /// An offset/length pair points outside the buffer or its enclosing region.
    #[error("out of bounds: {len} bytes at offset {offset} exceed limit {limit}")]
    OutOfBounds { offset: u64, len: u64, limit: u64 },

    /// A string-table entry is not valid UTF-8.
    #[error("string table entry at offset {offset} is not valid UTF-8")]
    InvalidText { offset: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IfcError {
    /// Last pipeline stage that completed before this error rejected the file.
    pub fn stage(&self) -> Stage {
        match self {
            IfcError::Io(_) => Stage::Unopened,
            IfcError::InvalidSignature { .. } => Stage::Unopened,
            IfcError::TruncatedFile { required, .. } if *required > SIGNATURE_SIZE as u64 => {
                Stage::SignatureChecked
            }
            IfcError::TruncatedFile { .. } => Stage::Unopened,
            IfcError::ChecksumMismatch { .. } => Stage::HeaderParsed,
            IfcError::SizeMismatch { .. } | IfcError::SizeOverflow => Stage::ChecksumVerified,
            IfcError::OutOfBounds { .. } | IfcError::InvalidText { .. } => Stage::ChecksumVerified,
        }
    }

    pub(crate) fn out_of_bounds(offset: u64, len: u64, limit: u64) -> Self {
        IfcError::OutOfBounds { offset, len, limit }
    }
}
