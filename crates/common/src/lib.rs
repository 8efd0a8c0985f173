pub mod error;
pub mod layout;
pub mod mapped;
pub mod view;

pub use error::IfcError;
pub use mapped::MappedFile;
pub use view::{ByteView, Cursor, Decode, RecordIter, Records};

/// State of the decode pipeline.
///
/// States are reached strictly in declaration order and never revisited.
/// A failure at any point rejects the file; [`IfcError::stage`] reports the
/// last state reached. Only `Ready` permits string resolution and partition
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// No bytes inspected yet.
    Unopened,
    /// The magic signature matched.
    SignatureChecked,
    /// The fixed header record was decoded.
    HeaderParsed,
    /// The SHA-256 content digest matched the stored checksum.
    ChecksumVerified,
    /// The recomputed layout size matched the file length and all regions are in bounds.
    SizeVerified,
    /// The file is accepted.
    Ready,
}

impl Stage {
    /// The state that follows `self`, or `None` once `Ready`.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Unopened => Some(Stage::SignatureChecked),
            Stage::SignatureChecked => Some(Stage::HeaderParsed),
            Stage::HeaderParsed => Some(Stage::ChecksumVerified),
            Stage::ChecksumVerified => Some(Stage::SizeVerified),
            Stage::SizeVerified => Some(Stage::Ready),
            Stage::Ready => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Unopened => "unopened",
            Stage::SignatureChecked => "signature-checked",
            Stage::HeaderParsed => "header-parsed",
            Stage::ChecksumVerified => "checksum-verified",
            Stage::SizeVerified => "size-verified",
            Stage::Ready => "ready",
        };
        f.write_str(name)
    }
}
