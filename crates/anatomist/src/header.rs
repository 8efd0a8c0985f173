//! Header decoder.
//!
//! Parses the signature and the fixed 72-byte header record. Parsing is all
//! this module does: checksum and size are verified by later stages.

use crate::tags::{Architecture, UnitIndex};
use common::layout::{HEADER_SIZE, MIN_FILE_SIZE, SIGNATURE, SIGNATURE_SIZE};
use common::{ByteView, Cursor, Decode, IfcError};

/// Format version tag. Displayed, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The fixed header record that follows the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    checksum: [u8; 32],
    version: Version,
    abi: u8,
    architecture: Architecture,
    dialect: u32,
    string_table_offset: u32,
    string_table_size: u32,
    unit: UnitIndex,
    source_path: u32,
    global_scope: u32,
    toc_offset: u32,
    partition_count: u32,
    is_internal: bool,
}

impl FileHeader {
    /// Stored SHA-256 digest of the checksum-covered range.
    pub fn checksum(&self) -> &[u8; 32] {
        &self.checksum
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn major_version(&self) -> u8 {
        self.version.major
    }

    pub fn minor_version(&self) -> u8 {
        self.version.minor
    }

    pub fn abi(&self) -> u8 {
        self.abi
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Language dialect tag, e.g. `202002`.
    pub fn dialect(&self) -> u32 {
        self.dialect
    }

    /// Byte offset of the string table from the start of the file.
    pub fn string_table_offset(&self) -> u32 {
        self.string_table_offset
    }

    /// Size of the string table in bytes.
    pub fn string_table_size(&self) -> u32 {
        self.string_table_size
    }

    pub fn unit(&self) -> UnitIndex {
        self.unit
    }

    /// String-table offset of the originating source path.
    pub fn source_path(&self) -> u32 {
        self.source_path
    }

    pub fn global_scope(&self) -> u32 {
        self.global_scope
    }

    /// Byte offset of the table of contents from the start of the file.
    pub fn toc_offset(&self) -> u32 {
        self.toc_offset
    }

    pub fn partition_count(&self) -> u32 {
        self.partition_count
    }

    pub fn is_internal(&self) -> bool {
        self.is_internal
    }
}

impl Decode for FileHeader {
    const SIZE: usize = HEADER_SIZE;

    fn decode(cursor: &mut Cursor<'_>) -> Self {
        use common::layout::header as at;

        debug_assert_eq!(cursor.position(), at::CHECKSUM);
        let checksum = cursor.array::<32>();
        debug_assert_eq!(cursor.position(), at::MAJOR_VERSION);
        let major = cursor.u8();
        let minor = cursor.u8();
        let abi = cursor.u8();
        debug_assert_eq!(cursor.position(), at::ARCHITECTURE);
        let architecture = Architecture::from_raw(cursor.u8());
        debug_assert_eq!(cursor.position(), at::DIALECT);
        let dialect = cursor.u32();
        let string_table_offset = cursor.u32();
        let string_table_size = cursor.u32();
        debug_assert_eq!(cursor.position(), at::UNIT);
        let unit = UnitIndex::from_raw(cursor.u32());
        let source_path = cursor.u32();
        let global_scope = cursor.u32();
        debug_assert_eq!(cursor.position(), at::TOC_OFFSET);
        let toc_offset = cursor.u32();
        let partition_count = cursor.u32();
        debug_assert_eq!(cursor.position(), at::IS_INTERNAL);
        let is_internal = cursor.u8() != 0;
        cursor.skip(HEADER_SIZE - at::RESERVED);

        FileHeader {
            checksum,
            version: Version { major, minor },
            abi,
            architecture,
            dialect,
            string_table_offset,
            string_table_size,
            unit,
            source_path,
            global_scope,
            toc_offset,
            partition_count,
            is_internal,
        }
    }
}

/// Checks the magic signature.
///
/// A mismatch is reported whenever at least four bytes are present, whatever
/// follows them.
///
/// # Errors
/// - `TruncatedFile` if the buffer is shorter than the signature.
/// - `InvalidSignature` if the first four bytes differ from `54 51 45 1A`.
pub fn check_signature(view: ByteView<'_>) -> Result<(), IfcError> {
    let bytes = view.as_bytes();
    let Some(found) = bytes.get(..SIGNATURE_SIZE) else {
        return Err(IfcError::TruncatedFile {
            required: SIGNATURE_SIZE as u64,
            actual: bytes.len() as u64,
        });
    };
    if found != SIGNATURE {
        let mut sig = [0u8; SIGNATURE_SIZE];
        sig.copy_from_slice(found);
        return Err(IfcError::InvalidSignature { found: sig });
    }
    Ok(())
}

/// Decodes the header record, assuming the signature was already checked.
pub(crate) fn read_record(view: ByteView<'_>) -> Result<FileHeader, IfcError> {
    if view.len() < MIN_FILE_SIZE {
        return Err(IfcError::TruncatedFile {
            required: MIN_FILE_SIZE as u64,
            actual: view.len() as u64,
        });
    }
    view.read_fixed::<FileHeader>(SIGNATURE_SIZE as u64)
}

/// Parses the signature and header of an IFC buffer.
///
/// Pure function of the buffer; performs no integrity verification.
///
/// # Errors
/// `TruncatedFile` or `InvalidSignature`, see [`check_signature`]; also
/// `TruncatedFile` if the buffer ends inside the header record.
pub fn decode(view: ByteView<'_>) -> Result<FileHeader, IfcError> {
    check_signature(view)?;
    read_record(view)
}
