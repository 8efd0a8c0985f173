//! Literal byte-layout constants of the IFC container.
//!
//! All multi-byte integers are little-endian. Offsets in the header are byte
//! offsets from the start of the file unless noted otherwise.

/// Magic bytes at offset 0.
pub const SIGNATURE: [u8; 4] = [0x54, 0x51, 0x45, 0x1A];

/// Size of the magic signature.
pub const SIGNATURE_SIZE: usize = 4;

/// Size of the SHA-256 digest stored at the start of the header.
pub const CHECKSUM_SIZE: usize = 32;

/// Size of the fixed header record that follows the signature.
pub const HEADER_SIZE: usize = 72;

/// Size of one table-of-contents entry.
pub const PARTITION_SUMMARY_SIZE: usize = 16;

/// First byte covered by the content checksum.
pub const CHECKSUM_COVERAGE_START: usize = SIGNATURE_SIZE + CHECKSUM_SIZE;

/// Smallest possible well-formed file: signature plus header.
pub const MIN_FILE_SIZE: usize = SIGNATURE_SIZE + HEADER_SIZE;

/// Field offsets within the header record (relative to the end of the signature).
pub mod header {
    pub const CHECKSUM: usize = 0;
    pub const MAJOR_VERSION: usize = 32;
    pub const MINOR_VERSION: usize = 33;
    pub const ABI: usize = 34;
    pub const ARCHITECTURE: usize = 35;
    pub const DIALECT: usize = 36;
    pub const STRING_TABLE_OFFSET: usize = 40;
    pub const STRING_TABLE_SIZE: usize = 44;
    pub const UNIT: usize = 48;
    pub const SOURCE_PATH: usize = 52;
    pub const GLOBAL_SCOPE: usize = 56;
    pub const TOC_OFFSET: usize = 60;
    pub const PARTITION_COUNT: usize = 64;
    pub const IS_INTERNAL: usize = 68;
    /// Three bytes of alignment padding close the record.
    pub const RESERVED: usize = 69;
}
