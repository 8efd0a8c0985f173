//! Size validator.
//!
//! A well-formed file is exactly as long as its layout says:
//!
//! ```text
//! 4 + 72 + string_table_size + partition_count * 16 + Σ partition.size_bytes
//! ```
//!
//! No slack and no truncation are tolerated. After the total matches, every
//! declared region must also lie inside the file.

use crate::header::FileHeader;
use crate::toc::Toc;
use common::layout::MIN_FILE_SIZE;
use common::{ByteView, IfcError};

/// Recomputes the file length implied by `header` and `toc`.
///
/// # Errors
/// `SizeOverflow` if the sum does not fit in 64 bits.
pub fn expected_size(header: &FileHeader, toc: &Toc<'_>) -> Result<u64, IfcError> {
    let data = toc.total_data_bytes().ok_or(IfcError::SizeOverflow)?;
    (MIN_FILE_SIZE as u64)
        .checked_add(header.string_table_size() as u64)
        .and_then(|n| n.checked_add(toc.byte_len()))
        .and_then(|n| n.checked_add(data))
        .ok_or(IfcError::SizeOverflow)
}

/// Checks that the string table, the TOC and every partition lie inside `view`.
///
/// # Errors
/// `OutOfBounds` naming the first region that escapes the buffer.
pub fn check_extents(view: ByteView<'_>, header: &FileHeader, toc: &Toc<'_>) -> Result<(), IfcError> {
    view.subslice(
        header.string_table_offset() as u64,
        header.string_table_size() as u64,
    )?;
    view.subslice(header.toc_offset() as u64, toc.byte_len())?;
    for partition in toc {
        view.subslice(partition.offset as u64, partition.size_bytes())?;
    }
    Ok(())
}

/// Verifies the recomputed size against the actual buffer length, then the
/// region extents.
///
/// # Errors
/// - `SizeOverflow` if the declared sizes overflow.
/// - `SizeMismatch` if the recomputed size differs from the buffer length.
/// - `OutOfBounds` if a region lies outside the buffer.
pub fn validate(view: ByteView<'_>, header: &FileHeader, toc: &Toc<'_>) -> Result<(), IfcError> {
    let expected = expected_size(header, toc)?;
    let actual = view.len() as u64;
    if expected != actual {
        return Err(IfcError::SizeMismatch { expected, actual });
    }
    check_extents(view, header, toc)
}
