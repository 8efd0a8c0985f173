//! String table resolver.
//!
//! Text references in the header and the table of contents are byte offsets
//! relative to the start of the string table. Entries are NUL-terminated and
//! a lookup never reads past the end of the table region.

use crate::header::FileHeader;
use common::{ByteView, IfcError};

/// Bounds-checked view over the string-table region.
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    view: ByteView<'a>,
    start: u64,
    end: u64,
}

impl<'a> StringTable<'a> {
    /// Locates the region `[string_table_offset, +string_table_size)`.
    ///
    /// The size field is read as a byte count.
    ///
    /// # Errors
    /// `OutOfBounds` if the region does not lie inside the buffer.
    pub fn new(view: ByteView<'a>, header: &FileHeader) -> Result<Self, IfcError> {
        let start = header.string_table_offset() as u64;
        let size = header.string_table_size() as u64;
        view.subslice(start, size)?;
        Ok(Self {
            view,
            start,
            end: start + size,
        })
    }

    /// Region size in bytes.
    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Raw bytes of the entry at `offset`, without its terminator.
    pub fn resolve_bytes(&self, offset: u32) -> Result<&'a [u8], IfcError> {
        let at = self.start + offset as u64;
        if at >= self.end {
            return Err(IfcError::OutOfBounds {
                offset: at,
                len: 1,
                limit: self.end,
            });
        }
        self.view.read_cstr(at, self.end)
    }

    /// The entry at `offset` as text.
    ///
    /// # Errors
    /// - `OutOfBounds` if `offset` is outside the table or the entry has no
    ///   terminator before the end of the table.
    /// - `InvalidText` if the entry is not UTF-8.
    pub fn resolve(&self, offset: u32) -> Result<&'a str, IfcError> {
        let bytes = self.resolve_bytes(offset)?;
        std::str::from_utf8(bytes).map_err(|_| IfcError::InvalidText { offset })
    }
}

/// Resolves a single string-table offset.
pub fn resolve<'a>(
    view: ByteView<'a>,
    header: &FileHeader,
    offset: u32,
) -> Result<&'a str, IfcError> {
    StringTable::new(view, header)?.resolve(offset)
}
