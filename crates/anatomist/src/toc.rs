//! Table-of-contents decoder.
//!
//! The TOC is `partition_count` consecutive [`PartitionSummary`] records at
//! `toc_offset`. It is exposed as a lazy view over the buffer: records are
//! decoded on access and the sequence can be walked any number of times.

use crate::header::FileHeader;
use common::layout::PARTITION_SUMMARY_SIZE;
use common::{ByteView, Cursor, Decode, IfcError, RecordIter, Records};

/// One TOC entry: where a partition's records live and how large they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionSummary {
    /// String-table offset of the partition name.
    pub name: u32,
    /// Byte offset of the first record from the start of the file.
    pub offset: u32,
    /// Number of records.
    pub cardinality: u32,
    /// Size of one record in bytes.
    pub entry_size: u32,
}

impl PartitionSummary {
    /// Total size of the partition's records in bytes.
    ///
    /// Computed in 64 bits, so it cannot overflow.
    ///
    /// # Examples
    /// ```
    /// # use anatomist::PartitionSummary;
    /// let p = PartitionSummary { name: 0, offset: 96, cardinality: u32::MAX, entry_size: u32::MAX };
    /// assert_eq!(p.size_bytes(), u32::MAX as u64 * u32::MAX as u64);
    /// ```
    pub fn size_bytes(&self) -> u64 {
        self.cardinality as u64 * self.entry_size as u64
    }

    /// One past the last byte of the partition's data.
    pub fn data_end(&self) -> u64 {
        self.offset as u64 + self.size_bytes()
    }
}

impl Decode for PartitionSummary {
    const SIZE: usize = PARTITION_SUMMARY_SIZE;

    fn decode(cursor: &mut Cursor<'_>) -> Self {
        PartitionSummary {
            name: cursor.u32(),
            offset: cursor.u32(),
            cardinality: cursor.u32(),
            entry_size: cursor.u32(),
        }
    }
}

/// Read-only view of the table of contents.
#[derive(Debug, Clone, Copy)]
pub struct Toc<'a> {
    records: Records<'a, PartitionSummary>,
}

impl<'a> Toc<'a> {
    /// Number of partitions; always equals the header's `partition_count`.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PartitionSummary> {
        self.records.get(index)
    }

    pub fn iter(&self) -> RecordIter<'a, PartitionSummary> {
        self.records.iter()
    }

    /// Size of the TOC array itself in bytes.
    pub fn byte_len(&self) -> u64 {
        self.records.as_bytes().len() as u64
    }

    /// Sum of all partition sizes, or `None` on overflow.
    pub fn total_data_bytes(&self) -> Option<u64> {
        self.iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.size_bytes()))
    }
}

impl<'a> IntoIterator for Toc<'a> {
    type Item = PartitionSummary;
    type IntoIter = RecordIter<'a, PartitionSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Toc<'a> {
    type Item = PartitionSummary;
    type IntoIter = RecordIter<'a, PartitionSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Locates the TOC described by `header`.
///
/// The whole array is bounds-checked as one span, so a TOC that runs past
/// the end of the buffer is an error rather than a short sequence.
///
/// # Errors
/// `OutOfBounds` if `[toc_offset, toc_offset + partition_count * 16)` is not
/// inside the buffer.
pub fn decode<'a>(view: ByteView<'a>, header: &FileHeader) -> Result<Toc<'a>, IfcError> {
    let records = view.read_slice::<PartitionSummary>(
        header.toc_offset() as u64,
        header.partition_count() as u64,
    )?;
    log::trace!(
        "toc: {} partitions at offset {}",
        records.len(),
        header.toc_offset()
    );
    Ok(Toc { records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header;
    use crate::testing::IfcBuilder;

    #[test]
    fn test_decode_partitions() {
        let mut builder = IfcBuilder::new();
        builder.partition("command_line", 1, 4);
        builder.partition("decl.function", 3, 12);
        builder.partition("type.fundamental", 0, 8);
        let bytes = builder.build();

        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        let toc = decode(view, &header).unwrap();

        assert_eq!(toc.len(), 3);
        assert_eq!(toc.byte_len(), 48);
        let sizes: Vec<u64> = toc.iter().map(|p| p.size_bytes()).collect();
        assert_eq!(sizes, vec![4, 36, 0]);
        assert_eq!(toc.total_data_bytes(), Some(40));
        assert_eq!(toc.get(1).unwrap().cardinality, 3);
        assert!(toc.get(3).is_none());
    }

    #[test]
    fn test_restartable() {
        let mut builder = IfcBuilder::new();
        builder.partition("name.source-file", 2, 2);
        builder.partition("scope.desc", 1, 16);
        let bytes = builder.build();

        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        let toc = decode(view, &header).unwrap();
        let first: Vec<_> = toc.iter().collect();
        let second: Vec<_> = (&toc).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_data_within_file() {
        let mut builder = IfcBuilder::new();
        builder.partition("decl.variable", 5, 20);
        builder.partition("expr.literal", 7, 3);
        let bytes = builder.build();

        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        for p in decode(view, &header).unwrap() {
            assert!(p.data_end() <= bytes.len() as u64);
        }
    }

    #[test]
    fn test_empty_toc() {
        let bytes = IfcBuilder::new().build();
        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        let toc = decode(view, &header).unwrap();
        assert!(toc.is_empty());
        assert_eq!(toc.iter().count(), 0);
        assert_eq!(toc.total_data_bytes(), Some(0));
    }

    #[test]
    fn test_truncated_before_third_summary() {
        let mut builder = IfcBuilder::new();
        builder.partition("decl.function", 0, 8);
        builder.partition("decl.enum", 0, 8);
        builder.partition("decl.field", 0, 8);
        let bytes = builder.build();

        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        assert_eq!(header.partition_count(), 3);

        // Cut inside the third record.
        let cut = header.toc_offset() as usize + 2 * PARTITION_SUMMARY_SIZE + 5;
        let short = ByteView::new(&bytes[..cut]);
        assert!(matches!(
            decode(short, &header),
            Err(IfcError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_total_overflow_detected() {
        let mut builder = IfcBuilder::new();
        builder.partition_raw(0, 0, u32::MAX, u32::MAX);
        builder.partition_raw(0, 0, u32::MAX, u32::MAX);
        builder.partition_raw(0, 0, u32::MAX, u32::MAX);
        let bytes = builder.build();

        let view = ByteView::new(&bytes);
        let header = header::decode(view).unwrap();
        let toc = decode(view, &header).unwrap();
        assert_eq!(toc.total_data_bytes(), None);
    }
}
