//! Assembles conforming IFC buffers for tests.
//!
//! Layout produced: signature, header, string table, TOC, partition data,
//! optional padding. The checksum is computed last with the real digest.

use crate::toc::PartitionSummary;
use common::layout::{
    CHECKSUM_COVERAGE_START, MIN_FILE_SIZE, PARTITION_SUMMARY_SIZE, SIGNATURE, SIGNATURE_SIZE,
};
use common::ByteView;
use vault::IntegrityOracle;

enum Entry {
    /// Partition whose data the builder lays out after the TOC.
    Data {
        name: u32,
        cardinality: u32,
        entry_size: u32,
    },
    /// Summary written verbatim; no data emitted.
    Raw(PartitionSummary),
}

pub(crate) struct IfcBuilder {
    major: u8,
    minor: u8,
    abi: u8,
    architecture: u8,
    dialect: u32,
    unit: u32,
    source_path: u32,
    global_scope: u32,
    internal: bool,
    strings: Vec<u8>,
    partitions: Vec<Entry>,
    padding: usize,
}

impl IfcBuilder {
    pub(crate) fn new() -> Self {
        Self {
            major: 0,
            minor: 43,
            abi: 0,
            architecture: 2,
            dialect: 202002,
            unit: 1,
            source_path: 0,
            global_scope: 1,
            internal: false,
            strings: Vec::new(),
            partitions: Vec::new(),
            padding: 0,
        }
    }

    pub(crate) fn version(&mut self, major: u8, minor: u8) -> &mut Self {
        self.major = major;
        self.minor = minor;
        self
    }

    pub(crate) fn abi(&mut self, abi: u8) -> &mut Self {
        self.abi = abi;
        self
    }

    pub(crate) fn architecture(&mut self, raw: u8) -> &mut Self {
        self.architecture = raw;
        self
    }

    pub(crate) fn dialect(&mut self, dialect: u32) -> &mut Self {
        self.dialect = dialect;
        self
    }

    pub(crate) fn unit(&mut self, raw: u32) -> &mut Self {
        self.unit = raw;
        self
    }

    pub(crate) fn global_scope(&mut self, scope: u32) -> &mut Self {
        self.global_scope = scope;
        self
    }

    pub(crate) fn internal(&mut self, internal: bool) -> &mut Self {
        self.internal = internal;
        self
    }

    pub(crate) fn intern(&mut self, text: &str) -> u32 {
        self.intern_bytes(text.as_bytes())
    }

    pub(crate) fn intern_bytes(&mut self, text: &[u8]) -> u32 {
        let at = self.strings.len() as u32;
        self.strings.extend_from_slice(text);
        self.strings.push(0);
        at
    }

    pub(crate) fn source_path(&mut self, path: &str) -> &mut Self {
        self.source_path = self.intern(path);
        self
    }

    pub(crate) fn partition(&mut self, name: &str, cardinality: u32, entry_size: u32) -> &mut Self {
        let name = self.intern(name);
        self.partitions.push(Entry::Data {
            name,
            cardinality,
            entry_size,
        });
        self
    }

    pub(crate) fn partition_raw(
        &mut self,
        name: u32,
        offset: u32,
        cardinality: u32,
        entry_size: u32,
    ) -> &mut Self {
        self.partitions.push(Entry::Raw(PartitionSummary {
            name,
            offset,
            cardinality,
            entry_size,
        }));
        self
    }

    /// Zero bytes appended after all partition data.
    pub(crate) fn padding(&mut self, len: usize) -> &mut Self {
        self.padding = len;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let string_table_offset = MIN_FILE_SIZE as u32;
        let toc_offset = string_table_offset + self.strings.len() as u32;
        let mut data_offset = toc_offset + (self.partitions.len() * PARTITION_SUMMARY_SIZE) as u32;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&SIGNATURE);
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.extend_from_slice(&[self.major, self.minor, self.abi, self.architecture]);
        for field in [
            self.dialect,
            string_table_offset,
            self.strings.len() as u32,
            self.unit,
            self.source_path,
            self.global_scope,
            toc_offset,
            self.partitions.len() as u32,
        ] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.push(self.internal as u8);
        bytes.extend_from_slice(&[0u8; 3]);
        assert_eq!(bytes.len(), MIN_FILE_SIZE);

        bytes.extend_from_slice(&self.strings);

        let mut data = Vec::new();
        for (index, entry) in self.partitions.iter().enumerate() {
            let summary = match *entry {
                Entry::Data {
                    name,
                    cardinality,
                    entry_size,
                } => {
                    let summary = PartitionSummary {
                        name,
                        offset: data_offset,
                        cardinality,
                        entry_size,
                    };
                    let len = summary.size_bytes() as usize;
                    data.extend(std::iter::repeat(index as u8 + 1).take(len));
                    data_offset += len as u32;
                    summary
                }
                Entry::Raw(summary) => summary,
            };
            for field in [
                summary.name,
                summary.offset,
                summary.cardinality,
                summary.entry_size,
            ] {
                bytes.extend_from_slice(&field.to_le_bytes());
            }
        }
        bytes.extend_from_slice(&data);
        bytes.extend(std::iter::repeat(0u8).take(self.padding));

        seal(&mut bytes);
        bytes
    }
}

/// Rewrites the stored checksum to match the current contents.
pub(crate) fn seal(bytes: &mut [u8]) {
    let digest = IntegrityOracle::digest(ByteView::new(bytes));
    bytes[SIGNATURE_SIZE..CHECKSUM_COVERAGE_START].copy_from_slice(&digest);
}

/// Overwrites a 32-bit header field (offset relative to the header start).
/// Does not reseal.
pub(crate) fn patch_u32(bytes: &mut [u8], field: usize, value: u32) {
    let at = SIGNATURE_SIZE + field;
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}
