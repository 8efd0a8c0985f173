//! Decode pipeline ("signature to Ready").
//!
//! Stages, each run exactly once and in order:
//! - **SignatureChecked**: magic bytes match.
//! - **HeaderParsed**: the 72-byte header record decodes.
//! - **ChecksumVerified**: SHA-256 of `[36, len)` equals the stored digest, via [`vault`].
//! - **SizeVerified**: the recomputed layout size equals the buffer length and
//!   every declared region lies inside the buffer.
//! - **Ready**: the string table is located; the file is accepted.
//!
//! The first failure rejects the file with that error. [`Ifc`] is the only
//! value representing the `Ready` state, so string resolution and partition
//! enumeration are unreachable for a rejected file.

use crate::header::{self, FileHeader};
use crate::strings::StringTable;
use crate::toc::{self, PartitionSummary, Toc};
use crate::size;
use common::{ByteView, IfcError, Stage};
use vault::IntegrityOracle;

/// Tracks the one-way stage transitions of a single decode.
struct Progress {
    stage: Stage,
}

impl Progress {
    fn new() -> Self {
        Self {
            stage: Stage::Unopened,
        }
    }

    fn reach(&mut self, next: Stage) {
        debug_assert_eq!(self.stage.next(), Some(next));
        log::debug!("ifc: {} -> {}", self.stage, next);
        self.stage = next;
    }
}

/// A validated IFC file borrowed from its backing buffer.
#[derive(Debug, Clone, Copy)]
pub struct Ifc<'a> {
    view: ByteView<'a>,
    header: FileHeader,
    toc: Toc<'a>,
    strings: StringTable<'a>,
}

impl<'a> Ifc<'a> {
    /// Runs the full pipeline over `bytes`.
    ///
    /// `bytes` must be the complete file: its length is compared against the
    /// layout exactly. Running `load` again on the same buffer yields an
    /// identical result.
    ///
    /// # Errors
    /// The first failing stage's error: `TruncatedFile`, `InvalidSignature`,
    /// `ChecksumMismatch`, `SizeOverflow`, `SizeMismatch` or `OutOfBounds`.
    pub fn load(bytes: &'a [u8]) -> Result<Self, IfcError> {
        let result = Self::run(ByteView::new(bytes));
        if let Err(e) = &result {
            log::debug!("ifc: rejected after {}: {}", e.stage(), e);
        }
        result
    }

    fn run(view: ByteView<'a>) -> Result<Self, IfcError> {
        let mut progress = Progress::new();

        header::check_signature(view)?;
        progress.reach(Stage::SignatureChecked);

        let header = header::read_record(view)?;
        progress.reach(Stage::HeaderParsed);
        if !header.architecture().is_recognized() {
            log::warn!("ifc: unrecognized architecture {}", header.architecture());
        }
        if !header.unit().sort().is_recognized() {
            log::warn!("ifc: unrecognized unit sort {}", header.unit().sort());
        }

        IntegrityOracle::verify(view, header.checksum())?;
        progress.reach(Stage::ChecksumVerified);

        let toc = toc::decode(view, &header)?;
        size::validate(view, &header, &toc)?;
        progress.reach(Stage::SizeVerified);

        let strings = StringTable::new(view, &header)?;
        progress.reach(Stage::Ready);

        Ok(Self {
            view,
            header,
            toc,
            strings,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// The whole file.
    pub fn bytes(&self) -> &'a [u8] {
        self.view.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Always `false`: an accepted file holds at least a signature and header.
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn partitions(&self) -> Toc<'a> {
        self.toc
    }

    pub fn strings(&self) -> StringTable<'a> {
        self.strings
    }

    /// Resolves a string-table offset.
    pub fn string(&self, offset: u32) -> Result<&'a str, IfcError> {
        self.strings.resolve(offset)
    }

    /// Path of the source file the interface was built from.
    pub fn source_path(&self) -> Result<&'a str, IfcError> {
        self.strings.resolve(self.header.source_path())
    }

    pub fn partition_name(&self, partition: &PartitionSummary) -> Result<&'a str, IfcError> {
        self.strings.resolve(partition.name)
    }

    /// Finds the first partition called `name`.
    ///
    /// # Errors
    /// Propagates resolution errors for partition names encountered before a match.
    pub fn find_partition(&self, name: &str) -> Result<Option<PartitionSummary>, IfcError> {
        for partition in self.toc.iter() {
            if self.partition_name(&partition)? == name {
                return Ok(Some(partition));
            }
        }
        Ok(None)
    }

    /// Raw record bytes of `partition`; contents are not interpreted.
    pub fn partition_bytes(&self, partition: &PartitionSummary) -> Result<&'a [u8], IfcError> {
        self.view
            .subslice(partition.offset as u64, partition.size_bytes())
    }
}
