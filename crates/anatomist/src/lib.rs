//! # The Anatomist: IFC Header & Table-of-Contents Decoding
//!
//! **Role**: Dissects a borrowed IFC buffer into a typed header, a string
//! table and a table of contents, and proves the file well-formed before any
//! of it is handed out.
//!
//! **Core Types**:
//! - `Ifc`: an accepted file (the pipeline's `Ready` state).
//! - `FileHeader`: the fixed 72-byte record after the signature.
//! - `PartitionSummary` / `Toc`: partition extents, decoded lazily.
//! - `StringTable`: NUL-terminated text, bounds-checked against its region.
//! - `Architecture`, `UnitSort`, `UnitIndex`: open tags that keep raw values.
//!
//! **Design**:
//! - Zero-copy: every type borrows the caller's buffer; nothing outlives it.
//! - Field-by-field little-endian decoding at literal offsets through
//!   `common::ByteView`; no struct overlays, no raw pointers.
//! - Partition contents are never interpreted beyond their byte extents.

pub mod header;
pub mod pipeline;
pub mod size;
pub mod strings;
pub mod tags;
pub mod toc;

#[cfg(test)]
pub(crate) mod testing;

pub use header::{FileHeader, Version};
pub use pipeline::Ifc;
pub use strings::StringTable;
pub use tags::{Architecture, UnitIndex, UnitSort};
pub use toc::{PartitionSummary, Toc};

// Shared types re-exported so consumers need only this crate.
pub use common::{IfcError, MappedFile, Stage};
