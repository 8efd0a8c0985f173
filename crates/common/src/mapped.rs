//! # Mapped File: Read-Only Backing Buffer
//!
//! Owns the memory mapping of an IFC file for the duration of a decode.
//! Decoders only ever borrow [`MappedFile::bytes`], so the borrow checker
//! guarantees nothing outlives the mapping; dropping the handle unmaps the
//! file on every exit path.

use crate::IfcError;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Memory-mapped read-only file handle.
#[derive(Debug)]
pub struct MappedFile {
    path: PathBuf,
    // `None` for empty files: zero-length mappings are rejected on some platforms.
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Opens `path` and maps it read-only.
    pub fn open(path: &Path) -> Result<Self, IfcError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and owned by `self`; callers only
            // receive borrows tied to `self`'s lifetime.
            Some(unsafe { Mmap::map(&file)? })
        };

        log::debug!("mapped {} ({} bytes)", path.display(), len);

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mapped contents. Its length equals the file length exactly.
    pub fn bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}
