//! Open enumerations carried by the header.
//!
//! Both tags are advisory: an unrecognized raw value is preserved as
//! `Unrecognized(raw)` and never causes a file to be rejected.

use std::fmt;

/// Target architecture recorded by the producing toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Unknown,
    X86,
    X64,
    Arm32,
    Arm64,
    HybridX86Arm64,
    Unrecognized(u8),
}

impl Architecture {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Unknown,
            1 => Self::X86,
            2 => Self::X64,
            3 => Self::Arm32,
            4 => Self::Arm64,
            5 => Self::HybridX86Arm64,
            other => Self::Unrecognized(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::X86 => 1,
            Self::X64 => 2,
            Self::Arm32 => 3,
            Self::Arm64 => 4,
            Self::HybridX86Arm64 => 5,
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::X86 => "X86",
            Self::X64 => "X64",
            Self::Arm32 => "ARM32",
            Self::Arm64 => "ARM64",
            Self::HybridX86Arm64 => "HybridX86ARM64",
            Self::Unrecognized(_) => "Unrecognized",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(raw) => write!(f, "Unrecognized({raw})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Kind of translation unit the file describes (low 3 bits of the unit field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSort {
    /// Plain source file.
    Source,
    /// Primary module interface unit.
    Primary,
    /// Module interface partition.
    Partition,
    /// Header unit.
    Header,
    /// Exported translation unit.
    ExportedTu,
    /// Tag values 5..=7.
    Unrecognized(u8),
}

impl UnitSort {
    pub const BITS: u32 = 3;
    pub const MASK: u32 = (1 << Self::BITS) - 1;

    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Source,
            1 => Self::Primary,
            2 => Self::Partition,
            3 => Self::Header,
            4 => Self::ExportedTu,
            other => Self::Unrecognized(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Source => 0,
            Self::Primary => 1,
            Self::Partition => 2,
            Self::Header => 3,
            Self::ExportedTu => 4,
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Primary => "Primary",
            Self::Partition => "Partition",
            Self::Header => "Header",
            Self::ExportedTu => "ExportedTU",
            Self::Unrecognized(_) => "Unrecognized",
        }
    }
}

impl fmt::Display for UnitSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(raw) => write!(f, "Unrecognized({raw})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Packed unit descriptor: a [`UnitSort`] tag in the low bits, opaque payload above.
///
/// # Examples
/// ```
/// # use anatomist::{UnitIndex, UnitSort};
/// let unit = UnitIndex::from_raw((7 << 3) | 2);
/// assert_eq!(unit.sort(), UnitSort::Partition);
/// assert_eq!(unit.payload(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitIndex(u32);

impl UnitIndex {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn sort(self) -> UnitSort {
        UnitSort::from_raw((self.0 & UnitSort::MASK) as u8)
    }

    /// The bits above the sort tag; not interpreted.
    pub fn payload(self) -> u32 {
        self.0 >> UnitSort::BITS
    }
}
