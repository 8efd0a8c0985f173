//! Human- and machine-readable summaries of an accepted IFC file.

use anatomist::{Ifc, IfcError};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct Extent {
    pub offset: u32,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct PartitionReport<'a> {
    pub name: &'a str,
    pub offset: u32,
    pub cardinality: u32,
    pub entry_size: u32,
    pub size_bytes: u64,
}

/// Everything printed for one file.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub path: String,
    pub file_size: u64,
    pub checksum: String,
    pub version: String,
    pub abi: u8,
    pub architecture: String,
    pub dialect: u32,
    pub unit_sort: String,
    pub unit_payload: u32,
    /// `None` only when the string table is empty.
    pub source_path: Option<&'a str>,
    pub global_scope: u32,
    pub internal: bool,
    pub string_table: Extent,
    pub toc: Extent,
    pub partitions: Vec<PartitionReport<'a>>,
}

impl<'a> Report<'a> {
    /// Collects the report, resolving every name through the string table.
    ///
    /// # Errors
    /// Any string resolution failure; a malformed name is never papered over.
    pub fn build(path: &Path, ifc: &Ifc<'a>) -> Result<Self, IfcError> {
        let header = ifc.header();

        let source_path = if ifc.strings().is_empty() {
            None
        } else {
            Some(ifc.source_path()?)
        };

        let mut partitions = Vec::with_capacity(ifc.partitions().len());
        for p in ifc.partitions() {
            partitions.push(PartitionReport {
                name: ifc.partition_name(&p)?,
                offset: p.offset,
                cardinality: p.cardinality,
                entry_size: p.entry_size,
                size_bytes: p.size_bytes(),
            });
        }

        Ok(Report {
            path: path.display().to_string(),
            file_size: ifc.len() as u64,
            checksum: hex::encode(header.checksum()),
            version: header.version().to_string(),
            abi: header.abi(),
            architecture: header.architecture().to_string(),
            dialect: header.dialect(),
            unit_sort: header.unit().sort().to_string(),
            unit_payload: header.unit().payload(),
            source_path,
            global_scope: header.global_scope(),
            internal: header.is_internal(),
            string_table: Extent {
                offset: header.string_table_offset(),
                size: ifc.strings().size(),
            },
            toc: Extent {
                offset: header.toc_offset(),
                size: ifc.partitions().byte_len(),
            },
            partitions,
        })
    }
}

/// Boxed text layout.
pub fn render_text(report: &Report<'_>, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "+------------------------------------------+")?;
    writeln!(out, "| IFC HEADER                               |")?;
    writeln!(out, "+------------------------------------------+")?;
    writeln!(out, "| File size      : {:>22} |", report.file_size)?;
    writeln!(out, "| Version        : {:>22} |", report.version)?;
    writeln!(out, "| ABI            : {:>22} |", report.abi)?;
    writeln!(out, "| Architecture   : {:>22} |", report.architecture)?;
    writeln!(out, "| Dialect        : {:>22} |", report.dialect)?;
    writeln!(out, "| Unit sort      : {:>22} |", report.unit_sort)?;
    writeln!(out, "| Global scope   : {:>22} |", report.global_scope)?;
    writeln!(out, "| Internal       : {:>22} |", report.internal)?;
    writeln!(out, "| Partitions     : {:>22} |", report.partitions.len())?;
    writeln!(out, "+------------------------------------------+")?;
    writeln!(out, "Path         : {}", report.path)?;
    writeln!(out, "Checksum     : {} (verified)", report.checksum)?;
    writeln!(
        out,
        "Source path  : {}",
        report.source_path.unwrap_or("<no string table>")
    )?;
    writeln!(
        out,
        "String table : {} bytes at offset {}",
        report.string_table.size, report.string_table.offset
    )?;
    writeln!(
        out,
        "TOC          : {} bytes at offset {}",
        report.toc.size, report.toc.offset
    )?;

    if report.partitions.is_empty() {
        writeln!(out, "\nNo partitions.")?;
        return Ok(());
    }

    writeln!(out, "\nPARTITIONS:")?;
    for p in &report.partitions {
        writeln!(
            out,
            "  {:<32} offset {:>10}  {:>8} x {:<6} = {} bytes",
            p.name, p.offset, p.cardinality, p.entry_size, p.size_bytes
        )?;
    }
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
pub fn render_json(report: &Report<'_>, out: &mut impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
