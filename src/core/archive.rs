//! ZIP export of batch attachments
//!
//! Every present attachment is written under its base filename. Missing
//! attachments are skipped and unreadable ones are reported as failed, so
//! callers always get an archive plus a report of what went into it.

use crate::core::documents::{DocumentKind, base_name};
use crate::core::models::batch::archive_name;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// State of one document field when the export was prepared
#[derive(Debug)]
pub enum ArchiveInput {
    /// Field has no attachment
    Missing(DocumentKind),
    /// File was read from storage
    Loaded {
        kind: DocumentKind,
        path: String,
        bytes: Vec<u8>,
    },
    /// File is referenced but could not be read
    Failed {
        kind: DocumentKind,
        path: String,
        error: String,
    },
}

/// One entry written to the archive
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IncludedEntry {
    pub field: DocumentKind,
    pub name: String,
    pub size: usize,
}

/// A field that could not be exported
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedEntry {
    pub field: DocumentKind,
    pub path: String,
    pub error: String,
}

/// What ended up in the archive
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    pub included: Vec<IncludedEntry>,
    pub skipped: Vec<DocumentKind>,
    pub failed: Vec<FailedEntry>,
}

impl ArchiveReport {
    /// True when nothing referenced by the batch went missing
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Finished archive with its download name
#[derive(Debug)]
pub struct ArchiveBundle {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: ArchiveReport,
}

pub fn build_archive(lot_id: &str, inputs: Vec<ArchiveInput>) -> Result<ArchiveBundle> {
    let mut report = ArchiveReport::default();
    let mut names = HashSet::new();
    let mut buf = Cursor::new(Vec::new());

    {
        let mut zip = ZipWriter::new(&mut buf);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for input in inputs {
            match input {
                ArchiveInput::Missing(kind) => report.skipped.push(kind),
                ArchiveInput::Failed { kind, path, error } => report.failed.push(FailedEntry {
                    field: kind,
                    path,
                    error,
                }),
                ArchiveInput::Loaded { kind, path, bytes } => {
                    let mut name = base_name(&path).to_string();
                    if !names.insert(name.clone()) {
                        name = format!("{}_{}", kind, name);
                        names.insert(name.clone());
                    }

                    zip.start_file(name.as_str(), options)?;
                    zip.write_all(&bytes)?;

                    report.included.push(IncludedEntry {
                        field: kind,
                        name,
                        size: bytes.len(),
                    });
                }
            }
        }

        zip.finish()?;
    }

    Ok(ArchiveBundle {
        file_name: archive_name(lot_id),
        bytes: buf.into_inner(),
        report,
    })
}
