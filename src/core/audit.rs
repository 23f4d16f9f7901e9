//! Document change detection for the audit trail

use crate::core::documents::{DocumentKind, base_name};
use crate::core::models::{AuditAction, DocumentSet};

/// An audit row before it is tied to a batch and persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDraft {
    pub field: DocumentKind,
    pub action: AuditAction,
    pub detail: String,
}

/// Compare document snapshots taken before and after a save.
///
/// `before` is `None` for a newly created batch. A field that is empty
/// afterwards produces nothing, so clearing an attachment is not logged.
pub fn diff_documents(before: Option<&DocumentSet>, after: &DocumentSet) -> Vec<AuditDraft> {
    DocumentKind::ALL
        .into_iter()
        .filter_map(|field| {
            let new = after.get(field)?;
            let old = before.and_then(|docs| docs.get(field));

            match old {
                None => Some(AuditDraft {
                    field,
                    action: AuditAction::Upload,
                    detail: format!("uploaded {}", base_name(new)),
                }),
                Some(old) if old != new => Some(AuditDraft {
                    field,
                    action: AuditAction::Replace,
                    detail: format!("replaced {} with {}", base_name(old), base_name(new)),
                }),
                Some(_) => None,
            }
        })
        .collect()
}
