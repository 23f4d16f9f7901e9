//! Upload validation by extension and guessed MIME type

use super::DocumentKind;
use crate::utils::error::{QualityError, Result};
use std::path::Path;

/// Check an uploaded file against the allow-list of its document field.
///
/// The MIME type is guessed from the filename only; content is not sniffed.
/// A name without any MIME guess passes as long as its extension does.
pub fn validate_upload(kind: DocumentKind, filename: &str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(QualityError::validation(format!(
            "{}: the uploaded file is empty",
            kind.title()
        )));
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    let allowed_extensions = kind.allowed_extensions();
    if !allowed_extensions.contains(&extension.as_str()) {
        return Err(QualityError::validation(format!(
            "{}: extension not allowed ({}). Allowed: {}",
            kind.title(),
            if extension.is_empty() { "-" } else { &extension },
            allowed_extensions.join(", ")
        )));
    }

    let guess = mime_guess::from_path(filename.to_lowercase());
    let allowed_mimes = kind.allowed_mime_types();
    if !guess.is_empty() && !guess.iter_raw().any(|mime| allowed_mimes.contains(&mime)) {
        return Err(QualityError::validation(format!(
            "{}: MIME type not allowed ({}). Allowed: {}",
            kind.title(),
            guess.first_raw().unwrap_or("-"),
            allowed_mimes.join(", ")
        )));
    }

    Ok(())
}
