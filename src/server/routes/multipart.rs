//! Multipart batch form parsing
//!
//! Text fields `lot_id`, `date` (YYYY-MM-DD) and `part_count`, one file
//! field per document kind, and `clear_<kind>` flags to detach a document.

use crate::core::documents::DocumentKind;
use crate::services::{BatchForm, UploadedFile};
use crate::utils::error::{QualityError, Result};
use actix_multipart::{Field, Multipart};
use chrono::NaiveDate;
use futures::StreamExt;
use tracing::{debug, error};

const CLEAR_PREFIX: &str = "clear_";

/// Read a multipart payload into a batch form
///
/// `max_body_size` caps the sum of all field contents.
pub async fn parse_batch_form(mut payload: Multipart, max_body_size: usize) -> Result<BatchForm> {
    let mut form = BatchForm::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Error reading multipart field: {}", e);
            QualityError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "lot_id" => {
                let value = read_text(&mut field, &mut total, max_body_size).await?;
                form.lot_id = Some(value);
            }
            "date" => {
                let value = read_text(&mut field, &mut total, max_body_size).await?;
                form.date = parse_date(&value)?;
            }
            "part_count" => {
                let value = read_text(&mut field, &mut total, max_body_size).await?;
                form.part_count = parse_count(&value)?;
            }
            name => {
                if let Ok(kind) = name.parse::<DocumentKind>() {
                    let filename = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .map(|f| f.to_string())
                        .unwrap_or_default();
                    let content = read_bytes(&mut field, &mut total, max_body_size).await?;

                    // Browsers send an empty part for an untouched file input
                    if filename.is_empty() && content.is_empty() {
                        debug!("No file chosen for {}", kind);
                        continue;
                    }

                    let filename = if filename.is_empty() {
                        kind.as_str().to_string()
                    } else {
                        filename
                    };
                    form.uploads.push(UploadedFile {
                        field: kind,
                        filename,
                        content,
                    });
                } else if let Some(kind) = name
                    .strip_prefix(CLEAR_PREFIX)
                    .and_then(|k| k.parse::<DocumentKind>().ok())
                {
                    let value = read_text(&mut field, &mut total, max_body_size).await?;
                    if is_truthy(&value) && !form.cleared.contains(&kind) {
                        form.cleared.push(kind);
                    }
                } else {
                    debug!("Skipping unknown form field {}", name);
                    while field.next().await.is_some() {}
                }
            }
        }
    }

    Ok(form)
}

async fn read_bytes(field: &mut Field, total: &mut usize, limit: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| {
            error!("Error reading multipart chunk: {}", e);
            QualityError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        *total += bytes.len();
        if *total > limit {
            return Err(QualityError::bad_request(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

async fn read_text(field: &mut Field, total: &mut usize, limit: usize) -> Result<String> {
    let data = read_bytes(field, total, limit).await?;
    String::from_utf8(data)
        .map(|s| s.trim().to_string())
        .map_err(|_| QualityError::bad_request("Form fields must be UTF-8 text"))
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| QualityError::validation("date: expected a date as YYYY-MM-DD"))
}

fn parse_count(value: &str) -> Result<Option<i64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| QualityError::validation("part_count: must be a whole number"))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
