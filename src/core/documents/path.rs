//! Storage path convention for uploaded documents

use chrono::NaiveDate;

/// Longest sanitized filename in bytes
///
/// With the lot id, separators and a collision suffix the stored name stays
/// well under both NAME_MAX and the 255 character path columns.
pub const MAX_FILENAME_LEN: usize = 100;

/// Extensions longer than this are treated as part of the stem when truncating
const MAX_EXTENSION_LEN: usize = 16;

/// Keep only the final path component, replace whitespace with `_` and
/// shorten the stem to [`MAX_FILENAME_LEN`]
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();

    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        truncate_filename(cleaned)
    }
}

fn truncate_filename(name: &str) -> String {
    if name.len() <= MAX_FILENAME_LEN {
        return name.to_string();
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_LEN => name.split_at(dot),
        _ => (name, ""),
    };

    let mut end = (MAX_FILENAME_LEN - extension.len()).min(stem.len());
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &stem[..end], extension)
}

/// `lotes/<year>/<month>/<lot_id>_<sanitized_filename>`
pub fn storage_path(lot_id: &str, date: NaiveDate, filename: &str) -> String {
    format!(
        "lotes/{}/{}_{}",
        date.format("%Y/%m"),
        lot_id,
        sanitize_filename(filename)
    )
}

/// Insert `_<suffix>` before the extension of the final component
pub fn with_suffix(path: &str, suffix: &str) -> String {
    let (dir, file) = match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    };

    match file.rfind('.') {
        Some(dot) if dot > 0 => format!("{}{}_{}{}", dir, &file[..dot], suffix, &file[dot..]),
        _ => format!("{}{}_{}", dir, file, suffix),
    }
}

/// Final component of a stored path
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
