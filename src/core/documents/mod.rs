//! Compliance document rules
//!
//! The six document fields a batch carries, which files each accepts and
//! where uploaded files are stored.

mod kind;
pub mod path;
mod validation;

pub use kind::DocumentKind;
pub use path::{base_name, sanitize_filename, storage_path, with_suffix};
pub use validation::validate_upload;
