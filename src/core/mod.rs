//! Domain logic
//!
//! Everything in here is free of I/O: progress arithmetic, document rules,
//! audit diffing, the approval state machine and archive assembly.

pub mod approval;
pub mod archive;
pub mod audit;
pub mod documents;
pub mod models;
pub mod progress;
