//! Project progress and target capacity

use crate::utils::error::{QualityError, Result};
use serde::{Deserialize, Serialize};

/// Derived production progress for a project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Target piece count
    pub target: u64,
    /// Pieces produced across all batches
    pub produced: u64,
    /// Percentage of target produced, two decimals
    pub percent: f64,
    pub completed: u64,
    pub remaining: u64,
}

impl Progress {
    pub fn compute(target: u64, produced: u64) -> Self {
        let percent = if target == 0 {
            0.0
        } else {
            round2(produced as f64 / target as f64 * 100.0)
        };

        Self {
            target,
            produced,
            percent,
            completed: produced,
            remaining: target.saturating_sub(produced),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Refuse a part count that would push the project total past its target.
///
/// `existing_total` must already exclude the batch being edited. A zero
/// target means no target has been set and nothing is enforced.
pub fn check_capacity(target: u64, existing_total: u64, incoming: u64) -> Result<()> {
    if target == 0 {
        return Ok(());
    }

    let total = existing_total.saturating_add(incoming);
    if total > target {
        return Err(QualityError::validation(format!(
            "part_count: {} pieces exceed the project target of {} ({} already produced, {} remaining)",
            incoming,
            target,
            existing_total,
            target.saturating_sub(existing_total)
        )));
    }

    Ok(())
}
