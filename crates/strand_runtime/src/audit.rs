//! Delivery audit: every pushed id must come out exactly once

use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    #[error("item {item} was delivered {count} times")]
    Duplicate { item: u64, count: usize },

    #[error("item {item} was never pushed (expected ids 0..{expected})")]
    Unexpected { item: u64, expected: u64 },

    #[error("{missing} of {expected} items were never delivered (first missing: {first})")]
    Missing { missing: u64, expected: u64, first: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditSummary {
    pub delivered: u64,
    pub by_owner: u64,
    pub by_stealers: u64,
}

/// Checks that `owned` and `stolen` together hold each id in `0..expected`
/// exactly once.
pub fn audit(expected: u64, owned: &[u64], stolen: &[Vec<u64>]) -> Result<AuditSummary, AuditError> {
    let mut all: Vec<u64> = owned
        .iter()
        .chain(stolen.iter().flatten())
        .copied()
        .collect();
    all.par_sort_unstable();

    if let Some(&item) = all.iter().find(|&&item| item >= expected) {
        return Err(AuditError::Unexpected { item, expected });
    }

    if let Some(window) = all.windows(2).find(|pair| pair[0] == pair[1]) {
        let item = window[0];
        let count = all.iter().filter(|&&other| other == item).count();
        return Err(AuditError::Duplicate { item, count });
    }

    // Sorted, in range and free of duplicates: anything short is missing.
    let delivered = all.len() as u64;
    if delivered < expected {
        let first = all
            .iter()
            .zip(0..)
            .find(|&(&item, index)| item != index)
            .map_or(delivered, |(_, index)| index);
        return Err(AuditError::Missing {
            missing: expected - delivered,
            expected,
            first,
        });
    }

    let by_owner = owned.len() as u64;
    Ok(AuditSummary {
        delivered,
        by_owner,
        by_stealers: delivered - by_owner,
    })
}
