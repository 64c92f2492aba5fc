//! Strand Core
//!
//! Concurrency primitives for the engine job system:
//! - Fixed-capacity work-stealing job queues
//! - Owner/stealer handles that enforce the single-owner contract

pub mod jobs;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
