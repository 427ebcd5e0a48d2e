//! # Cancellation
//!
//! Cooperative, all-or-nothing cancellation. Long-running steps (directory walks)
//! poll the token between files and fail with [`GenerateError::Cancelled`]; a
//! cancelled generation never returns a partial resource list.

use crate::error::{GenerateError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
///
/// Clones observe the same flag, so the host keeps one clone and hands another
/// to the generator.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with `Cancelled` once cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }
        Ok(())
    }
}
