mod record;

pub use record::{ErrorCode, ScanError};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Append-only collection of [`ScanError`]s shared by all scan workers.
///
/// Every append takes the lock, so records are never interleaved and a
/// snapshot taken while workers are still running is self-consistent.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Mutex<Vec<ScanError>>,
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, error: ScanError) {
        self.lock().push(error);
    }

    /// Append a batch under a single lock, keeping the batch contiguous.
    pub fn add_all(&self, errors: impl IntoIterator<Item = ScanError>) {
        let mut guard = self.lock();
        guard.extend(errors);
    }

    /// Snapshot of the records collected so far, in append order.
    #[must_use]
    pub fn get(&self) -> Vec<ScanError> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consume the collector once no workers hold a reference any more.
    #[must_use]
    pub fn into_errors(self) -> Vec<ScanError> {
        self.errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A worker that panicked mid-append cannot leave a partial record behind,
    // so a poisoned lock still guards a valid vector.
    fn lock(&self) -> MutexGuard<'_, Vec<ScanError>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
