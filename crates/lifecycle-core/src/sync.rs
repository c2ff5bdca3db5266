//! Store locking.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a store, recovering the data if a previous holder panicked.
///
/// Every store mutation is a single push or field update, so a poisoned
/// store is still consistent.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
