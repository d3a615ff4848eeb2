//! Shared busy flags ("loading", "downloading") released by a guard.

use std::cell::Cell;
use std::rc::Rc;

/// A flag the editor raises while a step is in progress.
///
/// Clones share the same flag, so a UI can keep one to observe the editor.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Rc<Cell<bool>>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a guard is alive.
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Raises the flag until the returned guard is dropped.
    ///
    /// The guard owns a handle to the flag, so it can be stored to keep the
    /// flag raised across calls.
    pub fn acquire(&self) -> BusyGuard {
        self.0.set(true);
        BusyGuard {
            flag: Rc::clone(&self.0),
        }
    }
}

/// Clears its [`BusyFlag`] when dropped, on every exit path.
#[derive(Debug)]
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub struct BusyGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
