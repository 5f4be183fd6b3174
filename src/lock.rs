use core::cell::RefCell;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::scope::ScopeChain;

/// The lock every registration, resolution and scope change goes through.
///
/// It's re-entrant, so a thread inside a scope or a constructor can resolve and register again.
/// The chain itself is only borrowed for short sections that never call user code.
pub(crate) struct ChainLock {
    inner: ReentrantMutex<RefCell<ScopeChain>>,
}

pub(crate) type ChainGuard<'a> = ReentrantMutexGuard<'a, RefCell<ScopeChain>>;

impl ChainLock {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            inner: parking_lot::const_reentrant_mutex(RefCell::new(ScopeChain::new())),
        }
    }

    #[inline]
    pub(crate) fn lock(&self) -> ChainGuard<'_> {
        self.inner.lock()
    }

    /// Runs `f` with the chain borrowed mutably under the lock.
    #[inline]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut ScopeChain) -> R) -> R {
        let guard = self.lock();
        let mut chain = guard.borrow_mut();
        f(&mut chain)
    }

    /// Runs `f` with the chain borrowed under the lock.
    #[inline]
    pub(crate) fn with<R>(&self, f: impl FnOnce(&ScopeChain) -> R) -> R {
        let guard = self.lock();
        let chain = guard.borrow();
        f(&chain)
    }
}
