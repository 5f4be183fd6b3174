use alloc::vec::Vec;
use core::mem;
use tracing::{debug, warn};

use crate::{
    interface::InterfaceId,
    lock::ChainGuard,
    registry::{Binding, Registry},
    Container,
};

/// The root registry and the stack of nested ones above it.
/// The last nested registry is the innermost one.
pub(crate) struct ScopeChain {
    root: Registry,
    nested: Vec<Registry>,
}

impl ScopeChain {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            root: Registry::new(),
            nested: Vec::new(),
        }
    }

    /// Number of nested scopes above the root.
    #[inline]
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.nested.len()
    }

    #[inline]
    #[must_use]
    pub(crate) fn innermost_mut(&mut self) -> &mut Registry {
        self.nested.last_mut().unwrap_or(&mut self.root)
    }

    /// Pushes an empty registry and returns the new depth.
    #[inline]
    pub(crate) fn push(&mut self) -> usize {
        self.nested.push(Registry::new());
        self.nested.len()
    }

    /// Pops the innermost nested registry. The root is never popped.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<Registry> {
        self.nested.pop()
    }

    /// Replaces the chain with an empty one and returns the previous contents.
    #[inline]
    #[must_use]
    pub(crate) fn take(&mut self) -> ScopeChain {
        mem::replace(self, ScopeChain::new())
    }

    /// Walks from the innermost registry to the root and returns the first match.
    #[must_use]
    pub(crate) fn find_effective(&self, interface: &InterfaceId, tag: &str) -> Option<&Binding> {
        self.nested
            .iter()
            .rev()
            .chain(core::iter::once(&self.root))
            .find_map(|registry| registry.find_local(interface, tag))
    }

    /// Per registry, root first: interfaces with the tags of their bindings.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn layout(&self) -> Vec<Vec<(InterfaceId, Vec<alloc::string::String>)>> {
        core::iter::once(&self.root)
            .chain(self.nested.iter())
            .map(Registry::layout)
            .collect()
    }
}

/// An override scope, created with [`Container::enter_scope`].
///
/// Bindings registered while the guard is active go to its registry and shadow the ones of enclosing scopes.
/// The guard holds the container lock until [`ScopeGuard::leave`], [`ScopeGuard::unlock`] or drop,
/// so other threads can't observe or change the chain in between.
///
/// # Warning
/// Guards must be released in reverse order of entry.
/// Leaving always removes the innermost scope, which isn't necessarily the one this guard created,
/// so releasing out of order corrupts the override hierarchy.
#[must_use = "the scope is left as soon as the guard is dropped"]
pub struct ScopeGuard<'a> {
    container: &'a Container,
    lock: Option<ChainGuard<'a>>,
    depth: usize,
    left: bool,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn enter(container: &'a Container) -> Self {
        let lock = container.chain.lock();
        let depth = lock.borrow_mut().push();

        debug!(depth, "Scope entered");

        Self {
            container,
            lock: Some(lock),
            depth,
            left: false,
        }
    }

    /// Depth of the scope this guard created, the root being 0.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` until the guard has left its scope.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.left
    }

    /// Releases the lock early, keeping the scope on the chain until [`Self::leave`] or drop.
    ///
    /// Objects that resolved their beans inside the scope keep them,
    /// but other threads can now register and resolve against the chain, this scope included.
    pub fn unlock(&mut self) {
        if self.lock.take().is_some() {
            debug!(depth = self.depth, "Scope unlocked");
        }
    }

    /// Removes the innermost scope from the chain and releases the lock.
    ///
    /// Only the first call has an effect.
    pub fn leave(&mut self) {
        if self.left {
            return;
        }
        self.left = true;

        // Bindings may own user values, so they're dropped after the chain borrow ends
        let popped = self.container.chain.with_mut(|chain| {
            let depth = chain.depth();
            chain.pop().map(|registry| (depth, registry))
        });

        match &popped {
            Some((depth, registry)) if *depth == self.depth => {
                debug!(depth, bindings = registry.len(), "Scope left");
            }
            Some((depth, registry)) => {
                warn!(depth, bindings = registry.len(), expected_depth = self.depth, "Scope left out of order");
            }
            None => warn!(expected_depth = self.depth, "Scope left with no nested scopes on the chain"),
        }

        drop(popped);
        self.lock = None;
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.leave();
    }
}
