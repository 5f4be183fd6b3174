use alloc::{borrow::ToOwned as _, boxed::Box, sync::Arc};
use tracing::{debug, error, info_span};

use crate::{
    bean::Bean,
    errors::ResolveErrorKind,
    interface::{Component, Interface, InterfaceId},
    lock::ChainLock,
    registry::Binding,
    scope::{ScopeChain, ScopeGuard},
};

/// Owns a scope chain and serializes every access to it behind one re-entrant lock.
///
/// The process-wide container is available with [`crate::global`]. Independent containers are useful
/// for isolated tests or for separate composition roots.
pub struct Container {
    pub(crate) chain: ChainLock,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates a container with an empty root scope.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { chain: ChainLock::new() }
    }

    /// Binds `I` to `C` in the innermost scope. Each resolution constructs a new `C` with [`Default`].
    #[inline]
    pub fn register_implementation<I, C>(&self)
    where
        I: Interface + ?Sized,
        C: Component<I> + Default,
    {
        self.register_implementation_with_tag::<I, C>("");
    }

    /// Same as [`Self::register_implementation`] for the given tag.
    #[inline]
    pub fn register_implementation_with_tag<I, C>(&self, tag: &str)
    where
        I: Interface + ?Sized,
        C: Component<I> + Default,
    {
        self.add_binding::<I>(Binding::owned::<I, _>(tag.to_owned(), || {
            Component::<I>::into_interface(Box::new(C::default()))
        }));
    }

    /// Binds `I` to a constructor in the innermost scope. Each resolution calls it for a new instance.
    #[inline]
    pub fn register_factory<I, F>(&self, factory: F)
    where
        I: Interface + ?Sized,
        F: Fn() -> Box<I> + Send + Sync + 'static,
    {
        self.register_factory_with_tag::<I, F>("", factory);
    }

    /// Same as [`Self::register_factory`] for the given tag.
    #[inline]
    pub fn register_factory_with_tag<I, F>(&self, tag: &str, factory: F)
    where
        I: Interface + ?Sized,
        F: Fn() -> Box<I> + Send + Sync + 'static,
    {
        self.add_binding::<I>(Binding::owned::<I, F>(tag.to_owned(), factory));
    }

    /// Binds `I` to an existing instance in the innermost scope. Each resolution shares `instance`.
    ///
    /// The container keeps a clone of the [`Arc`] as long as the scope lives,
    /// handles keep their own clone, and neither ever copies the instance.
    /// Its internal mutability, if any, must be synchronized by the caller.
    #[inline]
    pub fn register_instance<I>(&self, instance: Arc<I>)
    where
        I: Interface + Send + Sync + ?Sized,
    {
        self.register_instance_with_tag::<I>("", instance);
    }

    /// Same as [`Self::register_instance`] for the given tag.
    #[inline]
    pub fn register_instance_with_tag<I>(&self, tag: &str, instance: Arc<I>)
    where
        I: Interface + Send + Sync + ?Sized,
    {
        self.add_binding::<I>(Binding::borrowed(tag.to_owned(), instance));
    }

    /// Resolves the default binding of `I`.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
    #[inline]
    pub fn resolve<I: Interface + ?Sized>(&self) -> Result<Bean<I>, ResolveErrorKind> {
        self.resolve_with_tag::<I>("")
    }

    /// Resolves the binding of `I` for `tag`.
    ///
    /// Scopes are searched from the innermost to the root, and the first scope with a match wins.
    /// Within a scope the latest matching registration wins: with an empty tag only untagged bindings match,
    /// otherwise the exact tag is preferred, then an untagged binding, then a binding with any tag.
    ///
    /// Owned bindings are constructed while the lock is held, so their constructors can resolve other beans.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
    pub fn resolve_with_tag<I: Interface + ?Sized>(&self, tag: &str) -> Result<Bean<I>, ResolveErrorKind> {
        let interface = InterfaceId::of::<I>();

        let span = info_span!("resolve", interface = interface.name, tag);
        let _guard = span.enter();

        let lock = self.chain.lock();
        let producer = lock
            .borrow()
            .find_effective(&interface, tag)
            .map(|binding| binding.producer.clone());
        let Some(producer) = producer else {
            let err = ResolveErrorKind::InterfaceNotRegistered {
                interface,
                tag: tag.to_owned(),
            };
            error!("{}", err);
            return Err(err);
        };

        let bean = Bean::<I>::produce(&producer);
        drop(lock);

        debug!(ownership = ?bean.ownership(), "Resolved");
        Ok(bean)
    }

    /// Returns `true` if [`Self::resolve_with_tag`] would find a binding, without producing an instance.
    #[must_use]
    pub fn contains<I: Interface + ?Sized>(&self, tag: &str) -> bool {
        let interface = InterfaceId::of::<I>();
        self.chain.with(|chain| chain.find_effective(&interface, tag).is_some())
    }

    /// Enters a new innermost scope. See [`ScopeGuard`].
    #[inline]
    pub fn enter_scope(&self) -> ScopeGuard<'_> {
        ScopeGuard::enter(self)
    }

    /// Number of active nested scopes.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.chain.with(|chain| chain.depth())
    }

    /// Removes every nested scope and every root binding.
    ///
    /// # Warning
    /// Guards that are still alive keep popping the innermost scope when they leave,
    /// which may be a scope entered after the reset.
    /// With no nested scopes on the chain, leaving does nothing.
    pub fn reset(&self) {
        let previous = self.chain.with_mut(ScopeChain::take);
        debug!(depth = previous.depth(), "Container reset");
    }

    #[cfg(test)]
    pub(crate) fn layout(&self) -> alloc::vec::Vec<alloc::vec::Vec<(InterfaceId, alloc::vec::Vec<alloc::string::String>)>> {
        self.chain.with(|chain| chain.layout())
    }

    fn add_binding<I: Interface + ?Sized>(&self, binding: Binding) {
        let interface = InterfaceId::of::<I>();
        let ownership = binding.ownership();

        self.chain.with_mut(|chain| {
            let depth = chain.depth();
            debug!(interface = interface.name, tag = %binding.tag, ?ownership, depth, "Registered");
            chain.innermost_mut().register(interface, binding);
        });
    }
}
