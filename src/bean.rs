use alloc::{boxed::Box, sync::Arc};
use core::{
    fmt::{self, Debug, Formatter},
    ops::Deref,
};

use crate::{
    errors::ResolveErrorKind,
    global::global,
    interface::{Interface, InterfaceId},
    registry::{Ownership, Producer},
};

/// A resolved implementation.
pub enum Instance<I: ?Sized> {
    /// Constructed for this resolution and dropped with it.
    Owned(Box<I>),
    /// The registered instance itself, shared with the registrant.
    Borrowed(Arc<I>),
}

impl<I: ?Sized> Instance<I> {
    #[inline]
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        match self {
            Instance::Owned(_) => Ownership::Owned,
            Instance::Borrowed(_) => Ownership::Borrowed,
        }
    }
}

impl<I: ?Sized> Deref for Instance<I> {
    type Target = I;

    #[inline]
    fn deref(&self) -> &I {
        match self {
            Instance::Owned(instance) => instance,
            Instance::Borrowed(instance) => instance,
        }
    }
}

/// Handle to the implementation of `I` that was effective when the handle was created.
///
/// The binding is resolved exactly once, in the constructor; later registrations or scope changes
/// don't affect an existing handle. Use it as a field to let the surrounding scope decide the implementation:
/// ```rust
/// use beans::{Bean, ResolveErrorKind};
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// beans::declare_interface!(dyn Clock);
///
/// struct Scheduler {
///     clock: Bean<dyn Clock>,
/// }
///
/// impl Scheduler {
///     fn new() -> Result<Self, ResolveErrorKind> {
///         Ok(Self { clock: Bean::new()? })
///     }
/// }
/// ```
pub struct Bean<I: ?Sized> {
    instance: Instance<I>,
}

impl<I: Interface + ?Sized> Bean<I> {
    /// Resolves the default binding of `I` from the global container.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
    #[inline]
    pub fn new() -> Result<Self, ResolveErrorKind> {
        global().resolve()
    }

    /// Resolves the binding of `I` for `tag` from the global container.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
    #[inline]
    pub fn with_tag(tag: &str) -> Result<Self, ResolveErrorKind> {
        global().resolve_with_tag(tag)
    }
}

impl<I: ?Sized + 'static> Bean<I> {
    pub(crate) fn produce(producer: &Producer) -> Self {
        let instance = match producer {
            Producer::Construct(constructor) => Instance::Owned(
                *constructor()
                    .downcast::<Box<I>>()
                    .expect("Constructor keyed by `TypeId` yields another type"),
            ),
            Producer::Share(instance) => Instance::Borrowed(
                instance
                    .downcast_ref::<Arc<I>>()
                    .expect("Shared instance keyed by `TypeId` has another type")
                    .clone(),
            ),
        };
        Self { instance }
    }
}

impl<I: ?Sized> Bean<I> {
    #[inline]
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        self.instance.ownership()
    }

    #[inline]
    #[must_use]
    pub fn into_instance(self) -> Instance<I> {
        self.instance
    }
}

impl<I: ?Sized> Deref for Bean<I> {
    type Target = I;

    #[inline]
    fn deref(&self) -> &I {
        &self.instance
    }
}

impl<I: ?Sized> AsRef<I> for Bean<I> {
    #[inline]
    fn as_ref(&self) -> &I {
        &self.instance
    }
}

impl<I: Interface + ?Sized> Debug for Bean<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("interface", &InterfaceId::of::<I>().name)
            .field("ownership", &self.ownership())
            .finish()
    }
}
