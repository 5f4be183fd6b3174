//! The process-wide container and free functions operating on it.

use alloc::{boxed::Box, sync::Arc};

use crate::{
    bean::Bean,
    container::Container,
    errors::ResolveErrorKind,
    interface::{Component, Interface},
    scope::ScopeGuard,
};

// Lives for the whole process; its root scope is never removed.
static GLOBAL_CONTAINER: Container = Container::new();

/// Provides a reference to the global container.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "Hello!".to_owned()
///     }
/// }
///
/// beans::declare_interface!(dyn Greeter);
///
/// let scope = beans::enter_scope();
/// beans::global().register_instance::<dyn Greeter>(Arc::new(English));
///
/// let greeter = beans::resolve::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "Hello!");
/// drop(scope);
/// ```
#[inline]
#[must_use]
pub fn global() -> &'static Container {
    &GLOBAL_CONTAINER
}

/// See [`Container::register_implementation`].
#[inline]
pub fn register_implementation<I, C>()
where
    I: Interface + ?Sized,
    C: Component<I> + Default,
{
    global().register_implementation::<I, C>();
}

/// See [`Container::register_implementation_with_tag`].
#[inline]
pub fn register_implementation_with_tag<I, C>(tag: &str)
where
    I: Interface + ?Sized,
    C: Component<I> + Default,
{
    global().register_implementation_with_tag::<I, C>(tag);
}

/// See [`Container::register_factory`].
#[inline]
pub fn register_factory<I, F>(factory: F)
where
    I: Interface + ?Sized,
    F: Fn() -> Box<I> + Send + Sync + 'static,
{
    global().register_factory::<I, F>(factory);
}

/// See [`Container::register_factory_with_tag`].
#[inline]
pub fn register_factory_with_tag<I, F>(tag: &str, factory: F)
where
    I: Interface + ?Sized,
    F: Fn() -> Box<I> + Send + Sync + 'static,
{
    global().register_factory_with_tag::<I, F>(tag, factory);
}

/// See [`Container::register_instance`].
#[inline]
pub fn register_instance<I>(instance: Arc<I>)
where
    I: Interface + Send + Sync + ?Sized,
{
    global().register_instance::<I>(instance);
}

/// See [`Container::register_instance_with_tag`].
#[inline]
pub fn register_instance_with_tag<I>(tag: &str, instance: Arc<I>)
where
    I: Interface + Send + Sync + ?Sized,
{
    global().register_instance_with_tag::<I>(tag, instance);
}

/// See [`Container::resolve`].
///
/// # Errors
/// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
#[inline]
pub fn resolve<I: Interface + ?Sized>() -> Result<Bean<I>, ResolveErrorKind> {
    global().resolve::<I>()
}

/// See [`Container::resolve_with_tag`].
///
/// # Errors
/// Returns [`ResolveErrorKind::InterfaceNotRegistered`] if no active scope binds `I`.
#[inline]
pub fn resolve_with_tag<I: Interface + ?Sized>(tag: &str) -> Result<Bean<I>, ResolveErrorKind> {
    global().resolve_with_tag::<I>(tag)
}

/// See [`Container::enter_scope`].
#[inline]
pub fn enter_scope() -> ScopeGuard<'static> {
    global().enter_scope()
}
