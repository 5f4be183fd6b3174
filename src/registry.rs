use alloc::{boxed::Box, collections::BTreeMap, string::String, sync::Arc, vec::Vec};
use core::any::Any;

use crate::interface::InterfaceId;

/// How a resolved instance relates to the binding that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// A fresh instance per resolution, owned and dropped by the handle.
    Owned,
    /// The same registered instance for every resolution.
    Borrowed,
}

pub(crate) type BoxedConstructor = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Producer {
    /// Yields a `Box<Box<I>>` on every call.
    Construct(BoxedConstructor),
    /// Holds an `Arc<I>`; resolution clones the pointer.
    Share(Arc<dyn Any + Send + Sync>),
}

#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) tag: String,
    pub(crate) producer: Producer,
}

impl Binding {
    #[inline]
    #[must_use]
    pub(crate) fn owned<I, F>(tag: String, constructor: F) -> Self
    where
        I: ?Sized + 'static,
        F: Fn() -> Box<I> + Send + Sync + 'static,
    {
        Self {
            tag,
            producer: Producer::Construct(Arc::new(move || Box::new(constructor()) as Box<dyn Any>)),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn borrowed<I>(tag: String, instance: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        Self {
            tag,
            producer: Producer::Share(Arc::new(instance)),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn ownership(&self) -> Ownership {
        match self.producer {
            Producer::Construct(_) => Ownership::Owned,
            Producer::Share(_) => Ownership::Borrowed,
        }
    }

    #[inline]
    #[must_use]
    fn is_default(&self) -> bool {
        self.tag.is_empty()
    }
}

/// Bindings of a single scope.
#[derive(Default)]
pub(crate) struct Registry {
    bindings: BTreeMap<InterfaceId, Vec<Binding>>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { bindings: BTreeMap::new() }
    }

    /// Appends the binding; earlier bindings for the interface stay in place.
    pub(crate) fn register(&mut self, interface: InterfaceId, binding: Binding) {
        self.bindings.entry(interface).or_default().push(binding);
    }

    /// Looks up a binding in this registry only, latest registration first.
    ///
    /// A default (empty) tag only matches default bindings.
    /// Any other tag matches that tag, then the default tag, then any tag.
    #[must_use]
    pub(crate) fn find_local(&self, interface: &InterfaceId, tag: &str) -> Option<&Binding> {
        let bindings = self.bindings.get(interface)?;
        let latest_default = || bindings.iter().rev().find(|binding| binding.is_default());

        if tag.is_empty() {
            return latest_default();
        }

        bindings
            .iter()
            .rev()
            .find(|binding| binding.tag == tag)
            .or_else(latest_default)
            .or_else(|| bindings.last())
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.bindings.values().map(Vec::len).sum()
    }

    /// Interfaces with the tags of their bindings, in registration order.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn layout(&self) -> Vec<(InterfaceId, Vec<String>)> {
        self.bindings
            .iter()
            .map(|(interface, bindings)| (*interface, bindings.iter().map(|binding| binding.tag.clone()).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Binding, Ownership, Producer, Registry};
    use crate::interface::InterfaceId;

    use alloc::{
        boxed::Box,
        string::{String, ToString as _},
        sync::Arc,
    };

    trait Shape {}
    trait Logger {}

    crate::declare_interface!(dyn Shape, dyn Logger, u8);

    fn binding(tag: &str, value: u8) -> Binding {
        Binding::owned(tag.to_string(), move || Box::new(value))
    }

    fn produced(binding: Option<&Binding>) -> Option<u8> {
        match &binding?.producer {
            Producer::Construct(constructor) => Some(**constructor().downcast::<Box<u8>>().unwrap()),
            Producer::Share(_) => None,
        }
    }

    #[test]
    fn test_find_local_unknown_interface() {
        let mut registry = Registry::new();
        registry.register(InterfaceId::of::<u8>(), binding("", 1));

        assert!(registry.find_local(&InterfaceId::of::<dyn Shape>(), "").is_none());
        assert!(registry.find_local(&InterfaceId::of::<dyn Shape>(), "metric").is_none());
    }

    #[test]
    fn test_find_local_latest_default_wins() {
        let mut registry = Registry::new();
        let interface = InterfaceId::of::<u8>();
        registry.register(interface, binding("", 1));
        registry.register(interface, binding("metric", 2));
        registry.register(interface, binding("", 3));
        registry.register(interface, binding("imperial", 4));

        assert_eq!(produced(registry.find_local(&interface, "")), Some(3));
    }

    #[test]
    fn test_find_local_default_ignores_tagged() {
        let mut registry = Registry::new();
        let interface = InterfaceId::of::<u8>();
        registry.register(interface, binding("metric", 1));

        assert!(registry.find_local(&interface, "").is_none());
    }

    #[test]
    fn test_find_local_tag_fallbacks() {
        let mut registry = Registry::new();
        let interface = InterfaceId::of::<u8>();

        registry.register(interface, binding("imperial", 1));
        // Only another tag: any-tag fallback
        assert_eq!(produced(registry.find_local(&interface, "metric")), Some(1));

        registry.register(interface, binding("", 2));
        registry.register(interface, binding("imperial", 3));
        // Default beats other tags
        assert_eq!(produced(registry.find_local(&interface, "metric")), Some(2));

        registry.register(interface, binding("metric", 4));
        registry.register(interface, binding("metric", 5));
        registry.register(interface, binding("", 6));
        // Exact tag beats default, latest exact wins
        assert_eq!(produced(registry.find_local(&interface, "metric")), Some(5));
        assert_eq!(produced(registry.find_local(&interface, "imperial")), Some(3));
        assert_eq!(produced(registry.find_local(&interface, "")), Some(6));
    }

    #[test]
    fn test_any_tag_fallback_is_latest() {
        let mut registry = Registry::new();
        let interface = InterfaceId::of::<u8>();
        registry.register(interface, binding("imperial", 1));
        registry.register(interface, binding("nautical", 2));

        assert_eq!(produced(registry.find_local(&interface, "metric")), Some(2));
    }

    #[test]
    fn test_ownership() {
        let owned = binding("", 1);
        let borrowed = Binding::borrowed(String::new(), Arc::new(1u8));

        assert_eq!(owned.ownership(), Ownership::Owned);
        assert_eq!(borrowed.ownership(), Ownership::Borrowed);
    }

    #[test]
    fn test_len_layout() {
        let mut registry = Registry::new();
        assert_eq!(registry.len(), 0);

        registry.register(InterfaceId::of::<u8>(), binding("", 1));
        registry.register(InterfaceId::of::<u8>(), binding("metric", 2));
        registry.register(InterfaceId::of::<dyn Logger>(), Binding::borrowed::<u8>(String::new(), Arc::new(3)));
        assert_eq!(registry.len(), 3);

        let layout = registry.layout();
        let (_, tags) = layout
            .iter()
            .find(|(interface, _)| *interface == InterfaceId::of::<u8>())
            .unwrap();
        assert_eq!(tags, &["".to_string(), "metric".to_string()]);
    }
}
