use alloc::boxed::Box;
use core::{
    any::TypeId,
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

/// An abstract capability that implementations can be bound to.
///
/// Usually implemented for trait objects with [`crate::declare_interface`]:
/// ```rust
/// trait Shape: Send + Sync {
///     fn area(&self) -> f64;
/// }
///
/// beans::declare_interface!(dyn Shape);
/// ```
pub trait Interface: 'static {
    /// Label used in diagnostics. The key itself is the type's [`TypeId`].
    const NAME: &'static str;

    #[inline]
    #[must_use]
    fn interface_id() -> InterfaceId {
        InterfaceId::of::<Self>()
    }
}

/// A concrete type that can be turned into the interface `I`.
///
/// Implemented with [`crate::declare_component`] for trait objects.
/// Every sized type is a component of itself.
pub trait Component<I: ?Sized>: 'static {
    fn into_interface(self: Box<Self>) -> Box<I>;
}

impl<T: 'static> Component<T> for T {
    #[inline]
    fn into_interface(self: Box<Self>) -> Box<T> {
        self
    }
}

/// Stable identity of an [`Interface`].
#[derive(Debug, Clone, Copy)]
pub struct InterfaceId {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for InterfaceId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InterfaceId {}

impl PartialOrd for InterfaceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InterfaceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl InterfaceId {
    #[inline]
    #[must_use]
    pub fn of<I>() -> Self
    where
        I: Interface + ?Sized,
    {
        Self {
            name: I::NAME,
            id: TypeId::of::<I>(),
        }
    }
}

impl Display for InterfaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
