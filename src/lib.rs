//! An in-process registry binding interfaces to implementations, with scoped overrides.
//!
//! Implementations are registered either as constructors ([`Ownership::Owned`], a fresh instance per
//! resolution) or as existing instances ([`Ownership::Borrowed`], the same instance every time).
//! [`Container::enter_scope`] pushes a scope whose bindings shadow the enclosing ones until the
//! returned [`ScopeGuard`] leaves, which makes swapping an implementation for a test double a one-liner.
//!
//! ```rust
//! trait Shape: Send + Sync {
//!     fn sides(&self) -> u8;
//! }
//!
//! #[derive(Default)]
//! struct Triangle;
//!
//! #[derive(Default)]
//! struct Square;
//!
//! impl Shape for Triangle {
//!     fn sides(&self) -> u8 {
//!         3
//!     }
//! }
//!
//! impl Shape for Square {
//!     fn sides(&self) -> u8 {
//!         4
//!     }
//! }
//!
//! beans::declare_interface!(dyn Shape);
//! beans::declare_component!(Triangle => dyn Shape);
//! beans::declare_component!(Square => dyn Shape);
//!
//! let container = beans::Container::new();
//! container.register_implementation::<dyn Shape, Triangle>();
//! {
//!     let _scope = container.enter_scope();
//!     container.register_implementation::<dyn Shape, Square>();
//!     assert_eq!(container.resolve::<dyn Shape>().unwrap().sides(), 4);
//! }
//! assert_eq!(container.resolve::<dyn Shape>().unwrap().sides(), 3);
//! ```

#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod bean;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod global;
pub(crate) mod interface;
pub(crate) mod lock;
pub(crate) mod registry;
pub(crate) mod scope;

#[doc(hidden)]
pub mod macros_utils;

pub use bean::{Bean, Instance};
pub use container::Container;
pub use errors::ResolveErrorKind;
pub use global::{
    enter_scope, global, register_factory, register_factory_with_tag, register_implementation,
    register_implementation_with_tag, register_instance, register_instance_with_tag, resolve, resolve_with_tag,
};
pub use interface::{Component, Interface, InterfaceId};
pub use registry::Ownership;
pub use scope::ScopeGuard;
