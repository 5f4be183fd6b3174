use alloc::string::String;
use core::fmt::{self, Display, Formatter};

use crate::interface::InterfaceId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// No scope in the active chain has a binding for the interface.
    InterfaceNotRegistered { interface: InterfaceId, tag: String },
}

impl ResolveErrorKind {
    #[inline]
    #[must_use]
    pub fn interface(&self) -> InterfaceId {
        match self {
            ResolveErrorKind::InterfaceNotRegistered { interface, .. } => *interface,
        }
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            ResolveErrorKind::InterfaceNotRegistered { tag, .. } => tag,
        }
    }
}

impl Display for ResolveErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResolveErrorKind::InterfaceNotRegistered { interface, tag } => {
                write!(f, "Implementation for \"{interface}\" ")?;
                if !tag.is_empty() {
                    write!(f, "with tag \"{tag}\" ")?;
                }
                write!(f, "was not registered")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::ResolveErrorKind;
    use crate::interface::InterfaceId;

    use alloc::string::{String, ToString as _};

    trait Shape {}

    crate::declare_interface!(dyn Shape);

    #[test]
    fn test_display_default_tag() {
        let err = ResolveErrorKind::InterfaceNotRegistered {
            interface: InterfaceId::of::<dyn Shape>(),
            tag: String::new(),
        };
        assert_eq!(err.to_string(), "Implementation for \"dyn Shape\" was not registered");
    }

    #[test]
    fn test_display_with_tag() {
        let err = ResolveErrorKind::InterfaceNotRegistered {
            interface: InterfaceId::of::<dyn Shape>(),
            tag: "metric".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Implementation for \"dyn Shape\" with tag \"metric\" was not registered"
        );
        assert_eq!(err.interface(), InterfaceId::of::<dyn Shape>());
        assert_eq!(err.tag(), "metric");
    }
}
