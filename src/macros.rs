/// Implements [`crate::Interface`] for one or more types, using the stringified type as its name.
///
/// # Examples
/// ```rust
/// trait Logger: Send + Sync {
///     fn log(&self, message: &str);
/// }
///
/// trait Shape {}
///
/// struct Settings;
///
/// beans::declare_interface!(dyn Logger, dyn Shape, Settings);
/// ```
#[macro_export]
macro_rules! declare_interface {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Interface for $ty {
                const NAME: &'static str = stringify!($ty);
            }
        )+
    };
}

/// Implements [`crate::Component`] for a type and each listed interface.
///
/// # Syntax
/// ```text
/// declare_component!(Component => Interface1 [, Interface2 ...])
/// ```
///
/// # Examples
/// ```rust
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// trait Named {
///     fn name(&self) -> &str;
/// }
///
/// #[derive(Default)]
/// struct Square {
///     side: f64,
/// }
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.side * self.side
///     }
/// }
///
/// impl Named for Square {
///     fn name(&self) -> &str {
///         "square"
///     }
/// }
///
/// beans::declare_interface!(dyn Shape, dyn Named);
/// beans::declare_component!(Square => dyn Shape, dyn Named);
/// ```
#[macro_export]
macro_rules! declare_component {
    ($component:ty => $($interface:ty),+ $(,)?) => {
        $(
            impl $crate::Component<$interface> for $component {
                #[inline]
                fn into_interface(
                    self: $crate::macros_utils::Box<Self>,
                ) -> $crate::macros_utils::Box<$interface> {
                    self
                }
            }
        )+
    };
}
