//! Re-exports used by the declaration macros, so they expand the same way in `no_std` crates.

pub use alloc::boxed::Box;
