mod resolve;

pub use resolve::ResolveErrorKind;
