#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// elementwise image arithmetic module.
pub mod core;

/// image filtering module.
pub mod filter;

/// image gradient features module.
pub mod gradient;

/// operations to normalize images.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;
