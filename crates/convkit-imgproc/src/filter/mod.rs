//! Filter operations
//!
//! This module provides the kernel factory and the spatial filters built on it.

/// Filter kernels
pub mod kernels;

/// Spatial convolution
mod convolution;
pub use convolution::*;

/// Edge preserving smoothing
mod bilateral;
pub use bilateral::*;
