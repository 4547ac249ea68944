//! L-ensemble kernels for DPP-based scheduling of transmitter/receiver pairs
//!
//! Each pair gets a quality from its fitted parameters and nearest-neighbour
//! geometry; the qualities scale a similarity matrix into the kernel of a
//! determinantal point process.

pub mod api;
pub mod core;
pub mod feature;
pub mod kernel;
pub mod persistence;
pub mod quality;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{build_pair_kernel, PairKernel, PairKernelBuilder};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{DppError, Result};
pub use crate::feature::FeatureMode;
pub use crate::kernel::assemble_kernel;
pub use crate::quality::PowerQuality;
pub use crate::utils::KernelStats;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
