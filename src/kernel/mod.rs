//! L-ensemble kernel assembly

pub mod assembly;

pub use self::assembly::*;
