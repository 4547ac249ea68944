//! Geometric feature extraction for transmitter/receiver pairs

pub mod distance;
pub mod extract;
pub mod mode;

pub use self::distance::*;
pub use self::extract::*;
pub use self::mode::*;
