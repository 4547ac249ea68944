//! Power quality function
//!
//! The power quality is defined as: q(v) = |v|^p
//! where v is the parameter·feature value of a pair.

use crate::core::QualityFunction;

/// Power quality function: q(v) = |v|^p
///
/// This is the default quality model. For p >= 2 the function is convex and
/// smooth at the origin, which keeps the L-ensemble in a family that fitting
/// routines can optimise reliably. Smaller exponents (and alternatives such
/// as exp(v)) are not accepted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerQuality {
    power: f64,
}

impl PowerQuality {
    /// Minimum accepted exponent
    pub const MIN_POWER: f64 = 2.0;

    /// Create a power quality with the given exponent
    ///
    /// # Panics
    /// Panics if `power` is below 2 or not finite
    pub fn new(power: f64) -> Self {
        assert!(
            power.is_finite() && power >= Self::MIN_POWER,
            "Power must be at least 2, got: {}",
            power
        );
        Self { power }
    }

    /// Squared magnitude, q(v) = |v|^2
    pub fn squared() -> Self {
        Self::new(2.0)
    }

    /// Get the exponent
    pub fn power(&self) -> f64 {
        self.power
    }
}

impl Default for PowerQuality {
    /// Default power quality with p = 2
    fn default() -> Self {
        Self::squared()
    }
}

impl QualityFunction for PowerQuality {
    fn quality(&self, value: f64) -> f64 {
        if self.power == 2.0 {
            value * value
        } else {
            value.abs().powf(self.power)
        }
    }
}
