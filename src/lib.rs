//! Arbitrary-precision special-relativity calculator.
//!
//! The workspace is split into a precision/constants core, a decimal
//! formatter, the kinematics formulas, and the rocket estimators. This
//! facade re-exports all of them so front-ends depend on one crate.

pub use rel_core;
pub use rel_format;
pub use rel_kinematics;
pub use rel_propulsion;

pub use rel_core::{DEFAULT_DECIMAL_DIGITS, RelativityContext};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
