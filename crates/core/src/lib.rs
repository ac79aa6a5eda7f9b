//! Precision context and physical constants shared across the Relativity Calculator workspace.
//!
//! Every arbitrary-precision calculation in the workspace runs through a
//! [`RelativityContext`]: it owns the astro-float evaluation context, the
//! decimal digit budget, and the physical constants rebuilt at that budget.
//! Callers construct one context at startup and pass it explicitly, so the
//! precision in play is visible at every call site and tests can run several
//! budgets side by side.

use astro_float::ctx::Context;
use astro_float::{BigFloat, Consts, RoundingMode};
use thiserror::Error;

/// Rounding mode applied to every engine operation.
pub const ROUNDING: RoundingMode = RoundingMode::ToEven;

/// Decimal digit budget used when callers do not configure one explicitly.
pub const DEFAULT_DECIMAL_DIGITS: usize = 150;

// log2(10); decimal digits are converted to mantissa bits with this factor.
const BITS_PER_DECIMAL_DIGIT: f64 = 3.321_928_094_887_362;
// Extra mantissa bits so intermediate results do not erode the last decimal digits.
const GUARD_BITS: usize = 64;

/// Errors raised while building a context or converting values into it.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The precision budget must be at least one decimal digit.
    #[error("precision must be at least one decimal digit")]
    InvalidPrecision,
    /// The engine's constants cache could not be allocated.
    #[error("failed to initialise the constants cache")]
    ConstantsCache,
    /// A decimal literal could not be parsed.
    #[error("not a valid decimal literal: {0:?}")]
    Parse(String),
}

/// Physical and numeric constants rebuilt at the configured precision.
///
/// Fields are public so formula crates can borrow a constant and the
/// evaluation context from the same [`RelativityContext`] simultaneously.
#[derive(Debug)]
pub struct Constants {
    /// Speed of light in vacuum (m/s).
    pub c: BigFloat,
    /// Speed of light squared (m²/s²).
    pub c_squared: BigFloat,
    /// Standard gravity (m/s²).
    pub g: BigFloat,
    /// Metres in one light year.
    pub light_year: BigFloat,
    /// Metres in one astronomical unit.
    pub au: BigFloat,
    /// Seconds in one Julian year (365.25 days).
    pub seconds_per_year: BigFloat,
    /// Exact zero at the configured precision.
    pub zero: BigFloat,
    /// Exact one half at the configured precision.
    pub half: BigFloat,
    /// Exact one at the configured precision.
    pub one: BigFloat,
}

/// Process-wide precision state plus the engine it configures.
///
/// Holds the single source of truth for "how many decimal digits are in
/// play". Building a new context replaces the budget wholesale; there is no
/// ambient global to drift out of sync with the constants.
pub struct RelativityContext {
    /// Evaluation context for the `expr!` macro. Mutable access is required
    /// by the engine's constants cache, so formula layers take `&mut self`.
    pub ctx: Context,
    /// Constants rebuilt at the configured precision.
    pub constants: Constants,
    decimal_digits: usize,
    precision_bits: usize,
}

impl RelativityContext {
    /// Build a context with the given decimal digit budget.
    ///
    /// All constants and every subsequent calculation routed through this
    /// context carry `decimal_digits` digits of working precision.
    pub fn new(decimal_digits: usize) -> Result<Self, ContextError> {
        if decimal_digits == 0 {
            return Err(ContextError::InvalidPrecision);
        }
        #[allow(clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        #[allow(clippy::cast_precision_loss)]
        let precision_bits =
            (decimal_digits as f64 * BITS_PER_DECIMAL_DIGIT).ceil() as usize + GUARD_BITS;
        let cache = Consts::new().map_err(|_| ContextError::ConstantsCache)?;

        let p = precision_bits;
        let c = BigFloat::from_u32(299_792_458, p);
        let one = BigFloat::from_u32(1, p);
        let two = BigFloat::from_u32(2, p);

        let constants = Constants {
            c_squared: c.powi(2, p, ROUNDING),
            // 9.80665 m/s² expressed as an exact ratio; a decimal literal
            // parsed at low precision would poison downstream digits.
            g: BigFloat::from_u32(980_665, p).div(&BigFloat::from_u32(100_000, p), p, ROUNDING),
            light_year: BigFloat::from_u64(9_460_730_472_580_800, p),
            au: BigFloat::from_u64(149_597_870_700, p),
            seconds_per_year: BigFloat::from_u32(31_557_600, p),
            zero: BigFloat::from_u32(0, p),
            half: one.div(&two, p, ROUNDING),
            one,
            c,
        };

        Ok(Self {
            ctx: Context::new(p, ROUNDING, cache, i32::MIN, i32::MAX),
            constants,
            decimal_digits,
            precision_bits,
        })
    }

    /// Decimal digit budget this context was configured with.
    #[inline]
    pub fn decimal_digits(&self) -> usize {
        self.decimal_digits
    }

    /// Mantissa precision in bits handed to the engine.
    #[inline]
    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Lift an unsigned integer into the context's precision.
    #[inline]
    pub fn from_u64(&self, n: u64) -> BigFloat {
        BigFloat::from_u64(n, self.precision_bits)
    }

    /// Lift a signed integer into the context's precision.
    #[inline]
    pub fn from_i64(&self, n: i64) -> BigFloat {
        BigFloat::from_i64(n, self.precision_bits)
    }

    /// Lift a hardware float into the context's precision.
    ///
    /// The binary value of `n` is preserved exactly, including any decimal
    /// error the `f64` already carried. Prefer [`RelativityContext::parse`]
    /// for user-supplied decimal input.
    #[inline]
    pub fn from_f64(&self, n: f64) -> BigFloat {
        BigFloat::from_f64(n, self.precision_bits)
    }

    /// Exact ratio of two integers at the context's precision.
    #[inline]
    pub fn from_ratio(&self, numerator: u64, denominator: u64) -> BigFloat {
        self.from_u64(numerator)
            .div(&self.from_u64(denominator), self.precision_bits, ROUNDING)
    }

    /// Parse a decimal literal at the context's precision.
    ///
    /// Accepts an optional sign, an integer part, an optional fractional
    /// part, and an optional `e`/`E` power-of-ten exponent. The digits are
    /// accumulated as exact integers and scaled by a power of ten computed at
    /// full working precision, so `parse("0.1")` is accurate to the full
    /// digit budget rather than to the literal's length.
    pub fn parse(&self, literal: &str) -> Result<BigFloat, ContextError> {
        let p = self.precision_bits;
        let bad = || ContextError::Parse(literal.to_string());

        let trimmed = literal.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa_part, exponent_part) = match body.split_once(['e', 'E']) {
            Some((m, e)) => (m, Some(e)),
            None => (body, None),
        };
        let mut exponent: i64 = match exponent_part {
            Some(e) => e.parse().map_err(|_| bad())?,
            None => 0,
        };

        let (int_part, frac_part) = match mantissa_part.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa_part, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(bad());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(bad());
        }
        exponent -= frac_part.len() as i64;

        // Accumulate the digit string exactly, in chunks that fit a u64.
        let digits: String = int_part.chars().chain(frac_part.chars()).collect();
        let mut acc = BigFloat::from_u32(0, p);
        for chunk in digits.as_bytes().chunks(18) {
            let chunk = std::str::from_utf8(chunk).map_err(|_| bad())?;
            let chunk_value: u64 = chunk.parse().map_err(|_| bad())?;
            let shift = BigFloat::from_u64(10u64.pow(chunk.len() as u32), p);
            acc = acc
                .mul(&shift, p, ROUNDING)
                .add(&BigFloat::from_u64(chunk_value, p), p, ROUNDING);
        }

        if exponent != 0 {
            let scale = BigFloat::from_u32(10, p).powi(exponent.unsigned_abs() as usize, p, ROUNDING);
            acc = if exponent > 0 {
                acc.mul(&scale, p, ROUNDING)
            } else {
                acc.div(&scale, p, ROUNDING)
            };
        }

        Ok(if negative { acc.neg() } else { acc })
    }

    /// Convert metres into light years.
    pub fn metres_to_light_years(&self, metres: &BigFloat) -> BigFloat {
        metres.div(&self.constants.light_year, self.precision_bits, ROUNDING)
    }

    /// Convert light years into metres.
    pub fn light_years_to_metres(&self, light_years: &BigFloat) -> BigFloat {
        light_years.mul(&self.constants.light_year, self.precision_bits, ROUNDING)
    }

    /// Convert seconds into Julian years.
    pub fn seconds_to_years(&self, seconds: &BigFloat) -> BigFloat {
        seconds.div(&self.constants.seconds_per_year, self.precision_bits, ROUNDING)
    }

    /// Convert Julian years into seconds.
    pub fn years_to_seconds(&self, years: &BigFloat) -> BigFloat {
        years.mul(&self.constants.seconds_per_year, self.precision_bits, ROUNDING)
    }

    /// Express a velocity (m/s) as a fraction of the speed of light.
    pub fn velocity_as_fraction_of_c(&self, velocity: &BigFloat) -> BigFloat {
        velocity.div(&self.constants.c, self.precision_bits, ROUNDING)
    }
}

impl Default for RelativityContext {
    /// Context at the documented default budget of 150 decimal digits.
    fn default() -> Self {
        RelativityContext::new(DEFAULT_DECIMAL_DIGITS)
            .unwrap_or_else(|_| unreachable!("default precision is positive"))
    }
}

/// True when `value` is NaN or an infinity.
///
/// The engine reports upstream failures (division by zero, domain errors)
/// as non-finite values; callers use this to turn them into errors before
/// a physically meaningless number reaches a display.
#[inline]
pub fn is_non_finite(value: &BigFloat) -> bool {
    value.is_nan() || value.is_inf()
}
