//! Decimal string formatting for arbitrary-precision values.
//!
//! Values computed at 150 decimal digits are useless to a reader as raw
//! engine output: the `Display` form is scientific notation, the tail of the
//! expansion is binary-conversion noise, and a velocity a hair under c must
//! never be shown as c. This crate turns a [`BigFloat`] into a canonical
//! decimal string: fixed-point always (no `e`), thousands separators,
//! round-half-away-from-zero with full carry propagation, trailing-zero
//! trimming, and an "ignore character" rule that counts significant digits
//! after a run of leading `0`s (tiny values) or `9`s (velocities approaching
//! the speed of light).
//!
//! Rounding that discards non-zero digits is flagged with a ` (r)` suffix.
//! That marker is a correctness signal, not decoration: silently rounding a
//! sub-light velocity up to c would misrepresent the physics.

use astro_float::BigFloat;
use rel_core::{RelativityContext, is_non_finite};
use thiserror::Error;

/// Suffix appended when requested rounding discarded non-zero digits.
pub const ROUNDING_SUFFIX: &str = " (r)";

/// Errors raised by the formatting entry points.
#[derive(Debug, Error)]
pub enum FormatError {
    /// NaN or infinity reached the formatter. A non-finite value here means
    /// upstream validation failed; it is surfaced instead of masked as text.
    #[error("cannot format a non-finite value")]
    NonFinite,
    /// The ignore character must be a single ASCII digit.
    #[error("ignore character must be a decimal digit, got {0:?}")]
    InvalidIgnoreChar(char),
    /// The engine produced a string the expander does not recognise.
    #[error("unexpected engine output: {0:?}")]
    Malformed(String),
}

/// Options for [`format_significant`].
#[derive(Debug, Clone)]
pub struct SignificantFormat {
    /// Leading fractional digits equal to this character are treated as a
    /// non-significant prefix. `'0'` for ordinary small values; `'9'` lets a
    /// velocity such as 0.999999999912c report the digits after the 9s.
    pub ignore_char: char,
    /// Number of fractional digits retained after the ignored prefix.
    pub significant_places: usize,
    /// Append [`ROUNDING_SUFFIX`] when rounding discarded non-zero digits.
    pub show_rounding_indicator: bool,
}

impl Default for SignificantFormat {
    fn default() -> Self {
        Self {
            ignore_char: '0',
            significant_places: 2,
            show_rounding_indicator: true,
        }
    }
}

impl SignificantFormat {
    /// Options with the given retained digit count and the remaining defaults.
    pub fn places(significant_places: usize) -> Self {
        Self {
            significant_places,
            ..Self::default()
        }
    }

    /// Options with an explicit ignore character.
    pub fn with_ignore_char(significant_places: usize, ignore_char: char) -> Self {
        Self {
            ignore_char,
            significant_places,
            ..Self::default()
        }
    }
}

/// Format `value` keeping `significant_places` fractional digits after the
/// ignored prefix.
///
/// The output never uses scientific notation, groups the integer part with
/// commas, trims spurious trailing zeros, and normalises exact zero to `"0"`
/// regardless of input sign. Digits beyond the context's configured decimal
/// budget are binary-to-decimal conversion artifacts; they are rounded away
/// before any formatting decision and never trigger the rounding indicator.
pub fn format_significant(
    ctx: &RelativityContext,
    value: &BigFloat,
    options: &SignificantFormat,
) -> Result<String, FormatError> {
    if is_non_finite(value) {
        return Err(FormatError::NonFinite);
    }
    if !options.ignore_char.is_ascii_digit() {
        return Err(FormatError::InvalidIgnoreChar(options.ignore_char));
    }
    // Read the digit budget once; the algorithm must not observe a change
    // of precision mid-run.
    let budget = ctx.decimal_digits();

    let expansion = expand(value)?;
    let (int_digits, frac_digits) = cap_precision(&expansion.int, &expansion.frac, budget);

    let prefix = ignored_prefix_len(&frac_digits, options.ignore_char);
    let retain = prefix + options.significant_places;
    let lost = digits_lost(&frac_digits, retain);

    let (mut int_digits, mut frac_digits) =
        round_at(&int_digits, &frac_digits, int_digits.len() + retain);

    // Rounding may have changed the digits the prefix was scanned over, so
    // the prefix length is re-derived from the rounded fraction and the
    // retained region re-sized to match.
    let ignore_active = options.ignore_char != '0' && prefix > 0;
    if ignore_active {
        let new_prefix = ignored_prefix_len(&frac_digits, options.ignore_char);
        let target = new_prefix + options.significant_places;
        if frac_digits.len() < target {
            let padding = target - frac_digits.len();
            frac_digits.extend(std::iter::repeat_n('0', padding));
        } else if frac_digits.len() > target {
            let rounded = round_at(&int_digits, &frac_digits, int_digits.len() + target);
            int_digits = rounded.0;
            frac_digits = rounded.1;
            frac_digits.truncate(target);
        }
    } else {
        while frac_digits.ends_with('0') {
            frac_digits.pop();
        }
    }

    Ok(assemble(
        expansion.negative,
        &int_digits,
        &frac_digits,
        lost && options.show_rounding_indicator,
    ))
}

/// Format `value` with a fixed number of decimal places.
///
/// The plain sibling of [`format_significant`]: no ignore-prefix logic, and
/// the fractional part is zero-padded to exactly `decimal_places` digits
/// (`"1,234,567.00"` rather than `"1,234,567"`). Shares the expansion,
/// rounding, carry, and grouping machinery.
pub fn format_fixed(
    ctx: &RelativityContext,
    value: &BigFloat,
    decimal_places: usize,
    show_rounding_indicator: bool,
) -> Result<String, FormatError> {
    if is_non_finite(value) {
        return Err(FormatError::NonFinite);
    }
    let budget = ctx.decimal_digits();

    let expansion = expand(value)?;
    let (int_digits, frac_digits) = cap_precision(&expansion.int, &expansion.frac, budget);

    let lost = digits_lost(&frac_digits, decimal_places);
    let (int_digits, mut frac_digits) =
        round_at(&int_digits, &frac_digits, int_digits.len() + decimal_places);
    frac_digits.truncate(decimal_places);
    if frac_digits.len() < decimal_places {
        let padding = decimal_places - frac_digits.len();
        frac_digits.extend(std::iter::repeat_n('0', padding));
    }

    Ok(assemble(
        expansion.negative,
        &int_digits,
        &frac_digits,
        lost && show_rounding_indicator,
    ))
}

/// True when any digit at or beyond the retention point is non-zero.
///
/// This is the whole rounding-indicator policy, kept as a standalone
/// predicate because it is the one place a displayed number could
/// misrepresent physical reality (showing v = c for a sub-light velocity).
pub fn digits_lost(fraction: &str, retained_len: usize) -> bool {
    fraction.len() > retained_len && fraction.as_bytes()[retained_len..].iter().any(|&b| b != b'0')
}

/// Length of the run of leading fractional digits equal to `ignore_char`.
///
/// A single left-to-right scan: counting stops for good at the first digit
/// that differs, so later occurrences of the ignore character count as
/// significant.
pub fn ignored_prefix_len(fraction: &str, ignore_char: char) -> usize {
    fraction.chars().take_while(|&c| c == ignore_char).count()
}

/// Fixed-point digit expansion of a value: sign flag plus pure digit strings
/// for the integer and fractional parts.
struct Expansion {
    negative: bool,
    int: String,
    frac: String,
}

/// Re-expand the engine's scientific-notation rendering into positional
/// digits. Never routes through a hardware float: an `f64` cannot carry 150
/// meaningful digits.
fn expand(value: &BigFloat) -> Result<Expansion, FormatError> {
    let rendered = value.to_string();
    let malformed = || FormatError::Malformed(rendered.clone());

    let negative = rendered.starts_with('-');
    let body = rendered.trim_start_matches('-');
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| malformed())?),
        None => (body, 0i64),
    };
    let (int_raw, frac_raw) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_raw.is_empty() && frac_raw.is_empty() {
        return Err(malformed());
    }
    if !int_raw.bytes().all(|b| b.is_ascii_digit()) || !frac_raw.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    // Shift the decimal point by the exponent over the digit string.
    let digits: String = [int_raw, frac_raw].concat();
    let point = int_raw.len() as i64 + exponent;
    let (mut int, frac) = if point <= 0 {
        let leading_zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{leading_zeros}{digits}"))
    } else if point as usize >= digits.len() {
        let trailing_zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{trailing_zeros}"), String::new())
    } else {
        let (left, right) = digits.split_at(point as usize);
        (left.to_string(), right.to_string())
    };

    while int.len() > 1 && int.starts_with('0') {
        int.remove(0);
    }

    Ok(Expansion {
        negative,
        int,
        frac,
    })
}

/// Round the expansion away from the budget's significant-digit horizon.
///
/// `budget` counts significant digits from the first non-zero digit, the way
/// the precision context defines them. Loss here is silent: what falls away
/// is conversion noise, not information.
fn cap_precision(int: &str, frac: &str, budget: usize) -> (String, String) {
    let first_significant = int.bytes().chain(frac.bytes()).position(|b| b != b'0');
    match first_significant {
        Some(first) => round_at(int, frac, first + budget),
        None => (int.to_string(), frac.to_string()),
    }
}

/// Round the digit string `int ++ frac` to `keep` leading positions,
/// half away from zero, re-normalising the whole number.
///
/// Integer positions beyond `keep` become zeros; fractional positions are
/// dropped. A carry propagates leftward as far as it needs to, growing the
/// integer part when the whole retained region overflows (999.999 kept to
/// five positions becomes 1000.00, not a patched substring).
fn round_at(int: &str, frac: &str, keep: usize) -> (String, String) {
    let total = int.len() + frac.len();
    if keep >= total {
        return (int.to_string(), frac.to_string());
    }

    let mut digits: Vec<u8> = int
        .bytes()
        .chain(frac.bytes())
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int.len();
    let round_up = digits[keep] >= 5;

    if keep < int_len {
        for d in &mut digits[keep..int_len] {
            *d = 0;
        }
        digits.truncate(int_len);
    } else {
        digits.truncate(keep);
    }

    if round_up {
        let mut i = keep.min(digits.len());
        loop {
            if i == 0 {
                digits.insert(0, 1);
                int_len += 1;
                break;
            }
            i -= 1;
            if digits[i] < 9 {
                digits[i] += 1;
                break;
            }
            digits[i] = 0;
        }
    }

    let to_string = |slice: &[u8]| slice.iter().map(|d| (d + b'0') as char).collect::<String>();
    (to_string(&digits[..int_len]), to_string(&digits[int_len..]))
}

/// Insert comma separators every three digits from the right.
fn group_thousands(int: &str) -> String {
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    let mut count = 0;
    for c in int.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    grouped.chars().rev().collect()
}

/// Final string construction: grouping, sign, zero normalisation, indicator.
fn assemble(negative: bool, int: &str, frac: &str, indicate_rounding: bool) -> String {
    let is_zero = int.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');

    let mut output = String::new();
    // Exact zero is "0" whatever the input sign; -0 never escapes.
    if negative && !is_zero {
        output.push('-');
    }
    if is_zero && frac.is_empty() {
        output.push('0');
    } else {
        output.push_str(&group_thousands(int));
    }
    if !frac.is_empty() {
        output.push('.');
        output.push_str(frac);
    }
    if indicate_rounding {
        output.push_str(ROUNDING_SUFFIX);
    }
    output
}
