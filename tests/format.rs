use relativity_calculator::RelativityContext;
use relativity_calculator::rel_core::ROUNDING;
use relativity_calculator::rel_format::{
    FormatError, ROUNDING_SUFFIX, SignificantFormat, format_fixed, format_significant,
};

fn ctx() -> RelativityContext {
    RelativityContext::default()
}

fn strip_decorations(s: &str) -> String {
    s.trim_end_matches(ROUNDING_SUFFIX).replace(',', "")
}

#[test]
fn never_scientific_notation_across_magnitudes() {
    let rel = ctx();
    let options = SignificantFormat::places(5);
    for exp in (-150..=150).step_by(10) {
        let value = rel.parse(&format!("1.5e{exp}")).expect("parse");
        let out = format_significant(&rel, &value, &options).expect("format");
        assert!(
            !out.contains("e+") && !out.contains("e-") && !out.contains('E'),
            "scientific notation at 1.5e{exp}: {out}"
        );
    }
}

#[test]
fn output_round_trips_through_parse() {
    let rel = ctx();
    let options = SignificantFormat::places(4);
    for literal in ["12345678.5", "-0.0625", "99999.125", "4.25e40"] {
        let value = rel.parse(literal).expect("parse");
        let out = format_significant(&rel, &value, &options).expect("format");
        let reparsed = rel.parse(&strip_decorations(&out)).expect("reparse");
        let again = format_significant(&rel, &reparsed, &options).expect("format again");
        assert_eq!(
            out.trim_end_matches(ROUNDING_SUFFIX),
            again.trim_end_matches(ROUNDING_SUFFIX),
            "round trip drifted for {literal}"
        );
    }
}

#[test]
fn formatting_clean_input_is_idempotent() {
    let rel = ctx();
    let options = SignificantFormat::places(2);
    let value = rel.parse("123.45").expect("parse");
    let out = format_significant(&rel, &value, &options).expect("format");
    assert_eq!(out, "123.45");
    let reparsed = rel.parse(&out).expect("reparse");
    assert_eq!(
        format_significant(&rel, &reparsed, &options).expect("format"),
        "123.45"
    );
}

#[test]
fn negative_zero_normalises_to_zero() {
    let rel = ctx();
    let value = rel.from_f64(-0.0);
    let out = format_significant(&rel, &value, &SignificantFormat::places(2)).expect("format");
    assert_eq!(out, "0");
}

#[test]
fn rounding_to_zero_drops_the_sign_but_keeps_the_indicator() {
    let rel = ctx();
    let value = rel.parse("-0.4").expect("parse");
    let out = format_significant(&rel, &value, &SignificantFormat::places(0)).expect("format");
    assert_eq!(out, "0 (r)");
}

#[test]
fn carry_propagates_through_the_integer_part() {
    let rel = ctx();
    let value = rel.parse("999.999").expect("parse");
    let out = format_significant(&rel, &value, &SignificantFormat::places(2)).expect("format");
    assert_eq!(out, "1,000 (r)");
}

#[test]
fn ignore_char_keeps_digits_after_the_nines() {
    let rel = ctx();

    // All nines stored: the retained region past them is zeros.
    let value = rel.parse("0.999999999999").expect("parse");
    let options = SignificantFormat::with_ignore_char(5, '9');
    let out = format_significant(&rel, &value, &options).expect("format");
    assert_eq!(out, "0.99999999999900000");

    // Digits after the nines survive, with rounding confined to the end.
    let value = rel.parse("0.9999999999123456").expect("parse");
    let out = format_significant(&rel, &value, &options).expect("format");
    assert_eq!(out, format!("0.999999999912346{ROUNDING_SUFFIX}"));
}

#[test]
fn near_light_speed_velocity_keeps_its_tail() {
    let rel = ctx();
    let value = rel.parse("299792457.9999999999").expect("parse");
    let options = SignificantFormat::with_ignore_char(3, '9');
    let out = format_significant(&rel, &value, &options).expect("format");
    assert_eq!(out, "299,792,457.9999999999000");
}

#[test]
fn indicator_appears_iff_digits_were_discarded() {
    let rel = ctx();
    let options = SignificantFormat::places(2);

    let exact = rel.parse("0.12").expect("parse");
    assert_eq!(
        format_significant(&rel, &exact, &options).expect("format"),
        "0.12"
    );

    let lossy = rel.parse("0.126").expect("parse");
    assert_eq!(
        format_significant(&rel, &lossy, &options).expect("format"),
        format!("0.13{ROUNDING_SUFFIX}")
    );
}

#[test]
fn fifty_digit_integer_grouped_in_threes() {
    let rel = ctx();
    let digits = "12345678901234567890123456789012345678901234567890";
    let value = rel.parse(digits).expect("parse");
    let out = format_significant(&rel, &value, &SignificantFormat::places(0)).expect("format");
    assert!(!out.ends_with(ROUNDING_SUFFIX), "exact value flagged lossy: {out}");
    assert_eq!(out.replace(',', ""), digits);
    let groups: Vec<&str> = out.split(',').collect();
    assert!(groups[0].len() <= 3 && !groups[0].is_empty());
    assert!(groups[1..].iter().all(|g| g.len() == 3), "{out}");
}

#[test]
fn trailing_zeros_trimmed() {
    let rel = ctx();
    let options = SignificantFormat::places(4);
    let value = rel.parse("123.00").expect("parse");
    assert_eq!(
        format_significant(&rel, &value, &options).expect("format"),
        "123"
    );
    let value = rel.parse("123.4500").expect("parse");
    assert_eq!(
        format_significant(&rel, &value, &options).expect("format"),
        "123.45"
    );
}

#[test]
fn googol_expands_in_full() {
    let rel = ctx();
    let value = rel.parse("1e100").expect("parse");
    let out = format_significant(&rel, &value, &SignificantFormat::places(2)).expect("format");
    assert!(!out.contains("e+"), "{out}");
    let expected: String = std::iter::once('1').chain(std::iter::repeat_n('0', 100)).collect();
    assert_eq!(out.replace(',', ""), expected);
}

#[test]
fn fixed_places_pad_and_round() {
    let rel = ctx();
    let value = rel.parse("5").expect("parse");
    assert_eq!(format_fixed(&rel, &value, 2, true).expect("format"), "5.00");

    let value = rel.parse("1234567.005").expect("parse");
    assert_eq!(
        format_fixed(&rel, &value, 2, true).expect("format"),
        format!("1,234,567.01{ROUNDING_SUFFIX}")
    );

    // Indicator suppressed on request even when lossy.
    assert_eq!(
        format_fixed(&rel, &value, 2, false).expect("format"),
        "1,234,567.01"
    );
}

#[test]
fn non_finite_values_are_rejected() {
    let rel = ctx();
    let p = rel.precision_bits();
    let zero = &rel.constants.zero;
    let one = &rel.constants.one;
    let inf = one.div(zero, p, ROUNDING);
    let nan = zero.div(zero, p, ROUNDING);
    let options = SignificantFormat::places(2);

    assert!(matches!(
        format_significant(&rel, &inf, &options),
        Err(FormatError::NonFinite)
    ));
    assert!(matches!(
        format_significant(&rel, &nan, &options),
        Err(FormatError::NonFinite)
    ));
}

#[test]
fn non_digit_ignore_char_is_rejected() {
    let rel = ctx();
    let value = rel.parse("0.5").expect("parse");
    let options = SignificantFormat::with_ignore_char(2, 'x');
    assert!(matches!(
        format_significant(&rel, &value, &options),
        Err(FormatError::InvalidIgnoreChar('x'))
    ));
}

#[test]
fn budgets_can_run_side_by_side() {
    let coarse = RelativityContext::new(30).expect("context");
    let fine = RelativityContext::new(200).expect("context");
    let options = SignificantFormat::places(3);
    for rel in [&coarse, &fine] {
        let value = rel.parse("0.1").expect("parse");
        assert_eq!(
            format_significant(rel, &value, &options).expect("format"),
            "0.1"
        );
    }
}
