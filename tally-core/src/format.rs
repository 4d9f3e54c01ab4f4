//! Number rendering
//!
//! `format_number` is the calculator's display formatter and the only path
//! a calculator result takes to the screen. `format_real` renders converter
//! results, which always keep a fractional part (`32.0`).

/// Significant digits shown when a result is not a small integer
pub const DISPLAY_SIGFIGS: usize = 10;

/// Integers at or above this magnitude fall back to general formatting
const INTEGER_LIMIT: f64 = 1e15;

/// Render a calculator value.
///
/// Integral values below 1e15 render as plain integers; everything else
/// uses 10 significant digits in general style (`0.3333333333`,
/// `1.5e+20`, `1e-07`).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == value.trunc() && value.abs() < INTEGER_LIMIT {
        // Exact below 2^53, and -0.0 collapses to 0
        return format!("{}", value as i64);
    }
    format_general(value, DISPLAY_SIGFIGS)
}

/// General ("g") formatting with `sigfigs` significant digits.
///
/// Scientific notation is used when the decimal exponent is below -4 or
/// at least `sigfigs`; trailing zeros are trimmed either way.
pub fn format_general(value: f64, sigfigs: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sigfigs = sigfigs.max(1);
    let sci = format!("{:.*e}", sigfigs - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= sigfigs as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (sigfigs as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Shortest round-tripping decimal that always carries a fraction or exponent.
///
/// Magnitudes below 1e-4 or from 1e16 up use a signed two-digit exponent
/// (`1e-06`, `8e+16`), matching `format_general`.
pub fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    if value == 0.0 {
        return "0.0".to_string();
    }
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent = exponent.parse::<i32>().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => repr,
    }
}

/// Round to a fixed number of decimal places.
///
/// Goes through the exact decimal expansion, so `2.675` rounds to `2.67`
/// just as its binary value dictates.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}
