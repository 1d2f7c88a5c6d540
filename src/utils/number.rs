//! Numeric helpers with script-style coercion and rendering.

/// True only for NaN.
#[allow(clippy::eq_op)]
pub fn is_nan(value: f64) -> bool {
    value != value
}

/// Coerce text to a number the way a unary `+` does in a scripting host:
/// surrounding whitespace is ignored, empty text is `0`, `0x`/`0o`/`0b`
/// prefixes select a radix, and anything unparseable is NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf"/"nan" spellings that scripting hosts reject.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a number the way a scripting host prints it: no trailing `.0` for
/// integral values, and exponent notation (`1e+21`, `1.5e-7`) once the
/// magnitude reaches `1e21` or drops below `1e-6`.
pub fn display_number(value: f64) -> String {
    if is_nan(value) {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude < 1e-6 && value != 0.0) {
        return exponential(value);
    }
    if value == value.trunc() && magnitude < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

// Rust prints `1e21`; scripting hosts always sign the exponent.
fn exponential(value: f64) -> String {
    let rendered = format!("{:e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_detection() {
        assert!(is_nan(f64::NAN));
        assert!(is_nan(to_number("asd")));
        assert!(!is_nan(0.0));
        assert!(!is_nan(f64::INFINITY));
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("  12  "), 12.0);
        assert_eq!(to_number("1.5e2"), 150.0);
        assert_eq!(to_number("0x1F"), 31.0);
        assert_eq!(to_number("0b101"), 5.0);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(is_nan(to_number("inf")));
        assert!(is_nan(to_number("12px")));
        assert!(is_nan(to_number("0xZZ")));
    }

    #[test]
    fn rendering() {
        assert_eq!(display_number(42.0), "42");
        assert_eq!(display_number(-3.0), "-3");
        assert_eq!(display_number(0.25), "0.25");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(f64::INFINITY), "Infinity");
        assert_eq!(display_number(-0.0), "0");
    }

    #[test]
    fn rendering_switches_to_exponents_at_the_edges() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(-1.5e22), "-1.5e+22");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(1e-7), "1e-7");
        assert_eq!(display_number(2.5e-9), "2.5e-9");
        assert_eq!(display_number(0.000001), "0.000001");
    }
}
