//! String helpers for the loosely populated attribute values found in SBML documents

/// Whether a value is absent or contains only whitespace
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Replace a blank value with the literal `"undefined"`
pub(crate) fn or_undefined(value: &str) -> String {
    if value.trim().is_empty() {
        String::from("undefined")
    } else {
        value.to_string()
    }
}

/// Whether a token reads as a plain number (`"123"`, `"1.5"`, `"1e3"`).
///
/// Words that Rust's float parser accepts (`inf`, `NaN`) are not numbers here, a token needs
/// at least one digit and a finite value.
pub(crate) fn is_numeric(token: &str) -> bool {
    let token = token.trim();
    token.chars().any(|c| c.is_ascii_digit())
        && token.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Parse a finite float, `None` for anything else
pub(crate) fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strip leading and trailing double quotes until none remain at either end
pub(crate) fn strip_quotes(value: &str) -> &str {
    let mut current = value;
    loop {
        let stripped = current.strip_prefix('"').unwrap_or(current);
        let stripped = stripped.strip_suffix('"').unwrap_or(stripped);
        if stripped.len() == current.len() {
            return current;
        }
        current = stripped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("c0")));
    }

    #[test]
    fn numeric_tokens() {
        assert!(is_numeric("123"));
        assert!(is_numeric("1.5"));
        assert!(is_numeric("1e3"));
        assert!(!is_numeric("b0001"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("NaN"));
    }

    #[test]
    fn quotes_are_stripped_repeatedly() {
        assert_eq!(strip_quotes("\"\"b0001 and b0002\""), "b0001 and b0002");
        assert_eq!(strip_quotes("b0001"), "b0001");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn undefined_substitution() {
        assert_eq!(or_undefined(""), "undefined");
        assert_eq!(or_undefined("Cytosol"), "Cytosol");
    }
}
