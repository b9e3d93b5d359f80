//! Hex color helpers shared by the generator and the API

/// Returns true for `#RGB` and `#RRGGBB` color strings
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };

    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_short_and_long_forms() {
        assert!(is_hex_color("#8B1E3F"));
        assert!(is_hex_color("#fff"));
    }

    #[test]
    fn test_rejects_malformed_colors() {
        assert!(!is_hex_color("8B1E3F"));
        assert!(!is_hex_color("#8B1E3"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color(""));
    }
}
