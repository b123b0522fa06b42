pub(crate) fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Signed integer delta, `+2` / `-1` / `0`.
pub(crate) fn signed_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Two-decimal percentage with explicit sign for non-zero values.
pub(crate) fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("edge", 1), "edge");
        assert_eq!(pluralize("edge", 0), "edges");
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed_delta(2), "+2");
        assert_eq!(signed_delta(-1), "-1");
        assert_eq!(signed_delta(0), "0");
        assert_eq!(signed_percent(-33.32), "-33.32%");
        assert_eq!(signed_percent(5.0), "+5.00%");
    }
}
