//! String helpers for labels and optional text fields.

/// Converts a blank string to `None`, otherwise returns the trimmed value.
///
/// # Examples
///
/// ```
/// use easynpc_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  /say hi "), Some("/say hi"));
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Shortens a label to at most `max_chars` characters, marking the cut with `…`.
///
/// Counts characters, not bytes, so multi-byte names are never split.
///
/// # Examples
///
/// ```
/// use easynpc_domain::common::normalize_label;
///
/// assert_eq!(normalize_label("short", 11), "short");
/// assert_eq!(normalize_label("0f3a9c4e-1111-2222", 11), "0f3a9c4e-1…");
/// ```
pub fn normalize_label(value: &str, max_chars: usize) -> String {
    let value = value.trim();
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut label: String = value.chars().take(max_chars - 1).collect();
    label.push('…');
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_exact_length() {
        assert_eq!(normalize_label("abcdefghijk", 11), "abcdefghijk");
        assert_eq!(normalize_label("abcdefghijkl", 11), "abcdefghij…");
        assert_eq!(normalize_label("abc", 0), "");
    }

    #[test]
    fn normalize_counts_chars_not_bytes() {
        let label = normalize_label("ÄÖÜäöüßÄÖÜäöü", 5);
        assert_eq!(label.chars().count(), 5);
        assert!(label.ends_with('…'));
    }
}
