

/// Keeps at most `max_chars` characters of `s`. Never splits a multi-byte character.
#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}


#[inline]
pub fn log_preview(s: &str, max_chars: usize) -> String {
    let head = safe_truncate(s, max_chars);
    if head.len() < s.len() {
        format!("{head}...")
    } else {
        head.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_ascii() {
        assert_eq!(safe_truncate("hello world", 5), "hello");
    }

    #[test]
    fn test_safe_truncate_multibyte() {
        assert_eq!(safe_truncate("Überprüfung läuft", 6), "Überpr");
        assert_eq!(safe_truncate("詐欺の報告", 2), "詐欺");
    }

    #[test]
    fn test_safe_truncate_exact_and_shorter() {
        assert_eq!(safe_truncate("hello", 5), "hello");
        assert_eq!(safe_truncate("hi", 500), "hi");
        assert_eq!(safe_truncate("", 3), "");
    }

    #[test]
    fn test_log_preview() {
        assert_eq!(log_preview("hello world", 5), "hello...");
        assert_eq!(log_preview("hi", 10), "hi");
    }
}
