//! String utilities for the domain layer.

/// Shorten `s` to at most `max_len` bytes, appending `...` when cut.
///
/// The cut always lands on a UTF-8 character boundary.
pub fn excerpt(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3);
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", s[..end].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_input_unchanged() {
        assert_eq!(excerpt("hello", 10), "hello");
    }

    #[test]
    fn test_excerpt_ascii() {
        assert_eq!(excerpt("hello world", 8), "hello...");
    }

    #[test]
    fn test_excerpt_multibyte_boundary() {
        // Each "é" is two bytes; cutting must not split one.
        let s = "éééééé";
        let out = excerpt(s, 8);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 8);
    }
}
