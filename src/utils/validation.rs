/// Characters that are invalid in filenames on Windows (a superset of the
/// POSIX-problematic ones), plus CR/LF.
const INVALID_CHARS: &[char] = &[
    '<', '>', ':', '"', '|', '?', '*', '\\', '/', '\r', '\n',
];

/// Maximum length of a sanitized name component, in characters
const MAX_COMPONENT_CHARS: usize = 200;

/// Sanitizes a single name component so it is legal on both POSIX and
/// Windows-style filesystems: invalid characters become `_`, trailing dots
/// and spaces are stripped, and the result is capped at 200 characters.
/// Non-ASCII characters pass through unchanged.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();

    // Trailing dots and spaces are silently dropped by Windows.
    let trimmed = replaced.trim_end_matches(['.', ' ']);

    trimmed.chars().take(MAX_COMPONENT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_passes_through() {
        assert_eq!(sanitize_filename("notebook.rm"), "notebook.rm");
        assert_eq!(sanitize_filename("My Document 3.pdf"), "My Document 3.pdf");
    }

    #[test]
    fn test_invalid_characters_replaced() {
        assert_eq!(sanitize_filename("a<b>c:d\"e|f?g*h"), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize_filename("dir\\file/name"), "dir_file_name");
    }

    #[test]
    fn test_control_line_breaks_replaced() {
        assert_eq!(sanitize_filename("line\r\nbreak"), "line__break");
    }

    #[test]
    fn test_trailing_dots_and_spaces_stripped() {
        assert_eq!(sanitize_filename("report. . ."), "report");
        assert_eq!(sanitize_filename("name   "), "name");
        assert_eq!(sanitize_filename("keep.inner.dots.txt"), "keep.inner.dots.txt");
    }

    #[test]
    fn test_truncated_to_200_chars() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_filename(&long).chars().count(), 200);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // 250 Hebrew letters, 2 bytes each in UTF-8
        let long: String = std::iter::repeat('א').take(250).collect();
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized.chars().count(), 200);
        assert!(sanitized.chars().all(|c| c == 'א'));
    }

    #[test]
    fn test_non_ascii_preserved() {
        assert_eq!(sanitize_filename("מסמך.pdf"), "מסמך.pdf");
    }
}
