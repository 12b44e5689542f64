const EDGE_CHARS: usize = 1000;
const ELLIPSIS_THRESHOLD: usize = 2000;
const ELLIPSIS: &str = "\n...\n";

/// Bounds a description to its first and last 1000 characters.
///
/// Text of up to 1000 characters is returned as is. Longer text keeps the head
/// and the tail, with an ellipsis line between them only when more than 2000
/// characters were present. Between 1001 and 2000 characters the head and the
/// tail overlap.
pub fn summarize_description(description: &str) -> String {
    let len = description.chars().count();
    if len <= EDGE_CHARS {
        return description.to_string();
    }

    let head: String = description.chars().take(EDGE_CHARS).collect();
    let tail: String = description.chars().skip(len - EDGE_CHARS).collect();
    let separator = if len > ELLIPSIS_THRESHOLD { ELLIPSIS } else { "" };

    format!("{head}{separator}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_1000_chars_is_unchanged() {
        let text = "a".repeat(1000);
        assert_eq!(summarize_description(&text), text);
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(summarize_description(""), "");
        assert_eq!(summarize_description("Build things."), "Build things.");
    }

    #[test]
    fn between_1001_and_2000_has_no_ellipsis() {
        let text = format!("{}{}", "h".repeat(1000), "t");
        let summary = summarize_description(&text);

        assert!(!summary.contains("..."));
        assert_eq!(summary.chars().count(), 2000);
        assert!(summary.starts_with(&"h".repeat(1000)));
        assert!(summary.ends_with(&format!("{}t", "h".repeat(999))));
    }

    #[test]
    fn exactly_2000_has_no_ellipsis() {
        let text = format!("{}{}", "h".repeat(1000), "t".repeat(1000));
        assert_eq!(summarize_description(&text), text);
    }

    #[test]
    fn over_2000_has_ellipsis_between_head_and_tail() {
        let text = format!("{}{}{}", "h".repeat(1000), "m".repeat(1), "t".repeat(1000));
        let summary = summarize_description(&text);

        assert_eq!(
            summary,
            format!("{}\n...\n{}", "h".repeat(1000), "t".repeat(1000))
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(1001);
        let summary = summarize_description(&text);
        assert_eq!(summary.chars().count(), 2000);
        assert!(!summary.contains("..."));
    }
}
