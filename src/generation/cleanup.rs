const FENCE: &str = "```";

/// Strips the outermost Markdown code fence from an LLM response.
///
/// If the text opens with a fence, the whole first line (fence plus any language
/// tag) is dropped and everything from the last fence onwards is cut. Anything
/// inside stays as it is. Text that does not open with a fence is only trimmed,
/// so prose in front of a fence is left for the decoder to reject.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return text;
    }

    let body = match text.find('\n') {
        Some(line_end) => &text[line_end + 1..],
        // Single-line fence: "```{...}```"
        None => text.trim_start_matches('`'),
    };

    match body.rfind(FENCE) {
        Some(fence_start) => body[..fence_start].trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"nodes\":[],\"edges\":[]}\n```";
        assert_eq!(strip_code_fence(raw), r#"{"nodes":[],"edges":[]}"#);
    }

    #[test]
    fn strips_bare_fence_with_trailing_whitespace() {
        let raw = "```\n{\"a\":1}\n```   \n\n";
        assert_eq!(strip_code_fence(raw), r#"{"a":1}"#);
    }

    #[test]
    fn only_outermost_pair_is_removed() {
        let raw = "```json\n{\"note\":\"use ``` carefully\"}\n```\n```";
        assert_eq!(
            strip_code_fence(raw),
            "{\"note\":\"use ``` carefully\"}\n```"
        );
    }

    #[test]
    fn inner_backticks_survive() {
        let raw = "```json\n{\"say\":\"`quoted`\"}\n```";
        assert_eq!(strip_code_fence(raw), r#"{"say":"`quoted`"}"#);
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), r#"{"a":1}"#);
        let prose = "Here you go:\n```json\n{}\n```";
        assert_eq!(strip_code_fence(prose), prose);
    }

    #[test]
    fn prose_after_closing_fence_is_dropped() {
        let raw = "```json\n{\"a\":1}\n```\nLet me know if you need changes.";
        assert_eq!(strip_code_fence(raw), r#"{"a":1}"#);
    }

    #[test]
    fn single_line_fence() {
        assert_eq!(strip_code_fence("```{\"a\":1}```"), r#"{"a":1}"#);
    }

    #[test]
    fn unterminated_fence_keeps_body() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), r#"{"a":1}"#);
    }
}
