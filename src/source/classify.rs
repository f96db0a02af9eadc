//! Default lexical span classifier for C-style syntax
//!
//! A single forward pass over the raw bytes. All delimiters are ASCII, so
//! byte indexing is safe in UTF-8 text and every produced offset lands on a
//! character boundary.

use super::{ExcludedSpan, SpanClassifier};

/// Classifies `//` line comments, `/* */` block comments, and double-quoted
/// string literals as excluded spans.
///
/// Single-quoted character literals are treated as code. Unterminated block
/// comments run to end of input; unterminated string literals end at the
/// line break.
pub struct LexicalClassifier;

impl SpanClassifier for LexicalClassifier {
    fn classify(&self, text: &str) -> Vec<ExcludedSpan> {
        let bytes = text.as_bytes();
        let mut spans = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    let start = i;
                    i += 2;
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                    spans.push(ExcludedSpan::new(start, i));
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    let start = i;
                    i += 2;
                    loop {
                        if i + 1 >= bytes.len() {
                            i = bytes.len();
                            break;
                        }
                        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                    spans.push(ExcludedSpan::new(start, i));
                }
                b'"' => {
                    let start = i;
                    i += 1;
                    while i < bytes.len() {
                        match bytes[i] {
                            b'\\' => i = (i + 2).min(bytes.len()),
                            b'"' => {
                                i += 1;
                                break;
                            }
                            b'\n' => break,
                            _ => i += 1,
                        }
                    }
                    spans.push(ExcludedSpan::new(start, i));
                }
                _ => i += 1,
            }
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<ExcludedSpan> {
        LexicalClassifier.classify(text)
    }

    #[test]
    fn test_plain_code_has_no_spans() {
        assert!(classify("int main() { return 0; }").is_empty());
        assert!(classify("").is_empty());
    }

    #[test]
    fn test_line_comment() {
        let text = "int x; // trailing note\nint y;";
        let spans = classify(text);

        assert_eq!(spans, vec![ExcludedSpan::new(7, 23)]);
        assert_eq!(&text[spans[0].start..spans[0].end], "// trailing note");
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let text = "// no newline";
        let spans = classify(text);
        assert_eq!(spans, vec![ExcludedSpan::new(0, text.len())]);
    }

    #[test]
    fn test_block_comment() {
        let text = "a /* inner */ b";
        let spans = classify(text);

        assert_eq!(spans, vec![ExcludedSpan::new(2, 13)]);
        assert_eq!(&text[spans[0].start..spans[0].end], "/* inner */");
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let text = "a /* one\n\ttwo */ b";
        let spans = classify(text);

        assert_eq!(spans.len(), 1);
        // The tab on the second line is inside the comment span
        let tab_offset = text.find('\t').unwrap();
        assert!(spans[0].contains(tab_offset));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        let text = "x /* never closed";
        let spans = classify(text);
        assert_eq!(spans, vec![ExcludedSpan::new(2, text.len())]);
    }

    #[test]
    fn test_string_literal() {
        let text = r#"say("hello")"#;
        let spans = classify(text);

        assert_eq!(spans, vec![ExcludedSpan::new(4, 11)]);
        assert_eq!(&text[spans[0].start..spans[0].end], "\"hello\"");
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let text = r#"say("he \"said\"") + 1"#;
        let spans = classify(text);

        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], r#""he \"said\"""#);
    }

    #[test]
    fn test_unterminated_string_ends_at_line_break() {
        let text = "x = \"open\ny = 2";
        let spans = classify(text);

        assert_eq!(spans, vec![ExcludedSpan::new(4, 9)]);
        // The next line stays code
        assert!(!spans[0].contains(text.find('y').unwrap()));
    }

    #[test]
    fn test_comment_markers_inside_string_are_not_comments() {
        let text = r#"path("//etc") + 1"#;
        let spans = classify(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "\"//etc\"");
    }

    #[test]
    fn test_multibyte_text_offsets_stay_on_boundaries() {
        let text = "é /* commentaire */ é";
        let spans = classify(text);

        assert_eq!(spans.len(), 1);
        assert!(text.get(spans[0].start..spans[0].end).is_some());
    }
}
