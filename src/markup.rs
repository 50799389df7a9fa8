//! Text encoding for markup output
//!
//! Log data is untrusted text. Everything written into the feed passes
//! through [`encode_html`] (fragment text and attributes) or
//! [`escape_xml_text`] (XML element content), and the assembled document is
//! finally cleaned with [`strip_illegal_xml_chars`].

/// HTML-encode text for use in element content or a quoted attribute.
///
/// Encodes `&`, `<`, `>`, `"` and `'`.
pub fn encode_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for XML element content.
///
/// A carriage return is written as `&#xD;`; parsers normalize a raw one to
/// a line feed.
pub fn escape_xml_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}

/// Whether `c` matches the XML 1.0 `Char` production.
///
/// `Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`
pub fn is_legal_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Remove every character that may not appear in an XML 1.0 document.
pub fn strip_illegal_xml_chars(s: &str) -> String {
    if s.chars().all(is_legal_xml_char) {
        return s.to_string();
    }
    s.chars().filter(|c| is_legal_xml_char(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_html() {
        assert_eq!(encode_html("plain"), "plain");
        assert_eq!(
            encode_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml_text_keeps_quotes() {
        assert_eq!(escape_xml_text("<ul>'a' & \"b\"</ul>"), "&lt;ul&gt;'a' &amp; \"b\"&lt;/ul&gt;");
    }

    #[test]
    fn test_escape_xml_text_encodes_carriage_return() {
        assert_eq!(escape_xml_text("line1\r\nline2\r"), "line1&#xD;\nline2&#xD;");
    }

    #[test]
    fn test_strip_illegal_xml_chars() {
        assert_eq!(strip_illegal_xml_chars("ok\tline\r\n"), "ok\tline\r\n");
        assert_eq!(strip_illegal_xml_chars("bad\u{0}\u{1B}\u{FFFE}char"), "badchar");
        assert_eq!(strip_illegal_xml_chars("emoji \u{1F600}"), "emoji \u{1F600}");
    }
}
