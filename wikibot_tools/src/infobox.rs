//! Infobox extraction and text cleanup for rendered article HTML.

use regex::Regex;
use std::sync::OnceLock;

static OPEN_TAG: OnceLock<Regex> = OnceLock::new();
static SCRIPT_STYLE: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();
static NUMERIC_ENTITY: OnceLock<Regex> = OnceLock::new();
static SPACES: OnceLock<Regex> = OnceLock::new();
static NEWLINES: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid"))
}

/// Opening tag carrying a double-quoted class attribute: name, classes.
fn open_tag() -> &'static Regex {
    regex(
        &OPEN_TAG,
        r#"(?i)<([a-z][a-z0-9]*)\s[^>]*?\bclass\s*=\s*"([^"]*)"[^>]*>"#,
    )
}

/// HTML of the first element whose classes include `infobox`.
#[must_use]
pub fn first_infobox_html(html: &str) -> Option<&str> {
    let caps = open_tag()
        .captures_iter(html)
        .find(|c| c[2].split_whitespace().any(|class| class == "infobox"))?;
    let whole = caps.get(0)?;
    let name = caps[1].to_ascii_lowercase();
    let end = closing_tag_end(html, &name, whole.end())?;
    Some(&html[whole.start()..end])
}

/// Byte offset just past the `</name>` balancing an element opened before `from`.
fn closing_tag_end(html: &str, name: &str, from: usize) -> Option<usize> {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1_usize;
    let mut pos = from;

    while let Some(idx) = html[pos..].find('<') {
        let at = pos + idx;
        let rest = &html[at..];
        if starts_with_tag(rest, &close) {
            depth -= 1;
            if depth == 0 {
                return Some(at + rest.find('>')? + 1);
            }
        } else if starts_with_tag(rest, &open) {
            depth += 1;
        }
        pos = at + 1;
    }
    None
}

/// `rest` starts with `prefix` followed by whitespace, `>` or `/`.
fn starts_with_tag(rest: &str, prefix: &str) -> bool {
    rest.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        && rest[prefix.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
}

/// Plain text of an HTML fragment; rows and line breaks become newlines.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let html = regex(
        &SCRIPT_STYLE,
        r"(?is)<(?:script|style)\b.*?</(?:script|style)\s*>",
    )
    .replace_all(html, "");
    let html = regex(
        &LINE_BREAK,
        r"(?i)<br\s*/?>|</(?:tr|li|p|div|h[1-6])\s*>",
    )
    .replace_all(&html, "\n");
    let text = regex(&ANY_TAG, r"<[^>]*>").replace_all(&html, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    let text = regex(&NUMERIC_ENTITY, r"&#(x[0-9a-fA-F]+|[0-9]+);").replace_all(text, |caps: &regex::Captures<'_>| {
        let code = &caps[1];
        let value = code
            .strip_prefix('x')
            .map_or_else(|| code.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok());
        value
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    text.replace("&nbsp;", "\u{a0}")
        .replace("&minus;", "\u{2212}")
        .replace("&ndash;", "\u{2013}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Replace non-printable and non-ASCII characters with spaces, then collapse
/// runs of spaces and runs of newlines.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let only_ascii: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') {
                c
            } else {
                ' '
            }
        })
        .collect();
    let no_dup_spaces = regex(&SPACES, " +").replace_all(&only_ascii, " ");
    regex(&NEWLINES, "\n+")
        .replace_all(&no_dup_spaces, "\n")
        .into_owned()
}

/// Cleaned text of the first infobox on a page.
#[must_use]
pub fn first_infobox_text(html: &str) -> Option<String> {
    first_infobox_html(html).map(|infobox| clean_text(&html_to_text(infobox)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<div class="mw-parser-output"><style>.infobox{border:1px}</style>
<table class="infobox biography vcard"><tbody>
<tr><th colspan="2" class="infobox-above">Ada Lovelace</th></tr>
<tr><th class="infobox-label">Born</th><td class="infobox-data">Augusta Ada Byron<br /><span style="display:none">(<span class="bday">1815-12-10</span>)</span>10&#160;December 1815<br/>London, England</td></tr>
<tr><td><table class="nested"><tr><td>inner</td></tr></table></td></tr>
</tbody></table>
<p>Augusta Ada King, Countess of Lovelace was an English mathematician.</p>
<table class="infobox"><tr><td>second</td></tr></table></div>"#;

    #[test]
    fn test_first_infobox_html_balances_nested_tables() {
        let Some(infobox) = first_infobox_html(PAGE) else {
            panic!("page has an infobox");
        };
        assert!(infobox.starts_with("<table class=\"infobox biography vcard\">"));
        assert!(infobox.ends_with("</tbody></table>"));
        assert!(infobox.contains("inner"));
        assert!(!infobox.contains("mathematician"));
        assert!(!infobox.contains("second"));
    }

    #[test]
    fn test_infobox_class_must_match_exactly() {
        let html = r#"<div class="infobox-subbox"><span>x</span></div>"#;
        assert_eq!(first_infobox_html(html), None);
        assert_eq!(first_infobox_text("<p>no boxes here</p>"), None);
    }

    #[test]
    fn test_html_to_text() {
        let text = html_to_text("<style>b{}</style><tr><th>Born</th><td>A<br>B &amp; C</td></tr>");
        assert_eq!(text, "BornA\nB & C\n");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("10&#160;December &#x2013; x"), "10\u{a0}December \u{2013} x");
        assert_eq!(decode_entities("&#99999999;"), "&#99999999;");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("a\u{a0}\u{a0}b   c\n\n\nd"), "a b c\nd");
        assert_eq!(clean_text("6356.752\u{2009}km"), "6356.752 km");
    }

    #[test]
    fn test_first_infobox_text() {
        let Some(text) = first_infobox_text(PAGE) else {
            panic!("page has an infobox");
        };
        assert!(text.contains("BornAugusta Ada Byron\n"));
        assert!(text.contains("(1815-12-10)10 December 1815"));
        assert!(!text.contains("border"));
    }
}
