//! Stylesheet parsing for provider responses.
//!
//! The parser is structural only: the rewrite step works on the raw text,
//! so rules here exist to be inspected, never re-serialized.

mod parser;

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::Result;

static UNICODE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"unicode-range:[\s\w+,-]*;").expect("valid pattern"));

/// An ordered rule list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    FontFace,
    /// A qualified rule such as `body { ... }`.
    Style { selector: String },
    /// Any other at-rule. Nested blocks (`@media`) carry no declarations.
    At { name: String, prelude: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    /// Property name (lowercased) to raw value text.
    pub declarations: IndexMap<String, String>,
}

impl Rule {
    pub fn is_font_face(&self) -> bool {
        self.kind == RuleKind::FontFace
    }

    pub fn declaration(&self, name: &str) -> Option<&str> {
        self.declarations.get(name).map(String::as_str)
    }
}

impl Stylesheet {
    /// Font-face rules in document order.
    pub fn font_face_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.is_font_face())
    }
}

/// Remove every `unicode-range: ...;` declaration from the whole document.
///
/// Idempotent.
pub fn strip_unicode_range(css: &str) -> String {
    UNICODE_RANGE.replace_all(css, "").into_owned()
}

/// Strip unicode ranges, then parse the cleaned text into a rule list.
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet> {
    let cleaned = strip_unicode_range(css);
    parser::parse(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATIN: &str = "@font-face {\n  font-family: 'Open Sans';\n  src: url(a.ttf);\n  \
                         unicode-range: U+0000-00FF, U+0131, U+2000-206F;\n}\n";

    #[test]
    fn test_strip_unicode_range() {
        let stripped = strip_unicode_range(LATIN);
        assert!(!stripped.contains("unicode-range"));
        assert!(stripped.contains("src: url(a.ttf);"));
    }

    #[test]
    fn test_strip_unicode_range_idempotent() {
        let once = strip_unicode_range(LATIN);
        assert_eq!(strip_unicode_range(&once), once);
    }

    #[test]
    fn test_strip_unicode_range_every_occurrence() {
        let css = format!("{LATIN}{LATIN}");
        assert_eq!(strip_unicode_range(&css).matches("unicode-range").count(), 0);
    }

    #[test]
    fn test_parse_drops_unicode_range_declaration() {
        let sheet = parse_stylesheet(LATIN).unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert!(sheet.rules[0].declaration("unicode-range").is_none());
        assert_eq!(sheet.rules[0].declaration("font-family"), Some("'Open Sans'"));
    }

    #[test]
    fn test_font_face_rules_filter() {
        let css = "body { margin: 0 }\n@font-face { font-family: A; }\n@import url(x.css);\n";
        let sheet = parse_stylesheet(css).unwrap();
        assert_eq!(sheet.rules.len(), 3);
        assert_eq!(sheet.font_face_rules().count(), 1);
    }
}
