//! Font-face extraction, download URL resolution and local filenames.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{
    config::SKIPPED_FORMAT,
    css::{Rule, Stylesheet},
};

static URL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\(\s*([^)\s]+)\s*\)").expect("valid url() pattern"));

/// The declarations of one `@font-face` rule that drive downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFace<'a> {
    pub family: &'a str,
    pub style: &'a str,
    pub weight: &'a str,
    pub src: &'a str,
}

impl<'a> FontFace<'a> {
    /// Missing `font-style`/`font-weight` fall back to their CSS initial values.
    pub fn from_rule(rule: &'a Rule) -> Self {
        Self {
            family: rule.declaration("font-family").unwrap_or_default(),
            style: rule.declaration("font-style").unwrap_or("normal"),
            weight: rule.declaration("font-weight").unwrap_or("400"),
            src: rule.declaration("src").unwrap_or_default(),
        }
    }

    /// The `src` alternative to download, or `None` if only woff2 sources exist.
    pub fn download_url(&self) -> Option<String> {
        resolve_download_url(self.src)
    }

    /// `<family>_<style>_<weight>_<variant>.<ext>`, quotes stripped.
    pub fn filename(&self, variant_key: &str, url: &str) -> String {
        let stem = [self.family, self.style, self.weight]
            .into_iter()
            .map(strip_quotes)
            .chain([variant_key.to_owned()])
            .collect::<Vec<_>>()
            .join("_");

        match extension(url) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        }
    }
}

/// Font-face rules of a stylesheet, in document order.
pub fn extract_font_faces(sheet: &Stylesheet) -> Vec<FontFace<'_>> {
    sheet.font_face_rules().map(FontFace::from_rule).collect()
}

/// Pick the first `url(...)` token in `src` that is not a woff2 source.
///
/// Each woff2 match is cut out of the value and the search restarts on what
/// remains, so the loop always terminates. The raw token is returned, quotes
/// included if the value had any.
pub fn resolve_download_url(src: &str) -> Option<String> {
    let mut remaining = src.to_owned();

    loop {
        let token = URL_TOKEN.captures(&remaining)?.get(1)?;
        if !token.as_str().contains(SKIPPED_FORMAT) {
            debug!("Resolved download URL {}", token.as_str());
            return Some(token.as_str().to_owned());
        }
        debug!("Skipping {SKIPPED_FORMAT} source {}", token.as_str());
        let range = token.range();
        remaining.replace_range(range, "");
    }
}

/// A `url(...)` token without its surrounding quotes.
pub fn unquote(token: &str) -> &str {
    token.trim_matches(|c| c == '\'' || c == '"')
}

pub(crate) fn strip_quotes(value: &str) -> String {
    value.replace(['\'', '"'], "")
}

/// Text after the last dot of the URL's final path segment.
fn extension(url: &str) -> Option<&str> {
    let path = unquote(url).split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rsplit_once('.').map(|(_, ext)| ext).filter(|ext| !ext.is_empty())
}
