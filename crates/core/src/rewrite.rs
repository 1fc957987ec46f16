//! Rewriting provider CSS to reference local font files.
//!
//! Every step works on the whole document text of one variant. Each step
//! consumes the previous [`RewriteState`] and returns the next one, so the
//! cumulative effect of filtering is visible after every rule.

use std::{path::Path, sync::LazyLock};

use log::debug;
use regex::{Captures, Regex};

use crate::{config::SKIPPED_FORMAT, io::css_path, options::FilterScope};

static SRC_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)((?:^|[{;\s])src\s*:)([^;}]*)").expect("valid src pattern"));

/// Removes unwanted source alternates after a URL has been localized.
pub trait AlternateFilter {
    fn filter(&self, css: &str) -> String;
}

/// Splits the entire document on commas and drops every woff2 segment.
///
/// This also removes unrelated comma-separated content that mentions woff2
/// anywhere in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFilter;

impl AlternateFilter for DocumentFilter {
    fn filter(&self, css: &str) -> String {
        drop_woff2_segments(css)
    }
}

/// Applies the comma filter inside `src` declaration values only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrcFilter;

impl AlternateFilter for SrcFilter {
    fn filter(&self, css: &str) -> String {
        SRC_VALUE
            .replace_all(css, |caps: &Captures| {
                format!("{}{}", &caps[1], drop_woff2_segments(&caps[2]))
            })
            .into_owned()
    }
}

impl FilterScope {
    pub fn alternate_filter(self) -> &'static dyn AlternateFilter {
        match self {
            Self::Document => &DocumentFilter,
            Self::Rule => &SrcFilter,
        }
    }
}

fn drop_woff2_segments(text: &str) -> String {
    text.split(',').filter(|part| !part.contains(SKIPPED_FORMAT)).collect::<Vec<_>>().join(",")
}

/// The current text of one variant's stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteState {
    text: String,
}

impl RewriteState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Point the first occurrence of `url` at `local_path`, then run `filter`
    /// over the whole document.
    pub fn localize(self, url: &str, local_path: &str, filter: &dyn AlternateFilter) -> Self {
        debug!("Rewriting {url} -> {local_path}");
        let replaced = self.text.replacen(url, &format!("'{local_path}'"), 1);
        Self { text: filter.filter(&replaced) }
    }
}

/// How a downloaded font is referenced from CSS, minus `font_base_dir/`.
pub fn local_font_path(destination: &Path, font_base_dir: Option<&Path>) -> String {
    let path = css_path(destination);
    let Some(base) = font_base_dir else {
        return path;
    };

    let prefix = format!("{}/", css_path(base).trim_end_matches('/'));
    match path.strip_prefix(&prefix) {
        Some(stripped) => stripped.to_owned(),
        None => path,
    }
}
