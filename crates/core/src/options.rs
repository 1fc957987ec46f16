//! Options for one mirroring run.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    config::{
        DEFAULT_STYLESHEET_EXTENSION, DEFAULT_USER_AGENT, DEFAULT_USER_AGENT_KEY, PROVIDER_CSS_URL,
    },
    error::{Error, Result},
};

/// A requested weight/size token, written as either a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SizeToken {
    Number(u64),
    Text(String),
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for SizeToken {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SizeToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Where the woff2 alternate filter applies after each rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    /// Split the whole document on commas and drop every woff2 segment.
    #[default]
    Document,
    /// Only filter the alternates inside `src` declarations.
    Rule,
}

impl FromStr for FilterScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "document" => Ok(Self::Document),
            "rule" => Ok(Self::Rule),
            other => Err(format!("unknown filter scope '{other}' (expected document or rule)")),
        }
    }
}

/// One user-agent configuration; produces one fetch and one stylesheet fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentVariant {
    pub key: String,
    pub user_agent: String,
}

impl UserAgentVariant {
    pub fn new(key: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self { key: key.into(), user_agent: user_agent.into() }
    }
}

/// Validated configuration for a single invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOptions {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub sizes: Vec<SizeToken>,
    #[serde(default)]
    pub subsets: Option<Vec<String>>,
    #[serde(default)]
    pub user_agents: Option<IndexMap<String, String>>,
    pub font_destination: PathBuf,
    pub css_destination: PathBuf,
    #[serde(default)]
    pub font_base_dir: Option<PathBuf>,
    /// Fail on a non-2xx provider response instead of parsing the body anyway.
    #[serde(default)]
    pub strict_status: bool,
    /// Request timeout; `None` waits forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub filter_scope: FilterScope,
    #[serde(default = "default_stylesheet_extension")]
    pub stylesheet_extension: String,
}

fn default_stylesheet_extension() -> String {
    DEFAULT_STYLESHEET_EXTENSION.to_owned()
}

impl PipelineOptions {
    pub fn new(
        family: impl Into<String>,
        sizes: impl IntoIterator<Item = impl Into<SizeToken>>,
        font_destination: impl Into<PathBuf>,
        css_destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            family: family.into(),
            sizes: sizes.into_iter().map(Into::into).collect(),
            subsets: None,
            user_agents: None,
            font_destination: font_destination.into(),
            css_destination: css_destination.into(),
            font_base_dir: None,
            strict_status: false,
            timeout_secs: None,
            filter_scope: FilterScope::default(),
            stylesheet_extension: default_stylesheet_extension(),
        }
    }

    pub fn with_subsets(mut self, subsets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subsets = Some(subsets.into_iter().map(Into::into).collect());
        self
    }

    /// Add a user-agent variant. Variants run in insertion order.
    pub fn with_user_agent(
        mut self,
        key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        self.user_agents.get_or_insert_with(IndexMap::new).insert(key.into(), user_agent.into());
        self
    }

    pub fn with_font_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_base_dir = Some(dir.into());
        self
    }

    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_filter_scope(mut self, scope: FilterScope) -> Self {
        self.filter_scope = scope;
        self
    }

    /// Check the two required fields. Nothing else is validated.
    pub fn validate(&self) -> Result<()> {
        if self.family.is_empty() {
            return Err(Error::MissingFamily);
        }
        if self.sizes.is_empty() {
            return Err(Error::MissingSizes);
        }
        Ok(())
    }

    /// The CSS API URL shared by every variant of this run.
    pub fn provider_url(&self) -> String {
        let sizes = join(&self.sizes);
        let mut url = format!("{PROVIDER_CSS_URL}?family={}:{sizes}", self.family);
        if let Some(subsets) = &self.subsets {
            url.push_str("&subset=");
            url.push_str(&subsets.join(","));
        }
        url
    }

    /// Configured variants, or the single default desktop variant when unset.
    pub fn variants(&self) -> Vec<UserAgentVariant> {
        match &self.user_agents {
            Some(agents) => agents.iter().map(|(k, v)| UserAgentVariant::new(k, v)).collect(),
            None => vec![UserAgentVariant::new(DEFAULT_USER_AGENT_KEY, DEFAULT_USER_AGENT)],
        }
    }

    pub fn font_base_dir(&self) -> Option<&Path> {
        self.font_base_dir.as_deref()
    }
}

fn join(tokens: &[SizeToken]) -> String {
    tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}
