//! Configuration constants for Google Fonts mirroring.

/// Base of the Google Fonts CSS API.
pub const PROVIDER_CSS_URL: &str = "http://fonts.googleapis.com/css";

/// Key of the user-agent variant used when none are configured.
pub const DEFAULT_USER_AGENT_KEY: &str = "default";

/// Desktop browser string sent when no user agents are configured.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_2) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1944.0 Safari/537.36"
);

/// Extension of written stylesheet fragments.
pub const DEFAULT_STYLESHEET_EXTENSION: &str = "styl";

/// Prefix of written stylesheet fragment names.
pub const STYLESHEET_PREFIX: &str = "font_";

/// Source format that is never downloaded and is stripped from rewritten CSS.
pub const SKIPPED_FORMAT: &str = "woff2";
