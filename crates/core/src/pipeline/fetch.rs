use log::warn;

use crate::{
    error::{Error, Result},
    http::Transport,
    options::{PipelineOptions, UserAgentVariant},
};

/// Fetch the provider CSS for one variant.
///
/// Non-2xx bodies are handed on as if they were CSS unless `strict_status` is set.
pub fn fetch_stylesheet(
    transport: &dyn Transport,
    options: &PipelineOptions,
    url: &str,
    variant: &UserAgentVariant,
) -> Result<String> {
    let response = transport.fetch_stylesheet(url, &variant.user_agent)?;

    if !response.is_success() {
        if options.strict_status {
            return Err(Error::Status { url: url.to_owned(), status: response.status });
        }
        warn!("HTTP {} for {url} ({}), parsing body anyway", response.status, variant.key);
    }
    Ok(response.body)
}
