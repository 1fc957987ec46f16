//! The fetch → parse → resolve → download → rewrite → write pipeline.
//!
//! Variants run one after another, and the font-face rules of a variant run
//! one after another. A variant is finished once its stylesheet is written.

mod clean;
mod download;
mod fetch;
mod stylesheet;

use std::path::PathBuf;

use log::{info, warn};

use crate::{
    css::parse_stylesheet,
    error::Result,
    font_face::{FontFace, extract_font_faces, unquote},
    http::Transport,
    options::{PipelineOptions, UserAgentVariant},
    rewrite::{AlternateFilter, RewriteState, local_font_path},
};

pub use clean::clean;
pub use download::download_font;
pub use fetch::fetch_stylesheet;
pub use stylesheet::{stylesheet_name, write_stylesheet};

/// Files produced for one user-agent variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOutput {
    pub key: String,
    pub stylesheet: PathBuf,
    pub fonts: Vec<PathBuf>,
}

/// Mirror every configured variant of `options`.
///
/// Options are validated before the first request is made.
pub fn run(options: &PipelineOptions, transport: &dyn Transport) -> Result<Vec<VariantOutput>> {
    options.validate()?;

    let url = options.provider_url();
    let variants = options.variants();
    info!("Mirroring {} for {} user agent(s)", options.family, variants.len());

    variants.iter().map(|variant| process_variant(options, transport, &url, variant)).collect()
}

/// Fetch, localize and write the stylesheet of a single variant.
pub fn process_variant(
    options: &PipelineOptions,
    transport: &dyn Transport,
    url: &str,
    variant: &UserAgentVariant,
) -> Result<VariantOutput> {
    info!("Fetching stylesheet for '{}'", variant.key);
    let body = fetch_stylesheet(transport, options, url, variant)?;
    let sheet = parse_stylesheet(&body)?;
    let faces = extract_font_faces(&sheet);

    let filter = options.filter_scope.alternate_filter();
    let mut state = RewriteState::new(body);
    let mut fonts = Vec::new();

    for face in &faces {
        let (next, font) = process_font_face(options, transport, variant, face, filter, state)?;
        state = next;
        fonts.extend(font);
    }

    let family = faces.first().map_or(options.family.as_str(), |face| face.family);
    let stylesheet = write_stylesheet(options, &variant.key, family, state.text())?;

    Ok(VariantOutput { key: variant.key.clone(), stylesheet, fonts })
}

/// Resolve, localize and download one font-face rule.
///
/// A rule without a non-woff2 source leaves the state untouched.
fn process_font_face(
    options: &PipelineOptions,
    transport: &dyn Transport,
    variant: &UserAgentVariant,
    face: &FontFace<'_>,
    filter: &dyn AlternateFilter,
    state: RewriteState,
) -> Result<(RewriteState, Option<PathBuf>)> {
    let Some(url) = face.download_url() else {
        warn!("No downloadable source for {} {} {}", face.family, face.style, face.weight);
        return Ok((state, None));
    };

    let destination = options.font_destination.join(face.filename(&variant.key, &url));
    let local_path = local_font_path(&destination, options.font_base_dir());
    let state = state.localize(&url, &local_path, filter);

    download_font(transport, unquote(&url), &destination)?;
    Ok((state, Some(destination)))
}
