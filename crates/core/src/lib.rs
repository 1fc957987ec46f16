//! Local Google Fonts - mirror provider stylesheets and font files for offline builds.
//!
//! The provider serves different CSS per `User-Agent`. For every configured
//! user agent this crate fetches the CSS, downloads one non-woff2 font per
//! `@font-face` rule and writes a stylesheet fragment that points at the
//! local files.
//!
//! # Example
//!
//! ```no_run
//! use local_googlefont::{HttpTransport, PipelineOptions, run};
//!
//! let options = PipelineOptions::new("Open Sans", [400u64, 700], "fonts", "css");
//! let transport = HttpTransport::new(None, false).unwrap();
//! for output in run(&options, &transport).unwrap() {
//!     println!("{} -> {}", output.key, output.stylesheet.display());
//! }
//! ```

pub mod config;
pub mod css;
pub mod error;
pub mod font_face;
pub mod http;
pub mod io;
pub mod options;
pub mod pipeline;
pub mod rewrite;

pub use css::{Rule, RuleKind, Stylesheet, parse_stylesheet, strip_unicode_range};
pub use error::{Error, Result};
pub use font_face::{FontFace, extract_font_faces, resolve_download_url};
pub use http::{HttpTransport, StylesheetResponse, Transport};
pub use options::{FilterScope, PipelineOptions, SizeToken, UserAgentVariant};
pub use pipeline::{VariantOutput, clean, run};
pub use rewrite::{AlternateFilter, DocumentFilter, RewriteState, SrcFilter};
