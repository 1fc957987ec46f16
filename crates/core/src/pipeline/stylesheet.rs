use std::path::PathBuf;

use crate::{
    config::STYLESHEET_PREFIX,
    css::strip_unicode_range,
    error::Result,
    font_face::strip_quotes,
    io::{OutputFile, ensure_dir},
    options::PipelineOptions,
};

/// `font_<family>_<variant>.<ext>` with the family unquoted and lowercased.
pub fn stylesheet_name(family: &str, variant_key: &str, extension: &str) -> String {
    let family = strip_quotes(family).to_lowercase();
    format!("{STYLESHEET_PREFIX}{family}_{variant_key}.{extension}")
}

/// Persist the rewritten text of one variant and return where it went.
pub fn write_stylesheet(
    options: &PipelineOptions,
    variant_key: &str,
    family: &str,
    text: &str,
) -> Result<PathBuf> {
    ensure_dir(&options.css_destination)?;

    let name = stylesheet_name(family, variant_key, &options.stylesheet_extension);
    let path = options.css_destination.join(name);
    OutputFile::new(&path).write(strip_unicode_range(text))?;

    println!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_stylesheet_name() {
        assert_eq!(
            stylesheet_name("'Open Sans'", "default", "styl"),
            "font_open sans_default.styl"
        );
        assert_eq!(stylesheet_name("\"Lato\"", "ie", "css"), "font_lato_ie.css");
    }

    #[test]
    fn test_write_stylesheet_strips_unicode_range() {
        let dir = TempDir::new().unwrap();
        let (fonts, css) = (dir.path().join("fonts"), dir.path().join("css"));
        let options = PipelineOptions::new("Lato", [400u64], fonts, css);

        let text = "@font-face {\n  font-family: 'Lato';\n  unicode-range: U+0000-00FF;\n}\n";
        let path = write_stylesheet(&options, "default", "'Lato'", text).unwrap();

        assert_eq!(path, dir.path().join("css/font_lato_default.styl"));
        let written = read_to_string(&path).unwrap();
        assert!(!written.contains("unicode-range"));
        assert!(written.contains("font-family: 'Lato';"));
    }
}
