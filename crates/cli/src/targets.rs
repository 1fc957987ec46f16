//! Named option sets, loaded from a JSON file or built from flags.

use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use local_googlefont::PipelineOptions;
use log::info;

/// One named option set.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub options: PipelineOptions,
}

/// Load a `{ "<target>": { options... } }` file, keeping file order.
///
/// With `only`, return just that target.
pub fn load_targets(path: &Path, only: Option<&str>) -> Result<Vec<Target>> {
    let text = read_to_string(path)
        .with_context(|| format!("Failed to read options file: {}", path.display()))?;
    let targets: IndexMap<String, PipelineOptions> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse options file: {}", path.display()))?;

    let targets: Vec<Target> = targets
        .into_iter()
        .filter(|(name, _)| only.is_none_or(|only| only == name.as_str()))
        .map(|(name, options)| Target { name, options })
        .collect();
    info!("Loaded {} target(s) from {}", targets.len(), path.display());

    if let Some(name) = only
        && targets.is_empty()
    {
        bail!("Target '{name}' not found in {}", path.display());
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use local_googlefont::{FilterScope, SizeToken};
    use tempfile::TempDir;

    use super::*;

    const OPTIONS: &str = r#"{
        "openSans": {
            "family": "Open Sans",
            "sizes": [400, "700italic"],
            "subsets": ["latin", "cyrillic"],
            "userAgents": { "woff": "UA-woff", "ttf": "UA-ttf" },
            "fontDestination": "public/fonts",
            "cssDestination": "styles/fonts",
            "fontBaseDir": "public",
            "filterScope": "rule"
        },
        "lato": {
            "family": "Lato",
            "sizes": [300],
            "fontDestination": "fonts",
            "cssDestination": "css",
            "strictStatus": true,
            "timeoutSecs": 30
        }
    }"#;

    fn options_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("fonts.json");
        write(&path, OPTIONS).unwrap();
        path
    }

    #[test]
    fn test_load_all_targets_in_order() {
        let dir = TempDir::new().unwrap();
        let targets = load_targets(&options_file(&dir), None).unwrap();

        let names: Vec<_> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["openSans", "lato"]);

        let open_sans = &targets[0].options;
        assert_eq!(open_sans.sizes, [SizeToken::Number(400), SizeToken::Text("700italic".into())]);
        assert_eq!(open_sans.filter_scope, FilterScope::Rule);
        assert_eq!(open_sans.stylesheet_extension, "styl");
        let keys: Vec<_> = open_sans.variants().into_iter().map(|v| v.key).collect();
        assert_eq!(keys, ["woff", "ttf"]);
        assert_eq!(
            open_sans.provider_url(),
            "http://fonts.googleapis.com/css?family=Open Sans:400,700italic&subset=latin,cyrillic"
        );
    }

    #[test]
    fn test_load_single_target() {
        let dir = TempDir::new().unwrap();
        let targets = load_targets(&options_file(&dir), Some("lato")).unwrap();

        assert_eq!(targets.len(), 1);
        assert!(targets[0].options.strict_status);
        assert_eq!(targets[0].options.timeout_secs, Some(30));
        assert_eq!(targets[0].options.variants()[0].key, "default");
    }

    #[test]
    fn test_unknown_target() {
        let dir = TempDir::new().unwrap();
        assert!(load_targets(&options_file(&dir), Some("roboto")).is_err());
    }

    #[test]
    fn test_missing_family_is_left_to_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fonts.json");
        let json = r#"{ "t": { "sizes": [400], "fontDestination": "f", "cssDestination": "c" } }"#;
        write(&path, json).unwrap();

        let targets = load_targets(&path, None).unwrap();
        assert!(targets[0].options.validate().is_err());
    }
}
