//! CLI definitions and command dispatch.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use local_googlefont::{FilterScope, HttpTransport, PipelineOptions, SizeToken, clean, run};

use crate::targets::{Target, load_targets};

#[derive(Parser)]
#[command(name = "local-googlefont", version)]
#[command(about = "Mirror Google Fonts stylesheets and font files for offline builds")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct TargetArgs {
    /// JSON file mapping target names to options
    #[arg(short, long, conflicts_with = "family")]
    pub config: Option<PathBuf>,
    /// Only use this target from the options file
    #[arg(short, long, requires = "config")]
    pub target: Option<String>,

    /// Font family to request
    #[arg(long)]
    pub family: Option<String>,
    /// Weights/styles to request (e.g. 400,700italic)
    #[arg(long = "size", value_delimiter = ',')]
    pub sizes: Vec<String>,
    /// Character subsets to request
    #[arg(long = "subset", value_delimiter = ',')]
    pub subsets: Vec<String>,
    /// User-agent variant as KEY=USER_AGENT (repeatable)
    #[arg(long = "user-agent", value_parser = parse_user_agent)]
    pub user_agents: Vec<(String, String)>,
    /// Directory for downloaded fonts
    #[arg(long)]
    pub font_destination: Option<PathBuf>,
    /// Directory for stylesheet fragments
    #[arg(long)]
    pub css_destination: Option<PathBuf>,
    /// Prefix removed from font paths written into the CSS
    #[arg(long)]
    pub font_base_dir: Option<PathBuf>,
    /// Fail on non-2xx responses instead of parsing the body anyway
    #[arg(long)]
    pub strict_status: bool,
    /// Request timeout in seconds (default: wait forever)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Where woff2 alternates are removed: document or rule
    #[arg(long, default_value = "document")]
    pub filter_scope: FilterScope,
}

fn parse_user_agent(s: &str) -> Result<(String, String), String> {
    let (key, user_agent) =
        s.split_once('=').ok_or_else(|| format!("expected KEY=USER_AGENT: {s}"))?;
    if key.is_empty() {
        return Err(format!("empty user-agent key: {s}"));
    }
    Ok((key.to_owned(), user_agent.to_owned()))
}

impl TargetArgs {
    /// Targets from the options file, or a single target built from flags.
    pub fn targets(&self) -> Result<Vec<Target>> {
        if let Some(config) = &self.config {
            return load_targets(config, self.target.as_deref());
        }

        let font_destination =
            self.font_destination.clone().context("Missing --font-destination")?;
        let css_destination = self.css_destination.clone().context("Missing --css-destination")?;

        let sizes = self.sizes.iter().map(|s| SizeToken::from(s.as_str()));
        let mut options = PipelineOptions::new(
            self.family.clone().unwrap_or_default(),
            sizes,
            font_destination,
            css_destination,
        )
        .strict_status(self.strict_status)
        .with_filter_scope(self.filter_scope);

        if !self.subsets.is_empty() {
            options = options.with_subsets(self.subsets.iter().cloned());
        }
        for (key, user_agent) in &self.user_agents {
            options = options.with_user_agent(key, user_agent);
        }
        if let Some(dir) = &self.font_base_dir {
            options = options.with_font_base_dir(dir);
        }
        if let Some(secs) = self.timeout_secs {
            options = options.with_timeout_secs(secs);
        }

        let name = options.family.clone();
        Ok(vec![Target { name, options }])
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download fonts and write localized stylesheets
    Fetch {
        #[command(flatten)]
        args: TargetArgs,
    },
    /// Remove the font and stylesheet destinations
    Clean {
        #[command(flatten)]
        args: TargetArgs,
    },
    /// Print the provider URL of each target
    Url {
        #[command(flatten)]
        args: TargetArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Fetch { args } => fetch(&args.targets()?),
            Commands::Clean { args } => {
                let mut removed = 0;
                for target in args.targets()? {
                    removed += clean(&target.options)?;
                }
                println!("Cleaned {removed} directories");
                Ok(())
            }
            Commands::Url { args } => {
                for target in args.targets()? {
                    target.options.validate()?;
                    println!("{}: {}", target.name, target.options.provider_url());
                }
                Ok(())
            }
        }
    }
}

fn fetch(targets: &[Target]) -> Result<()> {
    if targets.is_empty() {
        bail!("No targets to fetch");
    }

    let total = targets.len();
    for (i, target) in targets.iter().enumerate() {
        println!("\n[{}/{total}] {}", i + 1, target.name);
        let start = Instant::now();

        let options = &target.options;
        options.validate()?;
        let timeout = options.timeout_secs.map(Duration::from_secs);
        let transport = HttpTransport::new(timeout, options.strict_status)?;
        let outputs = run(options, &transport)
            .with_context(|| format!("Failed to mirror target '{}'", target.name))?;

        let fonts: usize = outputs.iter().map(|o| o.fonts.len()).sum();
        println!(
            "  ✓ {} ({} stylesheet(s), {fonts} font(s), {:.2}s)",
            target.name,
            outputs.len(),
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> TargetArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Fetch { args } => args,
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_parse_user_agent() {
        assert_eq!(
            parse_user_agent("ie=Mozilla/5.0 (compatible; MSIE 9.0)").unwrap(),
            ("ie".to_string(), "Mozilla/5.0 (compatible; MSIE 9.0)".to_string())
        );
        assert!(parse_user_agent("no-separator").is_err());
        assert!(parse_user_agent("=UA").is_err());
    }

    #[test]
    fn test_flags_build_single_target() {
        let args = parse(&[
            "local-googlefont",
            "fetch",
            "--family",
            "Open Sans",
            "--size",
            "400,700",
            "--subset",
            "latin",
            "--user-agent",
            "ttf=UA-ttf",
            "--font-destination",
            "fonts",
            "--css-destination",
            "css",
            "--filter-scope",
            "rule",
        ]);
        let targets = args.targets().unwrap();

        assert_eq!(targets.len(), 1);
        let options = &targets[0].options;
        assert_eq!(targets[0].name, "Open Sans");
        assert_eq!(options.filter_scope, FilterScope::Rule);
        assert_eq!(options.variants()[0].key, "ttf");
        assert_eq!(
            options.provider_url(),
            "http://fonts.googleapis.com/css?family=Open Sans:400,700&subset=latin"
        );
    }

    #[test]
    fn test_missing_destination() {
        let args = parse(&["local-googlefont", "fetch", "--family", "Lato", "--size", "400"]);
        assert!(args.targets().is_err());
    }

    #[test]
    fn test_missing_sizes_fails_validation() {
        let args = parse(&[
            "local-googlefont",
            "fetch",
            "--family",
            "Lato",
            "--font-destination",
            "fonts",
            "--css-destination",
            "css",
        ]);
        let targets = args.targets().unwrap();
        assert!(fetch(&targets).is_err());
    }

    #[test]
    fn test_config_conflicts_with_family() {
        let result = Cli::try_parse_from([
            "local-googlefont",
            "fetch",
            "--config",
            "fonts.json",
            "--family",
            "Lato",
        ]);
        assert!(result.is_err());
    }
}
