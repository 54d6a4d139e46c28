use anyhow::{Result, anyhow, bail};
use clap::Parser;
use log::{debug, info};
use std::{env, path::PathBuf};

use llmstxt_core::PathAliasTable;

use crate::{
    constants::{DEFAULT_BASE_URL, DEFAULT_SITE_DESCRIPTION, DEFAULT_SITE_TITLE},
    types::SectionRule,
};

#[derive(Debug, Clone, Parser)]
#[command(about = "Discover llms.txt page configuration in a Next.js project")]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// App-router page roots, relative to the project root
    #[arg(long = "app-dir", default_values = ["app", "src/app"])]
    pub app_dirs: Vec<PathBuf>,

    /// Pages-router page roots, relative to the project root
    #[arg(long = "pages-dir", default_values = ["pages", "src/pages"])]
    pub pages_dirs: Vec<PathBuf>,

    /// Path alias manifest, relative to the project root
    #[arg(long, default_value = "tsconfig.json")]
    pub tsconfig: PathBuf,

    /// Base URL prepended to routes in the site index
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Site title
    #[arg(long, default_value = DEFAULT_SITE_TITLE)]
    pub title: String,

    /// Site description
    #[arg(long, default_value = DEFAULT_SITE_DESCRIPTION)]
    pub description: String,

    /// Group routes under a prefix into a named section, as `Title=/prefix`
    #[arg(long = "section", value_parser = parse_section_rule)]
    pub sections: Vec<SectionRule>,

    /// Leave pages whose config came from `metadata` out of the site index
    #[arg(long)]
    pub skip_metadata_fallback: bool,

    /// Exit with a non-zero status when any page has warnings
    #[arg(long)]
    pub deny_warnings: bool,

    #[clap(skip)]
    pub aliases: PathAliasTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            app_dirs: vec![PathBuf::from("app"), PathBuf::from("src/app")],
            pages_dirs: vec![PathBuf::from("pages"), PathBuf::from("src/pages")],
            tsconfig: PathBuf::from("tsconfig.json"),
            base_url: DEFAULT_BASE_URL.to_string(),
            title: DEFAULT_SITE_TITLE.to_string(),
            description: DEFAULT_SITE_DESCRIPTION.to_string(),
            sections: Vec::new(),
            skip_metadata_fallback: false,
            deny_warnings: false,
            aliases: PathAliasTable::default(),
        }
    }
}

impl Config {
    /// Config rooted at `root`, with every other option at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()), ..Self::default() }
    }

    /// Initialize the config by resolving the root directory and loading path aliases
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, using current directory");
            env::current_dir()?
        };
        info!("Using root directory: {}", root.display());

        self.aliases = PathAliasTable::load(&root, &root.join(&self.tsconfig));
        debug!("Found {} path aliases", self.aliases.len());

        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}

fn parse_section_rule(s: &str) -> Result<SectionRule> {
    let Some((title, prefix)) = s.split_once('=') else {
        bail!("expected `Title=/prefix`, got `{}`", s);
    };
    let title = title.trim();
    let prefix = prefix.trim();
    if title.is_empty() || !prefix.starts_with('/') {
        bail!("expected `Title=/prefix`, got `{}`", s);
    }
    Ok(SectionRule { title: title.to_string(), prefix: llmstxt_core::normalize_route(prefix) })
}
