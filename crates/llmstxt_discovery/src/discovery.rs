use anyhow::Result;
use log::{debug, info, trace};
use path_clean::clean;
use rayon::prelude::*;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    thread,
};

use llmstxt_core::{PageConvention, PageEntry, PathAliasTable, collect_pages, normalize_route};

use crate::{
    analyzer::PageAnalyzer,
    config::Config,
    site::build_site_config,
    types::{PageRecord, SiteConfig},
};

/// Discovery engine for one project.
///
/// Holds the initialized config and the alias table, both read-only after
/// construction. Nothing is cached between passes; every call re-reads the
/// page files.
#[derive(Debug, Clone)]
pub struct Discovery {
    cfg: Config,
    root: PathBuf,
}

impl Discovery {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut cfg = cfg.clone();
        cfg.initialize()?;
        let root = cfg.root()?.clone();
        Ok(Self { cfg, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn aliases(&self) -> &PathAliasTable {
        &self.cfg.aliases
    }

    /// Every page under every configured page root, in walk order.
    ///
    /// Unreadable directories are logged and skipped; broken pages come back
    /// as records carrying a warning.
    pub fn discover_pages(&self) -> Vec<PageRecord> {
        let entries = self.collect_entries();
        info!("Analyzing {} page files", entries.len());

        let analyzer = PageAnalyzer::new(self.aliases());
        entries
            .par_iter()
            .map(|entry| {
                debug!("Thread {:?} analyzing: {}", thread::current().id(), entry.file_path.display());
                analyzer.analyze(&entry.file_path, &entry.route)
            })
            .collect()
    }

    /// Site index built from a fresh discovery pass.
    pub fn generate_site_config(&self) -> SiteConfig {
        self.site_config_from(&self.discover_pages())
    }

    /// Site index built from records of an earlier pass.
    pub fn site_config_from(&self, pages: &[PageRecord]) -> SiteConfig {
        build_site_config(pages, &self.cfg)
    }

    fn page_roots(&self) -> Vec<(PathBuf, PageConvention)> {
        let app = self.cfg.app_dirs.iter().map(|d| (d, PageConvention::App));
        let pages = self.cfg.pages_dirs.iter().map(|d| (d, PageConvention::Pages));

        let mut seen = HashSet::new();
        app.chain(pages)
            .map(|(dir, convention)| (clean(self.root.join(dir)), convention))
            .filter(|(dir, _)| seen.insert(dir.clone()))
            .collect()
    }

    fn collect_entries(&self) -> Vec<PageEntry> {
        let mut entries = Vec::new();
        for (dir, convention) in self.page_roots() {
            trace!("Collecting {:?} pages from {}", convention, dir.display());
            entries.extend(collect_pages(&dir, convention));
        }
        entries
    }
}

/// The record for `route`, compared after normalization.
pub fn find_page<'p>(pages: &'p [PageRecord], route: &str) -> Option<&'p PageRecord> {
    let route = normalize_route(route);
    pages.iter().find(|p| p.route == route)
}

/// All page warnings, in page order.
pub fn collect_warnings(pages: &[PageRecord]) -> Vec<&str> {
    pages.iter().flat_map(|p| p.warnings.iter().map(String::as_str)).collect()
}
