use anyhow::{Context, Result};
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{jsonc::strip_json_comments, types::AliasEntry};

/// Prefix substitutions read from a project's `compilerOptions.paths`.
///
/// Built once per engine and never reloaded. Entries keep manifest
/// declaration order and the first matching prefix wins.
#[derive(Debug, Clone, Default)]
pub struct PathAliasTable {
    entries: Vec<AliasEntry>,
}

impl PathAliasTable {
    /// Loads aliases from `manifest`, resolving targets against `root`.
    ///
    /// A missing or malformed manifest leaves the table empty; callers then
    /// resolve every import as a plain relative import.
    pub fn load(root: &Path, manifest: &Path) -> Self {
        debug!("Reading path aliases from {}", manifest.display());
        if !manifest.is_file() {
            debug!("No alias manifest at {}", manifest.display());
            return Self::default();
        }

        let table = fs::read_to_string(manifest)
            .with_context(|| format!("Failed to read {}", manifest.display()))
            .and_then(|content| Self::from_manifest_str(root, &content));

        match table {
            Ok(table) => {
                debug!("Loaded {} path aliases", table.len());
                table
            }
            Err(e) => {
                warn!("Ignoring path aliases from {}: {:#}", manifest.display(), e);
                Self::default()
            }
        }
    }

    /// Parses JSONC manifest text into an alias table.
    pub fn from_manifest_str(root: &Path, content: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(&strip_json_comments(content))
            .context("Alias manifest is not valid JSON")?;

        let Some(compiler_options) = json.get("compilerOptions") else {
            return Ok(Self::default());
        };
        let Some(paths) = compiler_options.get("paths").and_then(|p| p.as_object()) else {
            return Ok(Self::default());
        };
        let base_url = compiler_options.get("baseUrl").and_then(|b| b.as_str()).unwrap_or(".");
        let base_path = root.join(base_url);

        let mut entries = Vec::new();
        for (alias, targets) in paths {
            // Only the first target of each alias is honored
            let Some(target) = targets.as_array().and_then(|t| t.first()).and_then(|t| t.as_str())
            else {
                trace!("Skipping alias '{}' without a usable target", alias);
                continue;
            };

            let prefix = alias.strip_suffix("/*").unwrap_or(alias).to_string();
            let target = target.strip_suffix("/*").unwrap_or(target);
            let replacement_dir = clean(base_path.join(target));
            trace!("Found path alias: '{}' -> {}", prefix, replacement_dir.display());
            entries.push(AliasEntry { prefix, replacement_dir });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate paths for `specifier`, one per matching alias, in table order.
    pub fn candidates<'s>(&'s self, specifier: &'s str) -> impl Iterator<Item = PathBuf> + 's {
        self.entries.iter().filter_map(move |entry| {
            let rest = specifier.strip_prefix(entry.prefix.as_str())?;
            let rest = rest.trim_start_matches('/');
            Some(if rest.is_empty() {
                entry.replacement_dir.clone()
            } else {
                clean(entry.replacement_dir.join(rest))
            })
        })
    }
}
