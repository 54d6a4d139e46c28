use log::trace;
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::{
    aliases::PathAliasTable,
    constants::{INDEX_FILES, RESOLVE_EXTENSIONS},
};

/// Resolves `request` as written in `from_file` to a first-party source file.
///
/// Aliases are tried first, then relative specifiers. Bare package
/// specifiers never resolve: values are only read from project files.
pub fn resolve(aliases: &PathAliasTable, from_file: &Path, request: &str) -> Option<PathBuf> {
    trace!("Resolving: '{}' from {}", request, from_file.display());

    for candidate in aliases.candidates(request) {
        trace!("Trying alias candidate {} for '{}'", candidate.display(), request);
        if let Some(resolved) = resolve_file(&candidate) {
            trace!("Resolved alias import '{}' to {}", request, resolved.display());
            return Some(resolved);
        }
    }

    if request.starts_with('.') {
        let base = from_file.parent().unwrap_or(Path::new("."));
        let result = resolve_file(&clean(base.join(request)));
        match &result {
            Some(resolved) => {
                trace!("Resolved relative import '{}' to {}", request, resolved.display())
            }
            None => trace!("Failed to resolve relative import '{}'", request),
        }
        return result;
    }

    trace!("Not resolving package import '{}'", request);
    None
}

/// Probes `p`, then `p.<ext>`, then `p/index.<ext>`; the first file wins.
fn resolve_file(p: &Path) -> Option<PathBuf> {
    if p.is_file() {
        return Some(p.to_path_buf());
    }

    for ext in RESOLVE_EXTENSIONS {
        let candidate = PathBuf::from(format!("{}.{}", p.display(), ext));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    for index_file in INDEX_FILES {
        let candidate = p.join(index_file);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}
