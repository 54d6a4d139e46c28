use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::path::Path;

use crate::{
    constants::{APP_PAGE_STEM, PAGE_EXTENSIONS, PAGES_API_DIR},
    types::{PageConvention, PageEntry},
};

/// Walks a page-file tree and returns every page file with its route.
///
/// Route groups (`(marketing)`) and private folders (`_components`) hide
/// everything beneath them. A missing root yields no pages, and an
/// unreadable entry is skipped without losing its siblings.
pub fn collect_pages(root: &Path, convention: PageConvention) -> Vec<PageEntry> {
    if !root.is_dir() {
        debug!("Page root {} does not exist, skipping", root.display());
        return Vec::new();
    }
    debug!("Walking {:?} page tree from root: {}", convention, root.display());

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| dent.depth() == 0 || !is_hidden_dir(dent, convention))
        .build();

    let mut pages = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let p = dent.path();
        let Ok(rel) = p.strip_prefix(root) else {
            continue;
        };
        let Some(route) = route_for(rel, convention) else {
            trace!("Not a page file: {}", p.display());
            continue;
        };

        trace!("Found page {} at {}", route, p.display());
        pages.push(PageEntry { route, file_path: p.to_path_buf() });
    }

    debug!("Collected {} pages under {}", pages.len(), root.display());
    pages
}

fn is_hidden_dir(dent: &DirEntry, convention: PageConvention) -> bool {
    if !dent.file_type().is_some_and(|ft| ft.is_dir()) {
        return false;
    }
    let name = dent.file_name().to_string_lossy();
    if name.starts_with('(') || name.starts_with('_') {
        trace!("Skipping structural directory: {}", dent.path().display());
        return true;
    }
    convention == PageConvention::Pages && dent.depth() == 1 && name == PAGES_API_DIR
}

/// Route for a file at `rel` (relative to the page root), if it is a page.
fn route_for(rel: &Path, convention: PageConvention) -> Option<String> {
    let stem = rel.file_stem()?.to_str()?;
    let ext = rel.extension()?.to_str()?;
    if !PAGE_EXTENSIONS.contains(&ext) {
        return None;
    }

    let mut segments: Vec<&str> = rel
        .parent()
        .into_iter()
        .flat_map(|parent| parent.iter())
        .map(|s| s.to_str())
        .collect::<Option<_>>()?;

    match convention {
        PageConvention::App if stem == APP_PAGE_STEM => {}
        PageConvention::Pages if !stem.starts_with('_') => segments.push(stem),
        _ => return None,
    }

    Some(normalize_route(&format!("/{}", segments.join("/"))))
}

/// Canonical form of a route: leading `/`, no trailing `/index` or `/`.
///
/// `/a/b/index` -> `/a/b`, `/index` -> `/`, `/a/b/` -> `/a/b`. Applying it
/// twice gives the same result as applying it once.
pub fn normalize_route(route: &str) -> String {
    let mut r = route.replace('\\', "/");
    if !r.starts_with('/') {
        r.insert(0, '/');
    }

    loop {
        if r.len() > 1 && r.ends_with('/') {
            r.pop();
        } else if let Some(stripped) = r.strip_suffix("/index") {
            r = if stripped.is_empty() { "/".to_string() } else { stripped.to_string() };
        } else {
            return r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn routes(pages: &[PageEntry]) -> Vec<&str> {
        pages.iter().map(|p| p.route.as_str()).collect()
    }

    #[test]
    fn test_normalize_route_cases() {
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route("/index"), "/");
        assert_eq!(normalize_route("/a/b/index"), "/a/b");
        assert_eq!(normalize_route("/a/b/"), "/a/b");
        assert_eq!(normalize_route("a/b"), "/a/b");
        assert_eq!(normalize_route("\\a\\b"), "/a/b");
        assert_eq!(normalize_route("/a/reindex"), "/a/reindex");
    }

    #[test]
    fn test_normalize_route_idempotent() {
        for r in ["/", "/index", "/a/index/", "/a/index/index", "//", "/a/b/", "docs", "/x/y"] {
            let once = normalize_route(r);
            assert_eq!(normalize_route(&once), once, "not idempotent for {:?}", r);
        }
    }

    #[test]
    fn test_app_routes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "page.tsx", "");
        create_test_file(root, "about/page.tsx", "");
        create_test_file(root, "docs/getting-started/page.ts", "");
        create_test_file(root, "docs/layout.tsx", "");
        create_test_file(root, "blog/[slug]/page.jsx", "");

        let pages = collect_pages(root, PageConvention::App);
        // Siblings are visited in file-name order, depth first
        assert_eq!(routes(&pages), vec!["/about", "/blog/[slug]", "/docs/getting-started", "/"]);
        assert_eq!(pages[0].file_path, root.join("about/page.tsx"));
    }

    #[test]
    fn test_groups_and_private_folders_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "page.tsx", "");
        create_test_file(root, "(group)/x/page.tsx", "");
        create_test_file(root, "(group)/page.tsx", "");
        create_test_file(root, "_private/page.tsx", "");
        create_test_file(root, "docs/_drafts/deep/page.tsx", "");

        let pages = collect_pages(root, PageConvention::App);
        assert_eq!(routes(&pages), vec!["/"]);
    }

    #[test]
    fn test_non_page_extensions_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "page.mdx", "");
        create_test_file(root, "page.css", "");
        create_test_file(root, "about/page.module.css", "");

        let pages = collect_pages(root, PageConvention::App);
        assert!(pages.is_empty());
    }

    #[test]
    fn test_pages_convention_routes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "index.tsx", "");
        create_test_file(root, "about.tsx", "");
        create_test_file(root, "docs/index.ts", "");
        create_test_file(root, "docs/intro.js", "");
        create_test_file(root, "_app.tsx", "");
        create_test_file(root, "_document.tsx", "");
        create_test_file(root, "api/hello.ts", "");

        let pages = collect_pages(root, PageConvention::Pages);
        assert_eq!(routes(&pages), vec!["/about", "/docs", "/docs/intro", "/"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let pages = collect_pages(&temp_dir.path().join("app"), PageConvention::App);
        assert!(pages.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_keeps_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "page.tsx", "");
        create_test_file(root, "about/page.tsx", "");
        create_test_file(root, "locked/page.tsx", "");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop a privileged user
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let pages = collect_pages(root, PageConvention::App);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(routes(&pages), vec!["/about", "/"]);
    }

    #[test]
    fn test_root_named_like_group_is_walked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("(site)");
        create_test_file(&root, "page.tsx", "");

        let pages = collect_pages(&root, PageConvention::App);
        assert_eq!(routes(&pages), vec!["/"]);
    }
}
