use std::path::PathBuf;

/// One `compilerOptions.paths` entry with its `/*` suffixes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub prefix: String,
    /// Absolute directory the prefix stands for
    pub replacement_dir: PathBuf,
}

/// How a page-file tree maps files to routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageConvention {
    /// `app/**/page.tsx`: the directory path is the route
    App,
    /// `pages/**/*.tsx`: the directory path plus the file stem is the route
    Pages,
}

/// A page file found under a page root, with its normalized route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub route: String,
    pub file_path: PathBuf,
}
