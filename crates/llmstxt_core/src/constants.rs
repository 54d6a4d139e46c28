//! Constants for file extensions and page-file conventions.
//!
//! Resolution and page detection both read from here so that probing order
//! and accepted extensions stay consistent across the workspace.
//!
//! ## Probing order
//!
//! TypeScript sources are preferred over JavaScript, and plain extensions over
//! the module-system specific ones (`.mts`/`.cts`, `.mjs`/`.cjs`).

/// Extensions to try when resolving module imports (in priority order)
pub const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Index file names to try when resolving directory imports
pub const INDEX_FILES: &[&str] = &[
    "index.ts",
    "index.tsx",
    "index.mts",
    "index.cts",
    "index.js",
    "index.jsx",
    "index.mjs",
    "index.cjs",
];

/// Extensions a page file may carry
pub const PAGE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// File stem that marks an app-router page (`page.tsx`, `page.ts`, ...)
pub const APP_PAGE_STEM: &str = "page";

/// Top-level directory of a pages-router tree that holds API routes, not pages
pub const PAGES_API_DIR: &str = "api";
