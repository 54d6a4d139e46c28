//! Core utilities for llms.txt discovery.
//!
//! This crate provides the project-level plumbing that static discovery
//! builds on:
//! - Walking page-file trees into normalized routes
//! - Loading `tsconfig.json` path aliases (JSON with comments)
//! - Resolving module specifiers (aliases, relative paths, index files)
//! - Parsing JS/TS sources into an oxc AST

mod aliases;
mod collector;
mod constants;
mod jsonc;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use aliases::PathAliasTable;
pub use collector::{collect_pages, normalize_route};
pub use constants::{
    APP_PAGE_STEM, INDEX_FILES, PAGE_EXTENSIONS, PAGES_API_DIR, RESOLVE_EXTENSIONS,
};
pub use jsonc::strip_json_comments;
pub use parser::{parse_file, parse_source};
pub use resolver::resolve;
pub use types::{AliasEntry, PageConvention, PageEntry};
