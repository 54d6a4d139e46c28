//! Static discovery of llms.txt page configuration in Next.js projects.
//!
//! Page files are found by walking the app and pages routers, parsed with
//! oxc, and searched for an `llmstxt` export (or, failing that, a `metadata`
//! export). Export values are rebuilt from the AST without executing any
//! code, following identifiers through imports, re-exports and
//! `tsconfig.json` path aliases.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use llmstxt_discovery::{Config, Discovery};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::with_root("/path/to/project");
//! let discovery = Discovery::new(&cfg)?;
//!
//! let pages = discovery.discover_pages();
//! for page in &pages {
//!     println!("{} -> {:?}", page.route, page.config);
//! }
//!
//! // Reuse the same pass for the site index
//! let site = discovery.site_config_from(&pages);
//! println!("{}", serde_json::to_string_pretty(&site)?);
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod config;
mod constants;
mod discovery;
mod extractor;
mod reporter;
mod site;
mod types;

// Re-export public API
pub use analyzer::{PageAnalyzer, route_label};
pub use config::Config;
pub use constants::{FALLBACK_EXPORT, PRIMARY_EXPORT, WARNING_PREFIX};
pub use discovery::{Discovery, collect_warnings, find_page};
pub use extractor::{ValueExtractor, declares_export};
pub use reporter::{print_no_pages_message, print_pages_tree};
pub use site::build_site_config;
pub use types::{ConfigValue, LinkEntry, PageRecord, Section, SectionRule, SiteConfig};
