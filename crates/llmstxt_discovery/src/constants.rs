/// Export that carries a page's llms.txt configuration
pub const PRIMARY_EXPORT: &str = "llmstxt";

/// Next.js metadata export, used when no llms.txt export resolves
pub const FALLBACK_EXPORT: &str = "metadata";

pub const WARNING_PREFIX: &str = "[next-llms-txt]";

pub const FALLBACK_WARNING: &str =
    "Using metadata fallback for llms.txt generation - consider adding explicit llmstxt export";
pub const NO_EXPORTS_WARNING: &str =
    "No llms.txt export or metadata found - cannot generate llms.txt entry";
pub const UNRESOLVED_PRIMARY_WARNING: &str = "llmstxt export could not be statically resolved";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SITE_TITLE: &str = "My llms.txt Site";
pub const DEFAULT_SITE_DESCRIPTION: &str = "This is my llms.txt generated site.";
pub const MAIN_SECTION_TITLE: &str = "Main Pages";

pub const HOME_LABEL: &str = "Home";

/// Upper bound on files entered through imports and re-exports for one value
pub const MAX_REFERENCE_DEPTH: usize = 32;
