use log::{debug, trace, warn};
use oxc_ast::ast::Program;
use serde_json::{Map, json};
use std::path::Path;

use llmstxt_core::{PathAliasTable, parse_file};

use crate::{
    constants::{
        FALLBACK_EXPORT, FALLBACK_WARNING, HOME_LABEL, NO_EXPORTS_WARNING, PRIMARY_EXPORT,
        UNRESOLVED_PRIMARY_WARNING, WARNING_PREFIX,
    },
    extractor::{ValueExtractor, declares_export},
    types::{ConfigValue, PageRecord},
};

/// Turns one page file into a [`PageRecord`].
///
/// Never fails: unreadable or malformed files become a record with a warning.
#[derive(Debug, Clone, Copy)]
pub struct PageAnalyzer<'t> {
    aliases: &'t PathAliasTable,
}

impl<'t> PageAnalyzer<'t> {
    pub fn new(aliases: &'t PathAliasTable) -> Self {
        Self { aliases }
    }

    pub fn analyze(&self, file: &Path, route: &str) -> PageRecord {
        trace!("Analyzing {} for route {}", file.display(), route);

        match parse_file(file, |program| self.analyze_program(program, file, route)) {
            Ok(record) => record,
            Err(e) => {
                let mut record = PageRecord::new(route, file);
                push_warning(&mut record, &format!("Failed to analyze page: {:#}", e));
                record
            }
        }
    }

    fn analyze_program(&self, program: &Program<'_>, file: &Path, route: &str) -> PageRecord {
        let mut record = PageRecord::new(route, file);
        let mut extractor = ValueExtractor::new(self.aliases);

        record.has_primary_export = declares_export(program, PRIMARY_EXPORT);
        record.has_fallback_export = declares_export(program, FALLBACK_EXPORT);

        if let Some(value) = extractor.find_export(program, file, PRIMARY_EXPORT) {
            debug!("Resolved {} export for {}", PRIMARY_EXPORT, route);
            record.has_primary_export = true;
            record.config = Some(value);
            return record;
        }
        if record.has_primary_export {
            push_warning(&mut record, UNRESOLVED_PRIMARY_WARNING);
        }

        if let Some(fallback) = extractor.find_export(program, file, FALLBACK_EXPORT) {
            debug!("Using {} export for {}", FALLBACK_EXPORT, route);
            record.has_fallback_export = true;
            record.uses_fallback = true;
            record.config = Some(synthesize_from_fallback(&fallback, route));
            push_warning(&mut record, FALLBACK_WARNING);
        } else if !record.has_primary_export {
            push_warning(&mut record, NO_EXPORTS_WARNING);
        }

        record
    }
}

/// `{ title, description }` built from a metadata value, with route-derived
/// defaults for whatever it lacks.
fn synthesize_from_fallback(fallback: &ConfigValue, route: &str) -> ConfigValue {
    let title = match fallback.get("title") {
        Some(ConfigValue::String(s)) => Some(s.as_str()),
        // Next.js title templates: { default, template }
        Some(ConfigValue::Object(obj)) => obj.get("default").and_then(ConfigValue::as_str),
        _ => None,
    }
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .unwrap_or_else(|| route_label(route));

    let description = fallback
        .get("description")
        .and_then(ConfigValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Page: {}", route));

    let mut config = Map::new();
    config.insert("title".to_string(), json!(title));
    config.insert("description".to_string(), json!(description));
    ConfigValue::Object(config)
}

fn push_warning(record: &mut PageRecord, message: &str) {
    let warning = format!("{} {} ({})", WARNING_PREFIX, message, record.route);
    warn!("{}", warning);
    record.warnings.push(warning);
}

/// Human-readable label for a route: `/` is `Home`, `/docs/getting-started`
/// is `Docs - Getting-started`.
pub fn route_label(route: &str) -> String {
    if route == "/" {
        return HOME_LABEL.to_string();
    }
    route
        .split('/')
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" - ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
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

    fn analyze(root: &Path, path: &str, content: &str, route: &str) -> PageRecord {
        let file = create_test_file(root, path, content);
        let aliases = PathAliasTable::default();
        PageAnalyzer::new(&aliases).analyze(&file, route)
    }

    #[test]
    fn test_route_label() {
        assert_eq!(route_label("/"), "Home");
        assert_eq!(route_label("/about"), "About");
        assert_eq!(route_label("/docs/getting-started"), "Docs - Getting-started");
        assert_eq!(route_label("/blog/[slug]"), "Blog - [slug]");
    }

    #[test]
    fn test_primary_export() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            "export const llmstxt = { title: 'Home', description: 'Welcome' };",
            "/",
        );

        assert!(record.has_primary_export);
        assert!(!record.has_fallback_export);
        assert!(!record.uses_fallback);
        assert_eq!(record.config, Some(json!({ "title": "Home", "description": "Welcome" })));
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            r#"
export const metadata = { title: 'Meta', description: 'From metadata' };
export const llmstxt = { title: 'Primary', description: 'From llmstxt' };
"#,
            "/",
        );

        assert!(record.has_primary_export);
        assert!(record.has_fallback_export);
        assert!(!record.uses_fallback);
        assert_eq!(record.config_str("title"), Some("Primary"));
        assert_eq!(record.config_str("description"), Some("From llmstxt"));
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_fallback_only() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/about/page.tsx",
            "export const metadata = { title: 'About', description: 'About us', keywords: ['x'] };",
            "/about",
        );

        assert!(!record.has_primary_export);
        assert!(record.has_fallback_export);
        assert!(record.uses_fallback);
        assert_eq!(record.config, Some(json!({ "title": "About", "description": "About us" })));
        assert_eq!(
            record.warnings,
            vec![format!("{} {} (/about)", WARNING_PREFIX, FALLBACK_WARNING)]
        );
    }

    #[test]
    fn test_fallback_defaults_from_route() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/docs/intro/page.tsx",
            "export const metadata = { title: '', robots: 'index' };",
            "/docs/intro",
        );

        assert_eq!(
            record.config,
            Some(json!({ "title": "Docs - Intro", "description": "Page: /docs/intro" }))
        );
    }

    #[test]
    fn test_fallback_title_template_object() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            "export const metadata = { title: { default: 'Acme', template: '%s | Acme' } };",
            "/",
        );

        assert_eq!(record.config_str("title"), Some("Acme"));
        assert_eq!(record.config_str("description"), Some("Page: /"));
    }

    #[test]
    fn test_unresolvable_primary_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            "export const llmstxt = buildConfig();\nexport const metadata = { title: 'Meta' };",
            "/",
        );

        assert!(record.has_primary_export);
        assert!(record.has_fallback_export);
        assert!(record.uses_fallback);
        assert_eq!(record.config_str("title"), Some("Meta"));
        assert_eq!(record.warnings.len(), 2);
        assert!(record.warnings[0].contains(UNRESOLVED_PRIMARY_WARNING));
        assert!(record.warnings[1].contains(FALLBACK_WARNING));
    }

    #[test]
    fn test_unresolvable_primary_without_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            "export const llmstxt = buildConfig();",
            "/",
        );

        assert!(record.has_primary_export);
        assert!(!record.has_fallback_export);
        assert!(record.config.is_none());
        assert_eq!(
            record.warnings,
            vec![format!("{} {} (/)", WARNING_PREFIX, UNRESOLVED_PRIMARY_WARNING)]
        );
    }

    #[test]
    fn test_no_exports() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/page.tsx",
            "export default function Page() { return null }",
            "/",
        );

        assert!(!record.has_primary_export);
        assert!(!record.has_fallback_export);
        assert!(record.config.is_none());
        assert_eq!(record.warnings, vec![format!("{} {} (/)", WARNING_PREFIX, NO_EXPORTS_WARNING)]);
    }

    #[test]
    fn test_parse_failure_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let record = analyze(
            temp_dir.path(),
            "app/broken/page.tsx",
            "export const llmstxt = { title: ",
            "/broken",
        );

        assert!(!record.has_primary_export);
        assert!(!record.has_fallback_export);
        assert!(record.config.is_none());
        assert_eq!(record.warnings.len(), 1);
        assert!(record.warnings[0].starts_with("[next-llms-txt] Failed to analyze page:"));
        assert!(record.warnings[0].ends_with("(/broken)"));
    }

    #[test]
    fn test_primary_from_other_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "lib/seo.ts", "export const docsSeo = { title: 'Docs' };");
        let record = analyze(
            root,
            "app/docs/page.tsx",
            "export { docsSeo as llmstxt } from '../../lib/seo';",
            "/docs",
        );

        assert!(record.has_primary_export);
        assert_eq!(record.config, Some(json!({ "title": "Docs" })));
    }
}
