use anyhow::{Context, Result, bail};
use log::trace;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{fs, path::Path};

/// Reads and parses `file`, handing the module AST to `f`.
///
/// The AST lives in an arena that is dropped when this returns, so `f`
/// must produce owned data. Any syntax error fails the whole parse.
pub fn parse_file<T>(file: &Path, f: impl FnOnce(&Program<'_>) -> T) -> Result<T> {
    trace!("Parsing file: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    parse_source(file, &src, f)
}

/// Parses `src` as if it were the contents of `file`.
pub fn parse_source<T>(file: &Path, src: &str, f: impl FnOnce(&Program<'_>) -> T) -> Result<T> {
    let st = source_type_for(file);
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, src, st).parse();

    if panicked || !errors.is_empty() {
        let reason = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        bail!("Failed to parse {}: {}", file.display(), reason);
    }

    Ok(f(&program))
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    // Page and config files are always ES modules
    SourceType::default()
        .with_module(true)
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx") | Some("js")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
}
