use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;

use crate::types::PageRecord;

/// Where a page's config came from, for display.
fn config_source(page: &PageRecord) -> &'static str {
    match (&page.config, page.uses_fallback) {
        (None, _) => "none",
        (Some(_), true) => "metadata",
        (Some(_), false) => "llmstxt",
    }
}

pub fn print_pages_tree<W: Write>(writer: &mut W, pages: &[PageRecord], root: &Path) -> io::Result<()> {
    debug!("Printing tree for {} pages", pages.len());

    writeln!(writer, "{} Discovered {} pages\n", "●".bright_blue(), pages.len().to_string().cyan())?;

    for page in pages {
        let display_path = page.file_path.strip_prefix(root).unwrap_or(&page.file_path);
        let route = match config_source(page) {
            "llmstxt" => page.route.green().bold(),
            "metadata" => page.route.yellow().bold(),
            _ => page.route.red().bold(),
        };
        writeln!(writer, "{} {}", route, display_path.display().to_string().blue())?;

        let mut lines = Vec::new();
        lines.push(format!("source: {}", config_source(page)));
        if let Some(title) = page.config_str("title") {
            lines.push(format!("title: {}", title));
        }
        if let Some(description) = page.config_str("description") {
            lines.push(format!("description: {}", description));
        }
        let warning_lines = page.warnings.len();
        lines.extend(page.warnings.iter().cloned());

        for (idx, line) in lines.iter().enumerate() {
            let is_last = idx == lines.len() - 1;
            let prefix = if is_last { "└──" } else { "├──" };
            if idx >= lines.len() - warning_lines {
                writeln!(writer, "{}  {} {}", prefix.dimmed(), "⚠".yellow(), line.yellow())?;
            } else {
                writeln!(writer, "{}  {}", prefix.dimmed(), line)?;
            }
        }
        writeln!(writer)?;
    }

    print_summary(writer, pages)?;
    writer.flush()?;
    Ok(())
}

pub fn print_no_pages_message<W: Write>(writer: &mut W, root: &Path) -> io::Result<()> {
    writeln!(writer, "{} No page files found under {}", "✓".green().bold(), root.display())?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, pages: &[PageRecord]) -> io::Result<()> {
    let primary = pages.iter().filter(|p| p.config.is_some() && !p.uses_fallback).count();
    let fallback = pages.iter().filter(|p| p.uses_fallback).count();
    let missing = pages.iter().filter(|p| p.config.is_none()).count();
    let warnings: usize = pages.iter().map(|p| p.warnings.len()).sum();

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  llmstxt exports: {}", primary.to_string().green().bold())?;
    writeln!(writer, "  metadata fallbacks: {}", fallback.to_string().yellow().bold())?;
    writeln!(writer, "  without config: {}", missing.to_string().red().bold())?;
    writeln!(writer, "  warnings: {}", warnings.to_string().yellow())?;
    Ok(())
}
