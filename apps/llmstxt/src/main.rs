use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use llmstxt_discovery::{Config, Discovery};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "llmstxt")]
#[command(about = "Statically discover llms.txt configuration in Next.js projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every page with its resolved configuration and warnings
    Discover(Config),
    /// Print the aggregated site configuration as JSON
    Site(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Discover(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running page discovery (using {} threads)", num_threads);

            let discovery = Discovery::new(&cfg)?;
            let pages = discovery.discover_pages();
            let warnings = llmstxt_discovery::collect_warnings(&pages);
            debug!("Found {} pages with {} warnings", pages.len(), warnings.len());

            if pages.is_empty() {
                llmstxt_discovery::print_no_pages_message(&mut stdout, discovery.root())?;
            } else {
                llmstxt_discovery::print_pages_tree(&mut stdout, &pages, discovery.root())?;
            }

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                start.elapsed().as_millis().to_string().cyan(),
                pages.len().to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            if cfg.deny_warnings && !warnings.is_empty() {
                // Non-zero exit to fail CI
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Site(cfg) => {
            let discovery = Discovery::new(&cfg)?;
            let site = discovery.generate_site_config();
            info!("Generated site index in {}ms", start.elapsed().as_millis());

            serde_json::to_writer_pretty(&mut stdout, &site)?;
            writeln!(stdout)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
