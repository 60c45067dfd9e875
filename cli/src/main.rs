//! highlight-md CLI - collect highlighted PDF passages into Markdown notes

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use highlight_md::render::to_json;
use highlight_md::{
    open_pdf, open_pdf_with_options, read_toc, Config, JsonFormat, MarkdownWorkspace,
    MemoryProvider, PdfProvider, WriteOutcome,
};

#[derive(Parser)]
#[command(name = "highlight-md")]
#[command(version)]
#[command(about = "Collect highlighted PDF passages into Markdown notes", long_about = None)]
struct Cli {
    /// Configuration file used when no subcommand is given
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the configured page range into the Markdown workspace
    Run {
        /// Configuration file
        #[arg(short, long, value_name = "FILE", default_value = "config.json")]
        config: PathBuf,
    },

    /// Print the document outline
    Toc {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print where a page sits in the outline
    Hierarchy {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed)
        #[arg(short, long)]
        page: u32,
    },

    /// Render the highlights of one page
    Page {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed)
        #[arg(short, long)]
        page: u32,

        /// Print the page context as JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Dump the geometry of every page as JSON
    Geometry {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run { config }) => cmd_run(&config),
        Some(Commands::Toc { input }) => cmd_toc(&input),
        Some(Commands::Hierarchy { input, page }) => cmd_hierarchy(&input, page),
        Some(Commands::Page {
            input,
            page,
            json,
            compact,
        }) => cmd_page(&input, page, json, compact),
        Some(Commands::Geometry { input, output }) => cmd_geometry(&input, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(config_path)?;
    let mut extractor = open_pdf_with_options(&config.pdf_path, config.layout.clone())?;
    let workspace = MarkdownWorkspace::for_pdf(&config.markdown_workspace, &config.pdf_path);

    let last = extractor.page_count() + 1;
    let end = config.page_end.min(last);
    if end < config.page_end {
        log::warn!(
            "page_end {} is past the last page, stopping at page {}",
            config.page_end,
            last - 1
        );
    }
    let start = config.page_start.min(end);

    let pb = ProgressBar::new(u64::from(end - start));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let (mut created, mut appended, mut skipped, mut empty) = (0, 0, 0, 0);
    for page in start..end {
        pb.set_message(format!("Page {}", page));

        if !extractor.setup_page(page)?.has_highlights() {
            empty += 1;
            pb.inc(1);
            continue;
        }

        let path = extractor.resolve_hierarchy()?;
        let text = extractor.markdown()?;
        match workspace.write(&path, &text, page)? {
            WriteOutcome::Created => created += 1,
            WriteOutcome::Appended => appended += 1,
            WriteOutcome::Skipped => skipped += 1,
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Workspace:".green().bold(), workspace.book_dir().display());
    println!("  {} {} files created", "├─".dimmed(), created);
    println!("  {} {} pages appended", "├─".dimmed(), appended);
    println!("  {} {} pages already present", "├─".dimmed(), skipped);
    println!("  {} {} pages without highlights", "└─".dimmed(), empty);

    Ok(())
}

fn cmd_toc(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let toc = read_toc(input)?;

    if toc.is_empty() {
        println!("{}", "Document has no outline".yellow());
        return Ok(());
    }

    for entry in &toc {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!(
            "{}{} {}",
            indent,
            entry.title,
            format!("(p. {})", entry.page).dimmed()
        );
    }

    Ok(())
}

fn cmd_hierarchy(input: &Path, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut extractor = open_pdf(input)?;
    extractor.setup_page(page)?;
    let path = extractor.resolve_hierarchy()?;

    if path.is_empty() {
        println!("{}", "Page is not covered by the outline".yellow());
        return Ok(());
    }

    for (level, title) in path.iter() {
        let indent = "  ".repeat(level.saturating_sub(1) as usize);
        println!("{}{} {}", indent, format!("[{}]", level).cyan(), title);
    }

    Ok(())
}

fn cmd_page(
    input: &Path,
    page: u32,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut extractor = open_pdf(input)?;
    let context = extractor.setup_page(page)?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", to_json(context, format)?);
        return Ok(());
    }

    let markdown = extractor.markdown()?;
    if markdown.is_empty() {
        println!("{}", format!("No highlights on page {}", page).yellow());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}

fn cmd_geometry(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let provider = PdfProvider::open(input)?;
    let json = MemoryProvider::snapshot(&provider)?.to_json()?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "highlight-md".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Highlighted PDF passages to Markdown notes");
    println!();
    println!("License: MIT");
}
