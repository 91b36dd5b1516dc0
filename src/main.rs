// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use repodoc::utils::logging::{format_step, format_success, format_warning};
use repodoc::{
    root_dir_name, ArchiveWalker, Config, DocumentBuilder, GithubClient, IgnoreSet,
    ProgressTracker, RepoArchive, RepositoryRef, WalkStats,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "repodoc")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Flatten a GitHub repository into a single document", long_about = None)]
struct Cli {
    /// Repository identifier: a GitHub URL or owner/repo shorthand
    identifier: String,

    /// Output file path (defaults to <owner>-<repo>.<ext>)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Branch to snapshot
    #[arg(short, long, default_value = "main")]
    branch: String,

    /// Access token for private repositories
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Local file with additional ignore patterns, one per line
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Classify and count files without writing the document
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    repodoc::utils::logging::init_logger(cli.color, cli.verbose);

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if cli.token.is_some() {
        config.github.token = cli.token.clone();
    }

    let start_time = Instant::now();

    let repo_ref = RepositoryRef::parse(&cli.identifier)
        .context("Failed to parse repository identifier")?;

    println!(
        "{}",
        format_step(1, 4, &format!("Checking repository {}", repo_ref))
    );
    let client = GithubClient::new(config.github.clone())?;
    let metadata = client.fetch_metadata(&repo_ref).await?;

    println!(
        "{}",
        format_step(2, 4, &format!("Downloading branch '{}'", cli.branch))
    );
    let archive_bytes = client
        .download_archive(&repo_ref, &cli.branch, Some(&metadata.default_branch))
        .await?;
    let archive =
        RepoArchive::from_bytes(archive_bytes).context("Failed to read downloaded archive")?;

    println!(
        "{}",
        format_step(3, 4, &format!("Classifying {} files", archive.file_count()))
    );
    let (sections, stats) = walk_archive(&cli, &config, &repo_ref, &archive)?;

    println!("{}", format_step(4, 4, "Writing document"));
    if cli.dry_run {
        println!("{}", format_warning("Dry run: no document written"));
    } else {
        let output_path = cli.output.clone().unwrap_or_else(|| {
            PathBuf::from(DocumentBuilder::default_output_name(
                &repo_ref,
                &config.output.extension,
            ))
        });

        let builder = DocumentBuilder::new(&repo_ref, &cli.branch, &config.output.separator)
            .with_sections(sections);
        builder
            .write_to(&output_path)
            .context("Failed to write output document")?;

        println!(
            "{}",
            format_success(&format!("Wrote {}", output_path.display()))
        );
    }

    log_summary(&stats, start_time.elapsed().as_secs_f64());

    Ok(())
}

fn walk_archive(
    cli: &Cli,
    config: &Config,
    repo_ref: &RepositoryRef,
    archive: &RepoArchive,
) -> Result<(Vec<repodoc::DocumentSection>, WalkStats)> {
    let root = root_dir_name(repo_ref, &cli.branch);

    let embedded = archive
        .embedded_file_text(&root, repodoc::IGNORE_FILE_NAME)
        .map(|text| IgnoreSet::parse_ignore_text(&text))
        .unwrap_or_default();
    if !embedded.is_empty() {
        info!(
            "Loaded {} patterns from {}",
            embedded.len(),
            repodoc::IGNORE_FILE_NAME
        );
    }

    let mut extra = config.filter.extra_patterns.clone();
    if let Some(path) = &cli.ignore_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignore file {}", path.display()))?;
        extra.extend(IgnoreSet::parse_ignore_text(&text));
    }

    let ignore = IgnoreSet::build(&embedded, &extra)?;
    info!("Ignore set holds {} patterns", ignore.pattern_count());
    let walker = ArchiveWalker::new(root, ignore);

    let progress = ProgressTracker::with_color(archive.file_count(), cli.color);
    let (sections, stats) = walker.walk(archive.entries(), Some(&progress));
    progress.finish();

    Ok((sections, stats))
}

fn log_summary(stats: &WalkStats, elapsed_secs: f64) {
    info!("=== Walk Summary ===");
    info!("Files included: {}", stats.included);
    info!("Skipped (ignore patterns): {}", stats.skipped_ignored);
    info!("Skipped (binary extension): {}", stats.skipped_binary);
    info!("Skipped (invalid text): {}", stats.skipped_invalid_text);
    info!("Skipped (errors): {}", stats.skipped_errors);
    info!("Inclusion rate: {:.2}%", stats.inclusion_rate());
    info!("Completed in {:.2}s", elapsed_secs);

    if stats.skipped_errors > 0 {
        warn!(
            "{} file(s) failed to process; rerun with --verbose for details",
            stats.skipped_errors
        );
    }
}
