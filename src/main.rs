//! Command line front end for Qt Linguist catalogs.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use qt_ts_i18n::catalog::{
    self,
    CatalogStats,
};
use qt_ts_i18n::config::{
    ConfigManager,
    Severity,
};
use qt_ts_i18n::diagnostics::{
    self,
    CatalogFile,
};
use qt_ts_i18n::export::{
    self,
    ExportOptions,
};
use qt_ts_i18n::indexer::WorkspaceIndexer;
use qt_ts_i18n::revision::{
    self,
    MessageKey,
};
use qt_ts_i18n::translator::{
    self,
    Translator,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every catalog in a workspace
    Check {
        /// Workspace root (defaults to the current directory)
        root: Option<PathBuf>,
    },

    /// Translate one string from a catalog
    Lookup {
        file: PathBuf,
        context: String,
        source: String,
    },

    /// Show translation progress per context
    Stats { file: PathBuf },

    /// Rewrite a catalog in the canonical layout
    Format {
        file: PathBuf,

        /// Only report whether the file is already formatted
        #[arg(long)]
        check: bool,

        /// Write the `<!DOCTYPE TS>` declaration
        #[arg(long, conflicts_with = "no_doctype")]
        doctype: bool,

        /// Drop the `<!DOCTYPE TS>` declaration
        #[arg(long)]
        no_doctype: bool,
    },

    /// Compare two revisions of a catalog
    Diff { old: PathBuf, new: PathBuf },

    /// Print a catalog as nested JSON
    Export {
        file: PathBuf,

        /// Emit untranslated entries with the source text
        #[arg(long)]
        include_unfinished: bool,
    },

    /// Translate one string the way the application does for a locale
    ///
    /// `fallbackLanguages` are read from the configuration in the current
    /// directory.
    Locale {
        /// Directory holding `<locale>.ts` catalogs
        dir: PathBuf,
        context: String,
        source: String,

        /// Locale name, or `system` for the OS locale
        #[arg(short, long, default_value = "system")]
        locale: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Check { root } => check(&mut out, root).await,
        Commands::Lookup { file, context, source } => lookup(&mut out, &file, &context, &source),
        Commands::Stats { file } => stats(&mut out, &file),
        Commands::Format { file, check, doctype, no_doctype } => {
            let doctype = match (doctype, no_doctype) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            format(&mut out, &file, check, doctype)
        }
        Commands::Diff { old, new } => diff(&mut out, &old, &new),
        Commands::Export { file, include_unfinished } => {
            let options = ExportOptions { include_unfinished, ..ExportOptions::default() };
            let value = export::to_json(&load(&file)?.catalog, options);
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Locale { dir, context, source, locale } => {
            locale_lookup(&mut out, &dir, &context, &source, &locale)
        }
    }
}

fn load(path: &Path) -> Result<catalog::ParsedCatalog> {
    catalog::load_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

async fn check(out: &mut impl Write, root: Option<PathBuf>) -> Result<ExitCode> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(root.clone()))
        .with_context(|| format!("Invalid configuration in {}", root.display()))?;

    let indexer = WorkspaceIndexer::new();
    let summary = indexer
        .index_workspace(&root, &config_manager)
        .await
        .with_context(|| format!("Failed to index {}", root.display()))?;

    for error in &summary.failed {
        writeln!(out, "{error}")?;
    }

    let catalogs = indexer.catalogs().await;
    let files: Vec<CatalogFile<'_>> = catalogs
        .iter()
        .map(|(path, parsed)| CatalogFile {
            path,
            catalog: &parsed.catalog,
            duplicates: &parsed.duplicates,
        })
        .collect();
    let found = diagnostics::check_all(&files, config_manager.get_settings());
    for diagnostic in &found {
        writeln!(out, "{diagnostic}")?;
    }

    writeln!(
        out,
        "{} catalog(s), {} failed to load, {} diagnostic(s)",
        summary.loaded.len(),
        summary.failed.len(),
        found.len()
    )?;

    let failed = !summary.is_clean() || diagnostics::max_severity(&found) == Some(Severity::Error);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn lookup(out: &mut impl Write, file: &Path, context: &str, source: &str) -> Result<ExitCode> {
    let parsed = load(file)?;
    let translator = Translator::from_catalog(&parsed.catalog);
    writeln!(out, "{}", translator.translate(context, source))?;
    Ok(ExitCode::SUCCESS)
}

fn locale_lookup(
    out: &mut impl Write,
    dir: &Path,
    context: &str,
    source: &str,
    locale: &str,
) -> Result<ExitCode> {
    let root = std::env::current_dir().context("Failed to read the current directory")?;
    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(root.clone()))
        .with_context(|| format!("Invalid configuration in {}", root.display()))?;
    let fallbacks = config_manager.get_settings().fallback_languages.as_deref().unwrap_or_default();

    let chain = translator::load_for_locale(dir, locale, fallbacks)
        .with_context(|| format!("Failed to load translations for '{locale}'"))?;
    writeln!(out, "{}", chain.translate(context, source))?;
    Ok(ExitCode::SUCCESS)
}

fn write_stats_line(out: &mut impl Write, name: &str, stats: CatalogStats) -> io::Result<()> {
    writeln!(
        out,
        "{name:<24} {:>5} finished {:>5} unfinished {:>5} vanished {:>4}%",
        stats.finished,
        stats.unfinished,
        stats.vanished,
        stats.completion_percent()
    )
}

fn stats(out: &mut impl Write, file: &Path) -> Result<ExitCode> {
    let parsed = load(file)?;
    for context in &parsed.catalog.contexts {
        write_stats_line(out, &context.name, context.stats())?;
    }
    write_stats_line(out, "total", parsed.catalog.stats())?;
    Ok(ExitCode::SUCCESS)
}

fn format(
    out: &mut impl Write,
    file: &Path,
    check: bool,
    doctype: Option<bool>,
) -> Result<ExitCode> {
    let original = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut parsed = catalog::parse_str(&original, file)?;
    if let Some(doctype) = doctype {
        parsed.catalog.has_doctype = doctype;
    }

    let formatted = catalog::writer::to_string(&parsed.catalog);
    if formatted == original {
        return Ok(ExitCode::SUCCESS);
    }
    if check {
        writeln!(out, "{} is not formatted", file.display())?;
        return Ok(ExitCode::FAILURE);
    }

    std::fs::write(file, formatted)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    tracing::info!(path = %file.display(), "Formatted catalog");
    Ok(ExitCode::SUCCESS)
}

fn write_keys(out: &mut impl Write, label: &str, keys: &[MessageKey]) -> io::Result<()> {
    for key in keys {
        writeln!(out, "{label:<12} [{}] {}", key.context, key.source)?;
    }
    Ok(())
}

fn diff(out: &mut impl Write, old: &Path, new: &Path) -> Result<ExitCode> {
    let old = load(old)?;
    let new = load(new)?;
    let diff = revision::compare(&old.catalog, &new.catalog);

    write_keys(out, "added", &diff.added)?;
    write_keys(out, "removed", &diff.removed)?;
    write_keys(out, "completed", &diff.completed)?;
    for change in &diff.retranslated {
        writeln!(
            out,
            "{:<12} [{}] {}: {:?} -> {:?}",
            "retranslated", change.key.context, change.key.source, change.old, change.new
        )?;
    }
    write_keys(out, "vanished", &diff.vanished)?;
    write_keys(out, "reopened", &diff.reopened)?;
    write_keys(out, "revived", &diff.revived)?;

    if diff.is_empty() {
        writeln!(out, "no changes")?;
    }
    Ok(ExitCode::SUCCESS)
}
