use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexicon_clean::config::exclusion_set;
use lexicon_clean::corrector::{fix_aorists_in_file, fix_derived_in_file};
use lexicon_clean::error::LexError;
use lexicon_clean::importer::import_file;
use lexicon_clean::reference::{load_reference, start_page_for};
use lexicon_clean::report::RunSummary;
use lexicon_clean::store::Store;

#[derive(Parser)]
#[command(name = "lexclean", version, about = "Cleanup passes for the digitized lexicon corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate malformed bare aorist forms. Previews unless --apply.
    FixAorists {
        files: Vec<PathBuf>,
        /// Write the corrected files back in place.
        #[arg(long)]
        apply: bool,
    },
    /// Regenerate the numbered derived verb forms from each section's root.
    /// Previews unless --apply.
    FixForms {
        files: Vec<PathBuf>,
        /// Write the corrected files back in place.
        #[arg(long)]
        apply: bool,
    },
    /// Import every entry into a SQLite database.
    Import {
        files: Vec<PathBuf>,
        /// Database path, created on first use.
        #[arg(long, default_value = "lexicon.sqlite")]
        db: PathBuf,
        /// Letter/page-range reference file; populates the lexicon table
        /// and supplies start pages.
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Additional filenames to exclude from the import.
        #[arg(long)]
        exclude: Vec<String>,
    },
}

fn file_name_of(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

fn run_fix_aorists(files: &[PathBuf], apply: bool, summary: &mut RunSummary) -> anyhow::Result<()> {
    for path in files {
        let (counts, changed) = match fix_aorists_in_file(path, apply) {
            Ok(v) => v,
            Err(LexError::UnknownFileSuffix(name)) => {
                tracing::warn!(file = %name, "unrecognized filename suffix, file excluded");
                summary.files_excluded += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("aorist pass failed on {}", path.display()));
            }
        };
        summary.aorists.merge(&counts);
        summary.files_processed += 1;
        if !changed {
            summary.files_unchanged += 1;
        }
        tracing::info!(
            file = %file_name_of(path),
            corrected = counts.corrected,
            applied = apply && changed,
            "aorist pass done"
        );
    }
    Ok(())
}

fn run_fix_forms(files: &[PathBuf], apply: bool, summary: &mut RunSummary) -> anyhow::Result<()> {
    for path in files {
        let (counts, changed) = match fix_derived_in_file(path, apply) {
            Ok(v) => v,
            Err(LexError::UnknownFileSuffix(name)) => {
                tracing::warn!(file = %name, "unrecognized filename suffix, file excluded");
                summary.files_excluded += 1;
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("derived-form pass failed on {}", path.display()));
            }
        };
        summary.derived.merge(&counts);
        summary.files_processed += 1;
        if !changed {
            summary.files_unchanged += 1;
        }
        tracing::info!(
            file = %file_name_of(path),
            corrected = counts.corrected,
            applied = apply && changed,
            "derived-form pass done"
        );
    }
    Ok(())
}

fn run_import(
    files: &[PathBuf],
    db: &Path,
    reference: Option<&Path>,
    exclude: &[String],
    summary: &mut RunSummary,
) -> anyhow::Result<()> {
    let store = Store::open(db).with_context(|| format!("cannot open {}", db.display()))?;

    let mappings = match reference {
        Some(path) => {
            let mappings = load_reference(path)
                .with_context(|| format!("cannot read reference file {}", path.display()))?;
            for mapping in &mappings {
                store.insert_letter(mapping)?;
            }
            tracing::info!(count = mappings.len(), "letter mappings loaded");
            mappings
        }
        None => Vec::new(),
    };

    // The full exclusion set is fixed before the first insert.
    let excluded = exclusion_set(exclude);

    for path in files {
        let name = file_name_of(path);
        let start_page = start_page_for(&mappings, name);
        let counts = match import_file(&store, path, &excluded, start_page) {
            Ok(counts) => counts,
            Err(LexError::UnknownFileSuffix(name)) => {
                tracing::warn!(file = %name, "unrecognized filename suffix, file excluded");
                summary.files_excluded += 1;
                continue;
            }
            Err(e @ LexError::MalformedDocument { .. }) => {
                // A broken document skips, it never aborts the batch.
                tracing::error!(file = %name, error = %e, "unparseable document skipped");
                summary.files_failed += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("import failed on {}", path.display()));
            }
        };
        if counts.file_excluded {
            summary.files_excluded += 1;
            continue;
        }
        summary.files_processed += 1;
        summary.entries_imported += counts.imported;
        summary.entries_skipped += counts.skipped_entries;
        summary.duplicate_rows += counts.duplicate_rows;
        tracing::info!(
            file = %name,
            imported = counts.imported,
            duplicates = counts.duplicate_rows,
            skipped = counts.skipped_entries,
            "file imported"
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut summary = RunSummary::default();

    match cli.command {
        Command::FixAorists { files, apply } => run_fix_aorists(&files, apply, &mut summary)?,
        Command::FixForms { files, apply } => run_fix_forms(&files, apply, &mut summary)?,
        Command::Import {
            files,
            db,
            reference,
            exclude,
        } => run_import(&files, &db, reference.as_deref(), &exclude, &mut summary)?,
    }

    print!("{summary}");
    Ok(())
}
