//! Cleanup tooling for a digitized Arabic-English lexicon.
//!
//! Two jobs, run over the corpus XML files in place:
//!
//! * correction passes that regenerate malformed verb forms (the bare
//!   aorist fields and the numbered derived forms) from each entry's root;
//! * an importer that extracts every entry into a SQLite database, keyed
//!   by node id so re-runs are cheap no-ops.
//!
//! Corrections preview by default and write only with `--apply`.

pub mod config;
pub mod corrector;
pub mod error;
pub mod forms;
pub mod headword;
pub mod importer;
pub mod reference;
pub mod report;
pub mod script;
pub mod store;
pub mod varieties;

pub use error::LexError;
