//! Static configuration consumed by both passes: the duplicate-file
//! exclusion set, the particle list, and the affix score tables.
//!
//! All of it is fixed data determined by prior manual review of the corpus,
//! loaded once per run and never recomputed.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;

use crate::error::LexError;

/// Files found by page-range/content review to duplicate material already
/// covered by another partition. They contribute zero rows to the import
/// regardless of content.
pub const DUPLICATE_FILES: &[&str] = &["uwa1.xml", "uya1.xml", "uhz1.xml"];

/// Particles and other function words that never serve as a headword.
/// Stored diacritic-free; compare against the consonant skeleton.
const PARTICLES: &[&str] = &[
    "و", "ف", "ب", "ل", "ك", "في", "من", "الى", "إلى", "على", "عن", "ان", "أن", "إن", "لا",
    "ما", "لم", "لن", "قد", "ثم", "او", "أو", "بل", "حتى", "اذا", "إذا", "اذ", "إذ", "هو",
    "هي", "هم", "ذلك", "هذا", "هذه", "التي", "الذي", "مع", "كل", "بعد", "قبل", "عند", "غير",
    "بين", "اي", "أي",
];

/// Compound prefixes (article fused with a preposition or conjunction) and
/// the morphological-complexity reward each carries.
pub const COMPOUND_PREFIXES: &[(&str, i32)] = &[
    ("وال", 4),
    ("فال", 4),
    ("بال", 4),
    ("كال", 4),
    ("لل", 3),
    ("ال", 2),
];

/// Diacritic-free prefixes of the derived verb forms and participles.
pub const DERIVED_PREFIXES: &[&str] = &["است", "ان", "اف", "ت", "م", "أ"];

/// Common nominal suffixes (feminine, dual, plural, nisba).
pub const DERIVED_SUFFIXES: &[&str] = &["ة", "ات", "ان", "ون", "ين", "اء"];

/// Score penalty for being a known particle.
pub const PARTICLE_PENALTY: i32 = -5;

lazy_static! {
    static ref PARTICLE_SET: HashSet<&'static str> = PARTICLES.iter().copied().collect();
}

/// True when the (diacritic-free) word is a known particle.
pub fn is_particle_skeleton(skeleton: &str) -> bool {
    PARTICLE_SET.contains(skeleton)
}

/// Corpus partition encoded in the filename's trailing digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Main,
    Supplement,
}

impl Partition {
    pub fn flag(self) -> i64 {
        match self {
            Partition::Main => 0,
            Partition::Supplement => 1,
        }
    }
}

/// Decode the `<prefix><letter-code><digit>.xml` convention: 0 = main,
/// 1 = supplement, anything else excludes the file from both passes.
pub fn partition_for(filename: &str) -> Result<Partition, LexError> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    match stem.chars().last() {
        Some('0') => Ok(Partition::Main),
        Some('1') => Ok(Partition::Supplement),
        _ => Err(LexError::UnknownFileSuffix(filename.to_string())),
    }
}

/// The run's full exclusion set: the static duplicates plus any names added
/// on the command line. Built once before any insert begins.
pub fn exclusion_set(extra: &[String]) -> HashSet<String> {
    DUPLICATE_FILES
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().cloned())
        .collect()
}
