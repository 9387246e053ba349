//! In-place correction of malformed verb forms in the lexicon XML files.
//!
//! Both passes work the same way the rest of the corpus tooling does:
//! pre-compiled patterns over the raw document text, with every replacement
//! decided inside the match closure. Files are read whole, transformed, and
//! written back whole; versioning/backup is an external concern.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::partition_for;
use crate::error::LexError;
use crate::forms::derived_form;
use crate::script::{IMPERFECT_PREFIX, PatternVowel, radicals, second_radical_vowel};
use crate::varieties::{build_aorist, preserves_root};

lazy_static! {
    /// The two malformed-aorist shapes: the `aor.` marker followed by an
    /// inflection field whose orig attribute is either a word or empty.
    /// Both capture the current rendered form. The variants are disjoint
    /// (non-empty vs empty attribute) so no field is visited twice.
    static ref AORIST_PATTERNS: [Regex; 2] = [
        Regex::new(
            r#"aor\.\s*<form n="infl">\s*<orth orig="[^"]+"\s+lang="ar">([^<]*)</orth></form>"#
        )
        .unwrap(),
        Regex::new(
            r#"aor\.\s*<form n="infl">\s*<orth orig=""\s+[^>]*lang="ar">([^<]*)</orth></form>"#
        )
        .unwrap(),
    ];

    /// One root section of the document.
    static ref ROOT_SECTION: Regex =
        Regex::new(r#"(?s)<div2 type="root"[^>]*>.*?</div2>"#).unwrap();

    /// The section's root, from its head element.
    static ref SECTION_HEAD: Regex =
        Regex::new(r#"<head><foreign lang="ar">([^<]+)</foreign></head>"#).unwrap();

    /// A numbered derived-form field: form number marker plus rendered text.
    static ref NUMBERED_FORM: Regex =
        Regex::new(r#"<itype>(\d+)</itype>\s*<orth lang="ar">([^<]+)</orth></form>"#).unwrap();
}

/// Per-file counters for the aorist pass. `by_vowel` is indexed by
/// `PatternVowel::bucket()` (damma, fatha, kasra).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AoristCounts {
    pub corrected: usize,
    pub unclassifiable: usize,
    pub integrity_failures: usize,
    pub by_vowel: [usize; 3],
}

impl AoristCounts {
    pub fn merge(&mut self, other: &AoristCounts) {
        self.corrected += other.corrected;
        self.unclassifiable += other.unclassifiable;
        self.integrity_failures += other.integrity_failures;
        for (mine, theirs) in self.by_vowel.iter_mut().zip(other.by_vowel) {
            *mine += theirs;
        }
    }
}

/// Per-file counters for the derived-form pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DerivedCounts {
    pub corrected: usize,
    /// Root sections with no usable head root (missing or < 3 consonants).
    pub skipped_sections: usize,
    /// Fields whose form number falls outside the 2-13 table.
    pub skipped_forms: usize,
}

impl DerivedCounts {
    pub fn merge(&mut self, other: &DerivedCounts) {
        self.corrected += other.corrected;
        self.skipped_sections += other.skipped_sections;
        self.skipped_forms += other.skipped_forms;
    }
}

enum AoristOutcome {
    /// Empty capture or a form already carrying the imperfect prefix.
    Skip,
    Unclassifiable,
    IntegrityFailure,
    Corrected(String, PatternVowel),
}

fn correct_one_aorist(current: &str) -> AoristOutcome {
    if current.is_empty() || current.starts_with(IMPERFECT_PREFIX) {
        // Re-run safety: corrected forms always start with يَ and must
        // never be rewritten again.
        return AoristOutcome::Skip;
    }
    let Some(vowel) = second_radical_vowel(current) else {
        return AoristOutcome::Unclassifiable;
    };
    let root = radicals(current);
    let Some(corrected) = build_aorist(&root, vowel) else {
        return AoristOutcome::Unclassifiable;
    };
    if !preserves_root(current, &corrected) {
        return AoristOutcome::IntegrityFailure;
    }
    AoristOutcome::Corrected(corrected, vowel)
}

/// Rewrite every malformed aorist in `content`, returning the new text and
/// the per-variety counts. Text with zero matches comes back unchanged.
pub fn correct_aorists(content: &str) -> (String, AoristCounts) {
    let mut counts = AoristCounts::default();
    let mut text = content.to_string();

    for pattern in AORIST_PATTERNS.iter() {
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                let current = caps.get(1).map(|m| m.as_str()).unwrap_or_default().trim();
                match correct_one_aorist(current) {
                    AoristOutcome::Skip => whole.to_string(),
                    AoristOutcome::Unclassifiable => {
                        counts.unclassifiable += 1;
                        tracing::debug!(form = current, "unclassifiable aorist, left as-is");
                        whole.to_string()
                    }
                    AoristOutcome::IntegrityFailure => {
                        counts.integrity_failures += 1;
                        tracing::warn!(form = current, "root not preserved, replacement aborted");
                        whole.to_string()
                    }
                    AoristOutcome::Corrected(fixed, vowel) => {
                        counts.corrected += 1;
                        counts.by_vowel[vowel.bucket()] += 1;
                        tracing::debug!(from = current, to = %fixed, pattern = vowel.label(), "aorist corrected");
                        whole.replace(current, &fixed)
                    }
                }
            })
            .into_owned();
    }

    (text, counts)
}

/// Rewrite the numbered derived forms (II-XIII) of every root section,
/// regenerating each from the section's head root.
pub fn correct_derived_forms(content: &str) -> (String, DerivedCounts) {
    let mut counts = DerivedCounts::default();

    let text = ROOT_SECTION
        .replace_all(content, |section_caps: &Captures| {
            let section = section_caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let root = SECTION_HEAD
                .captures(section)
                .and_then(|c| c.get(1))
                .map(|m| radicals(m.as_str()))
                .unwrap_or_default();
            if root.len() < 3 {
                counts.skipped_sections += 1;
                return section.to_string();
            }

            NUMBERED_FORM
                .replace_all(section, |caps: &Captures| {
                    let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                    let number: u8 = caps
                        .get(1)
                        .and_then(|m| m.as_str().parse().ok())
                        .unwrap_or(0);
                    if number == 1 {
                        // Form I belongs to the aorist pass.
                        return whole.to_string();
                    }
                    let current = caps.get(2).map(|m| m.as_str()).unwrap_or_default().trim();
                    match derived_form(number, &root) {
                        Some(correct) if correct != current => {
                            counts.corrected += 1;
                            tracing::debug!(form = number, from = current, to = %correct, "derived form corrected");
                            whole.replace(current, &correct)
                        }
                        Some(_) => whole.to_string(),
                        None => {
                            counts.skipped_forms += 1;
                            whole.to_string()
                        }
                    }
                })
                .into_owned()
        })
        .into_owned();

    (text, counts)
}

fn check_suffix(path: &Path) -> Result<(), LexError> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    partition_for(name).map(|_| ())
}

/// Run the aorist pass over one file. Only writes back when `apply` is set
/// and something changed; the preview mode of the original workflow is the
/// default. Returns the counts and whether the content changed.
///
/// Files outside the 0/1 filename convention are rejected before being
/// read, the same policy as the importer.
pub fn fix_aorists_in_file(path: &Path, apply: bool) -> Result<(AoristCounts, bool), LexError> {
    check_suffix(path)?;
    let content = fs::read_to_string(path).map_err(|e| LexError::io(path, e))?;
    let (fixed, counts) = correct_aorists(&content);
    let changed = fixed != content;
    if apply && changed {
        fs::write(path, fixed).map_err(|e| LexError::io(path, e))?;
    }
    Ok((counts, changed))
}

/// Run the derived-form pass over one file, same contract as
/// [`fix_aorists_in_file`].
pub fn fix_derived_in_file(path: &Path, apply: bool) -> Result<(DerivedCounts, bool), LexError> {
    check_suffix(path)?;
    let content = fs::read_to_string(path).map_err(|e| LexError::io(path, e))?;
    let (fixed, counts) = correct_derived_forms(&content);
    let changed = fixed != content;
    if apply && changed {
        fs::write(path, fixed).map_err(|e| LexError::io(path, e))?;
    }
    Ok((counts, changed))
}
