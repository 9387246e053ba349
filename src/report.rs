//! End-of-run summaries.

use std::fmt;

use crate::corrector::{AoristCounts, DerivedCounts};
use crate::script::PatternVowel;

/// Totals accumulated over one invocation, printed when the run ends.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_unchanged: usize,
    pub files_excluded: usize,
    /// Files skipped because they could not be parsed.
    pub files_failed: usize,
    pub aorists: AoristCounts,
    pub derived: DerivedCounts,
    pub entries_imported: usize,
    pub entries_skipped: usize,
    pub duplicate_rows: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "files processed: {}", self.files_processed)?;
        if self.files_unchanged > 0 {
            writeln!(f, "files unchanged: {}", self.files_unchanged)?;
        }
        if self.files_excluded > 0 {
            writeln!(f, "files excluded:  {}", self.files_excluded)?;
        }
        if self.files_failed > 0 {
            writeln!(f, "files skipped (unparseable): {}", self.files_failed)?;
        }
        if self.aorists.corrected > 0 || self.aorists.unclassifiable > 0 {
            writeln!(f, "aorists corrected: {}", self.aorists.corrected)?;
            for vowel in [PatternVowel::Damma, PatternVowel::Fatha, PatternVowel::Kasra] {
                let n = self.aorists.by_vowel[vowel.bucket()];
                if n > 0 {
                    writeln!(f, "  {}: {}", vowel.label(), n)?;
                }
            }
            if self.aorists.unclassifiable > 0 {
                writeln!(f, "  unclassifiable, left as-is: {}", self.aorists.unclassifiable)?;
            }
            if self.aorists.integrity_failures > 0 {
                writeln!(f, "  integrity check failed: {}", self.aorists.integrity_failures)?;
            }
        }
        if self.derived.corrected > 0
            || self.derived.skipped_sections > 0
            || self.derived.skipped_forms > 0
        {
            writeln!(f, "derived forms corrected: {}", self.derived.corrected)?;
            if self.derived.skipped_sections > 0 {
                writeln!(f, "  sections without a usable root: {}", self.derived.skipped_sections)?;
            }
            if self.derived.skipped_forms > 0 {
                writeln!(f, "  form numbers outside the table: {}", self.derived.skipped_forms)?;
            }
        }
        if self.entries_imported > 0 || self.duplicate_rows > 0 || self.entries_skipped > 0 {
            writeln!(f, "entries imported: {}", self.entries_imported)?;
            writeln!(f, "entries already present: {}", self.duplicate_rows)?;
            writeln!(f, "entries skipped: {}", self.entries_skipped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_vowel_breakdown() {
        let mut summary = RunSummary::default();
        summary.files_processed = 3;
        summary.aorists.corrected = 5;
        summary.aorists.by_vowel[PatternVowel::Damma.bucket()] = 4;
        summary.aorists.by_vowel[PatternVowel::Kasra.bucket()] = 1;
        let text = summary.to_string();
        assert!(text.contains("aorists corrected: 5"));
        assert!(text.contains("u-pattern"));
        assert!(text.contains("i-pattern"));
        assert!(!text.contains("a-pattern (varieties 3,4)"));
    }

    #[test]
    fn summary_reports_skipped_derived_forms() {
        let mut summary = RunSummary::default();
        summary.files_processed = 1;
        summary.derived.corrected = 2;
        summary.derived.skipped_sections = 1;
        summary.derived.skipped_forms = 3;
        let text = summary.to_string();
        assert!(text.contains("derived forms corrected: 2"));
        assert!(text.contains("sections without a usable root: 1"));
        assert!(text.contains("form numbers outside the table: 3"));
    }

    #[test]
    fn quiet_run_stays_short() {
        let summary = RunSummary {
            files_processed: 1,
            ..RunSummary::default()
        };
        assert_eq!(summary.to_string().lines().count(), 1);
    }
}
