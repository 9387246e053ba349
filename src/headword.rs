//! Headword selection for import rows.
//!
//! The digitization does not mark headwords reliably, so the importer picks
//! one from the entry's display text with a priority-ordered heuristic:
//! root-bearing words first (scored for morphological complexity), then
//! exact matches against canonically generated verb forms, then the first
//! word that is not a particle. The scoring is an admitted heuristic; the
//! weights live in `config` and are validated against a curated sample, not
//! derived.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::config::{
    COMPOUND_PREFIXES, DERIVED_PREFIXES, DERIVED_SUFFIXES, PARTICLE_PENALTY, is_particle_skeleton,
};
use crate::forms::{FIRST_DERIVED_FORM, LAST_DERIVED_FORM, derived_form};
use crate::script::{PatternVowel, consonant_skeleton, radicals};
use crate::varieties::build_aorist;

/// True when the word's consonants contain the whole root as an ordered
/// subsequence, diacritics ignored.
pub fn contains_root(word: &str, root: &[char]) -> bool {
    if root.is_empty() {
        return false;
    }
    let mut wanted = root.iter();
    let mut next = wanted.next();
    for c in radicals(word) {
        if Some(&c) == next {
            next = wanted.next();
            if next.is_none() {
                return true;
            }
        }
    }
    false
}

/// Morphological-complexity score of a word, computed on its skeleton.
/// Compound prefixes and derived-form affixes reward; particles penalize.
pub fn complexity_score(word: &str) -> i32 {
    let skeleton = consonant_skeleton(word);
    let mut score = 0;

    for (prefix, reward) in COMPOUND_PREFIXES {
        if skeleton.starts_with(prefix) {
            score += reward;
            break;
        }
    }
    for prefix in DERIVED_PREFIXES {
        if skeleton.starts_with(prefix) {
            score += 1;
            break;
        }
    }
    for suffix in DERIVED_SUFFIXES {
        if skeleton.ends_with(suffix) {
            score += 1;
            break;
        }
    }
    if is_particle_skeleton(&skeleton) {
        score += PARTICLE_PENALTY;
    }
    score
}

pub fn is_particle(word: &str) -> bool {
    is_particle_skeleton(&consonant_skeleton(word))
}

/// Every canonical verb form the pipeline can generate for a root: the
/// three aorist patterns plus derived forms II-XIII. Used for the exact
/// match in priority 2. NFC-normalized to compare against display words.
pub fn canonical_forms(root: &[char]) -> HashSet<String> {
    let mut forms = HashSet::new();
    for vowel in [PatternVowel::Damma, PatternVowel::Fatha, PatternVowel::Kasra] {
        if let Some(aorist) = build_aorist(root, vowel) {
            forms.insert(aorist.nfc().collect());
        }
    }
    for number in FIRST_DERIVED_FORM..=LAST_DERIVED_FORM {
        if let Some(form) = derived_form(number, root) {
            forms.insert(form.nfc().collect());
        }
    }
    forms
}

/// Pick the headword from the entry's display words, first match wins:
/// 1. root-bearing word, highest complexity score (earliest on ties);
/// 2. exact canonical verb form;
/// 3. first non-particle word.
pub fn pick_headword(words: &[String], root: &[char]) -> Option<String> {
    let root_bearing: Vec<&String> = words.iter().filter(|w| contains_root(w, root)).collect();
    if let Some(first) = root_bearing.first() {
        let mut best = *first;
        let mut best_score = complexity_score(best);
        for word in root_bearing.iter().skip(1) {
            let score = complexity_score(word);
            if score > best_score {
                best = word;
                best_score = score;
            }
        }
        return Some(best.clone());
    }

    let canonical = canonical_forms(root);
    if let Some(word) = words.iter().find(|w| canonical.contains(*w)) {
        return Some(word.clone());
    }

    words.iter().find(|w| !is_particle(w)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DAMMA, FATHA, SUKUN};

    fn w(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_subsequence_ignores_diacritics() {
        let root = radicals("بتر");
        let vocalized: String = ['ب', FATHA, 'ت', DAMMA, 'ر', FATHA].iter().collect();
        assert!(contains_root(&vocalized, &root));
        assert!(contains_root("مبتور", &root));
        assert!(!contains_root("برت", &root)); // order matters
        assert!(!contains_root("بت", &root));
    }

    #[test]
    fn root_bearing_word_beats_particle_fallback() {
        let root = radicals("بتر");
        let words = w(&["من", "بتر", "على"]);
        assert_eq!(pick_headword(&words, &root).as_deref(), Some("بتر"));
    }

    #[test]
    fn ties_break_by_complexity_score() {
        let root = radicals("بتر");
        // Both carry the root; the article-prefixed form scores higher.
        let words = w(&["بتر", "البتر"]);
        assert_eq!(pick_headword(&words, &root).as_deref(), Some("البتر"));
    }

    #[test]
    fn equal_scores_keep_display_order() {
        let root = radicals("بتر");
        let words = w(&["بتر", "بترs"]);
        assert_eq!(pick_headword(&words, &root).as_deref(), Some("بتر"));
    }

    #[test]
    fn canonical_form_used_when_no_word_carries_root() {
        // A quadriliteral root: the generated aorist keeps only the first
        // three consonants, so the subsequence check fails but the exact
        // canonical match still succeeds.
        let root = radicals("دحرج");
        let canonical: String = ['ي', FATHA, 'د', SUKUN, 'ح', DAMMA, 'ر', DAMMA]
            .iter()
            .collect();
        assert!(!contains_root(&canonical, &root));
        let words = vec!["من".to_string(), canonical.clone()];
        assert_eq!(pick_headword(&words, &root), Some(canonical));
    }

    #[test]
    fn all_particles_yields_none() {
        let root = radicals("بتر");
        let words = w(&["من", "على", "حتى"]);
        assert_eq!(pick_headword(&words, &root), None);
    }

    #[test]
    fn first_non_particle_is_last_resort() {
        let root = radicals("قطع");
        let words = w(&["من", "كتاب"]);
        assert_eq!(pick_headword(&words, &root).as_deref(), Some("كتاب"));
    }
}
