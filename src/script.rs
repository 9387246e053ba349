//! Arabic script helpers: diacritic stripping and radical analysis.
//!
//! The corpus is fully vocalized, so most routines here split text into
//! letter clusters (a base consonant plus its trailing vowel marks) before
//! doing anything else. Root identity lives entirely in the consonant
//! skeleton; diacritics are presentation.

/// Fatha, the short /a/ vowel mark.
pub const FATHA: char = '\u{064E}';
/// Damma, the short /u/ vowel mark.
pub const DAMMA: char = '\u{064F}';
/// Kasra, the short /i/ vowel mark.
pub const KASRA: char = '\u{0650}';
/// Shadda, consonant gemination mark.
pub const SHADDA: char = '\u{0651}';
/// Sukun, absence-of-vowel mark.
pub const SUKUN: char = '\u{0652}';

pub const ALIF: char = 'ا';
pub const ALIF_HAMZA: char = 'أ';
pub const TA: char = 'ت';
pub const SEEN: char = 'س';
pub const NUN: char = 'ن';
pub const MIM: char = 'م';
pub const WAW: char = 'و';
pub const YA: char = 'ي';

/// The imperfect prefix: ya + fatha. Corrected aorists always start with it,
/// and a form that already does is never rewritten again.
pub const IMPERFECT_PREFIX: &str = "\u{064A}\u{064E}";

/// True for every combining mark we strip when reducing a word to its bare
/// consonant skeleton (short vowels, tanween, shadda, sukun, and the less
/// common marks up through the superscript alef).
pub fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// An Arabic base letter: in the Arabic block but not a combining mark.
pub fn is_arabic_letter(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c) && !is_diacritic(c)
}

/// Remove all diacritics, keeping every other character.
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !is_diacritic(*c)).collect()
}

/// Reduce text to its bare Arabic letters (no diacritics, no Latin, no
/// punctuation). This is the root/consonant skeleton.
pub fn consonant_skeleton(text: &str) -> String {
    text.chars().filter(|c| is_arabic_letter(*c)).collect()
}

/// The consonants of `text` as individual chars, in order.
pub fn radicals(text: &str) -> Vec<char> {
    text.chars().filter(|c| is_arabic_letter(*c)).collect()
}

/// The vowel pattern a malformed aorist was intended to follow, read off
/// the diacritic sitting on its second radical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternVowel {
    /// damma: the u-pattern (varieties 1 and 5)
    Damma,
    /// fatha: the a-pattern (varieties 3 and 4)
    Fatha,
    /// kasra: the i-pattern (varieties 2 and 6)
    Kasra,
}

impl PatternVowel {
    pub fn mark(self) -> char {
        match self {
            PatternVowel::Damma => DAMMA,
            PatternVowel::Fatha => FATHA,
            PatternVowel::Kasra => KASRA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternVowel::Damma => "u-pattern (varieties 1,5)",
            PatternVowel::Fatha => "a-pattern (varieties 3,4)",
            PatternVowel::Kasra => "i-pattern (varieties 2,6)",
        }
    }

    /// Stable index for per-variety counters: damma, fatha, kasra.
    pub fn bucket(self) -> usize {
        match self {
            PatternVowel::Damma => 0,
            PatternVowel::Fatha => 1,
            PatternVowel::Kasra => 2,
        }
    }

    fn from_mark(c: char) -> Option<Self> {
        match c {
            DAMMA => Some(PatternVowel::Damma),
            FATHA => Some(PatternVowel::Fatha),
            KASRA => Some(PatternVowel::Kasra),
            _ => None,
        }
    }
}

/// Split text into (letter, trailing marks) clusters. Non-Arabic characters
/// are dropped; marks before the first letter are dropped.
pub fn letter_clusters(text: &str) -> Vec<(char, Vec<char>)> {
    let mut clusters: Vec<(char, Vec<char>)> = Vec::new();
    for c in text.chars() {
        if is_arabic_letter(c) {
            clusters.push((c, Vec::new()));
        } else if is_diacritic(c) {
            if let Some(last) = clusters.last_mut() {
                last.1.push(c);
            }
        }
    }
    clusters
}

/// Classify a captured malformed form by the vowel mark on its second
/// radical. `None` means the form is unclassifiable: either too short or
/// the mark is missing/unrecognized.
pub fn second_radical_vowel(form: &str) -> Option<PatternVowel> {
    let clusters = letter_clusters(form);
    let (_, marks) = clusters.get(1)?;
    marks.iter().copied().find_map(PatternVowel::from_mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect_like(second_mark: char) -> String {
        // A perfect-shaped form over the root ب ت ر with the given mark on
        // the second radical.
        ['ب', FATHA, 'ت', second_mark, 'ر', FATHA].iter().collect()
    }

    #[test]
    fn strips_only_diacritics() {
        let form = perfect_like(DAMMA);
        assert_eq!(strip_diacritics(&form), "بتر");
        assert_eq!(strip_diacritics("aor. بَتَرَ"), "aor. بتر");
    }

    #[test]
    fn skeleton_drops_non_arabic() {
        assert_eq!(consonant_skeleton("aor. بَتَرَ!"), "بتر");
        assert_eq!(radicals("بَتَرَ"), vec!['ب', 'ت', 'ر']);
    }

    #[test]
    fn classifies_second_radical() {
        assert_eq!(
            second_radical_vowel(&perfect_like(DAMMA)),
            Some(PatternVowel::Damma)
        );
        assert_eq!(
            second_radical_vowel(&perfect_like(FATHA)),
            Some(PatternVowel::Fatha)
        );
        assert_eq!(
            second_radical_vowel(&perfect_like(KASRA)),
            Some(PatternVowel::Kasra)
        );
    }

    #[test]
    fn unmarked_second_radical_is_unclassifiable() {
        assert_eq!(second_radical_vowel("بتر"), None);
        let sukun_form: String = ['ب', FATHA, 'ت', SUKUN, 'ر', FATHA].iter().collect();
        assert_eq!(second_radical_vowel(&sukun_form), None);
        // Too short to have a second radical at all.
        assert_eq!(second_radical_vowel("ب"), None);
        assert_eq!(second_radical_vowel(""), None);
    }

    #[test]
    fn clusters_attach_marks_to_letters() {
        let form = perfect_like(KASRA);
        let clusters = letter_clusters(&form);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0], ('ب', vec![FATHA]));
        assert_eq!(clusters[1], ('ت', vec![KASRA]));
    }
}
