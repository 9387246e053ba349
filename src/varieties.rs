//! Lane's six Form I conjugation varieties, from the "Table of the
//! Conjugations of Arabic Verbs" in the Preface.
//!
//! The table is the whole classification: a (perfect-diacritic,
//! aorist-diacritic) pair per variety, kept as an explicit enumerated
//! mapping so tests can walk all six cases.

use crate::script::{DAMMA, FATHA, PatternVowel, SUKUN, YA, consonant_skeleton};

#[derive(Debug, Clone, Copy)]
pub struct Variety {
    pub number: u8,
    /// The perfect template, e.g. فَعَلَ.
    pub perfect: &'static str,
    /// The aorist template, e.g. يَفْعُلُ.
    pub aorist: &'static str,
    /// Vowel on the second radical of the aorist.
    pub aorist_vowel: PatternVowel,
}

pub const VARIETIES: [Variety; 6] = [
    Variety {
        number: 1,
        perfect: "فَعَلَ",
        aorist: "يَفْعُلُ",
        aorist_vowel: PatternVowel::Damma,
    },
    Variety {
        number: 2,
        perfect: "فَعَلَ",
        aorist: "يَفْعِلُ",
        aorist_vowel: PatternVowel::Kasra,
    },
    Variety {
        number: 3,
        perfect: "فَعَلَ",
        aorist: "يَفْعَلُ",
        aorist_vowel: PatternVowel::Fatha,
    },
    Variety {
        number: 4,
        perfect: "فَعِلَ",
        aorist: "يَفْعَلُ",
        aorist_vowel: PatternVowel::Fatha,
    },
    Variety {
        number: 5,
        perfect: "فَعُلَ",
        aorist: "يَفْعُلُ",
        aorist_vowel: PatternVowel::Damma,
    },
    Variety {
        number: 6,
        perfect: "فَعِلَ",
        aorist: "يَفْعِلُ",
        aorist_vowel: PatternVowel::Kasra,
    },
];

/// Build the aorist for a triliteral root with the given second-radical
/// vowel: يَ + C1 + sukun + C2 + vowel + C3 + damma.
///
/// Returns `None` for roots with fewer than three consonants; extra
/// consonants beyond the third are ignored here and rejected later by the
/// integrity check.
pub fn build_aorist(radicals: &[char], vowel: PatternVowel) -> Option<String> {
    if radicals.len() < 3 {
        return None;
    }
    let mut aorist = String::with_capacity(16);
    aorist.push(YA);
    aorist.push(FATHA);
    aorist.push(radicals[0]);
    aorist.push(SUKUN);
    aorist.push(radicals[1]);
    aorist.push(vowel.mark());
    aorist.push(radicals[2]);
    aorist.push(DAMMA);
    Some(aorist)
}

/// Root preservation check: the corrected form stripped of diacritics must
/// be exactly the input skeleton with one prepended ي.
pub fn preserves_root(original: &str, corrected: &str) -> bool {
    let mut expected = String::new();
    expected.push(YA);
    expected.push_str(&consonant_skeleton(original));
    consonant_skeleton(corrected) == expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::radicals;

    #[test]
    fn all_six_varieties_match_their_templates() {
        // Applying the variety's vowel to the template root ف ع ل must
        // reproduce the aorist column of the table.
        let template = ['ف', 'ع', 'ل'];
        for variety in VARIETIES {
            let built = build_aorist(&template, variety.aorist_vowel).unwrap();
            assert_eq!(built, variety.aorist, "variety {}", variety.number);
        }
    }

    #[test]
    fn damma_on_second_radical_yields_yabturu() {
        let root = radicals("بتر");
        let aorist = build_aorist(&root, PatternVowel::Damma).unwrap();
        let expected: String = ['ي', FATHA, 'ب', SUKUN, 'ت', DAMMA, 'ر', DAMMA]
            .iter()
            .collect();
        assert_eq!(aorist, expected);
        assert!(preserves_root("بتر", &aorist));
    }

    #[test]
    fn short_roots_are_rejected() {
        assert!(build_aorist(&['ب', 'ت'], PatternVowel::Kasra).is_none());
        assert!(build_aorist(&[], PatternVowel::Fatha).is_none());
    }

    #[test]
    fn quadriliteral_fails_root_preservation() {
        // Only the first three consonants make it into the aorist, so the
        // skeleton no longer matches and the correction must be aborted.
        let root = radicals("دحرج");
        let aorist = build_aorist(&root, PatternVowel::Kasra).unwrap();
        assert!(!preserves_root("دحرج", &aorist));
    }
}
