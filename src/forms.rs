//! Derived verb forms II-XIII, generated from Lane's preface table.
//!
//! Form I is handled by the aorist corrector; everything from فَعَّلَ up to
//! the rare اِفْعَوَّلَ is generated here from a root's first three consonants,
//! with the phonological assimilation shapes Lane notes for Forms V-VII.

use crate::script::{ALIF, ALIF_HAMZA, FATHA, KASRA, MIM, NUN, SEEN, SHADDA, SUKUN, TA, WAW};

/// Initial radicals that assimilate the ت of Forms V and VI into a
/// geminated اِفَّعَّلَ shape.
const ASSIMILATING: [char; 12] = [
    'ت', 'ث', 'ج', 'د', 'ذ', 'ز', 'س', 'ش', 'ص', 'ض', 'ط', 'ظ',
];

/// Lowest and highest form numbers this table covers.
pub const FIRST_DERIVED_FORM: u8 = 2;
pub const LAST_DERIVED_FORM: u8 = 13;

/// Human-readable template for a derived form number, for reports.
pub fn form_template(number: u8) -> Option<&'static str> {
    match number {
        2 => Some("فَعَّلَ"),
        3 => Some("فَاعَلَ"),
        4 => Some("أَفْعَلَ"),
        5 => Some("تَفَعَّلَ"),
        6 => Some("تَفَاعَلَ"),
        7 => Some("اِنْفَعَلَ"),
        8 => Some("اِفْتَعَلَ"),
        9 => Some("اِفْعَلَّ"),
        10 => Some("اِسْتَفْعَلَ"),
        11 => Some("اِفْعَالَّ"),
        12 => Some("اِفْعَوْعَلَ"),
        13 => Some("اِفْعَوَّلَ"),
        _ => None,
    }
}

/// Generate the perfect of derived form `number` for a triliteral root.
/// Returns `None` for form numbers outside 2-13 or roots shorter than three
/// consonants.
pub fn derived_form(number: u8, radicals: &[char]) -> Option<String> {
    if radicals.len() < 3 {
        return None;
    }
    let (f, a, l) = (radicals[0], radicals[1], radicals[2]);
    let mut out = String::with_capacity(24);

    match number {
        // فَعَّلَ
        2 => {
            push_all(&mut out, &[f, FATHA, a, SHADDA, FATHA, l, FATHA]);
        }
        // فَاعَلَ
        3 => {
            push_all(&mut out, &[f, FATHA, ALIF, a, FATHA, l, FATHA]);
        }
        // أَفْعَلَ
        4 => {
            push_all(&mut out, &[ALIF_HAMZA, FATHA, f, SUKUN, a, FATHA, l, FATHA]);
        }
        // تَفَعَّلَ, or اِفَّعَّلَ when the first radical assimilates the ت
        5 => {
            if ASSIMILATING.contains(&f) {
                push_all(
                    &mut out,
                    &[ALIF, KASRA, f, SHADDA, FATHA, a, SHADDA, FATHA, l, FATHA],
                );
            } else {
                push_all(&mut out, &[TA, FATHA, f, FATHA, a, SHADDA, FATHA, l, FATHA]);
            }
        }
        // تَفَاعَلَ, same assimilation as Form V
        6 => {
            if ASSIMILATING.contains(&f) {
                push_all(
                    &mut out,
                    &[ALIF, KASRA, f, SHADDA, FATHA, ALIF, a, FATHA, l, FATHA],
                );
            } else {
                push_all(&mut out, &[TA, FATHA, f, FATHA, ALIF, a, FATHA, l, FATHA]);
            }
        }
        // اِنْفَعَلَ; ن or م initial radicals geminate: اِنَّصَرَ, اِمَّلَسَ
        7 => {
            if f == NUN || f == MIM {
                push_all(&mut out, &[ALIF, KASRA, f, SHADDA, FATHA, a, FATHA, l, FATHA]);
            } else {
                push_all(
                    &mut out,
                    &[ALIF, KASRA, NUN, SUKUN, f, FATHA, a, FATHA, l, FATHA],
                );
            }
        }
        // اِفْتَعَلَ
        8 => {
            push_all(
                &mut out,
                &[ALIF, KASRA, f, SUKUN, TA, FATHA, a, FATHA, l, FATHA],
            );
        }
        // اِفْعَلَّ
        9 => {
            push_all(&mut out, &[ALIF, KASRA, f, SUKUN, a, FATHA, l, SHADDA, FATHA]);
        }
        // اِسْتَفْعَلَ
        10 => {
            push_all(
                &mut out,
                &[ALIF, KASRA, SEEN, SUKUN, TA, FATHA, f, SUKUN, a, FATHA, l, FATHA],
            );
        }
        // اِفْعَالَّ
        11 => {
            push_all(
                &mut out,
                &[ALIF, KASRA, f, SUKUN, a, FATHA, ALIF, l, SHADDA, FATHA],
            );
        }
        // اِفْعَوْعَلَ
        12 => {
            push_all(
                &mut out,
                &[ALIF, KASRA, f, SUKUN, a, FATHA, WAW, SUKUN, a, FATHA, l, FATHA],
            );
        }
        // اِفْعَوَّلَ
        13 => {
            push_all(
                &mut out,
                &[ALIF, KASRA, f, SUKUN, a, FATHA, WAW, SHADDA, FATHA, l, FATHA],
            );
        }
        _ => return None,
    }

    Some(out)
}

fn push_all(out: &mut String, chars: &[char]) {
    for &c in chars {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::radicals;

    #[test]
    fn form_two_geminates_second_radical() {
        let root = radicals("بتر");
        let form = derived_form(2, &root).unwrap();
        let expected: String = ['ب', FATHA, 'ت', SHADDA, FATHA, 'ر', FATHA]
            .iter()
            .collect();
        assert_eq!(form, expected);
    }

    #[test]
    fn form_four_prefixes_hamza() {
        let root = radicals("فعل");
        assert_eq!(derived_form(4, &root).unwrap(), "أَفْعَلَ");
    }

    #[test]
    fn templates_regenerate_from_template_root() {
        let root = ['ف', 'ع', 'ل'];
        for n in FIRST_DERIVED_FORM..=LAST_DERIVED_FORM {
            // Forms 5-7 have assimilation exceptions, but ف is not an
            // assimilating or nasal radical so the plain shapes apply.
            assert_eq!(
                derived_form(n, &root).as_deref(),
                form_template(n),
                "form {n}"
            );
        }
    }

    #[test]
    fn form_seven_assimilates_nun_and_mim() {
        let nun_root = radicals("نصر");
        let expected: String = [ALIF, KASRA, 'ن', SHADDA, FATHA, 'ص', FATHA, 'ر', FATHA]
            .iter()
            .collect();
        assert_eq!(derived_form(7, &nun_root).unwrap(), expected);

        let mim_root = radicals("ملس");
        let expected: String = [ALIF, KASRA, 'م', SHADDA, FATHA, 'ل', FATHA, 'س', FATHA]
            .iter()
            .collect();
        assert_eq!(derived_form(7, &mim_root).unwrap(), expected);
    }

    #[test]
    fn form_five_assimilates_coronal_initials() {
        let root = radicals("تبع");
        let form = derived_form(5, &root).unwrap();
        assert!(form.starts_with(ALIF), "expected اِفَّعَّلَ shape, got {form}");
    }

    #[test]
    fn out_of_table_inputs_are_rejected() {
        let root = radicals("بتر");
        assert!(derived_form(1, &root).is_none());
        assert!(derived_form(14, &root).is_none());
        assert!(derived_form(2, &['ب', 'ت']).is_none());
    }
}
