//! Russian letters and the spelling rules that decide which
//! consonant + vowel pairs may appear as a syllable.

/// The 20 consonants offered in the consonant grid and used for generation.
pub const CONSONANTS: [char; 20] = [
    'б', 'в', 'г', 'д', 'ж', 'з', 'к', 'л', 'м', 'н', 'п', 'р', 'с', 'т', 'ф', 'х', 'ц', 'ч', 'ш',
    'щ',
];

/// The 10 vowels.
pub const VOWELS: [char; 10] = ['а', 'о', 'у', 'ы', 'э', 'я', 'ё', 'ю', 'и', 'е'];

/// Consonant + vowel pairs that Russian spelling never produces.
///
/// - ЖИ, ШИ are written with И, never Ы
/// - ЧА, ЩА are written with А, never Я
/// - ЧУ, ЩУ are written with У, never Ю
/// - Ж, Ш, Ч, Щ, Ц are never followed by Э
const FORBIDDEN_PAIRS: [(char, char); 21] = [
    ('ж', 'ы'),
    ('ж', 'я'),
    ('ж', 'ю'),
    ('ж', 'э'),
    ('ш', 'ы'),
    ('ш', 'я'),
    ('ш', 'ё'),
    ('ш', 'ю'),
    ('ш', 'э'),
    ('ч', 'ы'),
    ('ч', 'я'),
    ('ч', 'ю'),
    ('ч', 'э'),
    ('щ', 'ы'),
    ('щ', 'я'),
    ('щ', 'ю'),
    ('щ', 'э'),
    ('ц', 'я'),
    ('ц', 'ё'),
    ('ц', 'ю'),
    ('ц', 'э'),
];

/// True if `consonant` followed by `vowel` is allowed by the spelling rules.
pub fn is_valid_syllable(consonant: char, vowel: char) -> bool {
    !FORBIDDEN_PAIRS.contains(&(consonant, vowel))
}

/// All vowels that may follow `consonant`.
pub fn valid_vowels_for(consonant: char) -> Vec<char> {
    VOWELS
        .iter()
        .copied()
        .filter(|&vowel| is_valid_syllable(consonant, vowel))
        .collect()
}

pub fn is_consonant(letter: char) -> bool {
    CONSONANTS.contains(&letter)
}

pub fn is_vowel(letter: char) -> bool {
    VOWELS.contains(&letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_counts() {
        assert_eq!(CONSONANTS.len(), 20);
        assert_eq!(VOWELS.len(), 10);
    }

    #[test]
    fn test_zhi_shi_rule() {
        assert!(is_valid_syllable('ж', 'и'));
        assert!(is_valid_syllable('ш', 'и'));
        assert!(!is_valid_syllable('ж', 'ы'));
        assert!(!is_valid_syllable('ш', 'ы'));
    }

    #[test]
    fn test_cha_shcha_rule() {
        assert!(is_valid_syllable('ч', 'а'));
        assert!(is_valid_syllable('щ', 'а'));
        assert!(!is_valid_syllable('ч', 'я'));
        assert!(!is_valid_syllable('щ', 'я'));
    }

    #[test]
    fn test_chu_shchu_rule() {
        assert!(is_valid_syllable('ч', 'у'));
        assert!(is_valid_syllable('щ', 'у'));
        assert!(!is_valid_syllable('ч', 'ю'));
        assert!(!is_valid_syllable('щ', 'ю'));
    }

    #[test]
    fn test_no_e_after_hushing_consonants() {
        for c in ['ж', 'ш', 'ч', 'щ', 'ц'] {
            assert!(!is_valid_syllable(c, 'э'), "{}э should be forbidden", c);
        }
        assert!(is_valid_syllable('м', 'э'));
    }

    #[test]
    fn test_plain_consonants_accept_every_vowel() {
        for c in ['б', 'м', 'р', 'т'] {
            assert_eq!(valid_vowels_for(c).len(), VOWELS.len());
        }
    }

    #[test]
    fn test_every_consonant_has_a_vowel() {
        for c in CONSONANTS {
            assert!(!valid_vowels_for(c).is_empty(), "{} has no vowels", c);
        }
    }

    #[test]
    fn test_restricted_consonant_vowel_counts() {
        assert_eq!(valid_vowels_for('ж').len(), 6);
        assert_eq!(valid_vowels_for('ш').len(), 5);
        assert_eq!(valid_vowels_for('ц').len(), 6);
    }

    #[test]
    fn test_letter_classes() {
        assert!(is_consonant('б'));
        assert!(!is_consonant('а'));
        assert!(is_vowel('ё'));
        assert!(!is_vowel('щ'));
    }
}
