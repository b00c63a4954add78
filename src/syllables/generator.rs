//! Random syllable generation honoring the spelling rules.

use super::orthography::{is_valid_syllable, valid_vowels_for, CONSONANTS, VOWELS};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Letter order inside a syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyllableOrder {
    /// Consonant + vowel ("БА"). Subject to the spelling rules.
    #[default]
    Cv,
    /// Vowel + consonant ("АБ"). Every pair is allowed.
    Vc,
}

impl SyllableOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Cv => Self::Vc,
            Self::Vc => Self::Cv,
        }
    }

    /// Example syllable shown on the menu toggle.
    pub fn sample(self) -> &'static str {
        match self {
            Self::Cv => "БА",
            Self::Vc => "АБ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cv => "Согласная + Гласная",
            Self::Vc => "Гласная + Согласная",
        }
    }
}

fn join(consonant: char, vowel: char, order: SyllableOrder) -> String {
    match order {
        SyllableOrder::Cv => [consonant, vowel].iter().collect(),
        SyllableOrder::Vc => [vowel, consonant].iter().collect(),
    }
}

fn pick<R: Rng>(letters: &[char], rng: &mut R) -> char {
    // Both letter tables are non-empty constants.
    *letters.choose(rng).unwrap_or(&letters[0])
}

/// Any syllable in the requested order.
pub fn generate_random_syllable<R: Rng>(order: SyllableOrder, rng: &mut R) -> String {
    match order {
        SyllableOrder::Cv => loop {
            let consonant = pick(&CONSONANTS, rng);
            let vowel = pick(&VOWELS, rng);
            if is_valid_syllable(consonant, vowel) {
                return join(consonant, vowel, order);
            }
        },
        SyllableOrder::Vc => join(pick(&CONSONANTS, rng), pick(&VOWELS, rng), order),
    }
}

/// A syllable built around `consonant`.
///
/// In CV order only the vowels allowed after `consonant` are drawn, so the
/// result is valid without retrying.
pub fn generate_syllable_with_consonant<R: Rng>(
    consonant: char,
    order: SyllableOrder,
    rng: &mut R,
) -> String {
    let vowel = match order {
        SyllableOrder::Cv => {
            let allowed = valid_vowels_for(consonant);
            if allowed.is_empty() {
                pick(&VOWELS, rng)
            } else {
                pick(&allowed, rng)
            }
        }
        SyllableOrder::Vc => pick(&VOWELS, rng),
    };
    join(consonant, vowel, order)
}

/// A syllable that differs from `current`.
///
/// With `consonant` set, every candidate uses that consonant. Each consonant
/// has at least five allowed vowels, so the loop always terminates.
pub fn generate_different_syllable<R: Rng>(
    current: &str,
    order: SyllableOrder,
    consonant: Option<char>,
    rng: &mut R,
) -> String {
    loop {
        let candidate = match consonant {
            Some(c) => generate_syllable_with_consonant(c, order, rng),
            None => generate_random_syllable(order, rng),
        };
        if candidate != current {
            return candidate;
        }
    }
}

/// Case-transform a syllable for display. Returns an empty string for
/// anything shorter than two letters.
pub fn format_syllable(syllable: &str, uppercase: bool) -> String {
    if syllable.chars().count() < 2 {
        return String::new();
    }
    if uppercase {
        syllable.to_uppercase()
    } else {
        syllable.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllables::orthography::{is_consonant, is_vowel};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn letters(s: &str) -> (char, char) {
        let mut chars = s.chars();
        (chars.next().unwrap(), chars.next().unwrap())
    }

    #[test]
    fn test_cv_syllables_are_valid() {
        let mut rng = rng();
        for _ in 0..500 {
            let s = generate_random_syllable(SyllableOrder::Cv, &mut rng);
            let (c, v) = letters(&s);
            assert!(is_consonant(c));
            assert!(is_vowel(v));
            assert!(is_valid_syllable(c, v), "{} breaks spelling rules", s);
        }
    }

    #[test]
    fn test_vc_syllables_start_with_vowel() {
        let mut rng = rng();
        for _ in 0..200 {
            let s = generate_random_syllable(SyllableOrder::Vc, &mut rng);
            let (v, c) = letters(&s);
            assert!(is_vowel(v));
            assert!(is_consonant(c));
        }
    }

    #[test]
    fn test_with_consonant_uses_that_consonant() {
        let mut rng = rng();
        for _ in 0..100 {
            let s = generate_syllable_with_consonant('ш', SyllableOrder::Cv, &mut rng);
            let (c, v) = letters(&s);
            assert_eq!(c, 'ш');
            assert!(is_valid_syllable(c, v));

            let s = generate_syllable_with_consonant('ш', SyllableOrder::Vc, &mut rng);
            assert_eq!(s.chars().nth(1), Some('ш'));
        }
    }

    #[test]
    fn test_different_syllable_never_repeats() {
        let mut rng = rng();
        let mut prev = generate_random_syllable(SyllableOrder::Cv, &mut rng);
        for _ in 0..500 {
            let next = generate_different_syllable(&prev, SyllableOrder::Cv, None, &mut rng);
            assert_ne!(next, prev);
            prev = next;
        }
    }

    #[test]
    fn test_different_syllable_with_narrow_consonant() {
        let mut rng = rng();
        let mut prev = "ша".to_string();
        for _ in 0..200 {
            let next =
                generate_different_syllable(&prev, SyllableOrder::Cv, Some('ш'), &mut rng);
            assert_ne!(next, prev);
            assert!(next.starts_with('ш'));
            prev = next;
        }
    }

    #[test]
    fn test_format_syllable() {
        assert_eq!(format_syllable("ба", true), "БА");
        assert_eq!(format_syllable("БА", false), "ба");
        assert_eq!(format_syllable("ё", true), "");
        assert_eq!(format_syllable("", true), "");
    }

    #[test]
    fn test_order_toggle_and_samples() {
        assert_eq!(SyllableOrder::Cv.toggled(), SyllableOrder::Vc);
        assert_eq!(SyllableOrder::Vc.toggled(), SyllableOrder::Cv);
        assert_eq!(SyllableOrder::Cv.sample(), "БА");
        assert_eq!(SyllableOrder::default(), SyllableOrder::Cv);
    }
}
