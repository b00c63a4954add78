//! Russian syllables: spelling rules and random generation.

pub mod generator;
pub mod orthography;

pub use generator::{
    format_syllable, generate_different_syllable, generate_random_syllable,
    generate_syllable_with_consonant, SyllableOrder,
};
pub use orthography::{is_valid_syllable, valid_vowels_for, CONSONANTS, VOWELS};
