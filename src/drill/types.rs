//! Flash-card drill data structures.

use crate::race::types::ColorHex;
use crate::syllables::{generate_random_syllable, generate_syllable_with_consonant, SyllableOrder};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fade between the end of the spoken card (or the key press when muted)
/// and the next card appearing.
pub const FADE_MS: u64 = 150;

/// Which syllables the drill draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillMode {
    Random,
    /// Only syllables containing this consonant.
    Selected(char),
}

impl DrillMode {
    pub fn consonant(self) -> Option<char> {
        match self {
            Self::Random => None,
            Self::Selected(c) => Some(c),
        }
    }
}

/// Card background, cycled with `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Black,
    Gray,
    Beige,
    Blue,
}

impl Background {
    pub const ALL: [Background; 5] = [
        Self::White,
        Self::Black,
        Self::Gray,
        Self::Beige,
        Self::Blue,
    ];

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::White => "Белый",
            Self::Black => "Черный",
            Self::Gray => "Серый",
            Self::Beige => "Бежевый",
            Self::Blue => "Синий",
        }
    }

    /// (background, text) colors.
    pub fn colors(self) -> (ColorHex, ColorHex) {
        match self {
            Self::White => (0xFFFFFF, 0x1F2937),
            Self::Black => (0x111827, 0xFFFFFF),
            Self::Gray => (0xF3F4F6, 0x1F2937),
            Self::Beige => (0xFFFBEB, 0x1F2937),
            Self::Blue => (0xEFF6FF, 0x1F2937),
        }
    }
}

/// Display preferences shared with the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillPrefs {
    pub sound_enabled: bool,
    pub uppercase: bool,
    pub background: Background,
}

impl Default for DrillPrefs {
    fn default() -> Self {
        Self {
            sound_enabled: false,
            uppercase: true,
            background: Background::White,
        }
    }
}

/// A running drill.
#[derive(Debug, Clone)]
pub struct DrillSession {
    pub mode: DrillMode,
    pub order: SyllableOrder,
    /// Lowercase syllable on the card.
    pub current: String,
    /// Cards shown after the first one.
    pub count: u32,
    pub prefs: DrillPrefs,
    /// The current card is being read aloud; the fade starts when it ends.
    pub awaiting_speech: bool,
    /// Set while the card is fading out; the next card appears at this time.
    pub fade_until_ms: Option<u64>,
}

impl DrillSession {
    pub fn new<R: Rng>(mode: DrillMode, order: SyllableOrder, prefs: DrillPrefs, rng: &mut R) -> Self {
        let current = match mode {
            DrillMode::Random => generate_random_syllable(order, rng),
            DrillMode::Selected(c) => generate_syllable_with_consonant(c, order, rng),
        };
        Self {
            mode,
            order,
            current,
            count: 0,
            prefs,
            awaiting_speech: false,
            fade_until_ms: None,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade_until_ms.is_some()
    }

    /// Space was pressed and the next card is not shown yet.
    pub fn is_advancing(&self) -> bool {
        self.awaiting_speech || self.is_fading()
    }
}

/// What a key press means during a drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillInput {
    Next,
    ToggleSound,
    CycleBackground,
    ToggleCase,
    Menu,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillCommand {
    Continue,
    ReturnToMenu,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_background_cycles_through_all() {
        let mut bg = Background::White;
        let mut seen = vec![bg];
        for _ in 0..4 {
            bg = bg.next();
            seen.push(bg);
        }
        assert_eq!(seen, Background::ALL.to_vec());
        assert_eq!(bg.next(), Background::White);
    }

    #[test]
    fn test_background_names() {
        assert_eq!(Background::Black.name(), "Черный");
        assert_eq!(Background::Blue.name(), "Синий");
    }

    #[test]
    fn test_selected_mode_first_card_has_consonant() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for order in [SyllableOrder::Cv, SyllableOrder::Vc] {
            let drill = DrillSession::new(DrillMode::Selected('м'), order, DrillPrefs::default(), &mut rng);
            assert!(drill.current.contains('м'));
            assert_eq!(drill.count, 0);
            assert!(!drill.is_advancing());
        }
    }

    #[test]
    fn test_default_prefs() {
        let prefs = DrillPrefs::default();
        assert!(!prefs.sound_enabled);
        assert!(prefs.uppercase);
        assert_eq!(prefs.background, Background::White);
    }
}
