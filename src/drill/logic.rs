//! Flash-card drill logic.

use super::types::*;
use crate::speech::Speaker;
use crate::syllables::generate_different_syllable;
use rand::Rng;

/// Process a key press at time `now_ms`.
pub fn process_input(
    drill: &mut DrillSession,
    input: DrillInput,
    now_ms: u64,
    speaker: &mut dyn Speaker,
) -> DrillCommand {
    match input {
        DrillInput::Next => {
            // Presses while the card is read or fading are dropped
            if drill.is_advancing() {
                return DrillCommand::Continue;
            }
            if drill.prefs.sound_enabled {
                speaker.speak(&drill.current);
                drill.awaiting_speech = true;
            } else {
                drill.fade_until_ms = Some(now_ms + FADE_MS);
            }
        }
        DrillInput::ToggleSound => {
            drill.prefs.sound_enabled = !drill.prefs.sound_enabled;
            if !drill.prefs.sound_enabled {
                speaker.cancel();
            }
        }
        DrillInput::CycleBackground => drill.prefs.background = drill.prefs.background.next(),
        DrillInput::ToggleCase => drill.prefs.uppercase = !drill.prefs.uppercase,
        DrillInput::Menu => {
            speaker.cancel();
            return DrillCommand::ReturnToMenu;
        }
        DrillInput::Other => {}
    }
    DrillCommand::Continue
}

/// Start the fade once the card has been read, then swap in the next card
/// when the fade is over. Returns true if the card changed.
pub fn tick_drill<R: Rng>(
    drill: &mut DrillSession,
    now_ms: u64,
    rng: &mut R,
    speaker: &mut dyn Speaker,
) -> bool {
    if drill.awaiting_speech {
        if speaker.is_speaking() {
            return false;
        }
        drill.awaiting_speech = false;
        drill.fade_until_ms = Some(now_ms + FADE_MS);
    }
    match drill.fade_until_ms {
        Some(until) if now_ms >= until => {
            drill.current =
                generate_different_syllable(&drill.current, drill.order, drill.mode.consonant(), rng);
            drill.count += 1;
            drill.fade_until_ms = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::{Clock, ManualClock};
    use crate::speech::RecordingSpeaker;
    use crate::syllables::SyllableOrder;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Keeps talking until told to stop.
    #[derive(Default)]
    struct BusySpeaker {
        busy: bool,
        spoken: usize,
        cancels: usize,
    }

    impl Speaker for BusySpeaker {
        fn speak(&mut self, _text: &str) {
            self.spoken += 1;
            self.busy = true;
        }

        fn cancel(&mut self) {
            self.cancels += 1;
            self.busy = false;
        }

        fn is_speaking(&mut self) -> bool {
            self.busy
        }
    }

    fn started_drill(mode: DrillMode, sound: bool) -> (DrillSession, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let prefs = DrillPrefs {
            sound_enabled: sound,
            ..Default::default()
        };
        let drill = DrillSession::new(mode, SyllableOrder::Cv, prefs, &mut rng);
        (drill, rng)
    }

    // ── Input tests ──

    #[test]
    fn test_next_speaks_current_when_sound_on() {
        let (mut drill, _) = started_drill(DrillMode::Random, true);
        let mut speaker = RecordingSpeaker::default();
        let shown = drill.current.clone();
        process_input(&mut drill, DrillInput::Next, 0, &mut speaker);
        assert_eq!(speaker.spoken, vec![shown]);
        assert!(drill.awaiting_speech);
        assert!(!drill.is_fading());
    }

    #[test]
    fn test_next_silent_when_sound_off() {
        let (mut drill, _) = started_drill(DrillMode::Random, false);
        let mut speaker = RecordingSpeaker::default();
        process_input(&mut drill, DrillInput::Next, 0, &mut speaker);
        assert!(speaker.spoken.is_empty());
        assert!(!drill.awaiting_speech);
        assert!(drill.is_fading());
    }

    #[test]
    fn test_next_ignored_while_fading() {
        let (mut drill, mut rng) = started_drill(DrillMode::Random, true);
        let mut speaker = RecordingSpeaker::default();
        let clock = ManualClock::new(0);
        process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);
        tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker);
        clock.advance(50);
        process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);
        assert_eq!(speaker.spoken.len(), 1);
        assert_eq!(drill.fade_until_ms, Some(FADE_MS));
        clock.advance(150);
        tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker);
        assert_eq!(drill.count, 1);
    }

    #[test]
    fn test_toggles() {
        let (mut drill, _) = started_drill(DrillMode::Random, false);
        let mut speaker = RecordingSpeaker::default();

        process_input(&mut drill, DrillInput::ToggleSound, 0, &mut speaker);
        assert!(drill.prefs.sound_enabled);
        process_input(&mut drill, DrillInput::ToggleSound, 0, &mut speaker);
        assert!(!drill.prefs.sound_enabled);
        assert_eq!(speaker.cancels, 1);

        process_input(&mut drill, DrillInput::CycleBackground, 0, &mut speaker);
        assert_eq!(drill.prefs.background, Background::Black);

        process_input(&mut drill, DrillInput::ToggleCase, 0, &mut speaker);
        assert!(!drill.prefs.uppercase);
    }

    #[test]
    fn test_menu_returns() {
        let (mut drill, _) = started_drill(DrillMode::Random, false);
        let mut speaker = RecordingSpeaker::default();
        assert_eq!(
            process_input(&mut drill, DrillInput::Menu, 0, &mut speaker),
            DrillCommand::ReturnToMenu
        );
        assert_eq!(
            process_input(&mut drill, DrillInput::Other, 0, &mut speaker),
            DrillCommand::Continue
        );
    }

    // ── Tick tests ──

    #[test]
    fn test_card_changes_after_fade() {
        let (mut drill, mut rng) = started_drill(DrillMode::Random, false);
        let mut speaker = RecordingSpeaker::default();
        let clock = ManualClock::new(1000);
        let first = drill.current.clone();
        process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);

        clock.advance(100);
        assert!(!tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
        assert_eq!(drill.current, first);
        assert_eq!(drill.count, 0);

        clock.advance(50);
        assert!(tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
        assert_ne!(drill.current, first);
        assert_eq!(drill.count, 1);
        assert!(!drill.is_advancing());
    }

    #[test]
    fn test_card_waits_for_speech_to_end() {
        let (mut drill, mut rng) = started_drill(DrillMode::Random, true);
        let mut speaker = BusySpeaker::default();
        let clock = ManualClock::new(0);
        let first = drill.current.clone();
        process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);

        // A long utterance holds the card well past the fade
        for _ in 0..20 {
            clock.advance(100);
            assert!(!tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
            process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);
        }
        assert_eq!(drill.current, first);
        assert_eq!(speaker.spoken, 1);
        assert_eq!(speaker.cancels, 0);

        speaker.busy = false;
        assert!(!tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
        assert_eq!(drill.fade_until_ms, Some(clock.now_ms() + FADE_MS));
        clock.advance(FADE_MS);
        assert!(tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
        assert_ne!(drill.current, first);
        assert_eq!(drill.count, 1);
    }

    #[test]
    fn test_muting_mid_speech_releases_card() {
        let (mut drill, mut rng) = started_drill(DrillMode::Random, true);
        let mut speaker = BusySpeaker::default();
        let clock = ManualClock::new(0);
        process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);
        process_input(&mut drill, DrillInput::ToggleSound, clock.now_ms(), &mut speaker);
        assert!(!tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
        clock.advance(FADE_MS);
        assert!(tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker));
    }

    #[test]
    fn test_tick_without_press_does_nothing() {
        let (mut drill, mut rng) = started_drill(DrillMode::Random, false);
        let mut speaker = RecordingSpeaker::default();
        let first = drill.current.clone();
        assert!(!tick_drill(&mut drill, 10_000, &mut rng, &mut speaker));
        assert_eq!(drill.current, first);
    }

    #[test]
    fn test_selected_mode_keeps_consonant() {
        let (mut drill, mut rng) = started_drill(DrillMode::Selected('к'), false);
        let mut speaker = RecordingSpeaker::default();
        let clock = ManualClock::new(0);
        for _ in 0..30 {
            let previous = drill.current.clone();
            process_input(&mut drill, DrillInput::Next, clock.now_ms(), &mut speaker);
            clock.advance(FADE_MS);
            tick_drill(&mut drill, clock.now_ms(), &mut rng, &mut speaker);
            assert!(drill.current.contains('к'));
            assert_ne!(drill.current, previous);
        }
        assert_eq!(drill.count, 30);
    }
}
