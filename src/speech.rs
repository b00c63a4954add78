//! Text-to-speech collaborators.
//!
//! Callers never see a failure. A new utterance cancels the one still
//! playing; callers that must not cut it short poll [`Speaker::is_speaking`].

use serde::{Deserialize, Serialize};
use std::process::{Child, Command, Stdio};

/// espeak-ng speaks at 175 words per minute when no rate is given.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;
/// espeak-ng's neutral pitch on its 0-99 scale.
const BASE_PITCH: f32 = 50.0;

/// Anything that can say a syllable out loud.
pub trait Speaker {
    fn speak(&mut self, text: &str);

    /// Stop whatever is currently being spoken.
    fn cancel(&mut self) {}

    /// True while an utterance is still playing.
    fn is_speaking(&mut self) -> bool {
        false
    }
}

/// Voice parameters, stored in the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechOptions {
    /// Executable to run, e.g. `espeak-ng` or `espeak`.
    pub command: String,
    /// Voice / language passed with `-v`.
    pub voice: String,
    /// Speaking rate relative to normal speed.
    pub rate: f32,
    /// Pitch relative to normal pitch.
    pub pitch: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            command: "espeak-ng".to_string(),
            voice: "ru".to_string(),
            rate: 0.7,
            pitch: 1.2,
        }
    }
}

impl SpeechOptions {
    /// Command-line arguments for an espeak-compatible program.
    pub fn args(&self, text: &str) -> Vec<String> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * self.rate).round().max(80.0) as u32;
        let pitch = (BASE_PITCH * self.pitch).round().clamp(0.0, 99.0) as u32;
        vec![
            "-v".to_string(),
            self.voice.clone(),
            "-s".to_string(),
            words_per_minute.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            text.to_string(),
        ]
    }
}

/// Speaks through an external espeak-compatible program.
pub struct CommandSpeaker {
    options: SpeechOptions,
    current: Option<Child>,
    /// Set after the first spawn failure so the log is not flooded.
    unavailable: bool,
}

impl CommandSpeaker {
    pub fn new(options: SpeechOptions) -> Self {
        Self {
            options,
            current: None,
            unavailable: false,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) {
        if text.is_empty() || self.unavailable {
            return;
        }
        self.cancel();

        let spawned = Command::new(&self.options.command)
            .args(self.options.args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                log::debug!("speaking {:?}", text);
                self.current = Some(child);
            }
            Err(e) => {
                log::warn!(
                    "speech disabled: could not run {:?}: {}",
                    self.options.command,
                    e
                );
                self.unavailable = true;
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // Already-finished children report an error here; nothing to do.
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        let Some(child) = self.current.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(_)) => {
                self.current = None;
                false
            }
            Err(e) => {
                log::debug!("lost track of speech process: {}", e);
                self.current = None;
                false
            }
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Used when sound is muted.
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str) {}
}

/// Remembers every utterance; lets tests assert on what would be spoken.
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    pub spoken: Vec<String>,
    pub cancels: usize,
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}
