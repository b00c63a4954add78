//! Screen state and routing between the menu, the drill and the race.

use crate::drill::{self, DrillCommand, DrillSession};
use crate::input::{is_interrupt, is_press, map_drill_key, map_menu_key, map_race_key};
use crate::menu::{self, MainMenu, MenuAction};
use crate::race::{self, RaceCommand, RaceSession};
use crate::speech::Speaker;
use crate::utils::{SessionOverrides, Settings};
use crossterm::event::KeyEvent;
use rand::Rng;

/// The screen currently shown. Each variant owns its session.
#[derive(Debug)]
pub enum Screen {
    Menu(MainMenu),
    Drill(DrillSession),
    Race(Box<RaceSession>),
}

pub struct App<R: Rng> {
    pub screen: Screen,
    /// What this run plays with: saved settings plus command-line overrides.
    pub settings: Settings,
    /// What goes back to disk. Only changes made in the app reach it.
    saved: Settings,
    speaker: Box<dyn Speaker>,
    rng: R,
    quit: bool,
    /// Settings changed since the last [`App::take_settings_changed`].
    settings_changed: bool,
}

impl<R: Rng> App<R> {
    pub fn new(
        saved: Settings,
        overrides: SessionOverrides,
        speaker: Box<dyn Speaker>,
        rng: R,
    ) -> Self {
        let settings = overrides.effective(&saved);
        Self {
            screen: Screen::Menu(MainMenu::new(settings.order)),
            settings,
            saved,
            speaker,
            rng,
            quit: false,
            settings_changed: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Settings to persist.
    pub fn saved_settings(&self) -> &Settings {
        &self.saved
    }

    /// True once after any setting changed; the caller persists
    /// [`App::saved_settings`].
    pub fn take_settings_changed(&mut self) -> bool {
        std::mem::take(&mut self.settings_changed)
    }

    fn back_to_menu(&mut self) {
        self.speaker.cancel();
        self.screen = Screen::Menu(MainMenu::new(self.settings.order));
    }

    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) {
        if !is_press(&key) {
            return;
        }
        if is_interrupt(&key) {
            self.speaker.cancel();
            self.quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Menu(main_menu) => {
                let action = menu::process_input(main_menu, map_menu_key(&key));
                if main_menu.order != self.settings.order {
                    self.settings.order = main_menu.order;
                    self.saved.order = main_menu.order;
                    self.settings_changed = true;
                }
                match action {
                    MenuAction::None => {}
                    MenuAction::Quit => self.quit = true,
                    MenuAction::StartDrill(mode) => {
                        log::info!("drill started ({:?})", mode);
                        self.screen = Screen::Drill(DrillSession::new(
                            mode,
                            self.settings.order,
                            self.settings.drill_prefs(),
                            &mut self.rng,
                        ));
                    }
                    MenuAction::StartRace => {
                        let session = race::start_race(
                            self.settings.order,
                            now_ms,
                            &mut self.rng,
                            self.speaker.as_mut(),
                        );
                        self.screen = Screen::Race(Box::new(session));
                    }
                }
            }
            Screen::Drill(session) => {
                let command =
                    drill::process_input(session, map_drill_key(&key), now_ms, self.speaker.as_mut());
                let before = self.settings.drill_prefs();
                if session.prefs != before {
                    self.saved.apply_drill_changes(before, session.prefs);
                    self.settings.apply_drill_prefs(session.prefs);
                    self.settings_changed = true;
                }
                if command == DrillCommand::ReturnToMenu {
                    log::info!("drill finished after {} cards", session.count);
                    self.back_to_menu();
                }
            }
            Screen::Race(session) => {
                let command =
                    race::process_input(session, map_race_key(&key), self.speaker.as_mut());
                if command == RaceCommand::ReturnToMenu {
                    session.teardown();
                    log::info!(
                        "race left: score {}, {}/{} correct",
                        session.stats.score,
                        session.stats.correct_answers,
                        session.stats.total_questions
                    );
                    self.back_to_menu();
                }
            }
        }
    }

    /// Advance whatever is running to `now_ms`. Returns true if a redraw
    /// is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match &mut self.screen {
            Screen::Menu(_) => false,
            Screen::Drill(session) => {
                drill::tick_drill(session, now_ms, &mut self.rng, self.speaker.as_mut())
            }
            Screen::Race(session) => {
                race::tick_race(session, now_ms, &mut self.rng, self.speaker.as_mut())
            }
        }
    }
}
