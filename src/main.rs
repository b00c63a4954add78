use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use slogi::app::App;
use slogi::cli::Cli;
use slogi::race::{Clock, SystemClock, FRAME_MS};
use slogi::speech::{CommandSpeaker, SilentSpeaker, Speaker};
use slogi::ui;
use slogi::utils::build_info::version_line;
use slogi::utils::logging::{init_logging, LoggingConfig};
use slogi::utils::Settings;
use std::io;
use std::time::Duration;

type SlogiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    // Logging problems must not keep the trainer from starting
    match init_logging(LoggingConfig {
        filter: cli.log_level.clone(),
    }) {
        Ok(path) => log::info!("{} starting, log at {}", version_line(), path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let saved = Settings::load();
    let speaker: Box<dyn Speaker> = if cli.mute {
        Box::new(SilentSpeaker)
    } else {
        Box::new(CommandSpeaker::new(saved.speech.clone()))
    };
    let mut app = App::new(saved, cli.overrides(), speaker, rand::thread_rng());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.saved_settings().save() {
        log::warn!("could not save settings: {}", e);
    }
    log::info!("bye");
    result
}

fn run<R: rand::Rng>(terminal: &mut SlogiTerminal, app: &mut App<R>) -> io::Result<()> {
    let clock = SystemClock::new();

    loop {
        let uppercase = app.settings.uppercase;
        terminal.draw(|frame| ui::draw(frame, &app.screen, uppercase))?;

        // Poll for one frame, then let the simulation catch up
        if event::poll(Duration::from_millis(FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key, clock.now_ms());
            }
        }
        app.tick(clock.now_ms());

        if app.take_settings_changed() {
            if let Err(e) = app.saved_settings().save() {
                log::warn!("could not save settings: {}", e);
            }
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
