pub mod drill_scene;
pub mod game_common;
pub mod menu_scene;
pub mod perspective;
pub mod race_scene;

use crate::app::Screen;
use ratatui::Frame;

/// Minimum terminal size the screens are laid out for.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 16;

/// Main UI drawing function.
pub fn draw(frame: &mut Frame, screen: &Screen, uppercase: bool) {
    let area = frame.size();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let text = ratatui::widgets::Paragraph::new(format!(
            "Окно слишком маленькое: нужно {}x{}",
            MIN_WIDTH, MIN_HEIGHT
        ));
        frame.render_widget(text, area);
        return;
    }

    match screen {
        Screen::Menu(menu) => menu_scene::render_menu(frame, area, menu),
        Screen::Drill(drill) => drill_scene::render_drill_scene(frame, area, drill),
        Screen::Race(session) => race_scene::render_race_scene(frame, area, session, uppercase),
    }
}
