//! Flash-card drill rendering.

use super::game_common::{
    create_game_layout, hex_color, info_line, render_info_panel_frame, render_status_bar,
    syllable_letters, Cell, CellBuffer,
};
use crate::drill::{Background, DrillMode, DrillSession};
use crate::race::types::{rgb, ColorHex};
use ratatui::{
    layout::Rect,
    style::Color,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Each letter is drawn in a framed tile this big.
const TILE_WIDTH: i32 = 9;
const TILE_HEIGHT: i32 = 5;
const TILE_GAP: i32 = 2;

/// Render the drill screen.
pub fn render_drill_scene(frame: &mut Frame, area: Rect, drill: &DrillSession) {
    let layout = create_game_layout(frame, area, " Слоги ", Color::LightGreen, 8, 22);

    let buffer = draw_card(drill, layout.content.width, layout.content.height);
    buffer.render(frame, layout.content);

    render_status_bar(
        frame,
        layout.status_bar,
        "Пробел - следующий слог",
        Color::LightYellow,
        &[
            ("[Space]", "Дальше"),
            ("[s]", "Звук"),
            ("[b]", "Фон"),
            ("[c]", "Регистр"),
            ("[Esc]", "Меню"),
        ],
    );

    render_info_panel(frame, layout.info_panel, drill);
}

/// Mix `t` of `b` into `a`.
fn blend(a: ColorHex, b: ColorHex, t: f64) -> ColorHex {
    let (ar, ag, ab) = rgb(a);
    let (br, bg, bb) = rgb(b);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u32;
    (mix(ar, br) << 16) | (mix(ag, bg) << 8) | mix(ab, bb)
}

/// Draw the card: the syllable in big tiles on the chosen background.
pub fn draw_card(drill: &DrillSession, width: u16, height: u16) -> CellBuffer {
    let mut buf = CellBuffer::new(width, height);
    let (bg_hex, text_hex) = drill.prefs.background.colors();
    let bg = hex_color(bg_hex);
    let text = hex_color(text_hex);

    for row in 0..height as i32 {
        for col in 0..width as i32 {
            buf.set(col, row, Cell { ch: ' ', fg: text, bg });
        }
    }

    if let DrillMode::Selected(consonant) = drill.mode {
        let header: String = format!(
            "{} {}",
            consonant.to_uppercase(),
            consonant.to_lowercase()
        );
        let col = (width as i32 - header.chars().count() as i32) / 2;
        buf.text(col, 0, &header, text);
    }

    let on_dark = drill.prefs.background == Background::Black;
    let mut letters = syllable_letters(
        &drill.current,
        drill.order,
        drill.prefs.uppercase,
        on_dark,
    );
    if drill.is_fading() {
        let dim = hex_color(blend(bg_hex, text_hex, 0.25));
        for (_, color) in letters.iter_mut() {
            *color = dim;
        }
    }

    let count = letters.len() as i32;
    let total = count * TILE_WIDTH + (count - 1).max(0) * TILE_GAP;
    let left = (width as i32 - total) / 2;
    let top = (height as i32 - TILE_HEIGHT) / 2;
    for (i, (ch, color)) in letters.into_iter().enumerate() {
        draw_tile(&mut buf, left + i as i32 * (TILE_WIDTH + TILE_GAP), top, ch, color);
    }

    let counter = format!("Слогов: {}", drill.count);
    buf.text(1, height as i32 - 1, &counter, text);
    buf
}

fn draw_tile(buf: &mut CellBuffer, left: i32, top: i32, ch: char, color: Color) {
    let right = left + TILE_WIDTH - 1;
    let bottom = top + TILE_HEIGHT - 1;
    for col in left + 1..right {
        buf.paint(col, top, '─', color);
        buf.paint(col, bottom, '─', color);
    }
    for row in top + 1..bottom {
        buf.paint(left, row, '│', color);
        buf.paint(right, row, '│', color);
    }
    buf.paint(left, top, '┌', color);
    buf.paint(right, top, '┐', color);
    buf.paint(left, bottom, '└', color);
    buf.paint(right, bottom, '┘', color);
    buf.paint(left + TILE_WIDTH / 2, top + TILE_HEIGHT / 2, ch, color);
}

fn render_info_panel(frame: &mut Frame, area: Rect, drill: &DrillSession) {
    let inner = render_info_panel_frame(frame, area, " Карточки ");
    let prefs = &drill.prefs;

    let (sound, sound_color) = if prefs.sound_enabled {
        ("Вкл", Color::Green)
    } else {
        ("Выкл", Color::DarkGray)
    };
    let case = if prefs.uppercase { "АБ" } else { "аб" };

    let lines: Vec<Line> = vec![
        info_line("Слогов", drill.count.to_string(), Color::White),
        Line::from(""),
        info_line("Регистр", case.to_string(), Color::Cyan),
        info_line("Звук", sound.to_string(), sound_color),
        info_line("Фон", prefs.background.name().to_string(), Color::Yellow),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
