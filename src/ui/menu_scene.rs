//! Main menu rendering.

use crate::menu::{MainMenu, MenuItem, GRID_COLUMNS};
use crate::syllables::{SyllableOrder, CONSONANTS};
use crate::utils::build_info::version_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = "Учим слоги!";
const HINT: &str = "Нажимай Пробел для следующего слога";

fn focused_style(focused: bool, color: Color) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

/// Render the main menu.
pub fn render_menu(frame: &mut Frame, area: Rect, menu: &MainMenu) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Слоги ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Menu body
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Version
        ])
        .split(inner);

    let body = menu_lines(menu);
    let top = chunks[0].y + chunks[0].height.saturating_sub(body.len() as u16) / 2;
    let body_area = Rect {
        y: top,
        height: (body.len() as u16).min(chunks[0].height),
        ..chunks[0]
    };
    frame.render_widget(Paragraph::new(body).alignment(Alignment::Center), body_area);

    let help = Paragraph::new("[↑↓←→] Выбор  [Enter] Начать  [Tab] Порядок  [q] Выход")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);

    let version = Paragraph::new(version_line())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(version, chunks[2]);
}

/// Centered menu body, top to bottom.
pub fn menu_lines(menu: &MainMenu) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Both orders side by side, the active one highlighted
    let mut order_spans = Vec::new();
    for (i, order) in [SyllableOrder::Cv, SyllableOrder::Vc].into_iter().enumerate() {
        if i > 0 {
            order_spans.push(Span::raw("  "));
        }
        let active = order == menu.order;
        let focused = active && menu.focus == MenuItem::Order;
        let style = if focused {
            focused_style(true, Color::LightCyan)
        } else if active {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        order_spans.push(Span::styled(
            format!(" {} {} ", order.label(), order.sample()),
            style,
        ));
    }
    lines.push(Line::from(order_spans));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        " Случайные слоги ",
        focused_style(menu.focus == MenuItem::Random, Color::LightGreen),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " 3D Игра ",
        focused_style(menu.focus == MenuItem::Race, Color::LightRed),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Выбери букву:",
        Style::default().fg(Color::White),
    )));
    for (row_idx, letters) in CONSONANTS.chunks(GRID_COLUMNS).enumerate() {
        let mut spans = Vec::new();
        for (col, letter) in letters.iter().enumerate() {
            let index = row_idx * GRID_COLUMNS + col;
            if col > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} ", letter.to_uppercase()),
                focused_style(menu.focus == MenuItem::Consonant(index), Color::LightBlue),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        HINT,
        Style::default().fg(Color::DarkGray),
    )));
    lines
}
