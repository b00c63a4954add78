//! Shared UI components for the menu, drill and race screens.

use crate::race::types::{rgb, ColorHex};
use crate::syllables::{format_syllable, SyllableOrder};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Convert a packed scene color to a terminal color.
pub fn hex_color(color: ColorHex) -> Color {
    let (r, g, b) = rgb(color);
    Color::Rgb(r, g, b)
}

const CONSONANT_BLUE: Color = Color::Rgb(0x25, 0x63, 0xEB);
const CONSONANT_BLUE_LIGHT: Color = Color::Rgb(0x60, 0xA5, 0xFA);
const VOWEL_RED: Color = Color::Rgb(0xDC, 0x26, 0x26);
const VOWEL_RED_LIGHT: Color = Color::Rgb(0xF8, 0x71, 0x71);

/// Letters of a syllable with their colors: consonants blue, vowels red.
/// `on_dark` picks the lighter shades.
pub fn syllable_letters(
    syllable: &str,
    order: SyllableOrder,
    uppercase: bool,
    on_dark: bool,
) -> Vec<(char, Color)> {
    let (consonant, vowel) = if on_dark {
        (CONSONANT_BLUE_LIGHT, VOWEL_RED_LIGHT)
    } else {
        (CONSONANT_BLUE, VOWEL_RED)
    };
    let (first, second) = match order {
        SyllableOrder::Cv => (consonant, vowel),
        SyllableOrder::Vc => (vowel, consonant),
    };
    format_syllable(syllable, uppercase)
        .chars()
        .enumerate()
        .map(|(i, ch)| (ch, if i == 0 { first } else { second }))
        .collect()
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// A grid of cells drawn into, then stamped row by row as Paragraphs.
pub struct CellBuffer {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl CellBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
            rows: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write a cell; out-of-bounds writes are dropped.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(slot) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = cell;
        }
    }

    /// Change only the glyph and foreground, keeping what is behind.
    pub fn paint(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(slot) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            slot.ch = ch;
            slot.fg = fg;
        }
    }

    /// Change only the background.
    pub fn shade(&mut self, col: i32, row: i32, bg: Color) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(slot) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            slot.bg = bg;
        }
    }

    /// Write `text` starting at (`col`, `row`) over the existing background.
    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.paint(col + i as i32, row, ch, fg);
        }
    }

    /// Row contents as a plain string (for tests and debugging).
    pub fn row_text(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// Stamp the buffer into `area`, merging runs of equal style.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.rows.iter().enumerate() {
            if row_idx as u16 >= area.height {
                break;
            }
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter() {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let width = (self.width as u16).min(area.width);
            let row_area = Rect::new(area.x, area.y + row_idx as u16, width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Main content area - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create a standardized screen layout with outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
///
/// An `info_panel_width` of 0 gives the content the full width.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a standardized status bar (2 lines: status message + controls).
///
/// `controls` are (key, action) pairs, e.g. `[("[Space]", "Дальше")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render a full-screen summary overlay: bold title, body lines and a
/// dimmed footer hint, centered.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    body: Vec<Line<'static>>,
    footer: &str,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        footer.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    let content_height = lines.len() as u16;
    let y_offset = inner.y + (inner.height.saturating_sub(content_height)) / 2;
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(
            inner.x,
            y_offset,
            inner.width,
            content_height.min(inner.height),
        ),
    );
}

/// Render an info panel frame with the given title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// "Label: value" line for info panels.
pub fn info_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default()
                .fg(value_color)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
