//! Syllable Race rendering.
//!
//! The scene is projected through the race camera into a cell buffer:
//! ground and sky per cell, then sprites far to near, then the car and
//! the two syllable choices on top.

use super::game_common::{
    create_game_layout, hex_color, info_line, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, syllable_letters, Cell, CellBuffer,
};
use super::perspective::{grass_color, sky_color, Projector};
use crate::race::scene::{spin_fraction, Bird, SceneryItem, SceneryKind};
use crate::race::types::{Obstacle, RacePhase, Side, Vec3, INITIAL_SPEED};
use crate::race::RaceSession;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ROAD_HALF_WIDTH: f64 = 4.0;
const CURB_WIDTH: f64 = 0.2;
const MARKING_HALF_WIDTH: f64 = 0.12;
const MARKING_HALF_LENGTH: f64 = 0.75;
/// Sprites beyond this depth are too small to read.
const MAX_SPRITE_DEPTH: f64 = 90.0;
const BUILDING_WIDTH: f64 = 4.0;
const CONE_HEIGHT: f64 = 1.2;

const ASPHALT: Color = Color::Rgb(0x33, 0x33, 0x33);
const MARKING: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
const CURB: Color = Color::Rgb(0x99, 0x99, 0x99);
const TRUNK: Color = Color::Rgb(0x8B, 0x45, 0x13);
const LAMP_LIGHT: Color = Color::Rgb(0xFF, 0xFF, 0x99);
const BIRD: Color = Color::Rgb(0x33, 0x33, 0x33);

/// Render the race screen.
pub fn render_race_scene(frame: &mut Frame, area: Rect, session: &RaceSession, uppercase: bool) {
    if session.phase() == RacePhase::GameOver {
        render_race_game_over(frame, area, session);
        return;
    }

    let layout = create_game_layout(frame, area, " Слоги: гонка ", Color::LightRed, 12, 24);

    let buffer = draw_scene(
        session,
        layout.content.width,
        layout.content.height,
        uppercase,
    );
    buffer.render(frame, layout.content);

    render_status_bar(
        frame,
        layout.status_bar,
        "Какой слог прозвучал?",
        Color::LightYellow,
        &[("[←/→]", "Ответ"), ("[↑]", "Повторить"), ("[Esc]", "Меню")],
    );

    render_info_panel(frame, layout.info_panel, session);
}

/// Draw the whole play field into a fresh buffer.
pub fn draw_scene(session: &RaceSession, width: u16, height: u16, uppercase: bool) -> CellBuffer {
    let mut buf = CellBuffer::new(width, height);
    if width == 0 || height == 0 {
        return buf;
    }
    let proj = Projector::new(&session.stage.camera, width, height);

    draw_ground_and_sky(&mut buf, &proj, session);
    draw_backdrop(&mut buf, &proj, session);
    draw_sprites(&mut buf, &proj, session);
    draw_car(&mut buf, &proj, session);
    draw_choices(&mut buf, session, uppercase);
    if session.instructions_visible() {
        draw_instructions(&mut buf);
    }
    buf
}

fn draw_ground_and_sky(buf: &mut CellBuffer, proj: &Projector, session: &RaceSession) {
    let horizon = proj.horizon_row().ceil() as usize;
    let grass_phase = session.world.far.first().map_or(0.0, |g| g.position.z);
    let markings: Vec<f64> = session
        .world
        .near
        .iter()
        .filter(|i| i.kind == SceneryKind::LaneMarking)
        .map(|i| i.position.z)
        .collect();

    for row in 0..buf.height() {
        for col in 0..buf.width() {
            let bg = match proj.ground_at(col as f64 + 0.5, row as f64 + 0.5) {
                Some(p) => ground_color(p, grass_phase, &markings),
                None => sky_color(row, horizon),
            };
            buf.set(
                col as i32,
                row as i32,
                Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg,
                },
            );
        }
    }
}

fn ground_color(p: Vec3, grass_phase: f64, markings: &[f64]) -> Color {
    let x = p.x.abs();
    if x > ROAD_HALF_WIDTH + CURB_WIDTH {
        return grass_color(p.z - grass_phase);
    }
    if x > ROAD_HALF_WIDTH {
        return CURB;
    }
    if x < MARKING_HALF_WIDTH && markings.iter().any(|z| (p.z - z).abs() < MARKING_HALF_LENGTH) {
        return MARKING;
    }
    ASPHALT
}

fn draw_backdrop(buf: &mut CellBuffer, proj: &Projector, session: &RaceSession) {
    let horizon = proj.horizon_row().ceil() as i32;
    for item in &session.world.backdrop {
        match item.kind {
            SceneryKind::Mountain => {
                let (Some(base), Some(peak)) = (
                    proj.project(Vec3::new(item.position.x, 0.0, item.position.z)),
                    proj.project(Vec3::new(item.position.x, item.size, item.position.z)),
                ) else {
                    continue;
                };
                let top = peak.row.round() as i32;
                let color = hex_color(item.color);
                for row in top.max(0)..horizon.min(base.row.round() as i32 + 1) {
                    let half = (row - top) * 2;
                    let center = peak.col.round() as i32;
                    for col in center - half..=center + half {
                        buf.shade(col, row, color);
                    }
                }
            }
            SceneryKind::Cloud => {
                let Some(p) = proj.project(item.position) else {
                    continue;
                };
                let col = p.col.round() as i32;
                let row = p.row.round() as i32;
                if row < horizon {
                    buf.text(col - 1, row, "▒▒▒", hex_color(item.color));
                }
            }
            SceneryKind::Sun => {
                if let Some(p) = proj.project(item.position) {
                    let row = p.row.round() as i32;
                    if row < horizon {
                        buf.paint(p.col.round() as i32, row, '●', hex_color(item.color));
                    }
                }
            }
            _ => {}
        }
    }
}

enum Sprite<'a> {
    Scenery(&'a SceneryItem),
    Bird(&'a Bird),
    Cone(&'a Obstacle),
}

fn draw_sprites(buf: &mut CellBuffer, proj: &Projector, session: &RaceSession) {
    let mut sprites: Vec<(f64, Sprite)> = Vec::new();
    for item in &session.world.scenery {
        let base = Vec3::new(item.position.x, 0.0, item.position.z);
        if let Some(p) = proj.project(base) {
            sprites.push((p.depth, Sprite::Scenery(item)));
        }
    }
    for bird in &session.world.birds {
        if let Some(p) = proj.project(bird.position) {
            sprites.push((p.depth, Sprite::Bird(bird)));
        }
    }
    for cone in &session.stage.obstacles {
        if let Some(p) = proj.project(cone.position) {
            sprites.push((p.depth, Sprite::Cone(cone)));
        }
    }
    // Painter's order: farthest first
    sprites.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (depth, sprite) in sprites {
        if depth > MAX_SPRITE_DEPTH {
            continue;
        }
        match sprite {
            Sprite::Scenery(item) => draw_scenery_item(buf, proj, item),
            Sprite::Bird(bird) => draw_bird(buf, proj, bird),
            Sprite::Cone(cone) => draw_cone(buf, proj, cone),
        }
    }
}

fn draw_scenery_item(buf: &mut CellBuffer, proj: &Projector, item: &SceneryItem) {
    let Some(base) = proj.project(Vec3::new(item.position.x, 0.0, item.position.z)) else {
        return;
    };
    let col = base.col.round() as i32;
    let row = base.row.round() as i32;
    let rows = ((item.size * base.scale).round() as i32).max(1);
    let color = hex_color(item.color);

    match item.kind {
        SceneryKind::Tree => {
            let trunk = (rows / 3).max(1);
            for r in 0..trunk {
                buf.paint(col, row - r, '│', TRUNK);
            }
            for r in trunk..rows.max(trunk + 1) {
                let half = ((rows - r) / 2).max(0);
                for c in col - half..=col + half {
                    buf.paint(c, row - r, '▓', color);
                }
            }
        }
        SceneryKind::Building => {
            let half = ((BUILDING_WIDTH * base.scale) as i32).max(1);
            for r in 0..rows {
                for c in col - half..=col + half {
                    let window = r % 2 == 1 && (c - col) % 2 == 0;
                    buf.set(
                        c,
                        row - r,
                        Cell {
                            ch: if window { '▪' } else { ' ' },
                            fg: LAMP_LIGHT,
                            bg: color,
                        },
                    );
                }
            }
        }
        SceneryKind::StreetLamp => {
            for r in 0..rows {
                buf.paint(col, row - r, '│', color);
            }
            buf.paint(col, row - rows, '●', LAMP_LIGHT);
        }
        SceneryKind::Rock => buf.paint(col, row, '▄', color),
        SceneryKind::Flower => buf.paint(col, row, '✿', color),
        _ => {}
    }
}

fn draw_bird(buf: &mut CellBuffer, proj: &Projector, bird: &Bird) {
    if let Some(p) = proj.project(bird.position) {
        let ch = if bird.wing_flap > 0.0 { 'v' } else { '^' };
        buf.paint(p.col.round() as i32, p.row.round() as i32, ch, BIRD);
    }
}

fn draw_cone(buf: &mut CellBuffer, proj: &Projector, cone: &Obstacle) {
    let base_y = cone.position.y - CONE_HEIGHT / 2.0;
    let Some(base) = proj.project(Vec3::new(cone.position.x, base_y, cone.position.z)) else {
        return;
    };
    let col = base.col.round() as i32;
    let row = base.row.round() as i32;
    let rows = ((CONE_HEIGHT * base.scale).round() as i32).max(1);
    let color = hex_color(cone.color);

    // Knocked-over cones show upside down for the back half of the spin
    let spin = spin_fraction(cone.rotation.x);
    let upright = !(0.25..0.75).contains(&spin);

    for r in 0..rows {
        let from_tip = if upright { rows - 1 - r } else { r };
        let half = from_tip / 2;
        let ch = if from_tip == 0 {
            if upright {
                '▲'
            } else {
                '▼'
            }
        } else {
            '█'
        };
        for c in col - half..=col + half {
            buf.paint(c, row - r, ch, color);
        }
    }
}

/// Car seen from behind, one row per line, bottom row last.
const CAR_SPRITE: [(&str, &str); 3] = [
    ("  ▄▄▄  ", "cabin"),
    ("▐█████▌", "body"),
    (" ▀   ▀ ", "tires"),
];

fn draw_car(buf: &mut CellBuffer, proj: &Projector, session: &RaceSession) {
    let car = &session.stage.car;
    let Some(base) = proj.project(car.position) else {
        return;
    };
    let width = CAR_SPRITE[0].0.chars().count() as i32;
    let left = base.col.round() as i32 - width / 2;
    let bottom = (base.row.round() as i32).min(buf.height() as i32 - 4);
    let lights = hex_color(car.part_color("taillights"));

    for (i, (line, part)) in CAR_SPRITE.iter().enumerate() {
        let row = bottom - (CAR_SPRITE.len() - 1 - i) as i32;
        let color = hex_color(car.part_color(part));
        for (j, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let fg = if matches!(ch, '▐' | '▌') { lights } else { color };
            buf.paint(left + j as i32, row, ch, fg);
        }
    }
}

/// The two syllables along the bottom edge. After an answer only the
/// chosen one stays, tinted by whether it was right.
fn draw_choices(buf: &mut CellBuffer, session: &RaceSession, uppercase: bool) {
    let row = buf.height() as i32 - 2;
    if row < 0 {
        return;
    }
    let width = buf.width() as i32;
    let question = &session.question;
    let selected = session.selected_side();

    for side in [Side::Left, Side::Right] {
        if selected.is_some_and(|s| s != side) {
            continue;
        }
        let letters = syllable_letters(question.syllable_on(side), session.order, uppercase, true);
        let bg = match selected {
            Some(_) if question.is_correct(side) => Color::Rgb(0x16, 0x65, 0x34),
            Some(_) => Color::Rgb(0x99, 0x1B, 0x1B),
            None => Color::Rgb(0x11, 0x11, 0x11),
        };

        // " ← БА " / " БА → "
        let mut cells: Vec<(char, Color)> = vec![(' ', Color::White)];
        if side == Side::Left {
            cells.push(('←', Color::White));
            cells.push((' ', Color::White));
        }
        cells.extend(letters);
        if side == Side::Right {
            cells.push((' ', Color::White));
            cells.push(('→', Color::White));
        }
        cells.push((' ', Color::White));

        let center = if side == Side::Left {
            width / 4
        } else {
            width * 3 / 4
        };
        let start = center - cells.len() as i32 / 2;
        for (i, (ch, fg)) in cells.into_iter().enumerate() {
            buf.set(start + i as i32, row, Cell { ch, fg, bg });
        }
    }
}

const INSTRUCTIONS: &str = " ← или → для ответа | ↑ повторить ";

fn draw_instructions(buf: &mut CellBuffer) {
    let len = INSTRUCTIONS.chars().count() as i32;
    let col = (buf.width() as i32 - len) / 2;
    let row = buf.height() as i32 / 2;
    for (i, ch) in INSTRUCTIONS.chars().enumerate() {
        buf.set(
            col + i as i32,
            row,
            Cell {
                ch,
                fg: Color::White,
                bg: Color::Black,
            },
        );
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &RaceSession) {
    let inner = render_info_panel_frame(frame, area, " Гонка ");
    let stats = &session.stats;

    let speed_color = match stats.speed {
        s if s > 60 => Color::Green,
        s if s > 30 => Color::Yellow,
        _ => Color::Red,
    };
    let bar_width = inner.width.saturating_sub(2) as u32;
    let filled = (stats.speed * bar_width / INITIAL_SPEED) as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(bar_width as usize - filled.min(bar_width as usize))
    );

    let lines: Vec<Line> = vec![
        info_line("Скорость", stats.speed.to_string(), speed_color),
        Line::from(Span::styled(bar, Style::default().fg(speed_color))),
        Line::from(""),
        info_line("Очки", stats.score.to_string(), Color::White),
        info_line(
            "Правильных",
            format!("{}/{}", stats.correct_answers, stats.total_questions),
            Color::Green,
        ),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_race_game_over(frame: &mut Frame, area: Rect, session: &RaceSession) {
    let stats = &session.stats;
    let body = vec![
        info_line("Очки", stats.score.to_string(), Color::Cyan),
        Line::from(format!(
            "Правильных ответов: {} из {}",
            stats.correct_answers, stats.total_questions
        )),
        info_line(
            "Точность",
            format!("{}%", stats.accuracy_percent()),
            Color::Yellow,
        ),
    ];
    render_game_over_overlay(
        frame,
        area,
        "GAME OVER!",
        Color::Red,
        body,
        "[Esc/Enter] Вернуться в меню",
    );
}
