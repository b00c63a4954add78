//! Main menu: letter order, mode buttons and the consonant grid.

use crate::drill::DrillMode;
use crate::syllables::{SyllableOrder, CONSONANTS};

/// Consonant buttons per grid row.
pub const GRID_COLUMNS: usize = 5;

/// A focusable entry of the menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// CV / VC toggle.
    Order,
    Random,
    Race,
    /// Index into [`CONSONANTS`].
    Consonant(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Select,
    ToggleOrder,
    Quit,
    Other,
}

/// What the app should do after a menu key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    StartDrill(DrillMode),
    StartRace,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainMenu {
    pub focus: MenuItem,
    pub order: SyllableOrder,
}

impl MainMenu {
    pub fn new(order: SyllableOrder) -> Self {
        Self {
            focus: MenuItem::Random,
            order,
        }
    }

    fn move_up(&mut self) {
        self.focus = match self.focus {
            MenuItem::Order => MenuItem::Order,
            MenuItem::Random => MenuItem::Order,
            MenuItem::Race => MenuItem::Random,
            MenuItem::Consonant(i) if i < GRID_COLUMNS => MenuItem::Race,
            MenuItem::Consonant(i) => MenuItem::Consonant(i - GRID_COLUMNS),
        };
    }

    fn move_down(&mut self) {
        self.focus = match self.focus {
            MenuItem::Order => MenuItem::Random,
            MenuItem::Random => MenuItem::Race,
            MenuItem::Race => MenuItem::Consonant(0),
            MenuItem::Consonant(i) if i + GRID_COLUMNS < CONSONANTS.len() => {
                MenuItem::Consonant(i + GRID_COLUMNS)
            }
            other => other,
        };
    }

    fn move_sideways(&mut self, forward: bool) {
        match self.focus {
            MenuItem::Order => self.order = self.order.toggled(),
            MenuItem::Consonant(i) => {
                let last = CONSONANTS.len() - 1;
                self.focus = MenuItem::Consonant(if forward {
                    (i + 1).min(last)
                } else {
                    i.saturating_sub(1)
                });
            }
            MenuItem::Random | MenuItem::Race => {}
        }
    }
}

/// Process a key press on the menu.
pub fn process_input(menu: &mut MainMenu, input: MenuInput) -> MenuAction {
    match input {
        MenuInput::Up => menu.move_up(),
        MenuInput::Down => menu.move_down(),
        MenuInput::Left => menu.move_sideways(false),
        MenuInput::Right => menu.move_sideways(true),
        MenuInput::ToggleOrder => menu.order = menu.order.toggled(),
        MenuInput::Quit => return MenuAction::Quit,
        MenuInput::Select => {
            return match menu.focus {
                MenuItem::Order => {
                    menu.order = menu.order.toggled();
                    MenuAction::None
                }
                MenuItem::Random => MenuAction::StartDrill(DrillMode::Random),
                MenuItem::Race => MenuAction::StartRace,
                MenuItem::Consonant(i) => CONSONANTS
                    .get(i)
                    .map_or(MenuAction::None, |c| MenuAction::StartDrill(DrillMode::Selected(*c))),
            };
        }
        MenuInput::Other => {}
    }
    MenuAction::None
}
