use tracing::debug;

use crate::difficulty::Difficulty;

pub const MENU_ENTRIES: [&str; 2] = ["Start Game", "Set Difficulty"];

const START_GAME: usize = 0;
const SET_DIFFICULTY: usize = 1;

/// Which screen the shell is showing. Only `Playing` feeds intents to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu { selected: usize },
    DifficultySelect { selected: usize },
    Playing,
}

/// Menu navigation input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Confirm,
}

/// Title menu and difficulty screen state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    screen: Screen,
    difficulty: Difficulty,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl Navigator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            screen: Screen::Menu {
                selected: START_GAME,
            },
            difficulty,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Applies one menu action. Returns `true` when a round should start.
    pub fn navigate(&mut self, action: MenuAction) -> bool {
        match (self.screen, action) {
            (Screen::Menu { selected }, MenuAction::Up) => {
                self.screen = Screen::Menu {
                    selected: wrap_prev(selected, MENU_ENTRIES.len()),
                };
            }
            (Screen::Menu { selected }, MenuAction::Down) => {
                self.screen = Screen::Menu {
                    selected: wrap_next(selected, MENU_ENTRIES.len()),
                };
            }
            (Screen::Menu { selected }, MenuAction::Confirm) => {
                if selected == SET_DIFFICULTY {
                    self.screen = Screen::DifficultySelect {
                        selected: self.difficulty.index(),
                    };
                } else {
                    self.screen = Screen::Playing;
                    return true;
                }
            }
            (Screen::DifficultySelect { selected }, MenuAction::Up) => {
                self.screen = Screen::DifficultySelect {
                    selected: wrap_prev(selected, Difficulty::ALL.len()),
                };
            }
            (Screen::DifficultySelect { selected }, MenuAction::Down) => {
                self.screen = Screen::DifficultySelect {
                    selected: wrap_next(selected, Difficulty::ALL.len()),
                };
            }
            (Screen::DifficultySelect { selected }, MenuAction::Confirm) => {
                self.difficulty = Difficulty::ALL[selected % Difficulty::ALL.len()];
                debug!(difficulty = %self.difficulty, "difficulty selected");
                self.screen = Screen::Menu {
                    selected: SET_DIFFICULTY,
                };
            }
            (Screen::Playing, _) => {}
        }
        false
    }

    /// Skips the menu and goes straight into a round.
    pub fn start_playing(&mut self) {
        self.screen = Screen::Playing;
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu {
            selected: START_GAME,
        };
    }
}

fn wrap_prev(selected: usize, len: usize) -> usize {
    (selected + len - 1) % len
}

fn wrap_next(selected: usize, len: usize) -> usize {
    (selected + 1) % len
}
