use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::menu::{MenuAction, Screen};
use crate::simulation::{Intent, Movement};

/// One-shot commands triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Menu(MenuAction),
    Restart,
    BackToMenu,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Turns raw key events into per-tick intents and one-shot actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal reports key releases. Without them a press
    /// only counts for the frame it arrives in.
    reports_releases: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl InputManager {
    pub fn new(reports_releases: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_releases,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per frame before reading actions or the intent
    pub fn poll_events(&mut self, screen: &Screen) -> color_eyre::Result<()> {
        self.begin_frame();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, screen);
            }
        }

        Ok(())
    }

    fn begin_frame(&mut self) {
        self.oneshot_actions.clear();
        if !self.reports_releases {
            self.key_state = KeyState::default();
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, screen: &Screen) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, screen);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, screen: &Screen) {
        // Quit works on every screen
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match screen {
            Screen::Menu { .. } | Screen::DifficultySelect { .. } => {
                let action = match key_event.code {
                    KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => MenuAction::Up,
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => MenuAction::Down,
                    KeyCode::Enter | KeyCode::Char(' ') => MenuAction::Confirm,
                    _ => return,
                };
                self.oneshot_actions.push(InputAction::Menu(action));
            }
            Screen::Playing => match key_event.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.oneshot_actions.push(InputAction::Restart);
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    self.oneshot_actions.push(InputAction::BackToMenu);
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.key_state.left = true;
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.key_state.right = true;
                }
                KeyCode::Char(' ') => {
                    self.key_state.fire = true;
                }
                _ => {}
            },
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// One-shot actions collected this frame, in arrival order
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Intent for the next simulation tick, built from held keys
    pub fn intent(&self) -> Intent {
        Intent::new(
            Movement::from_held(self.key_state.left, self.key_state.right),
            self.key_state.fire,
        )
    }
}
