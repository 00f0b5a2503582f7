use color_eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::input::{InputAction, InputManager};
use crate::menu::{Navigator, Screen};
use crate::particle::{Particle, particles_for_events};
use crate::renderer::{GameRenderer, RenderView};
use crate::simulation::{Intent, Simulation};
use crate::snapshot::Snapshot;

/// One simulation tick at 60 Hz
pub const TICK: Duration = Duration::from_micros(16_667);

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    navigator: Navigator,
    simulation: Option<Simulation>,
    /// Snapshot of the last completed tick, handed to the renderer
    snapshot: Option<Snapshot>,
    config: GameConfig,
    /// Base seed; round `n` uses `seed + n`. Without one every round seeds from the OS.
    seed: Option<u64>,
    rounds_started: u64,
    particles: Vec<Particle>,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: GameConfig,
        difficulty: Difficulty,
        seed: Option<u64>,
        input_manager: InputManager,
    ) -> Self {
        Self {
            running: true,
            navigator: Navigator::new(difficulty),
            simulation: None,
            snapshot: None,
            config,
            seed,
            rounds_started: 0,
            particles: Vec::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            renderer: GameRenderer::new(),
        }
    }

    /// Skips the title menu and starts a round right away.
    pub fn play_immediately(mut self) -> Self {
        self.navigator.start_playing();
        self.start_round();
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!(difficulty = %self.navigator.difficulty(), "application started");

        while self.running {
            let frame_start = Instant::now();

            // Calculate FPS
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Poll input events and get actions
            let screen = self.navigator.screen();
            self.input_manager.poll_events(&screen)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            let intent = self.input_manager.intent();
            self.update(intent);

            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView {
                    screen: self.navigator.screen(),
                    difficulty: self.navigator.difficulty(),
                    snapshot: self.snapshot.as_ref(),
                    particles: &self.particles,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the tick
            if let Some(remaining) = TICK.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        info!(rounds = self.rounds_started, "application stopped");
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Menu(menu_action) => {
                    if self.navigator.navigate(*menu_action) {
                        self.start_round();
                    }
                }
                InputAction::Restart => {
                    if let Some(simulation) = self.simulation.as_mut() {
                        simulation.reset();
                        self.snapshot = Some(simulation.snapshot());
                        self.particles.clear();
                        debug!("round restarted");
                    }
                }
                InputAction::BackToMenu => {
                    self.navigator.back_to_menu();
                    self.simulation = None;
                    self.snapshot = None;
                    self.particles.clear();
                }
            }
        }
    }

    /// Advances the round by one tick and ages the explosion particles.
    fn update(&mut self, intent: Intent) {
        if self.navigator.screen() != Screen::Playing {
            return;
        }
        let Some(simulation) = self.simulation.as_mut() else {
            return;
        };

        let was_running = !simulation.outcome().is_terminal();
        let outcome = simulation.step(intent);
        if was_running && outcome.is_terminal() {
            info!(?outcome, tick = simulation.tick(), "round finished");
        }

        self.particles
            .extend(particles_for_events(simulation.events()));

        // Update particles
        for particle in &mut self.particles {
            particle.update();
        }

        // Remove dead or out-of-bounds particles
        let (width, height) = (self.config.arena_width, self.config.arena_height);
        self.particles
            .retain(|p| !p.is_dead() && !p.is_out_of_bounds(width, height));

        self.snapshot = Some(simulation.snapshot());
    }

    fn start_round(&mut self) {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.rounds_started)),
            None => StdRng::from_os_rng(),
        };
        self.rounds_started += 1;

        let difficulty = self.navigator.difficulty();
        let simulation = Simulation::new(self.config.clone(), difficulty, rng);
        info!(%difficulty, round = self.rounds_started, "round started");

        self.snapshot = Some(simulation.snapshot());
        self.simulation = Some(simulation);
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RoundOutcome;
    use crate::menu::MenuAction;
    use crate::simulation::Movement;

    fn app() -> App {
        App::new(
            GameConfig::default(),
            Difficulty::Normal,
            Some(7),
            InputManager::default(),
        )
    }

    #[test]
    fn test_starts_on_menu_without_round() {
        let app = app();
        assert_eq!(app.navigator.screen(), Screen::Menu { selected: 0 });
        assert!(app.simulation.is_none());
        assert!(app.snapshot.is_none());
    }

    #[test]
    fn test_confirm_on_menu_starts_round() {
        let mut app = app();
        app.process_actions(&[InputAction::Menu(MenuAction::Confirm)]);
        assert_eq!(app.navigator.screen(), Screen::Playing);
        assert_eq!(app.rounds_started, 1);
        assert_eq!(app.snapshot.as_ref().map(|s| s.enemies_left()), Some(28));
    }

    #[test]
    fn test_chosen_difficulty_reaches_round() {
        let mut app = app();
        app.process_actions(&[
            InputAction::Menu(MenuAction::Down),
            InputAction::Menu(MenuAction::Confirm),
            InputAction::Menu(MenuAction::Down),
            InputAction::Menu(MenuAction::Confirm),
            InputAction::Menu(MenuAction::Up),
            InputAction::Menu(MenuAction::Confirm),
        ]);
        let simulation = app.simulation.as_ref().expect("round started");
        assert_eq!(simulation.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_update_steps_simulation_only_while_playing() {
        let mut app = app();
        app.update(Intent::idle());
        assert!(app.snapshot.is_none());

        let mut app = app.play_immediately();
        app.update(Intent::new(Movement::Left, false));
        let snapshot = app.snapshot.as_ref().expect("snapshot");
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.player.x, 369.0);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut app = app().play_immediately();
        for _ in 0..5 {
            app.update(Intent::new(Movement::Right, true));
        }
        app.process_actions(&[InputAction::Restart]);
        let snapshot = app.snapshot.as_ref().expect("snapshot");
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.player.x, 375.0);
        assert!(snapshot.player_projectiles.is_empty());
        assert_eq!(snapshot.outcome, RoundOutcome::InProgress);
        assert_eq!(app.rounds_started, 1);
    }

    #[test]
    fn test_back_to_menu_drops_round() {
        let mut app = app().play_immediately();
        app.update(Intent::idle());
        app.process_actions(&[InputAction::BackToMenu]);
        assert_eq!(app.navigator.screen(), Screen::Menu { selected: 0 });
        assert!(app.simulation.is_none());

        app.process_actions(&[InputAction::Menu(MenuAction::Confirm)]);
        assert_eq!(app.rounds_started, 2);
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app();
        app.process_actions(&[InputAction::Quit]);
        assert!(!app.running);
    }

    #[test]
    fn test_seeded_rounds_repeat() {
        let mut first = app().play_immediately();
        let mut second = app().play_immediately();
        for _ in 0..200 {
            first.update(Intent::idle());
            second.update(Intent::idle());
        }
        assert_eq!(first.snapshot, second.snapshot);
    }
}
