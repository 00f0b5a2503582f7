//! Per-tick game state update.
//!
//! [`Simulation`] owns every entity of a round and is the only thing that
//! mutates them. Presentation reads [`Snapshot`]s; input arrives as an
//! [`Intent`] once per tick.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::collision::intersects;
use crate::config::GameConfig;
use crate::difficulty::Difficulty;
use crate::entities::{
    Enemy, Formation, Player, Projectile, ProjectileOwner, RoundOutcome, spawn_grid,
};
use crate::fire_control::EnemyFireController;
use crate::snapshot::{GameEvent, Snapshot};

/// Horizontal movement requested for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

impl Movement {
    /// Resolves two held directions; holding both cancels out.
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Movement::Left,
            (false, true) => Movement::Right,
            _ => Movement::None,
        }
    }
}

/// Sanitised player input consumed by one [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub movement: Movement,
    pub fire: bool,
}

impl Intent {
    pub fn new(movement: Movement, fire: bool) -> Self {
        Self { movement, fire }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

pub struct Simulation<R = StdRng> {
    config: GameConfig,
    difficulty: Difficulty,
    rng: R,
    player: Player,
    player_projectiles: Vec<Projectile>,
    enemies: Vec<Enemy>,
    enemy_projectiles: Vec<Projectile>,
    formation: Formation,
    fire_control: EnemyFireController,
    outcome: RoundOutcome,
    tick: u64,
    events: Vec<GameEvent>,
}

impl<R: Rng> Simulation<R> {
    /// Starts a round: full grid, centred player, no shots in flight.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, difficulty: Difficulty, mut rng: R) -> Self {
        let fire_control = EnemyFireController::new(config.cooldown_range(difficulty), &mut rng);
        let sim = Self {
            player: Player::spawn(&config),
            player_projectiles: Vec::new(),
            enemies: spawn_grid(&config),
            enemy_projectiles: Vec::new(),
            formation: Formation::from_config(&config),
            fire_control,
            outcome: RoundOutcome::InProgress,
            tick: 0,
            events: Vec::new(),
            config,
            difficulty,
            rng,
        };
        debug!(difficulty = %sim.difficulty, enemies = sim.enemies.len(), "round started");
        sim
    }

    /// Discards the round and starts a fresh one with the same difficulty.
    /// The random source carries on from where it was.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.config);
        self.player_projectiles.clear();
        self.enemies = spawn_grid(&self.config);
        self.enemy_projectiles.clear();
        self.formation = Formation::from_config(&self.config);
        self.fire_control =
            EnemyFireController::new(self.config.cooldown_range(self.difficulty), &mut self.rng);
        self.outcome = RoundOutcome::InProgress;
        self.tick = 0;
        self.events.clear();
        debug!(difficulty = %self.difficulty, "round reset");
    }

    /// Advances the round by one tick and returns the resulting outcome.
    ///
    /// Once the outcome is `Win` or `Loss` this is a silent no-op until
    /// [`Simulation::reset`].
    pub fn step(&mut self, intent: Intent) -> RoundOutcome {
        self.events.clear();
        if self.outcome.is_terminal() {
            return self.outcome;
        }
        self.tick += 1;

        self.move_player(intent.movement);
        if intent.fire {
            self.try_fire();
        }
        self.advance_projectiles();

        if self.formation.update(&mut self.enemies, self.config.arena_width) {
            trace!(tick = self.tick, direction = self.formation.direction_x, "formation bounced");
            self.events.push(GameEvent::FormationBounced);
        }

        if let Some(shot) = self
            .fire_control
            .update(&self.enemies, &self.config, &mut self.rng)
        {
            let bounds = shot.bounds();
            self.events.push(GameEvent::EnemyFired {
                x: bounds.center_x(),
                y: bounds.center_y(),
            });
            self.enemy_projectiles.push(shot);
        }

        self.resolve_player_hits();
        self.resolve_enemy_hits();
        self.check_invasion();

        if self.enemies.is_empty() {
            self.outcome = RoundOutcome::Win;
        }
        if self.outcome.is_terminal() {
            debug!(tick = self.tick, outcome = ?self.outcome, "round over");
        }

        self.outcome
    }

    fn move_player(&mut self, movement: Movement) {
        match movement {
            Movement::Left => self.player.move_left(self.config.player_speed),
            Movement::Right => self
                .player
                .move_right(self.config.player_speed, self.config.arena_width),
            Movement::None => {}
        }
    }

    fn try_fire(&mut self) {
        if self.player_projectiles.len() >= self.config.max_player_projectiles {
            return;
        }
        let (x, y) = self.player.muzzle(self.config.projectile_width);
        let shot = Projectile::fired(x, y, ProjectileOwner::Player, &self.config);
        let bounds = shot.bounds();
        self.events.push(GameEvent::PlayerFired {
            x: bounds.center_x(),
            y: bounds.center_y(),
        });
        self.player_projectiles.push(shot);
    }

    fn advance_projectiles(&mut self) {
        let arena_height = self.config.arena_height;
        for projectile in self
            .player_projectiles
            .iter_mut()
            .chain(self.enemy_projectiles.iter_mut())
        {
            projectile.update();
        }
        self.player_projectiles
            .retain(|p| !p.is_out_of_bounds(arena_height));
        self.enemy_projectiles
            .retain(|p| !p.is_out_of_bounds(arena_height));
    }

    /// Player shots against enemies. A hit removes both right away, so a
    /// destroyed enemy can't be hit again and a spent shot can't hit twice.
    fn resolve_player_hits(&mut self) {
        let mut i = 0;
        while i < self.player_projectiles.len() {
            let shot = self.player_projectiles[i].bounds();
            let hit = self
                .enemies
                .iter()
                .position(|enemy| intersects(&shot, &enemy.bounds()));
            match hit {
                Some(hit) => {
                    let enemy = self.enemies.remove(hit).bounds();
                    self.player_projectiles.remove(i);
                    trace!(tick = self.tick, x = enemy.x, y = enemy.y, "enemy destroyed");
                    self.events.push(GameEvent::EnemyDestroyed {
                        x: enemy.center_x(),
                        y: enemy.center_y(),
                    });
                }
                None => i += 1,
            }
        }
    }

    fn resolve_enemy_hits(&mut self) {
        let player = self.player.bounds();
        let before = self.enemy_projectiles.len();
        self.enemy_projectiles
            .retain(|shot| !intersects(&shot.bounds(), &player));
        if self.enemy_projectiles.len() < before {
            self.outcome = RoundOutcome::Loss;
            self.events.push(GameEvent::PlayerHit {
                x: player.center_x(),
                y: player.center_y(),
            });
        }
    }

    /// Any enemy reaching down to the player's top edge ends the round.
    fn check_invasion(&mut self) {
        let player_top = self.player.bounds().top();
        if self.enemies.iter().any(|e| e.bounds().bottom() <= player_top) {
            self.outcome = RoundOutcome::Loss;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            difficulty: self.difficulty,
            outcome: self.outcome,
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            player: self.player.bounds(),
            player_projectiles: self.player_projectiles.iter().map(Projectile::bounds).collect(),
            enemies: self.enemies.iter().map(|e| (e.bounds(), e.row)).collect(),
            enemy_projectiles: self.enemy_projectiles.iter().map(Projectile::bounds).collect(),
            enemies_total: self.config.enemy_count(),
            events: self.events.clone(),
        }
    }

    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn player_projectiles(&self) -> &[Projectile] {
        &self.player_projectiles
    }

    pub fn enemy_projectiles(&self) -> &[Projectile] {
        &self.enemy_projectiles
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn fire_control(&self) -> &EnemyFireController {
        &self.fire_control
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
