// Library exports for testing
pub use app::App;
pub use cli::Cli;
pub use collision::{Aabb, intersects};
pub use config::{ConfigError, GameConfig};
pub use difficulty::{CooldownRange, CooldownTable, Difficulty, ParseDifficultyError};
pub use entities::{
    Enemy, Formation, Player, Projectile, ProjectileOwner, RoundOutcome, spawn_grid,
};
pub use fire_control::EnemyFireController;
pub use input::{InputAction, InputManager};
pub use simulation::{Intent, Movement, Simulation};
pub use snapshot::{GameEvent, Snapshot};

pub mod app;
pub mod cli;
pub mod collision;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod fire_control;
pub mod input;
pub mod logging;
pub mod menu;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod snapshot;
