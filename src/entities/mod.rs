mod enemy;
mod formation;
mod outcome;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, spawn_grid};
pub use formation::Formation;
pub use outcome::RoundOutcome;
pub use player::Player;
pub use projectile::{Projectile, ProjectileOwner};
