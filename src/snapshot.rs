use crate::collision::Aabb;
use crate::difficulty::Difficulty;
use crate::entities::RoundOutcome;

/// Something that happened during the last tick, positioned at its centre.
/// Presentation uses these for one-off effects; the simulation never reads them back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerFired { x: f32, y: f32 },
    EnemyFired { x: f32, y: f32 },
    EnemyDestroyed { x: f32, y: f32 },
    PlayerHit { x: f32, y: f32 },
    FormationBounced,
}

/// Read-only view of a round after a tick completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub difficulty: Difficulty,
    pub outcome: RoundOutcome,
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: Aabb,
    pub player_projectiles: Vec<Aabb>,
    /// Enemy box with the grid row it spawned in
    pub enemies: Vec<(Aabb, usize)>,
    pub enemy_projectiles: Vec<Aabb>,
    pub enemies_total: usize,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn enemies_left(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemies_destroyed(&self) -> usize {
        self.enemies_total.saturating_sub(self.enemies.len())
    }
}
