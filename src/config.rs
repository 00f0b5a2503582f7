use thiserror::Error;

use crate::difficulty::{CooldownRange, CooldownTable, Difficulty};

/// Errors returned by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("at least one player projectile must be allowed in flight")]
    ZeroProjectileCap,
    #[error("enemy grid must have at least one row and one column")]
    EmptyGrid,
    #[error("{difficulty} cooldown range {min}..={max} is invalid")]
    InvalidCooldown {
        difficulty: Difficulty,
        min: i32,
        max: i32,
    },
    #[error("{0} does not fit inside the arena")]
    OutOfArena(&'static str),
}

/// Every tunable constant of a round. `Default` gives the classic layout:
/// 800x600 arena, 4x7 enemy grid, five shots in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Bottom edge of the player ship, fixed for the whole round
    pub player_spawn_y: f32,
    /// Horizontal units per tick
    pub player_speed: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    /// Vertical units per tick, player shots go up and enemy shots go down
    pub projectile_speed: f32,
    pub max_player_projectiles: usize,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_rows: usize,
    pub enemy_columns: usize,
    pub enemy_spacing_x: f32,
    pub enemy_spacing_y: f32,
    /// Left edge of the first column
    pub grid_origin_x: f32,
    /// Distance from the arena top to the bottom edge of the first row
    pub grid_top_offset: f32,

    pub formation_speed: f32,
    pub formation_drop: f32,

    pub cooldowns: CooldownTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            player_width: 50.0,
            player_height: 30.0,
            player_spawn_y: 50.0,
            player_speed: 6.0,
            projectile_width: 5.0,
            projectile_height: 10.0,
            projectile_speed: 7.0,
            max_player_projectiles: 5,
            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_rows: 4,
            enemy_columns: 7,
            enemy_spacing_x: 80.0,
            enemy_spacing_y: 60.0,
            grid_origin_x: 100.0,
            grid_top_offset: 100.0,
            formation_speed: 2.0,
            formation_drop: 20.0,
            cooldowns: CooldownTable::default(),
        }
    }
}

impl GameConfig {
    /// Bottom edge of the first (top) enemy row.
    pub fn grid_origin_y(&self) -> f32 {
        self.arena_height - self.grid_top_offset
    }

    pub fn enemy_count(&self) -> usize {
        self.enemy_rows * self.enemy_columns
    }

    pub fn cooldown_range(&self, difficulty: Difficulty) -> CooldownRange {
        self.cooldowns.range(difficulty)
    }

    /// Checks the configuration can produce a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena width", self.arena_width),
            ("arena height", self.arena_height),
            ("player width", self.player_width),
            ("player height", self.player_height),
            ("player speed", self.player_speed),
            ("projectile width", self.projectile_width),
            ("projectile height", self.projectile_height),
            ("projectile speed", self.projectile_speed),
            ("enemy width", self.enemy_width),
            ("enemy height", self.enemy_height),
            ("formation speed", self.formation_speed),
            ("formation drop", self.formation_drop),
        ];
        for (name, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.max_player_projectiles == 0 {
            return Err(ConfigError::ZeroProjectileCap);
        }
        if self.enemy_rows == 0 || self.enemy_columns == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        for difficulty in Difficulty::ALL {
            let range = self.cooldowns.range(difficulty);
            if range.min < 1 || range.min > range.max {
                return Err(ConfigError::InvalidCooldown {
                    difficulty,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        if self.player_width > self.arena_width
            || self.player_spawn_y < 0.0
            || self.player_spawn_y + self.player_height > self.arena_height
        {
            return Err(ConfigError::OutOfArena("player"));
        }

        let grid_right = self.grid_origin_x
            + (self.enemy_columns - 1) as f32 * self.enemy_spacing_x
            + self.enemy_width;
        let grid_bottom = self.grid_origin_y() - (self.enemy_rows - 1) as f32 * self.enemy_spacing_y;
        if self.grid_origin_x < 0.0
            || grid_right > self.arena_width
            || grid_bottom < 0.0
            || self.grid_origin_y() + self.enemy_height > self.arena_height
        {
            return Err(ConfigError::OutOfArena("enemy grid"));
        }

        Ok(())
    }
}
