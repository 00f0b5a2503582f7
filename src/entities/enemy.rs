use crate::collision::Aabb;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Grid row it spawned in, 0 is the top row
    pub row: usize,
}

impl Enemy {
    pub fn new(x: f32, y: f32, width: f32, height: f32, row: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            row,
        }
    }

    /// Enemies never move on their own; the formation shifts them.
    pub fn shift(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Top-left corner of a shot fired from this enemy: centred, hanging below the bottom edge.
    pub fn muzzle(&self, projectile_width: f32, projectile_height: f32) -> (f32, f32) {
        (
            self.x + self.width / 2.0 - projectile_width / 2.0,
            self.y - projectile_height,
        )
    }
}

/// Builds the starting grid, row by row from the top, left to right.
pub fn spawn_grid(config: &GameConfig) -> Vec<Enemy> {
    let origin_y = config.grid_origin_y();
    let mut enemies = Vec::with_capacity(config.enemy_count());
    for row in 0..config.enemy_rows {
        for col in 0..config.enemy_columns {
            enemies.push(Enemy::new(
                config.grid_origin_x + col as f32 * config.enemy_spacing_x,
                origin_y - row as f32 * config.enemy_spacing_y,
                config.enemy_width,
                config.enemy_height,
                row,
            ));
        }
    }
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_grid_layout() {
        let enemies = spawn_grid(&GameConfig::default());
        assert_eq!(enemies.len(), 28);

        // Top-left corner
        assert_eq!((enemies[0].x, enemies[0].y), (100.0, 500.0));
        // End of the first row
        assert_eq!((enemies[6].x, enemies[6].y), (580.0, 500.0));
        // Bottom-right corner
        assert_eq!((enemies[27].x, enemies[27].y), (580.0, 320.0));
        assert_eq!(enemies[27].row, 3);
    }

    #[test]
    fn test_enemy_shift() {
        let mut enemy = Enemy::new(100.0, 500.0, 40.0, 30.0, 0);
        enemy.shift(2.0, -20.0);
        assert_eq!(enemy.x, 102.0);
        assert_eq!(enemy.y, 480.0);
    }

    #[test]
    fn test_enemy_muzzle_below_bottom_edge() {
        let enemy = Enemy::new(100.0, 500.0, 40.0, 30.0, 0);
        assert_eq!(enemy.muzzle(5.0, 10.0), (117.5, 490.0));
    }

    #[test]
    fn test_enemy_bounds() {
        let enemy = Enemy::new(100.0, 500.0, 40.0, 30.0, 0);
        assert_eq!(enemy.bounds(), Aabb::new(100.0, 500.0, 40.0, 30.0));
    }
}
