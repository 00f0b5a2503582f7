use crate::config::GameConfig;

use super::enemy::Enemy;

/// Shared sweep state of the enemy grid. Enemies carry no movement state of
/// their own, so every live enemy moves by exactly the same amount each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// Movement direction (-1 left, 1 right)
    pub direction_x: i16,
    /// Horizontal units per tick
    pub speed: f32,
    /// Vertical units dropped on each wall bounce
    pub drop: f32,
}

impl Formation {
    pub fn new(speed: f32, drop: f32) -> Self {
        Self {
            direction_x: 1, // Start moving right
            speed,
            drop,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.formation_speed, config.formation_drop)
    }

    fn step_x(&self) -> f32 {
        f32::from(self.direction_x) * self.speed
    }

    /// Advances the formation one tick. Returns `true` when it bounced off a wall.
    ///
    /// The wall check looks at positions after the sideways move, so a bounce
    /// flips, steps back and drops in the same tick it is detected.
    pub fn update(&mut self, enemies: &mut [Enemy], arena_width: f32) -> bool {
        let dx = self.step_x();
        let mut bounce = false;
        for enemy in enemies.iter_mut() {
            enemy.shift(dx, 0.0);
            if enemy.x <= 0.0 || enemy.x + enemy.width >= arena_width {
                bounce = true;
            }
        }

        if bounce {
            self.direction_x = -self.direction_x;
            let dx = self.step_x();
            for enemy in enemies.iter_mut() {
                enemy.shift(dx, -self.drop);
            }
        }

        bounce
    }
}
