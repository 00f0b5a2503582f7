use crate::collision::Aabb;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Player centred horizontally at the configured spawn height.
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(
            config.arena_width / 2.0 - config.player_width / 2.0,
            config.player_spawn_y,
            config.player_width,
            config.player_height,
        )
    }

    pub fn move_left(&mut self, speed: f32) {
        self.x = (self.x - speed).max(0.0);
    }

    /// `arena_width` is the right wall; the ship's right edge never passes it.
    pub fn move_right(&mut self, speed: f32, arena_width: f32) {
        let max_x = (arena_width - self.width).max(0.0);
        self.x = (self.x + speed).min(max_x);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Where a shot of the given width leaves the ship: centred, on the top edge.
    pub fn muzzle(&self, projectile_width: f32) -> (f32, f32) {
        (
            self.x + self.width / 2.0 - projectile_width / 2.0,
            self.y + self.height,
        )
    }
}
