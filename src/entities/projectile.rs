use crate::collision::Aabb;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub owner: ProjectileOwner,
    /// Units per tick, positive is up
    pub velocity_y: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, width: f32, height: f32, owner: ProjectileOwner, speed: f32) -> Self {
        let velocity_y = match owner {
            ProjectileOwner::Player => speed,
            ProjectileOwner::Enemy => -speed,
        };

        Self {
            x,
            y,
            width,
            height,
            owner,
            velocity_y,
        }
    }

    /// Shot sized and paced from the config.
    pub fn fired(x: f32, y: f32, owner: ProjectileOwner, config: &GameConfig) -> Self {
        Self::new(
            x,
            y,
            config.projectile_width,
            config.projectile_height,
            owner,
            config.projectile_speed,
        )
    }

    pub fn update(&mut self) {
        self.y += self.velocity_y;
    }

    /// Player shots leave through the top, enemy shots through the bottom.
    pub fn is_out_of_bounds(&self, arena_height: f32) -> bool {
        match self.owner {
            ProjectileOwner::Player => self.y >= arena_height,
            ProjectileOwner::Enemy => self.y <= 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}
