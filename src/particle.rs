use crate::snapshot::GameEvent;

/// Short-lived explosion debris, in arena units. Purely cosmetic: lives in the
/// presentation layer and never feeds back into the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub lifetime: u8,
    pub char: char,
}

impl Particle {
    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, lifetime: u8, char: char) -> Self {
        Self {
            x,
            y,
            velocity_x,
            velocity_y,
            lifetime,
            char,
        }
    }

    pub fn update(&mut self) {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime == 0
    }

    pub fn is_out_of_bounds(&self, arena_width: f32, arena_height: f32) -> bool {
        self.x < 0.0 || self.x >= arena_width || self.y < 0.0 || self.y >= arena_height
    }
}

/// Arena units per frame for debris
const DEBRIS_SPEED: f32 = 4.0;

/// Creates an explosion particle effect at the given position
pub fn create_explosion_particles(center_x: f32, center_y: f32) -> Vec<Particle> {
    // 8 directions (cardinal + diagonal); y is up in arena space
    let directions = [
        (0.0, 1.0),
        (1.0, 1.0),
        (1.0, 0.0),
        (1.0, -1.0),
        (0.0, -1.0),
        (-1.0, -1.0),
        (-1.0, 0.0),
        (-1.0, 1.0),
    ];

    let mut particles: Vec<Particle> = directions
        .iter()
        .map(|(dx, dy)| {
            Particle::new(
                center_x,
                center_y,
                dx * DEBRIS_SPEED,
                dy * DEBRIS_SPEED,
                12, // ~0.2 seconds at 60 FPS
                '*',
            )
        })
        .collect();

    // Brief central flash
    particles.push(Particle::new(center_x, center_y, 0.0, 0.0, 6, 'o'));

    particles
}

/// Debris for the events of one tick
pub fn particles_for_events(events: &[GameEvent]) -> Vec<Particle> {
    events
        .iter()
        .flat_map(|event| match *event {
            GameEvent::EnemyDestroyed { x, y } | GameEvent::PlayerHit { x, y } => {
                create_explosion_particles(x, y)
            }
            _ => Vec::new(),
        })
        .collect()
}
