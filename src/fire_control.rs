use rand::Rng;
use tracing::trace;

use crate::config::GameConfig;
use crate::difficulty::CooldownRange;
use crate::entities::{Enemy, Projectile, ProjectileOwner};

/// Decides when the formation shoots back and which enemy pulls the trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyFireController {
    /// Ticks until the next shot; may go negative while no enemy is alive
    cooldown: i32,
    range: CooldownRange,
}

impl EnemyFireController {
    /// Starts with a freshly drawn cooldown so the first shot is not immediate.
    pub fn new<R: Rng>(range: CooldownRange, rng: &mut R) -> Self {
        Self {
            cooldown: range.draw(rng),
            range,
        }
    }

    pub fn cooldown(&self) -> i32 {
        self.cooldown
    }

    pub fn range(&self) -> CooldownRange {
        self.range
    }

    /// Advances one tick and returns the shot fired this tick, if any.
    ///
    /// The shooter is picked uniformly among `enemies`; with an empty slice
    /// the cooldown keeps counting down but nothing is fired.
    pub fn update<R: Rng>(
        &mut self,
        enemies: &[Enemy],
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<Projectile> {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 || enemies.is_empty() {
            return None;
        }

        let shooter = &enemies[rng.random_range(0..enemies.len())];
        let (x, y) = shooter.muzzle(config.projectile_width, config.projectile_height);
        self.cooldown = self.range.draw(rng);
        trace!(x, y, next_cooldown = self.cooldown, "enemy fired");

        Some(Projectile::fired(x, y, ProjectileOwner::Enemy, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::entities::spawn_grid;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_initial_cooldown_in_range() {
        let mut rng = seeded_rng();
        let range = CooldownRange::new(15, 45);
        let controller = EnemyFireController::new(range, &mut rng);
        assert!(range.contains(controller.cooldown()));
    }

    #[test]
    fn test_fires_exactly_when_cooldown_elapses() {
        let config = GameConfig::default();
        let enemies = spawn_grid(&config);
        let mut rng = seeded_rng();
        let range = CooldownRange::new(3, 3);
        let mut controller = EnemyFireController::new(range, &mut rng);

        assert!(controller.update(&enemies, &config, &mut rng).is_none());
        assert!(controller.update(&enemies, &config, &mut rng).is_none());
        let shot = controller
            .update(&enemies, &config, &mut rng)
            .expect("cooldown elapsed");
        assert_eq!(shot.owner, ProjectileOwner::Enemy);
        assert_eq!(shot.velocity_y, -7.0);
        assert_eq!(controller.cooldown(), 3);
    }

    #[test]
    fn test_shot_leaves_from_a_live_enemy() {
        let config = GameConfig::default();
        let enemies = spawn_grid(&config);
        let mut rng = seeded_rng();
        let mut controller = EnemyFireController::new(CooldownRange::new(1, 1), &mut rng);

        for _ in 0..100 {
            let shot = controller
                .update(&enemies, &config, &mut rng)
                .expect("fires every tick");
            let from_enemy = enemies.iter().any(|e| {
                (e.x, e.y) == (shot.x - 17.5, shot.y + 10.0)
            });
            assert!(from_enemy, "shot at ({}, {}) matches no enemy", shot.x, shot.y);
        }
    }

    #[test]
    fn test_empty_formation_only_counts_down() {
        let config = GameConfig::default();
        let mut rng = seeded_rng();
        let mut controller = EnemyFireController::new(CooldownRange::new(2, 2), &mut rng);

        for expected in [1, 0, -1, -2] {
            assert!(controller.update(&[], &config, &mut rng).is_none());
            assert_eq!(controller.cooldown(), expected);
        }
    }

    #[test]
    fn test_overdue_cooldown_fires_once_enemies_exist() {
        let config = GameConfig::default();
        let enemies = spawn_grid(&config);
        let mut rng = seeded_rng();
        let mut controller = EnemyFireController::new(CooldownRange::new(1, 1), &mut rng);
        for _ in 0..5 {
            assert!(controller.update(&[], &config, &mut rng).is_none());
        }
        assert!(controller.update(&enemies, &config, &mut rng).is_some());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_redrawn_cooldown_within_difficulty_range(
                seed in any::<u64>(),
                difficulty in prop::sample::select(Difficulty::ALL.to_vec())
            ) {
                let config = GameConfig::default();
                let enemies = spawn_grid(&config);
                let mut rng = StdRng::seed_from_u64(seed);
                let range = config.cooldown_range(difficulty);
                let mut controller = EnemyFireController::new(range, &mut rng);

                let mut shots = 0;
                for _ in 0..600 {
                    if controller.update(&enemies, &config, &mut rng).is_some() {
                        shots += 1;
                        prop_assert!(range.contains(controller.cooldown()));
                    }
                }
                prop_assert!(shots >= 1);
            }
        }
    }
}
