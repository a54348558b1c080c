//! Coin pickup and fuel refill

use glam::Vec2;

use super::state::{Coin, RunStats};
use crate::tuning::Tuning;

/// Collect every uncollected coin within the pickup radius of `car_pos`.
///
/// Each pickup adds a coin and refills fuel up to the cap. Returns the
/// collected `(id, pos)` pairs in coin order.
pub fn collect_coins(
    coins: &mut [Coin],
    car_pos: Vec2,
    stats: &mut RunStats,
    tuning: &Tuning,
) -> Vec<(u32, Vec2)> {
    let radius_sq = tuning.pickup_radius * tuning.pickup_radius;
    let mut collected = Vec::new();

    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if coin.pos.distance_squared(car_pos) < radius_sq {
            coin.collected = true;
            stats.coins += 1;
            stats.fuel = (stats.fuel + tuning.coin_fuel).min(tuning.max_fuel);
            log::debug!("Coin {} collected at ({:.0}, {:.0})", coin.id, coin.pos.x, coin.pos.y);
            collected.push((coin.id, coin.pos));
        }
    }

    collected
}
