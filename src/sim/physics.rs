//! Car physics integration
//!
//! One call advances the car by exactly one frame. All constants are
//! per-frame quantities, so the integrator has no dt.

use super::state::{Car, RunStats};
use super::terrain::Terrain;
use crate::consts::START_X;
use crate::tuning::Tuning;

/// Driver controls sampled for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
}

/// Advance `car` one frame against `terrain`, burning fuel and tracking distance
pub fn integrate(
    car: &mut Car,
    stats: &mut RunStats,
    terrain: &Terrain,
    controls: Controls,
    tuning: &Tuning,
) {
    // Gravity always applies; contact cancels it below
    car.vel.y += tuning.gravity;

    // Ground contact (touching counts, so a resting car stays grounded)
    let ground = terrain.height_at(car.pos.x);
    if car.pos.y + tuning.wheel_radius >= ground {
        car.pos.y = ground - tuning.wheel_radius;
        car.vel.y = 0.0;
        car.grounded = true;
    } else {
        car.grounded = false;
    }

    if car.grounded {
        // Lean toward the slope instead of snapping to it
        let slope = terrain.angle_at(car.pos.x, tuning.angle_probe);
        car.angular_vel += (slope - car.angle) * tuning.align_factor;

        let heading = car.heading();
        if controls.accelerate && stats.fuel > 0.0 {
            car.vel += heading * tuning.accel;
            stats.fuel = (stats.fuel - tuning.fuel_burn).max(0.0);
        }
        if controls.brake {
            car.vel -= heading * tuning.brake;
        }
    }

    car.vel.x = car
        .vel
        .x
        .clamp(-tuning.max_reverse_speed, tuning.max_forward_speed);

    car.vel.x *= tuning.friction;
    car.angular_vel *= tuning.angular_friction;

    car.pos += car.vel;
    car.angle += car.angular_vel;

    // Can't back up past the start
    if car.pos.x < START_X {
        car.pos.x = START_X;
        car.vel.x = 0.0;
    }

    stats.distance = stats.distance.max(car.pos.x - START_X);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(tuning: &Tuning) -> (Car, RunStats, Terrain) {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut terrain = Terrain::new(tuning.baseline);
        terrain.generate(0.0, 400, tuning, &mut rng);
        let ground = terrain.height_at(START_X);
        let car = Car::at_rest(Vec2::new(START_X, ground - tuning.wheel_radius));
        (car, RunStats::new(tuning.max_fuel), terrain)
    }

    const GAS: Controls = Controls {
        accelerate: true,
        brake: false,
    };
    const BRAKE: Controls = Controls {
        accelerate: false,
        brake: true,
    };

    #[test]
    fn test_gravity_pulls_airborne_car() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        car.pos.y -= 200.0;
        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        assert!(!car.grounded);
        assert!((car.vel.y - tuning.gravity).abs() < 1e-6);
        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        assert!((car.vel.y - 2.0 * tuning.gravity).abs() < 1e-6);
    }

    #[test]
    fn test_landing_clamps_to_surface() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        car.pos.y = tuning.baseline + 30.0;
        car.vel.y = 8.0;
        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        assert!(car.grounded);
        assert_eq!(car.vel.y, 0.0);
        assert_eq!(car.pos.y, tuning.baseline - tuning.wheel_radius);
    }

    #[test]
    fn test_resting_car_stays_grounded() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        for _ in 0..10 {
            integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
            assert!(car.grounded);
        }
        assert_eq!(car.pos.y, tuning.baseline - tuning.wheel_radius);
    }

    #[test]
    fn test_accelerate_on_flat_matches_recurrence() {
        let tuning = Tuning {
            fuel_burn: 0.0,
            ..Tuning::flat()
        };
        let (mut car, mut stats, terrain) = setup(&tuning);
        let mut expected = 0.0f32;
        for _ in 0..120 {
            integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
            expected = (expected + tuning.accel) * tuning.friction;
        }
        assert!((car.vel.x - expected).abs() < 1e-4);
        assert_eq!(car.angle, 0.0);
    }

    #[test]
    fn test_accelerate_burns_fuel_only_when_grounded() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
        assert!((stats.fuel - (tuning.max_fuel - tuning.fuel_burn)).abs() < 1e-4);

        car.pos.y -= 300.0;
        let before = stats.fuel;
        let vx = car.vel.x;
        integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
        assert_eq!(stats.fuel, before);
        assert!((car.vel.x - vx * tuning.friction).abs() < 1e-6);
    }

    #[test]
    fn test_no_thrust_without_fuel() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        stats.fuel = 0.0;
        integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
        assert_eq!(car.vel.x, 0.0);
        assert_eq!(stats.fuel, 0.0);
    }

    #[test]
    fn test_fuel_never_negative() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        stats.fuel = tuning.fuel_burn / 2.0;
        integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
        assert_eq!(stats.fuel, 0.0);
    }

    #[test]
    fn test_brake_works_without_fuel_and_hits_boundary() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        stats.fuel = 0.0;
        integrate(&mut car, &mut stats, &terrain, BRAKE, &tuning);
        // Braking from rest would reverse past the start, so the wall stops it
        assert_eq!(car.pos.x, START_X);
        assert_eq!(car.vel.x, 0.0);
    }

    #[test]
    fn test_reverse_speed_capped() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        car.pos.x = 6000.0;
        for _ in 0..300 {
            integrate(&mut car, &mut stats, &terrain, BRAKE, &tuning);
        }
        assert!(car.vel.x < 0.0);
        assert!(car.vel.x >= -tuning.max_reverse_speed);
    }

    #[test]
    fn test_forward_speed_capped() {
        let tuning = Tuning {
            accel: 5.0,
            fuel_burn: 0.0,
            ..Tuning::flat()
        };
        let (mut car, mut stats, terrain) = setup(&tuning);
        for _ in 0..20 {
            integrate(&mut car, &mut stats, &terrain, GAS, &tuning);
            assert!(car.vel.x <= tuning.max_forward_speed);
        }
        assert!((car.vel.x - tuning.max_forward_speed * tuning.friction).abs() < 1e-4);
    }

    #[test]
    fn test_alignment_lags_terrain() {
        let tuning = Tuning::default();
        let (mut car, mut stats, terrain) = setup(&tuning);
        car.pos.x = 600.0;
        car.pos.y = terrain.height_at(600.0) - tuning.wheel_radius;
        let slope = terrain.angle_at(600.0, tuning.angle_probe);
        assert!(slope.abs() > 0.05);

        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        // One frame moves only a fraction of the way
        assert!(car.angle.abs() > 0.0);
        assert!(car.angle.abs() < slope.abs());
        assert_eq!(car.angle.signum(), slope.signum());
    }

    #[test]
    fn test_distance_tracks_maximum() {
        let tuning = Tuning::flat();
        let (mut car, mut stats, terrain) = setup(&tuning);
        car.vel.x = 10.0;
        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        let peak = stats.distance;
        assert!(peak > 0.0);
        car.vel.x = -5.0;
        integrate(&mut car, &mut stats, &terrain, Controls::default(), &tuning);
        assert_eq!(stats.distance, peak);
    }
}
