//! Core state types for the N-body simulation.
//!
//! Defines the externally visible per-body snapshot:
//! - `Pos` / `Vel` / `Acc` aliases over `NVec3`
//! - `BodyState` (position, velocity, mass of one body at one instant)
//! - `BodyStateVec`, ordered by body identity and fixed in length for a run
//!
//! Also holds the two leapfrog update laws every engine composes.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

pub type Pos = NVec3;
pub type Vel = NVec3;
pub type Acc = NVec3;
pub type Mass = f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub x: Pos, // position
    pub v: Vel, // velocity
    pub m: Mass, // mass, constant for the whole run
}

impl BodyState {
    pub fn new(x: Pos, v: Vel, m: Mass) -> Self {
        Self { x, v, m }
    }
}

/// Index is body identity; order is stable across iterations
pub type BodyStateVec = Vec<BodyState>;

/// First-order velocity kick: `v + a*dt`
#[inline]
pub fn velocity_updated(v: &Vel, a: &Acc, dt: f64) -> Vel {
    v + a * dt
}

/// Second-order position drift using the pre-kick velocity and current
/// acceleration: `p + v*dt + 0.5*a*dt^2`
#[inline]
pub fn position_updated(p: &Pos, v: &Vel, a: &Acc, dt: f64) -> Pos {
    p + v * dt + a * (0.5 * dt * dt)
}

/// Apply a `max_n_body` limit to an initial-condition set
///
/// A negative limit, or one at least as large as the set, leaves it untouched.
/// Returns `true` when bodies were dropped.
pub fn truncate_bodies(body_states: &mut BodyStateVec, max_n_body: i64) -> bool {
    match usize::try_from(max_n_body) {
        Ok(limit) if limit < body_states.len() => {
            body_states.truncate(limit);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_bodies() -> BodyStateVec {
        (0..3)
            .map(|i| BodyState::new(NVec3::new(i as f64, 0.0, 0.0), NVec3::zeros(), 1.0))
            .collect()
    }

    #[test]
    fn velocity_kick_is_first_order() {
        let v = NVec3::new(1.0, 2.0, 3.0);
        let a = NVec3::new(0.5, -1.0, 2.0);
        let out = velocity_updated(&v, &a, 0.1);
        assert!((out - NVec3::new(1.05, 1.9, 3.2)).norm() < 1e-12);
    }

    #[test]
    fn position_drift_uses_half_acceleration() {
        let p = NVec3::new(0.0, 1.0, 0.0);
        let v = NVec3::new(2.0, 0.0, 0.0);
        let a = NVec3::new(0.0, 4.0, 0.0);
        let out = position_updated(&p, &v, &a, 0.5);
        // x: 0 + 2*0.5, y: 1 + 0.5*4*0.25
        assert!((out - NVec3::new(1.0, 1.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn truncate_limits() {
        let mut states = three_bodies();
        assert!(!truncate_bodies(&mut states, -1));
        assert_eq!(states.len(), 3);

        assert!(!truncate_bodies(&mut states, 3));
        assert!(!truncate_bodies(&mut states, 10));
        assert_eq!(states.len(), 3);

        assert!(truncate_bodies(&mut states, 2));
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].x.x, 1.0);

        assert!(truncate_bodies(&mut states, 0));
        assert!(states.is_empty());
    }
}
