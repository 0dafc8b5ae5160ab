//! Conserved-quantity diagnostics for a body-state snapshot
//!
//! Used to log energy drift over a run; never fed back into the simulation.

use super::states::{BodyState, NVec3};

pub fn kinetic_energy(body_states: &[BodyState]) -> f64 {
    body_states
        .iter()
        .map(|b| 0.5 * b.m * b.v.norm_squared())
        .sum()
}

/// Pairwise potential `-G m_i m_j / r_ij`, no softening
#[allow(non_snake_case)]
pub fn potential_energy(body_states: &[BodyState], G: f64) -> f64 {
    let mut pe = 0.0;
    for (i, bi) in body_states.iter().enumerate() {
        for bj in &body_states[i + 1..] {
            pe -= G * bi.m * bj.m / (bj.x - bi.x).norm();
        }
    }
    pe
}

#[allow(non_snake_case)]
pub fn total_energy(body_states: &[BodyState], G: f64) -> f64 {
    kinetic_energy(body_states) + potential_energy(body_states, G)
}

pub fn total_momentum(body_states: &[BodyState]) -> NVec3 {
    body_states
        .iter()
        .fold(NVec3::zeros(), |p, b| p + b.v * b.m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_body_energies() {
        let bodies = vec![
            BodyState::new(NVec3::zeros(), NVec3::new(0.0, 1.0, 0.0), 2.0),
            BodyState::new(NVec3::new(2.0, 0.0, 0.0), NVec3::new(0.0, -1.0, 0.0), 2.0),
        ];
        assert!((kinetic_energy(&bodies) - 2.0).abs() < 1e-12);
        assert!((potential_energy(&bodies, 1.0) + 2.0).abs() < 1e-12);
        assert!(total_energy(&bodies, 1.0).abs() < 1e-12);
        assert_eq!(total_momentum(&bodies), NVec3::zeros());
    }
}
