//! Struct-of-arrays state buffer for one simulation snapshot
//!
//! Masses never change during a run, so they live beside the buffers
//! rather than inside them. Engines keep two buffers and exchange them
//! with `std::mem::swap` after every step; the arrays are never copied.

use super::states::{Acc, BodyState, BodyStateVec, Mass, NVec3, Pos, Vel};

#[derive(Debug, Clone)]
pub struct StateBuffer {
    pub pos: Vec<Pos>, // positions
    pub vel: Vec<Vel>, // velocities
    pub acc: Vec<Acc>, // accelerations, overwritten by every force pass
}

impl StateBuffer {
    /// Zero-filled buffer for `n_body` bodies
    pub fn new(n_body: usize) -> Self {
        Self {
            pos: vec![NVec3::zeros(); n_body],
            vel: vec![NVec3::zeros(); n_body],
            acc: vec![NVec3::zeros(); n_body],
        }
    }

    /// Load positions/velocities from `body_states`; returns the mass array
    pub fn from_body_states(body_states: &[BodyState]) -> (Self, Vec<Mass>) {
        let mut buf = Self::new(body_states.len());
        let mut mass = Vec::with_capacity(body_states.len());
        for (i, b) in body_states.iter().enumerate() {
            buf.pos[i] = b.x;
            buf.vel[i] = b.v;
            mass.push(b.m);
        }
        (buf, mass)
    }

    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Zip this buffer's positions/velocities with `mass`
    pub fn to_body_states(&self, mass: &[Mass]) -> BodyStateVec {
        self.pos
            .iter()
            .zip(self.vel.iter())
            .zip(mass.iter())
            .map(|((x, v), m)| BodyState::new(*x, *v, *m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_body_states_with_mass() {
        let states = vec![
            BodyState::new(NVec3::new(1.0, 2.0, 3.0), NVec3::new(0.1, 0.0, 0.0), 5.0),
            BodyState::new(NVec3::new(-1.0, 0.0, 0.0), NVec3::new(0.0, -0.2, 0.0), 0.0),
        ];
        let (buf, mass) = StateBuffer::from_body_states(&states);
        assert_eq!(buf.len(), 2);
        assert_eq!(mass, vec![5.0, 0.0]);
        assert!(buf.acc.iter().all(|a| *a == NVec3::zeros()));
        assert_eq!(buf.to_body_states(&mass), states);
    }

    #[test]
    fn swap_exchanges_storage_without_copying() {
        let mut a = StateBuffer::new(4);
        let mut b = StateBuffer::new(4);
        a.pos[0] = NVec3::new(1.0, 0.0, 0.0);
        let a_ptr = a.pos.as_ptr();
        let b_ptr = b.pos.as_ptr();

        std::mem::swap(&mut a, &mut b);

        assert_eq!(a.pos.as_ptr(), b_ptr);
        assert_eq!(b.pos.as_ptr(), a_ptr);
        assert_eq!(b.pos[0].x, 1.0);
        assert_ne!(a.pos.as_ptr(), b.pos.as_ptr());
    }
}
