//! Fixed-step leapfrog (kick-drift-kick) step between two state buffers
//!
//! One step reads only from `buf_in` and writes only into `buf_out`:
//! 1. kick/drift: `vel_tmp` and `buf_out.pos` from `buf_in` (per body)
//! 2. force pass at the new positions into `buf_out.acc`
//! 3. finalize `buf_out.vel` from `vel_tmp` and the new accelerations (per body)
//!
//! Steps 1 and 3 have no cross-body dependency. `leapfrog_step_par` runs them
//! on rayon; the force pass is whatever `Acceleration` the caller hands in.

use rayon::prelude::*;

use super::buffer::StateBuffer;
use super::forces::Acceleration;
use super::states::{position_updated, velocity_updated, Mass, Vel};

/// Advance `buf_in` into `buf_out` by `dt` on the calling thread
///
/// `buf_in.acc` must hold the accelerations at `buf_in.pos`.
pub fn leapfrog_step<F>(
    forces: &F,
    buf_in: &StateBuffer,
    buf_out: &mut StateBuffer,
    mass: &[Mass],
    vel_tmp: &mut [Vel],
    dt: f64,
) where
    F: Acceleration + ?Sized,
{
    let n = buf_in.len();
    for i in 0..n {
        vel_tmp[i] = velocity_updated(&buf_in.vel[i], &buf_in.acc[i], dt);
        buf_out.pos[i] = position_updated(&buf_in.pos[i], &buf_in.vel[i], &buf_in.acc[i], dt);
    }

    forces.acceleration(&buf_out.pos, mass, &mut buf_out.acc);

    for i in 0..n {
        buf_out.vel[i] = velocity_updated(&vel_tmp[i], &buf_out.acc[i], dt);
    }
}

/// Same step as [`leapfrog_step`] with the per-body loops split across rayon
///
/// Only safe to pair with a force pass that is itself race free, e.g.
/// `NewtonianGravityOwnerComputes`.
pub fn leapfrog_step_par<F>(
    forces: &F,
    buf_in: &StateBuffer,
    buf_out: &mut StateBuffer,
    mass: &[Mass],
    vel_tmp: &mut [Vel],
    dt: f64,
) where
    F: Acceleration + Sync + ?Sized,
{
    vel_tmp
        .par_iter_mut()
        .zip(buf_out.pos.par_iter_mut())
        .enumerate()
        .for_each(|(i, (v_tmp, p_out))| {
            *v_tmp = velocity_updated(&buf_in.vel[i], &buf_in.acc[i], dt);
            *p_out = position_updated(&buf_in.pos[i], &buf_in.vel[i], &buf_in.acc[i], dt);
        });

    forces.acceleration(&buf_out.pos, mass, &mut buf_out.acc);

    buf_out
        .vel
        .par_iter_mut()
        .zip(buf_out.acc.par_iter())
        .zip(vel_tmp.par_iter())
        .for_each(|((v_out, a_out), v_tmp)| {
            *v_out = velocity_updated(v_tmp, a_out, dt);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::{NewtonianGravity, NewtonianGravityOwnerComputes};
    use crate::simulation::states::NVec3;

    fn prepared(forces: &impl Acceleration) -> (StateBuffer, Vec<Mass>) {
        let mut buf = StateBuffer::new(8);
        for i in 0..8 {
            let f = i as f64;
            buf.pos[i] = NVec3::new(f.cos() * 3.0, f.sin() * 3.0, 0.1 * f);
            buf.vel[i] = NVec3::new(-f.sin() * 0.2, f.cos() * 0.2, 0.0);
        }
        let mass: Vec<Mass> = (0..8).map(|i| 0.5 + i as f64 * 0.1).collect();
        forces.acceleration(&buf.pos, &mass, &mut buf.acc);
        (buf, mass)
    }

    #[test]
    fn step_leaves_input_untouched() {
        let forces = NewtonianGravity { G: 1.0 };
        let (buf_in, mass) = prepared(&forces);
        let before = buf_in.clone();
        let mut buf_out = StateBuffer::new(8);
        let mut vel_tmp = vec![NVec3::zeros(); 8];

        leapfrog_step(&forces, &buf_in, &mut buf_out, &mass, &mut vel_tmp, 0.01);

        assert_eq!(buf_in.pos, before.pos);
        assert_eq!(buf_in.vel, before.vel);
        assert_eq!(buf_in.acc, before.acc);
        assert_ne!(buf_out.pos, buf_in.pos);
    }

    #[test]
    fn parallel_step_matches_sequential() {
        let seq_forces = NewtonianGravity { G: 1.0 };
        let par_forces = NewtonianGravityOwnerComputes { G: 1.0 };
        let (buf_in, mass) = prepared(&seq_forces);

        let mut out_seq = StateBuffer::new(8);
        let mut out_par = StateBuffer::new(8);
        let mut tmp_seq = vec![NVec3::zeros(); 8];
        let mut tmp_par = vec![NVec3::zeros(); 8];

        leapfrog_step(&seq_forces, &buf_in, &mut out_seq, &mass, &mut tmp_seq, 0.01);
        leapfrog_step_par(&par_forces, &buf_in, &mut out_par, &mass, &mut tmp_par, 0.01);

        // Kick/drift is identical arithmetic; only force summation order differs
        assert_eq!(out_seq.pos, out_par.pos);
        for i in 0..8 {
            assert!((out_seq.vel[i] - out_par.vel[i]).norm() < 1e-12);
            assert!((out_seq.acc[i] - out_par.acc[i]).norm() < 1e-12);
        }
    }
}
