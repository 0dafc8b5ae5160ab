//! Force / acceleration contributors for the n-body engine
//!
//! Defines the pairwise "universal field" and two exact O(N^2) evaluators:
//! - [`NewtonianGravity`]: symmetric accumulation over unordered pairs,
//!   one field evaluation per pair (sequential only)
//! - [`NewtonianGravityOwnerComputes`]: each target body sums over all
//!   sources on its own, so targets can be split across rayon workers
//!
//! Neither applies softening. Coincident bodies produce inf/NaN which then
//! propagates through the run.

use rayon::prelude::*;

use crate::simulation::states::{Acc, Mass, NVec3, Pos};

/// Trait for acceleration sources operating on a snapshot of positions
/// Implementations overwrite `out[i]` with the total acceleration on body i
pub trait Acceleration {
    fn acceleration(&self, pos: &[Pos], mass: &[Mass], out: &mut [Acc]);
}

/// Field contribution at `from` directed toward `to`:
/// `G * (to - from) / |to - from|^3`
///
/// Scaled by the source mass this is the acceleration `from` feels from `to`.
/// Swapping the arguments negates the result exactly.
#[inline]
pub fn universal_field(to: &Pos, from: &Pos, g: f64) -> Acc {
    let r = to - from;
    let inv_r = r.norm_squared().sqrt().recip();
    let inv_r3 = inv_r * inv_r * inv_r;
    r * (g * inv_r3)
}

/// Direct Newtonian gravity, symmetric pair accumulation
///
/// Uses Newton's third law: for each unordered pair the field is evaluated
/// once and applied to both bodies with opposite sign. Two pairs can write
/// the same accumulator, so this must not be split across threads.
#[derive(Debug, Clone, Copy)]
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, pos: &[Pos], mass: &[Mass], out: &mut [Acc]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }

        let n = pos.len();
        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                // Points from i toward j
                let tgt_to_src = universal_field(&pos[j], &pos[i], self.G);

                // i is pulled along +r scaled by m_j, j along -r scaled by m_i
                out[i] += mass[j] * tgt_to_src;
                out[j] -= mass[i] * tgt_to_src;
            }
        }
    }
}

/// Direct Newtonian gravity, owner-computes form
///
/// Each target body owns its accumulator and recomputes every pair it takes
/// part in. Twice the field evaluations of [`NewtonianGravity`] but no two
/// workers ever write the same slot.
#[derive(Debug, Clone, Copy)]
#[allow(non_snake_case)]
pub struct NewtonianGravityOwnerComputes {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravityOwnerComputes {
    fn acceleration(&self, pos: &[Pos], mass: &[Mass], out: &mut [Acc]) {
        out.par_iter_mut().enumerate().for_each(|(i, a)| {
            let mut sum = NVec3::zeros();
            for (j, (pj, mj)) in pos.iter().zip(mass.iter()).enumerate() {
                if j == i {
                    continue;
                }
                sum += *mj * universal_field(pj, &pos[i], self.G);
            }
            *a = sum;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered(n: usize) -> (Vec<Pos>, Vec<Mass>) {
        let pos = (0..n)
            .map(|i| {
                let f = i as f64;
                NVec3::new((f * 0.37).sin() * 5.0, (f * 0.13).cos() * 5.0, (f * 0.07).sin() * 5.0)
            })
            .collect();
        let mass = (0..n).map(|i| 1.0 + (i % 3) as f64).collect();
        (pos, mass)
    }

    #[test]
    fn field_is_antisymmetric() {
        let a = NVec3::new(0.3, -1.0, 2.0);
        let b = NVec3::new(-0.7, 0.5, 1.0);
        let f_ab = universal_field(&a, &b, 1.0);
        let f_ba = universal_field(&b, &a, 1.0);
        assert_eq!(f_ab, -f_ba);
    }

    #[test]
    fn field_is_inverse_square() {
        let origin = NVec3::zeros();
        let near = universal_field(&NVec3::new(1.0, 0.0, 0.0), &origin, 1.0);
        let far = universal_field(&NVec3::new(2.0, 0.0, 0.0), &origin, 1.0);
        assert!((near.norm() / far.norm() - 4.0).abs() < 1e-12);
        assert!(near.x > 0.0, "field must point toward the source");
    }

    #[test]
    fn accumulator_is_overwritten() {
        let (pos, mass) = scattered(5);
        let mut out = vec![NVec3::new(100.0, 100.0, 100.0); 5];
        NewtonianGravity { G: 1.0 }.acceleration(&pos, &mass, &mut out);

        let mut fresh = vec![NVec3::zeros(); 5];
        NewtonianGravity { G: 1.0 }.acceleration(&pos, &mass, &mut fresh);
        assert_eq!(out, fresh);
    }

    #[test]
    fn owner_computes_matches_symmetric() {
        let (pos, mass) = scattered(64);
        let mut shared = vec![NVec3::zeros(); 64];
        let mut owned = vec![NVec3::zeros(); 64];
        NewtonianGravity { G: 0.5 }.acceleration(&pos, &mass, &mut shared);
        NewtonianGravityOwnerComputes { G: 0.5 }.acceleration(&pos, &mass, &mut owned);

        for (a, b) in shared.iter().zip(owned.iter()) {
            assert!((a - b).norm() <= 1e-10 * a.norm().max(1.0), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn empty_and_single_body_are_trivial() {
        let mut out: Vec<Acc> = Vec::new();
        NewtonianGravity { G: 1.0 }.acceleration(&[], &[], &mut out);
        NewtonianGravityOwnerComputes { G: 1.0 }.acceleration(&[], &[], &mut out);

        let mut one = vec![NVec3::new(1.0, 1.0, 1.0)];
        NewtonianGravity { G: 1.0 }.acceleration(&[NVec3::zeros()], &[3.0], &mut one);
        assert_eq!(one[0], NVec3::zeros());
    }

    #[test]
    fn zero_mass_body_feels_but_exerts_nothing() {
        let pos = vec![NVec3::zeros(), NVec3::new(1.0, 0.0, 0.0)];
        let mass = vec![2.0, 0.0];
        let mut out = vec![NVec3::zeros(); 2];
        NewtonianGravity { G: 1.0 }.acceleration(&pos, &mass, &mut out);
        assert_eq!(out[0], NVec3::zeros());
        assert!((out[1] - NVec3::new(-2.0, 0.0, 0.0)).norm() < 1e-12);
    }
}
