use std::time::Instant;

use crate::configuration::config::EngineKind;
use crate::simulation::engine::build_engine;
use crate::simulation::forces::{Acceleration, NewtonianGravity, NewtonianGravityOwnerComputes};
use crate::simulation::history::HistoryLog;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyState, BodyStateVec, NVec3};

/// Deterministic cloud of `n` unit-mass bodies at rest, no rand needed
pub fn make_body_states(n: usize) -> BodyStateVec {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            BodyState::new(x, NVec3::zeros(), 1.0)
        })
        .collect()
}

/// Time one force pass of each gravity evaluator over a range of N
pub fn bench_gravity(ns: &[usize]) {
    println!("N,symmetric_ms,owner_computes_ms");

    for &n in ns {
        let body_states = make_body_states(n);
        let pos: Vec<_> = body_states.iter().map(|b| b.x).collect();
        let mass: Vec<_> = body_states.iter().map(|b| b.m).collect();
        let mut out = vec![NVec3::zeros(); n];

        let symmetric = NewtonianGravity { G: 1.0 };
        let owner = NewtonianGravityOwnerComputes { G: 1.0 };

        // Warm up
        symmetric.acceleration(&pos, &mass, &mut out);
        owner.acceleration(&pos, &mass, &mut out);

        let t0 = Instant::now();
        symmetric.acceleration(&pos, &mass, &mut out);
        let ms_symmetric = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        owner.acceleration(&pos, &mass, &mut out);
        let ms_owner = t1.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6},{:.6}", n, ms_symmetric, ms_owner);
    }
}

/// Full engine runs (history disabled), milliseconds per step
pub fn bench_engines(ns: &[usize], steps: usize) -> anyhow::Result<()> {
    println!("N,shared_acc_ms,owner_computes_ms");

    for &n in ns {
        let mut per_step = Vec::with_capacity(2);
        for kind in [EngineKind::SharedAcc, EngineKind::OwnerComputes] {
            let mut engine = build_engine(kind, Parameters::default(), HistoryLog::disabled());
            engine.init(make_body_states(n))?;

            let t0 = Instant::now();
            engine.execute(1e-3, steps)?;
            per_step.push(t0.elapsed().as_secs_f64() * 1000.0 / steps.max(1) as f64);
        }
        println!("{},{:.6},{:.6}", n, per_step[0], per_step[1]);
    }
    Ok(())
}
