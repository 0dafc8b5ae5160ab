use nbsim::{bench_engines, bench_gravity};

fn main() -> anyhow::Result<()> {
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 5;

    println!("# single force pass");
    bench_gravity(&ns);

    println!("# full engine, {steps} steps");
    bench_engines(&ns, steps)?;

    Ok(())
}
