//! Solves each built-in population model and charts the result.
//!
//! Close a chart window to move on to the next model. Set `RUST_LOG=debug` to
//! see solver progress.

use popdyn_examples::{plot, summarize};
use popdyn_models::{
    ContGrowth, Delay, InfecDis, LogGrowth, Output, PopModel, PreyPred, Settings, Simulation,
    Sir, Sis,
};
use popdyn_solvers::Method;

fn solve<M: PopModel>(
    model: M,
    method: Method,
    x0: &[f64],
    settings: Settings,
) -> anyhow::Result<Output> {
    let simulation = Simulation::new(model, method, x0, settings)?;
    let output = simulation.solve()?;
    log::info!("{}: {}", simulation.model().name(), summarize(&output));
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let fine = |tmax| Settings::new(0.0, tmax).with_step(1e-2);

    let runs = [
        (
            "Continuous growth",
            solve(ContGrowth::new(0.25), Method::Rk4, &[40.0], fine(10.0))?,
        ),
        (
            "Prey and predators",
            solve(
                PreyPred::new(0.1, 0.02, 0.01, 0.1),
                Method::ModEuler,
                &[40.0, 9.0],
                fine(100.0),
            )?,
        ),
        (
            "Logistic growth",
            solve(LogGrowth::new(3540.0, -0.04), Method::Rk4, &[140.0], fine(10.0))?,
        ),
        (
            "Infectious disease",
            solve(InfecDis::new(0.00025), Method::ModEuler, &[999.0, 1.0], fine(200.0))?,
        ),
        (
            "SIS epidemic",
            solve(Sis::new(0.00025, 0.1), Method::ModEuler, &[999.0, 1.0], fine(200.0))?,
        ),
        (
            "SIR epidemic",
            solve(
                Sir::new(0.00025, 0.1),
                Method::ModEuler,
                &[999.0, 1.0, 0.0],
                fine(200.0),
            )?,
        ),
        (
            "Delayed logistic growth",
            solve(
                Delay::new(12.0, 0.11, 3.0),
                Method::FwdEuler,
                &[0.8],
                Settings::new(0.0, 30.0).with_step(0.05),
            )?,
        ),
    ];

    for (title, output) in &runs {
        plot(output, title)?;
    }

    Ok(())
}
