//! Loads a TOML scenario, solves it, and prints the final state.
//!
//! ```sh
//! cargo run -p popdyn-examples --example scenario -- popdyn-examples/scenarios/sir.toml --plot
//! ```

use std::env;

use anyhow::bail;
use popdyn_examples::{load_scenario, plot, summarize};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: scenario <file.toml> [--plot]");
    };
    let show_plot = args.any(|arg| arg == "--plot");

    let scenario = load_scenario(&path)?;
    let title = format!("{} ({})", path, scenario.method);
    let output = scenario.solve()?;

    println!("{}", summarize(&output));
    if show_plot {
        plot(&output, &title)?;
    }

    Ok(())
}
