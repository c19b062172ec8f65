//! Shared helpers for the popdyn example applications.

use std::{fs, path::Path};

use anyhow::Context;
use popdyn_models::{Output, Scenario};
use popdyn_plot::PlotApp;

/// Reads a TOML scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid scenario.
pub fn load_scenario(path: impl AsRef<Path>) -> anyhow::Result<Scenario> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid scenario {}", path.display()))
}

/// Formats the final row of a solved trajectory as `label = value` pairs.
#[must_use]
pub fn summarize(output: &Output) -> String {
    let time = output.times[output.len() - 1];
    let values = output
        .labels
        .iter()
        .zip(output.last_state())
        .map(|(label, value)| format!("{label} = {value:.4}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("t = {time}: {values}")
}

/// Opens a chart of `output` with the given title.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn plot(output: &Output, title: &str) -> anyhow::Result<()> {
    PlotApp::from_output(output)
        .with_title(title)
        .run()
        .map_err(|err| anyhow::anyhow!("failed to open plot window: {err}"))
}
