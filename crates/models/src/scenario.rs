use popdyn_core::{ConfigError, State};
use popdyn_solvers::integrate::Error;
use serde::{Deserialize, Serialize};

use crate::{
    ContGrowth, Delay, InfecDis, LogGrowth, Output, PopModel, PreyPred, Settings, Simulation,
    Sir, Sis, settings::DEFAULT_STEP,
};

/// A population model chosen by name, with its parameters.
///
/// Serialized with a `model` tag next to the parameters:
///
/// ```toml
/// model = "PreyPred"
/// alpha = 0.1
/// beta = 0.02
/// delta = 0.01
/// gamma = 0.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum ModelSpec {
    ContGrowth(ContGrowth),
    LogGrowth(LogGrowth),
    PreyPred(PreyPred),
    InfecDis(InfecDis),
    #[serde(rename = "SIS")]
    Sis(Sis),
    #[serde(rename = "SIR")]
    Sir(Sir),
    Delay(Delay),
}

impl ModelSpec {
    /// Builds the model.
    #[must_use]
    pub fn into_model(self) -> Box<dyn PopModel + Send + Sync> {
        match self {
            ModelSpec::ContGrowth(model) => Box::new(model),
            ModelSpec::LogGrowth(model) => Box::new(model),
            ModelSpec::PreyPred(model) => Box::new(model),
            ModelSpec::InfecDis(model) => Box::new(model),
            ModelSpec::Sis(model) => Box::new(model),
            ModelSpec::Sir(model) => Box::new(model),
            ModelSpec::Delay(model) => Box::new(model),
        }
    }
}

/// An initial state given as one number or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialState {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl From<InitialState> for State {
    fn from(initial: InitialState) -> Self {
        match initial {
            InitialState::Scalar(value) => State::from(value),
            InitialState::Vector(values) => State::from(values),
        }
    }
}

/// A complete, serializable description of one simulation run.
///
/// ```
/// use popdyn_models::Scenario;
///
/// let scenario: Scenario = serde_json::from_str(
///     r#"{ "model": "ContGrowth", "k": 0.1, "x0": 100, "method": "RK4",
///          "tmin": 0, "tmax": 10, "h": 1 }"#,
/// )?;
///
/// let output = scenario.solve()?;
/// assert_eq!(output.len(), 11);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub model: ModelSpec,
    pub x0: InitialState,
    pub method: String,
    pub tmin: f64,
    pub tmax: f64,
    #[serde(default = "default_step")]
    pub h: f64,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub max_iters: Option<usize>,
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

impl Scenario {
    /// Returns the solver settings described by this scenario.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new(self.tmin, self.tmax).with_step(self.h);
        if let Some(eps) = self.eps {
            settings = settings.with_eps(eps);
        }
        if let Some(max_iters) = self.max_iters {
            settings = settings.with_max_iters(max_iters);
        }
        settings
    }

    /// Builds a validated simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown method name, an invalid grid
    /// or tolerance, or an initial state the model cannot accept.
    pub fn into_simulation(
        self,
    ) -> Result<Simulation<Box<dyn PopModel + Send + Sync>>, ConfigError> {
        let settings = self.settings();
        Simulation::new(
            self.model.into_model(),
            self.method,
            State::from(self.x0),
            settings,
        )
    }

    /// Builds and solves the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the scenario is invalid and
    /// [`Error::Step`] if a step fails.
    pub fn solve(self) -> Result<Output, Error> {
        let simulation = self.into_simulation()?;
        simulation.solve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn parses_toml_with_parameter_aliases() {
        let scenario: Scenario = toml::from_str(
            r#"
            model = "LogGrowth"
            M = 3540
            r = -0.04
            x0 = 140
            method = "RK4"
            tmin = 0
            tmax = 10
            "#,
        )
        .unwrap();

        assert_eq!(scenario.model, ModelSpec::LogGrowth(LogGrowth::new(3540.0, -0.04)));
        assert_eq!(scenario.x0, InitialState::Scalar(140.0));
        assert_relative_eq!(scenario.h, DEFAULT_STEP);
        assert_eq!(scenario.eps, None);
    }

    #[test]
    fn parses_renamed_models_and_vector_state() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "model": "SIR", "beta": 0.00025, "gamma": 0.1,
                "x0": [999, 1, 0], "method": "ModEuler",
                "tmin": 0, "tmax": 200, "h": 0.01, "eps": 1e-8, "max_iters": 50
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.model, ModelSpec::Sir(Sir::new(0.00025, 0.1)));
        assert_eq!(scenario.x0, InitialState::Vector(vec![999.0, 1.0, 0.0]));

        let settings = scenario.settings();
        assert_relative_eq!(settings.eps, 1e-8);
        assert_eq!(settings.max_iters, 50);
    }

    #[test]
    fn unknown_model_fails_to_parse() {
        let result = serde_json::from_str::<Scenario>(
            r#"{ "model": "Gompertz", "x0": 1, "method": "RK4", "tmin": 0, "tmax": 1 }"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_method_fails_before_solving() {
        let scenario: Scenario = serde_json::from_str(
            r#"{ "model": "ContGrowth", "k": 0.1, "x0": 1, "method": "Heun",
                 "tmin": 0, "tmax": 1 }"#,
        )
        .unwrap();

        match scenario.into_simulation() {
            Err(err) => assert!(matches!(err, ConfigError::UnknownMethod { .. })),
            Ok(simulation) => panic!("accepted {}", simulation.algorithm().name()),
        }
    }

    #[test]
    fn model_dimension_is_checked() {
        let scenario: Scenario = serde_json::from_str(
            r#"{ "model": "PreyPred", "alpha": 0.1, "beta": 0.02, "delta": 0.01,
                 "gamma": 0.1, "x0": 40, "method": "RK4", "tmin": 0, "tmax": 1 }"#,
        )
        .unwrap();

        assert!(matches!(
            scenario.solve(),
            Err(Error::Config(ConfigError::DimensionMismatch {
                expected: 2,
                found: 1
            }))
        ));
    }
}
