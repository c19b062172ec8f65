//! The closed registry of built-in step algorithms.
//!
//! Names are resolved when a simulation is configured, so an unknown name is a
//! [`ConfigError::UnknownMethod`] before any computation starts.

use std::{fmt, str::FromStr};

use popdyn_core::ConfigError;

use crate::step::{ForwardEuler, ModifiedEuler, ModifiedEulerConfig, Rk2, Rk4, StepAlgorithm};

/// A built-in step algorithm, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// [`ForwardEuler`], named `"FwdEuler"`.
    FwdEuler,
    /// [`ModifiedEuler`], named `"ModEuler"`.
    ModEuler,
    /// [`Rk2`], named `"RK2"`.
    Rk2,
    /// [`Rk4`], named `"RK4"`.
    Rk4,
}

impl Method {
    /// Every built-in method, in registry order.
    pub const ALL: [Method; 4] = [Method::FwdEuler, Method::ModEuler, Method::Rk2, Method::Rk4];

    /// Returns the registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::FwdEuler => "FwdEuler",
            Method::ModEuler => "ModEuler",
            Method::Rk2 => "RK2",
            Method::Rk4 => "RK4",
        }
    }

    /// Builds the algorithm.
    ///
    /// `config` is used by [`Method::ModEuler`] and ignored by the others.
    #[must_use]
    pub fn build(self, config: ModifiedEulerConfig) -> Box<dyn StepAlgorithm + Send + Sync> {
        match self {
            Method::FwdEuler => Box::new(ForwardEuler),
            Method::ModEuler => Box::new(ModifiedEuler::new(config)),
            Method::Rk2 => Box::new(Rk2),
            Method::Rk4 => Box::new(Rk4),
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| ConfigError::UnknownMethod {
                name: name.to_string(),
                expected: Method::ALL.map(Method::name).join(", "),
            })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
