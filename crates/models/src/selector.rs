use std::fmt;

use popdyn_core::ConfigError;
use popdyn_solvers::{Method, ModifiedEulerConfig, StepAlgorithm};

use crate::Settings;

/// Chooses the step algorithm for a simulation.
///
/// Either a registry name (`"FwdEuler"`, `"ModEuler"`, `"RK2"`, `"RK4"`), a
/// [`Method`], or a custom algorithm instance. Names are resolved when the
/// simulation is built.
pub enum Selector {
    Name(String),
    Method(Method),
    Custom(Box<dyn StepAlgorithm + Send + Sync>),
}

impl Selector {
    /// Wraps a custom algorithm.
    pub fn custom<A: StepAlgorithm + Send + Sync + 'static>(algorithm: A) -> Self {
        Self::Custom(Box::new(algorithm))
    }

    /// Resolves the selector into an algorithm.
    ///
    /// The Modified Euler tolerance and iteration cap in `settings` are only
    /// validated when they are used, that is when the selector names
    /// [`Method::ModEuler`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownMethod`] if a name is not registered, or
    /// the Modified Euler config error for Modified Euler.
    pub fn resolve(
        self,
        settings: &Settings,
    ) -> Result<Box<dyn StepAlgorithm + Send + Sync>, ConfigError> {
        let method = match self {
            Selector::Name(name) => name.parse::<Method>()?,
            Selector::Method(method) => method,
            Selector::Custom(algorithm) => return Ok(algorithm),
        };

        let config = match method {
            Method::ModEuler => settings.modified_euler()?,
            Method::FwdEuler | Method::Rk2 | Method::Rk4 => ModifiedEulerConfig::default(),
        };
        Ok(method.build(config))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Selector::Method(method) => f.debug_tuple("Method").field(method).finish(),
            Selector::Custom(algorithm) => f.debug_tuple("Custom").field(&algorithm.name()).finish(),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Method> for Selector {
    fn from(method: Method) -> Self {
        Self::Method(method)
    }
}

impl From<Box<dyn StepAlgorithm + Send + Sync>> for Selector {
    fn from(algorithm: Box<dyn StepAlgorithm + Send + Sync>) -> Self {
        Self::Custom(algorithm)
    }
}
