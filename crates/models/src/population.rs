//! Pre-built population models.
//!
//! Each model is plain parameter data implementing [`PopModel`](crate::PopModel).

mod cont_growth;
mod delay;
mod infec_dis;
mod log_growth;
mod prey_pred;
mod sir;
mod sis;

pub use cont_growth::ContGrowth;
pub use delay::Delay;
pub use infec_dis::InfecDis;
pub use log_growth::LogGrowth;
pub use prey_pred::PreyPred;
pub use sir::Sir;
pub use sis::Sis;

use popdyn_core::{DerivativeError, State};

/// Fails unless `state` has exactly `expected` components.
fn require_dim(state: &State, expected: usize) -> Result<(), DerivativeError> {
    if state.dim() == expected {
        Ok(())
    } else {
        Err(DerivativeError::StateDimension {
            expected,
            found: state.dim(),
        })
    }
}
