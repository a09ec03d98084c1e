//! Error types for wizard events.

use thiserror::Error;
use tokio::runtime::TryCurrentError;

use crate::model::WizardStep;
use crate::pricing::PricingError;
use crate::validate::{Rejection, ValidationError};

/// Top-level error returned by [`Wizard::apply`](super::Wizard::apply).
#[derive(Debug, Error)]
pub enum WizardError {
    /// User input failed a step validator. The wizard did not move.
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// The event is not offered on the current step.
    #[error("{event} is not available on the {step} step")]
    OutOfOrder {
        event: &'static str,
        step: WizardStep,
    },

    #[error("no wizard step with index {0}")]
    InvalidStep(u8),

    #[error("pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// The tracking view needs a Tokio runtime for its timer.
    #[error("tracking view requires a Tokio runtime")]
    NoRuntime(#[from] TryCurrentError),
}

impl From<ValidationError> for WizardError {
    fn from(error: ValidationError) -> Self {
        WizardError::Rejected(error.into())
    }
}

impl WizardError {
    /// Field messages to show inline, empty for non-validation errors.
    pub fn messages(&self) -> &[ValidationError] {
        match self {
            WizardError::Rejected(rejection) => rejection.errors(),
            _ => &[],
        }
    }
}
