use thiserror::Error;

/// Errors a plan request can surface to the user. The display strings are the
/// user-facing messages; underlying causes are logged, not returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Please fill in all fields.")]
    InvalidProfile,
    #[error("Couldn't parse suggestions. Please try again.")]
    GenerationFailed,
}
