use thiserror::Error;

/// Errors surfaced by [`LocaleManager`](crate::LocaleManager).
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The platform does not expose a locale capability in this process.
    ///
    /// This condition is permanent; retrying a failed query cannot succeed.
    #[error("native locale capability is unavailable")]
    CapabilityUnavailable,

    /// A failure reported by the platform capability itself, passed through
    /// unmodified.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}
