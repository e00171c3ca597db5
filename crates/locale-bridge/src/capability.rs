use crate::error::LocaleError;
use crate::event::EventSource;
use crate::preferences::LocalePreferences;
use async_trait::async_trait;

/// A platform facility that reports the device locale and announces changes
/// to it.
///
/// Implementations are not guaranteed to exist in every runtime environment.
/// [`LocaleManager`](crate::LocaleManager) is handed an
/// `Option<Arc<dyn LocaleCapability>>` at construction and treats absence as
/// permanent for its lifetime.
#[async_trait]
pub trait LocaleCapability: Send + Sync {
    /// Queries the platform for the current locale.
    ///
    /// # Errors
    ///
    /// Whatever the platform reports; the adapter forwards it unmodified.
    async fn get_locale(&self) -> Result<LocalePreferences, LocaleError>;

    /// The event source on which the platform emits
    /// [`LOCALE_CHANGED_EVENT`](crate::LOCALE_CHANGED_EVENT).
    ///
    /// The source may be shared; other code attaching listeners to it does
    /// not affect this crate's subscriptions.
    fn event_source(&self) -> &dyn EventSource;
}
