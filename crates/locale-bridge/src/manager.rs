use crate::capability::LocaleCapability;
use crate::error::LocaleError;
use crate::event::{LOCALE_CHANGED_EVENT, Subscription};
use crate::preferences::LocalePreferences;
use std::fmt;
use std::sync::Arc;

/// Adapter over an optional platform locale capability.
///
/// Presence of the capability is decided once, at construction, and never
/// changes afterwards: the manager is either capability-present or
/// capability-absent for its whole lifetime.
pub struct LocaleManager {
    capability: Option<Arc<dyn LocaleCapability>>,
}

impl LocaleManager {
    /// Creates a manager over `capability`.
    pub fn new(capability: Option<Arc<dyn LocaleCapability>>) -> Self {
        if capability.is_none() {
            tracing::debug!(
                "locale capability unavailable; queries will fail and listener registration is a no-op"
            );
        }
        Self { capability }
    }

    /// Whether the platform capability is present.
    pub fn is_available(&self) -> bool {
        self.capability.is_some()
    }

    /// Queries the current device locale.
    ///
    /// Single-shot: every call re-queries the capability; nothing is cached
    /// and nothing is retried.
    ///
    /// # Errors
    ///
    /// [`LocaleError::CapabilityUnavailable`] when no capability is present.
    /// Otherwise exactly what the capability itself returned, unmodified.
    pub async fn get_locale(&self) -> Result<LocalePreferences, LocaleError> {
        match &self.capability {
            Some(capability) => capability.get_locale().await,
            None => Err(LocaleError::CapabilityUnavailable),
        }
    }

    /// Registers `listener` for locale-change events.
    ///
    /// Returns the handle that removes the listener again. When the
    /// capability is absent this returns `None` without raising an error and
    /// `listener` is never invoked; callers may therefore subscribe
    /// unconditionally. Registration is synchronous and delivery order among
    /// listeners follows the underlying event source's registration order.
    pub fn add_change_listener<F>(&self, listener: F) -> Option<Subscription>
    where
        F: Fn(&LocalePreferences) + Send + Sync + 'static,
    {
        let capability = self.capability.as_ref()?;
        Some(
            capability
                .event_source()
                .subscribe(LOCALE_CHANGED_EVENT, Arc::new(listener)),
        )
    }
}

impl fmt::Debug for LocaleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleManager")
            .field("available", &self.is_available())
            .finish()
    }
}
