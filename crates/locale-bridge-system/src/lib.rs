#![doc = include_str!("../README.md")]

use async_trait::async_trait;
use locale_bridge::{
    EventEmitter, EventSource, LOCALE_CHANGED_EVENT, LocaleCapability, LocaleError, LocaleManager,
    LocalePreferences,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Reads the locale the operating system currently reports, if any.
pub type LocaleReader = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// [`LocaleCapability`] backed by the operating system's locale setting.
///
/// Keeps the last observed locale so that configuration changes which do not
/// actually move the locale produce no event.
pub struct SystemLocaleCapability {
    reader: LocaleReader,
    observed: RwLock<Option<String>>,
    emitter: EventEmitter,
}

impl SystemLocaleCapability {
    /// Probes the operating system and returns the capability when it
    /// reports a locale, `None` otherwise.
    ///
    /// Call once at startup; availability does not change afterwards.
    pub fn detect() -> Option<Self> {
        Self::with_reader(Arc::new(sys_locale::get_locale))
    }

    /// Builds the capability over a custom locale reader.
    ///
    /// Returns `None` when the reader reports no locale at construction
    /// time, mirroring [`detect`](Self::detect) on a platform without the
    /// facility.
    pub fn with_reader(reader: LocaleReader) -> Option<Self> {
        let initial = normalize(&reader()?);
        tracing::debug!(locale = %initial, "system locale capability detected");
        Some(Self {
            reader,
            observed: RwLock::new(Some(initial)),
            emitter: EventEmitter::new(),
        })
    }

    fn read_current(&self) -> Option<String> {
        (self.reader)().map(|raw| normalize(&raw))
    }

    /// Re-reads the OS locale after a host configuration change and emits
    /// [`LOCALE_CHANGED_EVENT`] when it differs from the last observation.
    pub fn configuration_changed(&self) {
        let current = self.read_current();
        {
            let mut observed = self.observed.write();
            if *observed == current {
                return;
            }
            *observed = current.clone();
        }
        tracing::debug!(locale = ?current, "device locale changed");
        self.emitter
            .emit(LOCALE_CHANGED_EVENT, &LocalePreferences { locale: current });
    }
}

impl fmt::Debug for SystemLocaleCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemLocaleCapability")
            .field("observed", &*self.observed.read())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LocaleCapability for SystemLocaleCapability {
    async fn get_locale(&self) -> Result<LocalePreferences, LocaleError> {
        // Each query re-reads the OS setting; the recorded observation keeps
        // configuration_changed from re-announcing a value a query already saw.
        let locale = self.read_current();
        *self.observed.write() = locale.clone();
        Ok(LocalePreferences { locale })
    }

    fn event_source(&self) -> &dyn EventSource {
        &self.emitter
    }
}

/// Builds a [`LocaleManager`] over the detected system capability.
pub fn system_locale_manager() -> LocaleManager {
    LocaleManager::new(
        SystemLocaleCapability::detect()
            .map(|capability| Arc::new(capability) as Arc<dyn LocaleCapability>),
    )
}

/// Renders an OS-reported locale tag as `language` or `language_REGION`.
///
/// Values that do not parse as a language identifier pass through untouched.
fn normalize(raw: &str) -> String {
    match raw.parse::<LanguageIdentifier>() {
        Ok(lang) => match lang.region {
            Some(region) => format!("{}_{}", lang.language, region),
            None => lang.language.to_string(),
        },
        Err(_) => raw.to_owned(),
    }
}
