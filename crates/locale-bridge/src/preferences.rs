use serde::{Deserialize, Serialize};

/// The locale preferences reported by the platform.
///
/// This is both the value a locale query resolves with and the payload
/// delivered to change listeners. The identifier uses the platform's
/// `language` / `language_REGION` form, e.g. `"fr"` or `"en_US"`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LocalePreferences {
    /// The locale identifier, or `None` when the platform cannot tell.
    pub locale: Option<String>,
}

impl LocalePreferences {
    /// Preferences carrying a known locale identifier.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
        }
    }

    /// Preferences for a platform that reports no locale.
    pub const fn unknown() -> Self {
        Self { locale: None }
    }
}
